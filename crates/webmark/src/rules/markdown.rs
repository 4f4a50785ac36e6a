//! Built-in element rules.

use super::{Filter, Rule};
use crate::node::NodeRef;
use crate::table::table_to_markdown;
use crate::utilities::{code_language, flat_text, is_block};

/// Create the built-in rule table
pub fn markdown_rules() -> Vec<Rule> {
    vec![
        heading_rule(),
        paragraph_rule(),
        line_break_rule(),
        strong_rule(),
        emphasis_rule(),
        preformatted_code_rule(),
        code_rule(),
        code_block_rule(),
        link_rule(),
        image_rule(),
        list_rule(),
        list_item_rule(),
        table_rule(),
        blockquote_rule(),
        horizontal_rule(),
        container_rule(),
    ]
}

fn heading_rule() -> Rule {
    Rule::new(
        Filter::AnyOf(&["h1", "h2", "h3", "h4", "h5", "h6"]),
        |node, _, out| {
            let level: usize = node.tag_name()[1..].parse().unwrap_or(1);
            out.push(&format!("\n{} {}\n\n", "#".repeat(level), flat_text(node.node)));
        },
    )
}

fn paragraph_rule() -> Rule {
    Rule::for_tag("p", |node, ctx, out| {
        out.children(node, ctx);
        out.push("\n\n");
    })
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _, out| out.push("  \n"))
}

fn strong_rule() -> Rule {
    Rule::for_tags(&["strong", "b"], |node, _, out| {
        out.push(&format!("**{}**", flat_text(node.node)));
    })
}

fn emphasis_rule() -> Rule {
    Rule::for_tags(&["em", "i"], |node, _, out| {
        out.push(&format!("*{}*", flat_text(node.node)));
    })
}

fn preformatted_code_rule() -> Rule {
    // Inside <pre> the block rule owns the fences; the code is raw text.
    Rule::new(
        Filter::when(|tag, node, ctx| {
            tag == "code" && (ctx.in_pre || node.parent_tag() == Some("pre"))
        }),
        |node, ctx, out| out.children(node, &ctx.enter_pre()),
    )
}

fn code_rule() -> Rule {
    Rule::for_tag("code", |node, _, out| {
        out.push(&format!("`{}`", flat_text(node.node)));
    })
}

fn code_block_rule() -> Rule {
    Rule::for_tag("pre", |node, ctx, out| {
        let code_node = node.node.find_descendant("code");
        let language = code_node
            .and_then(|code| code.attr("class"))
            .and_then(code_language)
            .unwrap_or("");

        // Line-number gutters and other siblings of <code> are dropped.
        let ctx = ctx.enter_pre();
        let code = match code_node {
            Some(inner) => out.render_children(&NodeRef::with_parent(inner, "pre"), &ctx),
            None => out.render_children(node, &ctx),
        };
        out.push(&format!("\n```{language}\n{code}\n```\n\n"));
    })
}

fn link_rule() -> Rule {
    Rule::for_tag("a", |node, _, out| {
        let href = node.attr("href").unwrap_or("");
        out.push(&format!("[{}]({})", flat_text(node.node), href));
    })
}

fn image_rule() -> Rule {
    Rule::for_tag("img", |node, _, out| {
        let alt = node.attr("alt").unwrap_or("");
        let src = node.attr("src").unwrap_or("");
        out.push(&format!("![{alt}]({src})"));
    })
}

fn list_rule() -> Rule {
    Rule::for_tags(&["ul", "ol"], |node, ctx, out| {
        let ordered = node.tag_name() == "ol";
        let indent = "  ".repeat(ctx.list_depth);

        out.push("\n");
        for (index, item) in node.node.element_children().filter(|c| c.is_tag("li")).enumerate() {
            let bullet = if ordered {
                format!("{}.", index + 1)
            } else {
                "-".to_string()
            };
            out.push(&format!("{indent}{bullet} {}\n", flat_text(item)));
        }
        out.push("\n");
    })
}

fn list_item_rule() -> Rule {
    // Only reached when an <li> is converted outside its list rule.
    Rule::for_tag("li", |node, ctx, out| {
        out.children(node, &ctx.enter_list());
    })
}

fn table_rule() -> Rule {
    Rule::for_tag("table", |node, _, out| {
        out.push(&format!("\n{}\n", table_to_markdown(node.node)));
    })
}

fn blockquote_rule() -> Rule {
    Rule::for_tag("blockquote", |node, _, out| {
        out.push(&format!("\n> {}\n\n", flat_text(node.node)));
    })
}

fn horizontal_rule() -> Rule {
    Rule::for_tag("hr", |_, _, out| out.push("\n---\n\n"))
}

fn container_rule() -> Rule {
    Rule::for_tags(&["div", "span", "section", "article", "main"], |node, ctx, out| {
        out.children(node, ctx);
        if is_block(node.tag_name()) {
            out.push("\n");
        }
    })
}
