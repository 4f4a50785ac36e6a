//! MarkdownFormatter - the main entry point for DOM to Markdown conversion.

use crate::node::{Node, NodeRef, NodeType};
use crate::rules::Rules;
use crate::table;
use crate::utilities::collapse_whitespace;

/// Formatting context threaded through the recursion.
///
/// Created fresh for every top-level call; children receive a derived copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    /// Number of list levels entered so far
    pub list_depth: usize,
    /// Inside a `pre` block: text is emitted raw
    pub in_pre: bool,
}

impl Context {
    /// Context for the content of a list item
    pub fn enter_list(self) -> Self {
        Self {
            list_depth: self.list_depth + 1,
            ..self
        }
    }

    /// Context for the content of a preformatted block
    pub fn enter_pre(self) -> Self {
        Self {
            in_pre: true,
            ..self
        }
    }
}

/// Growing output buffer.
///
/// Text runs request a separator space instead of writing one. The space is
/// written before the next inline segment, and dropped before a segment that
/// already starts with whitespace.
#[derive(Debug, Default)]
pub struct MarkdownWriter {
    out: String,
    pending_space: bool,
}

impl MarkdownWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment
    pub fn push(&mut self, segment: &str) {
        if segment.is_empty() {
            return;
        }
        if std::mem::take(&mut self.pending_space)
            && !segment.starts_with(char::is_whitespace)
            && !self.out.is_empty()
            && !self.out.ends_with(char::is_whitespace)
        {
            self.out.push(' ');
        }
        self.out.push_str(segment);
    }

    /// Request a separator before the next inline segment
    pub fn space(&mut self) {
        self.pending_space = true;
    }

    /// Finish writing. A pending separator is dropped.
    pub fn finish(self) -> String {
        self.out
    }
}

/// Handle given to rules: writes segments and walks children.
pub struct Emitter<'a> {
    formatter: &'a MarkdownFormatter,
    writer: &'a mut MarkdownWriter,
}

impl Emitter<'_> {
    /// Append a segment
    pub fn push(&mut self, segment: &str) {
        self.writer.push(segment);
    }

    /// Convert every child of `node` in order
    pub fn children(&mut self, node: &NodeRef, ctx: &Context) {
        for child in node.children() {
            self.formatter.walk(&child, ctx, self.writer);
        }
    }

    /// Convert the children of `node` into a separate buffer
    pub fn render_children(&self, node: &NodeRef, ctx: &Context) -> String {
        let mut writer = MarkdownWriter::new();
        for child in node.children() {
            self.formatter.walk(&child, ctx, &mut writer);
        }
        writer.finish()
    }
}

/// The converter: a fixed rule table plus the recursive walk.
///
/// Stateless between calls, so one instance can be shared across threads.
pub struct MarkdownFormatter {
    rules: Rules,
}

impl MarkdownFormatter {
    /// Create a formatter with the built-in rules
    pub fn new() -> Self {
        Self {
            rules: Rules::new(),
        }
    }

    /// Convert a subtree to cleaned-up Markdown.
    ///
    /// An absent root yields an empty string.
    pub fn convert(&self, root: Option<&Node>) -> String {
        match root {
            Some(node) => clean_markdown(&self.element_to_markdown(node)),
            None => String::new(),
        }
    }

    /// Convert a subtree to Markdown without the final cleanup.
    ///
    /// A `table` root goes straight to the table transducer.
    pub fn element_to_markdown(&self, root: &Node) -> String {
        if root.is_tag("table") {
            return table::table_to_markdown(root);
        }

        let mut writer = MarkdownWriter::new();
        self.walk(&NodeRef::new(root), &Context::default(), &mut writer);
        writer.finish()
    }

    /// Convert a table element to a Markdown table
    pub fn table_to_markdown(&self, table: &Node) -> String {
        table::table_to_markdown(table)
    }

    /// Convert a single node into `writer`
    fn walk(&self, node: &NodeRef, ctx: &Context, writer: &mut MarkdownWriter) {
        match node.node.node_type {
            NodeType::Text => {
                write_text(node.node.value.as_deref().unwrap_or_default(), ctx, writer)
            }
            NodeType::Comment => {}
            NodeType::Document => self.emitter(writer).children(node, ctx),
            NodeType::Element => self.walk_element(node, ctx, writer),
        }
    }

    fn walk_element(&self, node: &NodeRef, ctx: &Context, writer: &mut MarkdownWriter) {
        if self.rules.should_remove(node, ctx) {
            return;
        }

        let mut out = self.emitter(writer);

        // Preformatted content keeps only raw text; `code` has its own rule.
        if ctx.in_pre && node.tag_name() != "code" {
            out.children(node, ctx);
            return;
        }

        match self.rules.for_node(node, ctx) {
            Some(rule) => rule.apply(node, ctx, &mut out),
            None => out.children(node, ctx),
        }
    }

    fn emitter<'a>(&'a self, writer: &'a mut MarkdownWriter) -> Emitter<'a> {
        Emitter {
            formatter: self,
            writer,
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a text node: raw inside `pre`, otherwise collapsed and trimmed with
/// separators around it.
fn write_text(raw: &str, ctx: &Context, writer: &mut MarkdownWriter) {
    if ctx.in_pre {
        writer.push(raw);
        return;
    }

    if raw.starts_with(char::is_whitespace) {
        writer.space();
    }

    let text = collapse_whitespace(raw.trim());
    writer.push(&text);
    if !raw.is_empty() {
        writer.space();
    }
}

/// Final cleanup: at most two consecutive newlines, no surrounding whitespace.
pub fn clean_markdown(markdown: &str) -> String {
    let mut newline_count = 0;
    let mut processed = String::with_capacity(markdown.len());

    for c in markdown.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                processed.push(c);
            }
        } else {
            newline_count = 0;
            processed.push(c);
        }
    }

    processed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn el(tag: &str, children: Vec<Node>) -> Node {
        children
            .into_iter()
            .fold(Node::element(tag), |parent, child| parent.with_child(child))
    }

    fn text(s: &str) -> Node {
        Node::text(s)
    }

    fn convert(node: &Node) -> String {
        MarkdownFormatter::new().convert(Some(node))
    }

    #[test]
    fn test_absent_root() {
        assert_eq!(MarkdownFormatter::new().convert(None), "");
    }

    #[test]
    fn test_heading_and_paragraph() {
        let root = el(
            "div",
            vec![
                el("h2", vec![text("Title")]),
                el(
                    "p",
                    vec![text("Body "), el("strong", vec![text("bold")]), text(" text.")],
                ),
            ],
        );
        let formatter = MarkdownFormatter::new();
        assert_eq!(
            formatter.element_to_markdown(&root),
            "\n## Title\n\nBody **bold** text.\n\n\n"
        );
        assert_eq!(convert(&root), "## Title\n\nBody **bold** text.");
    }

    #[test]
    fn test_script_is_skipped() {
        let root = el(
            "div",
            vec![text("A"), el("script", vec![text("ignored()")]), text("B")],
        );
        assert_eq!(convert(&root), "A B");
    }

    #[test]
    fn test_all_heading_levels() {
        for level in 1..=6 {
            let h = el(&format!("h{level}"), vec![text("  Head  ")]);
            assert_eq!(convert(&h), format!("{} Head", "#".repeat(level)));
        }
    }

    #[test]
    fn test_inline_formatting() {
        let p = el(
            "p",
            vec![
                el("b", vec![text(" bold ")]),
                text(" and "),
                el("i", vec![text("italic")]),
                text(" and "),
                el("em", vec![text("em")]),
                text("."),
            ],
        );
        assert_eq!(convert(&p), "**bold** and *italic* and *em*.");
    }

    #[test]
    fn test_punctuation_after_inline_element() {
        let p = el("p", vec![text("Hello "), el("b", vec![text("world")]), text("!")]);
        assert_eq!(convert(&p), "Hello **world**!");
    }

    #[test]
    fn test_line_break() {
        let p = el("p", vec![text("one"), Node::element("br"), text("two")]);
        assert_eq!(convert(&p), "one  \ntwo");
    }

    #[test]
    fn test_inline_code() {
        let p = el("p", vec![text("Run "), el("code", vec![text(" cargo ")])]);
        assert_eq!(convert(&p), "Run `cargo`");
    }

    #[test]
    fn test_fenced_code_block_keeps_raw_text() {
        let code = Node::element_with_attrs("code", [("class", "hljs language-rust")])
            .with_child(text("fn main() {\n    println!(\"hi\");\n}"));
        let pre = el("pre", vec![code]);
        assert_eq!(
            convert(&pre),
            "```rust\nfn main() {\n    println!(\"hi\");\n}\n```"
        );
    }

    #[test]
    fn test_code_block_with_highlight_spans() {
        let code = el(
            "code",
            vec![
                el("span", vec![text("let")]),
                text(" x  = "),
                el("b", vec![text("1")]),
                el("script", vec![text("x")]),
            ],
        );
        let pre = el("pre", vec![code]);
        assert_eq!(convert(&pre), "```\nlet x  = 1\n```");
    }

    #[test]
    fn test_pre_renders_only_the_code_element() {
        let code =
            Node::element_with_attrs("code", [("class", "language-js")]).with_child(text("x()"));
        let pre = el("pre", vec![el("span", vec![text("1 ")]), code]);
        assert_eq!(convert(&pre), "```js\nx()\n```");
    }

    #[test]
    fn test_pre_without_code() {
        let pre = el("pre", vec![text("a\n  b")]);
        assert_eq!(convert(&pre), "```\na\n  b\n```");
    }

    #[test]
    fn test_link_and_image() {
        let a = Node::element_with_attrs("a", [("href", "/x")]).with_child(text(" go "));
        assert_eq!(convert(&a), "[go](/x)");

        let bare = el("a", vec![text("nowhere")]);
        assert_eq!(convert(&bare), "[nowhere]()");

        let img = Node::element_with_attrs("img", [("src", "pic.png"), ("alt", "A pic")]);
        assert_eq!(convert(&img), "![A pic](pic.png)");

        let no_attrs = Node::element("img");
        assert_eq!(convert(&no_attrs), "![]()");
    }

    #[test]
    fn test_unordered_list_uses_flat_text() {
        let ul = el(
            "ul",
            vec![
                el("li", vec![text("One")]),
                text("\n"),
                el("li", vec![el("p", vec![text("Two")]), el("b", vec![text("bold")])]),
            ],
        );
        assert_eq!(convert(&ul), "- One\n- Twobold");
    }

    #[test]
    fn test_ordered_list() {
        let ol = el(
            "ol",
            vec![el("li", vec![text("First")]), el("li", vec![text("Second")])],
        );
        assert_eq!(convert(&ol), "1. First\n2. Second");
    }

    #[test]
    fn test_list_item_root_indents_nested_list() {
        let li = el(
            "li",
            vec![text("Parent"), el("ul", vec![el("li", vec![text("Child")])])],
        );
        assert_eq!(convert(&li), "Parent\n  - Child");
    }

    #[test]
    fn test_list_followed_by_paragraph() {
        let root = el(
            "div",
            vec![el("ul", vec![el("li", vec![text("a")])]), el("p", vec![text("after")])],
        );
        assert_eq!(convert(&root), "- a\n\nafter");
    }

    #[test]
    fn test_blockquote() {
        let quote = el(
            "blockquote",
            vec![el("p", vec![text("first line\n")]), el("p", vec![text("second   line")])],
        );
        assert_eq!(convert(&quote), "> first line second line");
    }

    #[test]
    fn test_horizontal_rule() {
        let root = el(
            "div",
            vec![el("p", vec![text("above")]), Node::element("hr"), el("p", vec![text("below")])],
        );
        assert_eq!(convert(&root), "above\n\n---\n\nbelow");
    }

    #[test]
    fn test_nested_table_inside_container() {
        let table = el(
            "table",
            vec![
                el("tr", vec![el("th", vec![text("H")])]),
                el("tr", vec![el("td", vec![text("v")])]),
            ],
        );
        let root = el("section", vec![el("p", vec![text("Intro")]), table]);
        assert_eq!(convert(&root), "Intro\n\n| H |\n| --- |\n| v |");
    }

    #[test]
    fn test_span_has_no_trailing_newline() {
        let root = el(
            "p",
            vec![el("span", vec![text("a")]), el("span", vec![text("b")])],
        );
        assert_eq!(convert(&root), "a b");
    }

    #[test]
    fn test_unknown_tags_are_transparent() {
        let root = el("x-card", vec![el("header", vec![el("h1", vec![text("T")])])]);
        assert_eq!(convert(&root), "# T");
    }

    #[test]
    fn test_comments_and_documents() {
        let mut doc = Node::document();
        doc.add_child(Node::comment("ignored"));
        doc.add_child(el("p", vec![text("kept")]));
        assert_eq!(convert(&doc), "kept");
    }

    #[test]
    fn test_deterministic_output() {
        let root = el(
            "article",
            vec![
                el("h1", vec![text("T")]),
                el("p", vec![text("x "), el("a", vec![text("y")])]),
            ],
        );
        let formatter = MarkdownFormatter::new();
        assert_eq!(formatter.convert(Some(&root)), formatter.convert(Some(&root)));
    }

    #[test]
    fn test_clean_markdown() {
        assert_eq!(clean_markdown("\n\n\na\n\n\n\nb\n\n"), "a\n\nb");
        assert_eq!(clean_markdown("  x  "), "x");
        assert_eq!(clean_markdown(""), "");
    }

    #[test]
    fn test_clean_markdown_is_idempotent() {
        let samples = [
            "\n# T\n\n\n\nbody  \n\n\n",
            "  - a\n- b\n\n\n\n\n> q\n",
            "```\ncode\n\n\n\n```\n\n",
            "\n\n",
        ];
        for sample in samples {
            let once = clean_markdown(sample);
            assert_eq!(clean_markdown(&once), once);
        }
    }

    #[test]
    fn test_writer_separator() {
        let mut writer = MarkdownWriter::new();
        writer.space();
        writer.push("a");
        writer.space();
        writer.push("b");
        writer.space();
        writer.push("\n");
        writer.space();
        assert_eq!(writer.finish(), "a b\n");
    }

    #[test]
    fn test_context_derivation() {
        let ctx = Context::default();
        let nested = ctx.enter_list().enter_list().enter_pre();
        assert_eq!(nested, Context { list_depth: 2, in_pre: true });
        assert_eq!(ctx, Context::default());
    }
}
