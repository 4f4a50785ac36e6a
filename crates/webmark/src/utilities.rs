//! Utility functions and constants for HTML text processing.

use crate::node::Node;

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Collapse every whitespace run to a single space
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Text content of a subtree, trimmed and whitespace-collapsed.
pub fn flat_text(node: &Node) -> String {
    collapse_whitespace(node.text_content().trim())
}

/// Clean cell text for a Markdown table row.
///
/// Trims, escapes `|`, turns newlines into spaces and collapses whitespace runs.
pub fn clean_cell_text(text: &str) -> String {
    let escaped = text.trim().replace('|', "\\|").replace('\n', " ");
    collapse_whitespace(&escaped)
}

/// Extract the `language-xxx` suffix from a class attribute.
pub fn code_language(class: &str) -> Option<&str> {
    let start = class.find("language-")? + "language-".len();
    let rest = &class[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}
