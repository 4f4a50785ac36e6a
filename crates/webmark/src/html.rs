//! HTML parsing support.
//!
//! This module parses HTML strings with scraper and converts the result to the
//! [`Node`] structure used by the formatter.

use scraper::{ElementRef, Html, Node as ScraperNode, Selector};

use crate::node::Node;
use crate::{Result, WebmarkError};

/// Parse an HTML fragment into a Node tree rooted at an `html` element.
///
/// # Example
///
/// ```rust
/// use webmark::{parse_html, MarkdownFormatter};
///
/// let node = parse_html("<h1>Hello <em>World</em></h1>");
/// let markdown = MarkdownFormatter::new().convert(Some(&node));
/// assert_eq!(markdown, "# Hello World");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Parse a full HTML document into a Node tree rooted at its `html` element.
pub fn parse_document(html: &str) -> Node {
    let document = Html::parse_document(html);
    scraper_to_node(document.root_element())
}

/// Parse a document and return the first element matching a CSS selector.
pub fn select_first(html: &str, selector: &str) -> Result<Option<Node>> {
    let selector = Selector::parse(selector)
        .map_err(|e| WebmarkError::InvalidSelector(format!("{selector}: {e}")))?;
    let document = Html::parse_document(html);
    let found = document.select(&selector).next().map(scraper_to_node);
    Ok(found)
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let mut node = Node::element_with_attrs(element.value().name(), element.value().attrs());

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}
