//! # webmark
//!
//! Convert a region of an HTML document (one element subtree, or a detected
//! table) to Markdown.
//!
//! ## Design
//!
//! The converter is a pure function of a read-only [`Node`] tree. It never
//! performs I/O and keeps no state between calls:
//!
//! - **Parser agnostic**: any HTML parser can produce the [`Node`] structure
//! - **Fixed rule table**: every supported tag maps to one rule; unknown tags
//!   are transparent containers
//! - **Explicit context**: list depth, the preformatted flag and the parent tag
//!   travel down the recursion instead of being looked up
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use webmark::{convert, Node};
//!
//! let h2 = Node::element("h2").with_child(Node::text("Hello World"));
//! assert_eq!(convert(Some(&h2)), "## Hello World");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use webmark::{convert, parse_html};
//!
//! let node = parse_html("<ul><li>One</li><li>Two</li></ul>");
//! assert_eq!(convert(Some(&node)), "- One\n- Two");
//! ```

mod convert;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod rules;
mod table;
mod utilities;

use std::sync::OnceLock;

pub use convert::{clean_markdown, Context, MarkdownFormatter};
#[cfg(feature = "html")]
pub use html::{parse_document, parse_html, select_first};
pub use node::{Node, NodeRef, NodeType};
pub use table::{detect_tables, table_to_markdown};
pub use utilities::{clean_cell_text, collapse_whitespace, is_block};

/// Error type for webmark operations
#[derive(Debug, thiserror::Error)]
pub enum WebmarkError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

pub type Result<T> = std::result::Result<T, WebmarkError>;

/// Convert a subtree to Markdown with the shared default formatter.
///
/// `None` yields an empty string.
pub fn convert(root: Option<&Node>) -> String {
    static FORMATTER: OnceLock<MarkdownFormatter> = OnceLock::new();
    FORMATTER.get_or_init(MarkdownFormatter::new).convert(root)
}
