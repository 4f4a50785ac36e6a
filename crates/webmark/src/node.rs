//! Read-only DOM node structure for HTML to Markdown conversion.
//!
//! The converter never owns or mutates the page's DOM. Any parser (scraper,
//! a browser bridge, a hand-built test tree) converts its output into this
//! structure and hands a reference to the converter.

use indexmap::IndexMap;

/// The kinds of node the converter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
    Comment,
    /// Document or fragment root
    Document,
}

/// A DOM node: an element with attributes and ordered children, or a text leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub node_type: NodeType,

    /// Lower-cased tag name for elements, `#text`, `#comment` or `#document` otherwise
    pub name: String,

    /// Raw content for text and comment nodes
    pub value: Option<String>,

    /// Attributes in source order. Names are lower-cased.
    pub attributes: IndexMap<String, String>,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Node {
    fn leaf(node_type: NodeType, name: &str, value: Option<&str>) -> Self {
        Self {
            node_type,
            name: name.to_string(),
            value: value.map(str::to_string),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn element(tag_name: &str) -> Self {
        Self::leaf(NodeType::Element, &tag_name.to_ascii_lowercase(), None)
    }

    /// Element with attributes; later duplicates overwrite earlier ones.
    pub fn element_with_attrs<'a>(
        tag_name: &str,
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut node = Self::element(tag_name);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    pub fn text(content: &str) -> Self {
        Self::leaf(NodeType::Text, "#text", Some(content))
    }

    pub fn comment(content: &str) -> Self {
        Self::leaf(NodeType::Comment, "#comment", Some(content))
    }

    pub fn document() -> Self {
        Self::leaf(NodeType::Document, "#document", None)
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Element with the given lower-case tag name?
    pub fn is_tag(&self, tag: &str) -> bool {
        self.is_element() && self.name == tag
    }

    pub fn tag_name(&self) -> &str {
        &self.name
    }

    /// Attribute lookup, case-insensitive on the name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name.to_ascii_lowercase().as_str())
            .map(String::as_str)
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Builder form of [`Node::add_child`]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// All descendants in document order (pre-order), excluding `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// First descendant element with the given tag name
    pub fn find_descendant(&self, tag: &str) -> Option<&Node> {
        self.descendants().find(|n| n.is_tag(tag))
    }

    /// Concatenated text of all descendant text nodes; comments are skipped
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self.node_type {
            NodeType::Text => out.push_str(self.value.as_deref().unwrap_or_default()),
            NodeType::Comment => {}
            _ => {
                for child in &self.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Pre-order iterator over a node's descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A borrowed node plus the tag of the element it was reached from.
///
/// Rules that depend on their parent (`code` inside `pre`) read it from here;
/// `Node` itself keeps no parent pointers.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub node: &'a Node,
    parent_tag: Option<&'a str>,
}

impl<'a> NodeRef<'a> {
    /// A root reference, no parent known
    pub fn new(node: &'a Node) -> Self {
        Self {
            node,
            parent_tag: None,
        }
    }

    pub fn with_parent(node: &'a Node, parent_tag: &'a str) -> Self {
        Self {
            node,
            parent_tag: Some(parent_tag),
        }
    }

    pub fn parent_tag(&self) -> Option<&'a str> {
        self.parent_tag
    }

    /// References to this node's children, each carrying this node as parent
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> {
        let node = self.node;
        node.children
            .iter()
            .map(move |child| NodeRef::with_parent(child, node.tag_name()))
    }

    pub fn tag_name(&self) -> &'a str {
        self.node.tag_name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attr(name)
    }

    pub fn text_content(&self) -> String {
        self.node.text_content()
    }
}
