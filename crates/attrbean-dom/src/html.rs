//! In-memory HTML element.

use crate::{Element, Node};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// HTML element with insertion-ordered attributes.
///
/// # Example
///
/// ```
/// use attrbean_dom::{Element, HtmlElement, Node};
///
/// let mut link = HtmlElement::new("a").with_attr("href", "/home");
/// link.set_attribute("title", "Home & away");
/// link.append_children(vec![Node::text("<Home>")]);
///
/// assert_eq!(
///     link.to_html(),
///     r#"<a href="/home" title="Home &amp; away">&lt;Home&gt;</a>"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlElement {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl HtmlElement {
    /// Create an element with the given tag and no attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Mutable access to the children, for walking a tree.
    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Serialize this element and its descendants.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        serialize_element(self, &mut out);
        out
    }
}

impl Element for HtmlElement {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some((_, existing)) = self.attrs.iter_mut().find(|(k, _)| k == name) {
            value.clone_into(existing);
        } else {
            self.attrs.push((name.to_owned(), value.to_owned()));
        }
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    fn clear_children(&mut self) {
        self.children.clear();
    }

    fn append_children(&mut self, children: Vec<Node>) {
        self.children.extend(children);
    }
}

fn serialize_element(element: &HtmlElement, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (name, value) in &element.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_markup(value, true));
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }

    for child in &element.children {
        match child {
            Node::Text { content, .. } => out.push_str(&escape_markup(content, false)),
            Node::Markup { content, .. } => out.push_str(content),
            Node::Element(nested) => serialize_element(nested, out),
        }
    }

    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

/// Escape HTML special characters; quotes only inside attribute values.
fn escape_markup(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}
