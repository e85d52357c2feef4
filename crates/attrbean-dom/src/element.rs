//! Element capability consumed by the applier and processors.

use crate::HtmlElement;

/// Mutable view of a template element.
///
/// Implemented by the host's DOM node type. [`HtmlElement`] is the in-memory
/// implementation shipped with this crate.
pub trait Element {
    /// Value of the named attribute, if present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Whether the named attribute is present.
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Set an attribute, replacing any existing value.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Remove an attribute. Removing an absent attribute is a no-op.
    fn remove_attribute(&mut self, name: &str);

    /// Remove every child node.
    fn clear_children(&mut self);

    /// Append child nodes.
    fn append_children(&mut self, children: Vec<Node>);
}

/// Child node of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Plain text, escaped on output.
    Text {
        /// Text content.
        content: String,
        /// Whether the host should run processors over this node again.
        reprocess: bool,
    },
    /// Raw markup, emitted verbatim.
    Markup {
        /// Markup content.
        content: String,
        /// Whether the host should run processors over this node again.
        reprocess: bool,
    },
    /// Nested element.
    Element(HtmlElement),
}

impl Node {
    /// Plain text node that is never reprocessed.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            reprocess: false,
        }
    }

    /// Markup node that is never reprocessed.
    pub fn markup(content: impl Into<String>) -> Self {
        Self::Markup {
            content: content.into(),
            reprocess: false,
        }
    }

    /// Whether the host should run processors over this node again.
    #[must_use]
    pub fn is_reprocessable(&self) -> bool {
        match self {
            Self::Text { reprocess, .. } | Self::Markup { reprocess, .. } => *reprocess,
            Self::Element(_) => true,
        }
    }
}

impl From<HtmlElement> for Node {
    fn from(element: HtmlElement) -> Self {
        Self::Element(element)
    }
}
