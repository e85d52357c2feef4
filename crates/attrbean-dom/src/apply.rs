//! Application of an attribute map to an element.

use std::collections::BTreeSet;

use attrbean_core::{AttributeMap, RESERVED_CONTENT_KEYS, TEXT_KEY, UTEXT_KEY};

use crate::{Element, Node};

/// Per-attribute policy for empty values.
///
/// By default every attribute with an empty value is removed from the
/// element. Names registered with [`keep_empty`](Self::keep_empty) are set
/// to the empty string instead (`alt=""` is meaningful).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalPolicy {
    keep_empty: BTreeSet<String>,
}

impl RemovalPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `name` as an empty attribute instead of removing it.
    #[must_use]
    pub fn keep_empty(mut self, name: impl Into<String>) -> Self {
        self.keep_empty.insert(name.into());
        self
    }

    /// Whether an empty value for `name` removes the attribute.
    #[must_use]
    pub fn remove_if_empty(&self, name: &str) -> bool {
        !self.keep_empty.contains(name)
    }
}

impl<S: Into<String>> FromIterator<S> for RemovalPolicy {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keep_empty: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// How the element's content was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentReplacement {
    /// Plain text from the `text` key.
    Text,
    /// Markup from the `utext` key.
    Markup,
}

/// Summary of one application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// Attributes set on the element, in application order.
    pub set: Vec<String>,
    /// Attributes removed because their value was empty.
    pub removed: Vec<String>,
    /// Content replacement performed, if any.
    pub content: Option<ContentReplacement>,
}

/// Merges an [`AttributeMap`] into an element.
#[derive(Debug, Clone, Default)]
pub struct AttributeMapApplier {
    policy: RemovalPolicy,
    text_content: bool,
}

impl AttributeMapApplier {
    /// Create an applier.
    ///
    /// With `text_content` enabled, the reserved `text`/`utext` keys replace
    /// the element's children instead of becoming attributes.
    #[must_use]
    pub fn new(policy: RemovalPolicy, text_content: bool) -> Self {
        Self {
            policy,
            text_content,
        }
    }

    /// Apply `attrs` to `element`, then remove the `marker` attribute.
    ///
    /// `text` takes precedence over `utext` when both are present; the loser
    /// is discarded.
    ///
    /// # Example
    ///
    /// ```
    /// use attrbean_core::AttributeMap;
    /// use attrbean_dom::{AttributeMapApplier, Element, HtmlElement, RemovalPolicy};
    ///
    /// let mut el = HtmlElement::new("a")
    ///     .with_attr("use", "${link}")
    ///     .with_attr("title", "stale");
    ///
    /// let mut attrs = AttributeMap::new();
    /// attrs.insert("href".into(), "/home".into());
    /// attrs.insert("title".into(), String::new());
    /// attrs.insert("text".into(), "Home".into());
    ///
    /// AttributeMapApplier::new(RemovalPolicy::new(), true).apply(&mut el, "use", &attrs);
    /// assert_eq!(el.to_html(), r#"<a href="/home">Home</a>"#);
    /// ```
    pub fn apply<E: Element + ?Sized>(
        &self,
        element: &mut E,
        marker: &str,
        attrs: &AttributeMap,
    ) -> Applied {
        let mut applied = Applied::default();

        if self.text_content {
            applied.content = replace_content(element, attrs);
        }

        for (name, value) in attrs {
            if self.text_content && RESERVED_CONTENT_KEYS.contains(&name.as_str()) {
                continue;
            }

            if value.is_empty() && self.policy.remove_if_empty(name) {
                element.remove_attribute(name);
                applied.removed.push(name.clone());
            } else {
                tracing::trace!(attribute = %name, value = %value, "Setting attribute");
                element.set_attribute(name, value);
                applied.set.push(name.clone());
            }
        }

        element.remove_attribute(marker);
        applied
    }
}

fn replace_content<E: Element + ?Sized>(
    element: &mut E,
    attrs: &AttributeMap,
) -> Option<ContentReplacement> {
    let (node, kind) = if let Some(text) = attrs.get(TEXT_KEY) {
        (Node::text(text.as_str()), ContentReplacement::Text)
    } else if let Some(markup) = attrs.get(UTEXT_KEY) {
        (Node::markup(markup.as_str()), ContentReplacement::Markup)
    } else {
        return None;
    };

    element.clear_children();
    element.append_children(vec![node]);
    Some(kind)
}
