//! Marker-attribute processors.

use attrbean_config::{DEFAULT_PRECEDENCE, ProcessorConfig};
use attrbean_core::{AttributeMap, ExtractOptions, PropertyExtractor};

use crate::{Applied, AttributeMapApplier, Element, ExpressionEvaluator, ProcessError, RemovalPolicy};

/// Marker attribute of the reduced variant.
const PLAIN_ATTRIBUTE: &str = "use";

/// Precedence of the reduced variant.
const PLAIN_PRECEDENCE: i32 = 200;

/// Rewrites an element's attributes from the bean named by its marker.
///
/// An element carrying the marker (`bean="${link}"`, or `th:bean` and
/// `data-th-bean` with a `th` prefix) has the expression evaluated, the
/// resulting bean's properties applied as attributes, and the marker removed.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use attrbean_dom::{BeanProcessor, HtmlElement, Variables};
///
/// let vars = Variables::new().with("link", BTreeMap::from([("href", "/home")]));
/// let mut el = HtmlElement::new("a").with_attr("th:bean", "${link}");
///
/// let processor = BeanProcessor::bean().with_prefix("th");
/// processor.process(&mut el, &vars)?;
/// assert_eq!(el.to_html(), r#"<a href="/home"></a>"#);
/// # Ok::<(), attrbean_dom::ProcessError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BeanProcessor {
    attribute: String,
    prefix: Option<String>,
    precedence: i32,
    extractor: PropertyExtractor,
    policy: RemovalPolicy,
}

impl BeanProcessor {
    /// Full variant: marker `bean`, `data` map expansion and content replacement.
    #[must_use]
    pub fn bean() -> Self {
        Self::new(attrbean_config::DEFAULT_ATTRIBUTE, ExtractOptions::FULL)
    }

    /// Reduced variant: marker `use`, plain attribute mapping only.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(PLAIN_ATTRIBUTE, ExtractOptions::PLAIN).with_precedence(PLAIN_PRECEDENCE)
    }

    /// Processor bound to `attribute` with the given extraction options.
    #[must_use]
    pub fn new(attribute: impl Into<String>, options: ExtractOptions) -> Self {
        Self {
            attribute: attribute.into(),
            prefix: None,
            precedence: DEFAULT_PRECEDENCE,
            extractor: PropertyExtractor::new(options),
            policy: RemovalPolicy::default(),
        }
    }

    /// Processor described by a loaded configuration.
    #[must_use]
    pub fn from_config(config: &ProcessorConfig) -> Self {
        let options = ExtractOptions::default()
            .with_data_map_expansion(config.data_map_expansion)
            .with_text_content(config.text_content);

        let mut processor = Self::new(config.attribute.clone(), options)
            .with_precedence(config.precedence)
            .with_removal_policy(config.keep_empty.iter().cloned().collect());
        processor.prefix.clone_from(&config.prefix);
        processor
    }

    /// Match the marker under a dialect prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_precedence(mut self, precedence: i32) -> Self {
        self.precedence = precedence;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.extractor = PropertyExtractor::new(options);
        self
    }

    #[must_use]
    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Marker attribute name, without prefix.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Priority hint for the host; opaque to this crate.
    #[must_use]
    pub fn precedence(&self) -> i32 {
        self.precedence
    }

    #[must_use]
    pub fn options(&self) -> ExtractOptions {
        self.extractor.options()
    }

    /// Attribute names recognized as the marker, in lookup order.
    #[must_use]
    pub fn marker_names(&self) -> Vec<String> {
        match &self.prefix {
            Some(prefix) => vec![
                format!("{prefix}:{}", self.attribute),
                format!("data-{prefix}-{}", self.attribute),
            ],
            None => vec![self.attribute.clone()],
        }
    }

    /// First marker attribute present on `element`, with its expression.
    pub fn find_marker<'e, E: Element + ?Sized>(&self, element: &'e E) -> Option<(String, &'e str)> {
        self.marker_names()
            .into_iter()
            .find_map(|name| element.attribute(&name).map(|value| (name, value)))
    }

    /// Process `element` if it carries the marker.
    ///
    /// Returns `Ok(None)` when no marker is present. A null expression result
    /// processes as an empty map, so only the marker is removed.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Expression`] if evaluation fails; the element is
    /// left untouched.
    pub fn process<E: Element + ?Sized>(
        &self,
        element: &mut E,
        evaluator: &dyn ExpressionEvaluator,
    ) -> Result<Option<Applied>, ProcessError> {
        let Some((marker, expression)) = self.find_marker(element) else {
            return Ok(None);
        };

        let attrs = match evaluator.evaluate(expression) {
            Ok(Some(bean)) => self.extractor.extract(bean),
            Ok(None) => AttributeMap::new(),
            Err(source) => {
                return Err(ProcessError::Expression {
                    attribute: marker,
                    source,
                });
            }
        };

        let applier = AttributeMapApplier::new(self.policy.clone(), self.options().text_content);
        let applied = applier.apply(element, &marker, &attrs);

        tracing::debug!(
            marker = %marker,
            set = applied.set.len(),
            removed = applied.removed.len(),
            "Processed element"
        );

        Ok(Some(applied))
    }
}

impl Default for BeanProcessor {
    fn default() -> Self {
        Self::bean()
    }
}
