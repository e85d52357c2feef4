//! Expression evaluation seam.

use std::collections::HashMap;

use attrbean_core::Bean;

use crate::ExpressionError;

/// Resolves a marker attribute's expression text to a bean.
///
/// Implemented by the host's expression language. `Ok(None)` models an
/// expression that evaluated to null, which processes as an empty map.
pub trait ExpressionEvaluator {
    /// Evaluate `expression`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError`] if the expression is malformed or cannot be
    /// resolved.
    fn evaluate(&self, expression: &str) -> Result<Option<&dyn Bean>, ExpressionError>;
}

/// Minimal evaluator resolving `${name}` or `name` against registered beans.
///
/// A name registered with [`null`](Self::null) evaluates to null.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use attrbean_dom::{ExpressionEvaluator, Variables};
///
/// let link = BTreeMap::from([("href", "/home")]);
/// let vars = Variables::new().with("link", link).null("missing");
///
/// assert!(vars.evaluate("${link}").unwrap().is_some());
/// assert!(vars.evaluate("missing").unwrap().is_none());
/// assert!(vars.evaluate("${other}").is_err());
/// ```
#[derive(Default)]
pub struct Variables {
    beans: HashMap<String, Option<Box<dyn Bean>>>,
}

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bean under `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, bean: impl Bean + 'static) -> Self {
        self.insert(name, bean);
        self
    }

    /// Register a name that evaluates to null.
    #[must_use]
    pub fn null(mut self, name: impl Into<String>) -> Self {
        self.beans.insert(name.into(), None);
        self
    }

    /// Register a bean under `name`, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, bean: impl Bean + 'static) {
        self.beans.insert(name.into(), Some(Box::new(bean)));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}

impl std::fmt::Debug for Variables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.beans.keys().collect();
        names.sort();
        f.debug_struct("Variables").field("names", &names).finish()
    }
}

impl ExpressionEvaluator for Variables {
    fn evaluate(&self, expression: &str) -> Result<Option<&dyn Bean>, ExpressionError> {
        let name = variable_name(expression)
            .ok_or_else(|| ExpressionError::Invalid(expression.to_owned()))?;

        match self.beans.get(name) {
            Some(Some(bean)) => Ok(Some(bean.as_ref())),
            Some(None) => Ok(None),
            None => Err(ExpressionError::UnknownVariable(name.to_owned())),
        }
    }
}

/// Extract the variable name from `${name}` or `name`.
fn variable_name(expression: &str) -> Option<&str> {
    let trimmed = expression.trim();
    let name = match trimmed.strip_prefix("${") {
        Some(rest) => rest.strip_suffix('}')?.trim(),
        None => trimmed,
    };

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.');
    valid.then_some(name)
}
