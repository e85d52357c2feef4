//! Error types for element processing.

/// Failure reported by an [`ExpressionEvaluator`](crate::ExpressionEvaluator).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExpressionError {
    /// The expression text could not be parsed.
    #[error("invalid expression `{0}`")]
    Invalid(String),

    /// The expression refers to a name the evaluator does not know.
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    /// Any other evaluator failure.
    #[error("expression evaluation failed: {0}")]
    Failed(String),
}

/// Error from a bean processor.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProcessError {
    /// Evaluating the marker attribute's expression failed.
    #[error("failed to evaluate `{attribute}` expression")]
    Expression {
        /// Marker attribute whose value was evaluated.
        attribute: String,
        /// Underlying evaluator error.
        #[source]
        source: ExpressionError,
    },
}
