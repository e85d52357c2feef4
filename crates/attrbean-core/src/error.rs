//! Error types for bean introspection.
//!
//! Neither error ever escapes [`PropertyExtractor`](crate::PropertyExtractor):
//! a failed accessor drops its property, a failed introspection drops the
//! whole accessor pass.

/// Failure while invoking a single property accessor.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PropertyError {
    /// The accessor ran and reported a failure.
    #[error("accessor failed: {0}")]
    Failed(String),

    /// The accessor may not be invoked by the caller.
    #[error("access denied")]
    Denied,

    /// Any other error raised by the accessor.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure while obtaining a bean's property metadata.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IntrospectionError {
    /// A descriptor could not be built for the named property.
    #[error("malformed property descriptor `{0}`")]
    MalformedDescriptor(String),

    /// The bean refused to describe itself.
    #[error("introspection failed: {0}")]
    Failed(String),
}
