//! Error taxonomy for a single expansion attempt.
//!
//! Every variant is fatal to the declaration being expanded: the first unmet
//! precondition aborts the transformation and no partial peer is produced.
//! The `Display` text is what the user sees as the diagnostic at the
//! attachment site.

use thiserror::Error;

/// Failure raised while transforming one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The attribute is attached to something other than a function.
    #[error("@Asyncify can be attached only to functions.")]
    OnlyFunction,

    /// The last parameter is not a single-argument, `Void`-returning closure.
    #[error("@Asyncify can only be used on functions with a trailing `(T) -> Void` completion closure.")]
    WrongFunctionType,

    /// A throwing generator was used but the completion payload is not `Result<Success, Failure>`.
    #[error("@AsyncifyThrowing requires a completion of the form `(Result<Success, Failure>) -> Void`.")]
    NotThrowing,

    /// Malformed or unsupported input that fits no other category.
    #[error("{0}")]
    Custom(String),
}

impl TransformError {
    /// Create a catch-all error with a message.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Short stable identifier used in structured output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OnlyFunction => "only_function",
            Self::WrongFunctionType => "wrong_function_type",
            Self::NotThrowing => "not_throwing",
            Self::Custom(_) => "custom",
        }
    }
}

/// Result type alias for transformation steps
pub type Result<T> = std::result::Result<T, TransformError>;
