//! Error types for conjugate-normal operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for conjugate-normal operations.
///
/// Every numeric entry point validates its arguments up front, so the only
/// failure modes are rejected inputs plus the I/O and parsing errors raised
/// while loading an [`UpdaterConfig`](crate::config::UpdaterConfig).
///
/// # Examples
///
/// ```
/// use conjugate_normal::error::ConjugateError;
///
/// let err = ConjugateError::InvalidArgument {
///     param: "sd_y".to_string(),
///     value: "-1".to_string(),
///     constraint: "> 0".to_string(),
/// };
/// assert!(err.to_string().contains("sd_y"));
/// ```
#[derive(Debug)]
pub enum ConjugateError {
    /// An argument is outside its valid domain.
    InvalidArgument {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// An operation that needs at least one element received none.
    EmptyInput {
        /// What was empty
        context: String,
    },

    /// I/O error (config file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),
}

impl fmt::Display for ConjugateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConjugateError::InvalidArgument {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid argument: {param} = {value}, expected {constraint}"
                )
            }
            ConjugateError::EmptyInput { context } => write!(f, "Empty input: {context}"),
            ConjugateError::Io(e) => write!(f, "I/O error: {e}"),
            ConjugateError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for ConjugateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConjugateError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConjugateError {
    fn from(err: std::io::Error) -> Self {
        ConjugateError::Io(err)
    }
}

impl From<serde_json::Error> for ConjugateError {
    fn from(err: serde_json::Error) -> Self {
        ConjugateError::Serialization(err.to_string())
    }
}

impl ConjugateError {
    /// Create an invalid argument error, logging the rejection.
    #[must_use]
    pub fn invalid_argument(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        let value = value.to_string();
        tracing::warn!(param, value = %value, constraint, "rejected argument");
        Self::InvalidArgument {
            param: param.to_string(),
            value,
            constraint: constraint.to_string(),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        tracing::warn!(context, "rejected empty input");
        Self::EmptyInput {
            context: context.to_string(),
        }
    }

    /// Returns true if this is an [`ConjugateError::InvalidArgument`].
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, ConjugateError>;
