//! Generation error types.

use thiserror::Error;

/// Top-level error type for value generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Malformed or missing input: inverted bounds, a negative magnitude,
    /// an empty palette or an invalid pattern.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A uniqueness-enforcing container could not be filled.
    #[error(
        "unable to generate {requested} unique elements: gave up after {misses} consecutive duplicates"
    )]
    GenerationExhausted {
        /// The container size that was requested.
        requested: usize,
        /// How many duplicates in a row were drawn before giving up.
        misses: usize,
    },
}

impl GenerationError {
    /// Shorthand for an [`GenerationError::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
