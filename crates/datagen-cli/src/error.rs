//! CLI error types.

use datagen_core::GenerationError;
use thiserror::Error;

/// Anything that stops a run before all values are printed.
#[derive(Debug, Error)]
pub enum CliError {
    /// A `--min`/`--max` value does not parse for the requested kind.
    #[error("invalid --{flag} value {value:?}: {reason}")]
    InvalidBound {
        /// Flag name without dashes (`min` or `max`).
        flag: &'static str,
        /// The raw value as given.
        value: String,
        /// Why it did not parse.
        reason: String,
    },

    /// The generator rejected its configuration or gave up.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// A value could not be encoded as JSON.
    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Writing to the output failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}
