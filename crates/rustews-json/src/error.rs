//! JSON error types.

/// Errors that can occur during EWS JSON serialization or deserialization.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// The payload is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required key was missing.
    #[error("missing required JSON key: {0}")]
    MissingKey(String),

    /// A key held a value of the wrong JSON type.
    #[error("JSON key {key} is not {expected}")]
    UnexpectedType {
        /// The offending key.
        key: String,
        /// What the schema requires.
        expected: &'static str,
    },

    /// A value could not be converted to its model type.
    #[error("failed to parse value: {0}")]
    ParseError(String),
}
