//! Error types for the JSON pseudo-connection.

/// Errors from the HTTP-backed query path.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// The bindings do not line up with the statement's placeholders.
    #[error("Statement has {placeholders} placeholders but {bindings} bindings were supplied")]
    BindingCountMismatch {
        /// Number of `?` markers in the statement.
        placeholders: usize,
        /// Number of values supplied.
        bindings: usize,
    },

    /// The operation has no meaning over the HTTP backend.
    #[error("The JSON backend does not support {0}")]
    Unsupported(&'static str),

    /// Building the HTTP client failed.
    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    /// The HTTP request failed or returned an error status.
    #[error("Query request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Malformed response body: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// Result type for JSON backend operations.
pub type Result<T> = std::result::Result<T, JsonError>;
