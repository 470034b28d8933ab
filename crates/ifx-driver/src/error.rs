//! Error types for the driver layer.

/// Errors that can occur while configuring or executing against Informix.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The bindings do not line up with the statement's placeholders.
    #[error("Statement has {placeholders} placeholders but {bindings} bindings were supplied")]
    BindingCountMismatch {
        /// Number of `?` markers in the statement.
        placeholders: usize,
        /// Number of values supplied.
        bindings: usize,
    },

    /// Implicit batching needs the bindings to divide into whole rows.
    #[error(
        "Cannot batch {bindings} bindings over {placeholders} placeholders: \
         not a whole number of rows"
    )]
    UnevenBatch {
        /// Number of `?` markers in the statement.
        placeholders: usize,
        /// Number of values supplied.
        bindings: usize,
    },

    /// A configured character set is unknown to the transcoder.
    #[error("Unknown character encoding: {0}")]
    UnknownEncoding(String),

    /// The password is marked encrypted but no decryptor was supplied.
    #[error("Password is encrypted but no decryptor is configured")]
    MissingDecryptor,

    /// Password decryption failed.
    #[error("Password decryption failed: {0}")]
    Decrypt(String),

    /// The connection configuration is incomplete or malformed.
    #[error("Invalid connection configuration: {0}")]
    Config(String),

    /// Connecting failed, including the retry after a lost connection.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The underlying driver reported a failure.
    #[error("Driver error: {0}")]
    Driver(String),
}

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;
