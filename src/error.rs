use thiserror::Error;

/// Custom error types for the splitstream library.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O errors from std::io operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The separator specification could not be resolved into a byte sequence.
    #[error("Bad separator: {message}")]
    InvalidSeparator { message: String },

    /// A single record could not be decoded (malformed UTF-8 or structured decode failure).
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// A single item could not be serialized.
    #[error("Encode error: {message}")]
    Encode { message: String },

    /// A construction parameter other than the separator was rejected.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The pending record grew past the configured limit before a separator was seen.
    #[error("Record length {len} exceeds configured limit {limit}")]
    RecordTooLong { len: usize, limit: usize },

    /// `process` or `flush` was called after the stage was flushed.
    #[error("Stage already flushed")]
    StageFinished,
}

impl Error {
    /// Create a new `InvalidSeparator` error with a descriptive message.
    pub fn invalid_separator(message: impl Into<String>) -> Self {
        Self::InvalidSeparator {
            message: message.into(),
        }
    }

    /// Used for UTF-8 failures and for structured decoders alike.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn record_too_long(len: usize, limit: usize) -> Self {
        Self::RecordTooLong { len, limit }
    }

    /// True for failures scoped to a single item; the stage stays usable afterwards.
    pub fn is_per_item(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::Encode { .. } | Self::RecordTooLong { .. }
        )
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::decode(format!("record is not valid UTF-8: {e}"))
    }
}

/// Result type alias for the library operations.
pub type Result<T> = std::result::Result<T, Error>;
