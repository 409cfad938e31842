use thiserror::Error;

/// Top-level error type for hora.
#[derive(Debug, Error)]
pub enum HoraError {
    /// The request never produced an HTTP response (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The Bot API answered with a status other than 200.
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    /// A 200 response whose body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The persisted update offset could not be read back.
    #[error("offset store error: {0}")]
    Offset(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HoraError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
