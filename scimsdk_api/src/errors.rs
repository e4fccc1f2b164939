//! Error types for the API client.

/// Errors that can occur when building, sending or decoding SCIM requests.
///
/// Every layer hands these upward unchanged. The display text of each
/// variant is the underlying message with no extra prefix, so a server
/// `detail` or a context failure reads the same at the call site as it did
/// where it was raised.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Caller input was rejected before any request was sent.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    /// The request never produced an HTTP response.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The API answered with a status of 400 or above.
    #[error("{detail}")]
    Api { status: u16, detail: String },
    /// A JSON body could not be encoded or decoded.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    /// HTTP status of an [`Error::Api`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// True when the caller's [`crate::Context`] expired before or during the call.
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Error::Transport(TransportError::DeadlineExceeded))
    }
}

/// Failures raised by the transport executor.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// The caller's context expired or was cancelled.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// Free-form failure, used by custom transports.
    #[error("{0}")]
    Other(String),
}
