//! # Lookup Errors
//!
//! Every way a search can fail, as one tagged type. The error classifier
//! dispatches on the variant, never on message text.

use crate::repl::models::{PayloadError, ValidationError};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    /// Input rejected locally; no request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No response within the time budget
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The server could not be reached at all
    #[error("failed to connect: {detail}")]
    Offline { detail: String },

    /// Transport failed after a connection was made
    #[error("network error: {detail}")]
    Network { detail: String },

    /// Response received with a non-success status
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// Response received but flagged as an error by the API itself
    #[error("{message}")]
    Api { message: String },

    /// Response body could not be decoded
    #[error("{detail}")]
    Decode { detail: String },

    /// Superseded by a newer search
    #[error("request superseded by a newer search")]
    Cancelled,
}

impl LookupError {
    pub fn from_transport(error: reqwest::Error) -> Self {
        let detail = error.to_string();
        if error.is_timeout() {
            // reqwest carries no budget of its own here; report it as unknown
            LookupError::Timeout(Duration::ZERO)
        } else if error.is_connect() {
            LookupError::Offline { detail }
        } else if error.is_decode() {
            LookupError::Decode { detail }
        } else {
            LookupError::Network { detail }
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, LookupError::Cancelled)
    }
}

impl From<PayloadError> for LookupError {
    fn from(error: PayloadError) -> Self {
        match error {
            PayloadError::Rejected { message } => LookupError::Api { message },
            PayloadError::Malformed { detail } => LookupError::Decode { detail },
        }
    }
}
