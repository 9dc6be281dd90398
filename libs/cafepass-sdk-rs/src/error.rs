use cafepass_types::{ErrorCode, ValidationError, messages};
use thiserror::Error;

/// SDK-specific errors.
#[derive(Debug, Error)]
pub enum CafepassError {
    /// The form failed local validation; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// API returned an error
    #[error("API error: {code} - {message}")]
    Api { code: ErrorCode, message: String },

    /// Network error (only with `client` feature)
    #[cfg(feature = "client")]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CafepassError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CafepassError::Validation(e) => e.kind.code(),
            CafepassError::Api { code, .. } => *code,
            #[cfg(feature = "client")]
            CafepassError::Network(_) => ErrorCode::UnexpectedFailure,
            CafepassError::Config(_) => ErrorCode::UnexpectedFailure,
        }
    }

    /// Text for the form's error banner.
    pub fn user_message(&self) -> &str {
        match self {
            CafepassError::Validation(e) => &e.message,
            CafepassError::Api { message, .. } => message,
            #[cfg(feature = "client")]
            CafepassError::Network(_) => messages::UNEXPECTED,
            CafepassError::Config(_) => messages::UNEXPECTED,
        }
    }
}
