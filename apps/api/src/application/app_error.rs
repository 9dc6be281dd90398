use cafepass_types::{ErrorCode, ValidationError, messages};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Form input failed validation. Nothing was sent to the table store.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request body was not a readable form (bad JSON, wrong field types).
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// The table store failed. Holds the message to show the visitor.
    #[error("Store error: {0}")]
    Store(String),

    #[error("Too many requests. Please slow down.")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(e) => e.kind.code(),
            AppError::MalformedBody(_) => ErrorCode::InvalidFormat,
            AppError::Store(_) => ErrorCode::StoreFailure,
            AppError::RateLimited => ErrorCode::RateLimited,
            AppError::Internal(_) => ErrorCode::UnexpectedFailure,
        }
    }

    /// Text safe to show in the form banner. Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.message.clone(),
            AppError::MalformedBody(_) => messages::UNREADABLE_FORM.to_string(),
            AppError::Store(msg) => msg.clone(),
            AppError::RateLimited => "Too many requests. Please try again later.".to_string(),
            AppError::Internal(_) => messages::UNEXPECTED.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
