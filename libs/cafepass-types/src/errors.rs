use serde::{Deserialize, Serialize};

/// API error codes returned by CafePass endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingField,
    InvalidFormat,
    StoreFailure,
    RateLimited,
    UnexpectedFailure,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::StoreFailure => "STORE_FAILURE",
            Self::RateLimited => "RATE_LIMITED",
            Self::UnexpectedFailure => "UNEXPECTED_FAILURE",
        }
    }

    /// Whether the error was raised before anything reached the table store.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField | Self::InvalidFormat)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}
