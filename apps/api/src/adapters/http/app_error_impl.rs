use crate::app_error::AppError;
use axum::Json;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cafepass_types::{ErrorBody, ErrorCode};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        match &self {
            AppError::Validation(_) | AppError::MalformedBody(_) | AppError::RateLimited => {
                tracing::info!(error = %self, "Request rejected")
            }
            AppError::Store(_) | AppError::Internal(_) => {
                tracing::error!(error = ?self, "Request failed")
            }
        }

        let status = match &self {
            AppError::Validation(_) | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::BAD_GATEWAY,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error_resp(status, self.code(), self.user_message())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: String) -> Response {
    (status, Json(ErrorBody { code, message })).into_response()
}
