use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::app_error::AppError;

/// `Json` whose rejections become `AppError`, so a bad body still gets the
/// `{code, message}` error response.
pub struct FormJson<T>(pub T);

impl<S, T> FromRequest<S> for FormJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(FormJson(value))
    }
}
