use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use cafepass_types::{FormState, SignupCounts, SubmissionResponse, WaitlistKind};

use crate::{
    adapters::http::{app_state::AppState, extract::FormJson},
    app_error::AppResult,
};

/// POST /api/waitlist/users
async fn join_user_waitlist(
    State(app_state): State<AppState>,
    FormJson(form): FormJson<FormState>,
) -> AppResult<impl IntoResponse> {
    submit(&app_state, WaitlistKind::User, &form).await
}

/// POST /api/waitlist/partners
async fn request_partnership(
    State(app_state): State<AppState>,
    FormJson(form): FormJson<FormState>,
) -> AppResult<impl IntoResponse> {
    submit(&app_state, WaitlistKind::Partner, &form).await
}

async fn submit(
    app_state: &AppState,
    kind: WaitlistKind,
    form: &FormState,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    let receipt = app_state.waitlist_use_cases.submit(kind, form).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /api/waitlist/counts
/// Counts that could not be read are returned as `null`.
async fn get_counts(State(app_state): State<AppState>) -> Json<SignupCounts> {
    Json(app_state.waitlist_use_cases.get_counts().await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(join_user_waitlist))
        .route("/partners", post(request_partnership))
        .route("/counts", get(get_counts))
}
