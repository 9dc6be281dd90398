use std::sync::Arc;

use async_trait::async_trait;
use cafepass_types::{
    FormState, NameRule, SignupCounts, SubmissionResponse, SuccessRedirect, WaitlistKind,
    messages, validate,
};
use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistRow,
};

/// Failures reported by a table store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store answered with an error message (constraint violation, bad column, ...).
    #[error("store rejected the request: {message}")]
    Rejected { message: String },

    #[error("store unreachable: {0}")]
    Transport(String),

    #[error("malformed store response: {0}")]
    MalformedResponse(String),

    #[error("table store is not configured")]
    NotConfigured,
}

impl StoreError {
    /// The store's own message, if it gave a non-blank one.
    pub fn reported_message(&self) -> Option<&str> {
        match self {
            StoreError::Rejected { message } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Remote table holding the waitlists. Append-only: rows can be inserted and counted.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn insert(&self, row: &WaitlistRow) -> Result<(), StoreError>;
    async fn count(&self, kind: WaitlistKind) -> Result<u64, StoreError>;
}

#[derive(Clone)]
pub struct WaitlistUseCases {
    store: Arc<dyn TableStore>,
    name_rule: NameRule,
}

impl WaitlistUseCases {
    pub fn new(store: Arc<dyn TableStore>, name_rule: NameRule) -> Self {
        Self { store, name_rule }
    }

    /// Validates the form and writes exactly one row. No retries.
    ///
    /// Duplicate emails are not checked here; if the store enforces
    /// uniqueness its rejection comes back as `AppError::Store`.
    #[instrument(skip(self, form))]
    pub async fn submit(&self, kind: WaitlistKind, form: &FormState) -> AppResult<SubmissionResponse> {
        validate(kind, form, self.name_rule)?;

        let row = WaitlistRow::from_form(kind, form, Utc::now());

        if let Err(err) = self.store.insert(&row).await {
            tracing::error!(error = %err, table = kind.table_name(), "Waitlist insert failed");
            return Err(match err {
                StoreError::NotConfigured => AppError::Internal(err.to_string()),
                _ => AppError::Store(
                    err.reported_message()
                        .unwrap_or(messages::SUBMIT_FAILED)
                        .to_string(),
                ),
            });
        }

        tracing::info!(table = kind.table_name(), "Waitlist entry recorded");

        Ok(SubmissionResponse {
            kind,
            message: success_message(kind).to_string(),
            redirect: SuccessRedirect::for_kind(kind),
        })
    }

    /// Counts both waitlists. A failed query shows up as `None` and never fails the call.
    #[instrument(skip(self))]
    pub async fn get_counts(&self) -> SignupCounts {
        let (partner_count, user_count) = tokio::join!(
            self.count_or_none(WaitlistKind::Partner),
            self.count_or_none(WaitlistKind::User),
        );

        SignupCounts {
            partner_count,
            user_count,
        }
    }

    async fn count_or_none(&self, kind: WaitlistKind) -> Option<u64> {
        match self.store.count(kind).await {
            Ok(count) => Some(count),
            Err(err) => {
                tracing::warn!(error = %err, table = kind.table_name(), "Waitlist count failed");
                None
            }
        }
    }
}

fn success_message(kind: WaitlistKind) -> &'static str {
    match kind {
        WaitlistKind::User => messages::USER_JOINED,
        WaitlistKind::Partner => messages::PARTNER_SUBMITTED,
    }
}
