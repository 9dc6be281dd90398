use cafepass_types::{FormState, WaitlistKind};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Row for `users_waitlist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWaitlistRow {
    pub name: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Row for `partners_waitlist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerWaitlistRow {
    pub cafe: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    /// Only sent when the form had the beta checkbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<bool>,
}

/// A waitlist entry as written to the table store. Rows are never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WaitlistRow {
    User(UserWaitlistRow),
    Partner(PartnerWaitlistRow),
}

impl WaitlistRow {
    /// Builds the row from an already validated form, trimming every string field.
    pub fn from_form(kind: WaitlistKind, form: &FormState, created_at: DateTime<Utc>) -> Self {
        match kind {
            WaitlistKind::User => WaitlistRow::User(UserWaitlistRow {
                name: form.trimmed_name(),
                email: form.trimmed_email(),
                created_at,
            }),
            WaitlistKind::Partner => WaitlistRow::Partner(PartnerWaitlistRow {
                cafe: form.trimmed_cafe().unwrap_or_default(),
                email: form.trimmed_email(),
                created_at,
                beta: form.beta,
            }),
        }
    }

    pub fn kind(&self) -> WaitlistKind {
        match self {
            WaitlistRow::User(_) => WaitlistKind::User,
            WaitlistRow::Partner(_) => WaitlistKind::Partner,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            WaitlistRow::User(row) => &row.email,
            WaitlistRow::Partner(row) => &row.email,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            WaitlistRow::User(row) => row.created_at,
            WaitlistRow::Partner(row) => row.created_at,
        }
    }
}
