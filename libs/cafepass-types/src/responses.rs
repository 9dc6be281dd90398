use serde::{Deserialize, Serialize};

use crate::kind::WaitlistKind;

/// Seconds the success message stays on screen before navigating away.
pub const SUCCESS_REDIRECT_DELAY_SECS: u64 = 3;

/// Where the front end should navigate after a successful submission.
///
/// The front end decides whether and when to follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessRedirect {
    /// Landing route including the `success` query parameter.
    pub path: String,
    pub delay_secs: u64,
}

impl SuccessRedirect {
    pub fn for_kind(kind: WaitlistKind) -> Self {
        Self {
            path: format!("/?success={}", kind.success_param()),
            delay_secs: SUCCESS_REDIRECT_DELAY_SECS,
        }
    }
}

/// Body of a successful `POST /api/waitlist/{kind}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub kind: WaitlistKind,
    pub message: String,
    pub redirect: SuccessRedirect,
}

/// Aggregate sign-up counts. A count is `None` when its query failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupCounts {
    pub partner_count: Option<u64>,
    pub user_count: Option<u64>,
}
