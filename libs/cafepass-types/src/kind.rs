use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which waitlist a submission targets.
///
/// Selects the validation rules, the destination table and the
/// success message / redirect shown afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitlistKind {
    /// Coffee drinkers.
    User,
    /// Café owners.
    Partner,
}

impl WaitlistKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Partner => "partner",
        }
    }

    /// Path segment used by the HTTP API (`/waitlist/users`, `/waitlist/partners`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Partner => "partners",
        }
    }

    /// Name of the remote table holding this waitlist.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::User => "users_waitlist",
            Self::Partner => "partners_waitlist",
        }
    }

    /// Value of the `success` query parameter after joining this waitlist.
    pub fn success_param(&self) -> &'static str {
        match self {
            Self::User => "waitlist_joined",
            Self::Partner => "partner_request_submitted",
        }
    }
}

impl std::fmt::Display for WaitlistKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown waitlist: {0}. Must be 'users' or 'partners'")]
pub struct ParseWaitlistKindError(String);

impl std::str::FromStr for WaitlistKind {
    type Err = ParseWaitlistKindError;

    /// Accepts both the singular kind name and the plural path segment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" | "users" => Ok(Self::User),
            "partner" | "partners" => Ok(Self::Partner),
            _ => Err(ParseWaitlistKindError(s.to_string())),
        }
    }
}
