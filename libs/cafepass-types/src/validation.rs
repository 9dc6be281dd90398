//! Form validation shared by the service and the SDK.
//!
//! Rules run in form order and stop at the first failure, so the visitor
//! always sees a single message.

use thiserror::Error;

use crate::{errors::ErrorCode, form::FormState, kind::WaitlistKind};

/// User-facing texts.
pub mod messages {
    pub const ENTER_NAME: &str = "Please enter your name";
    pub const ENTER_EMAIL: &str = "Please enter your email";
    pub const FILL_REQUIRED: &str = "Please fill in all required fields";
    pub const INVALID_EMAIL: &str = "Please enter a valid email address";
    pub const UNREADABLE_FORM: &str = "The form could not be read. Please check your entries and try again.";
    pub const SUBMIT_FAILED: &str = "Failed to submit form. Please try again.";
    pub const UNEXPECTED: &str = "An unexpected error occurred. Please try again.";
    pub const USER_JOINED: &str =
        "Thank you for joining our waitlist! We'll be in touch soon with updates.";
    pub const PARTNER_SUBMITTED: &str =
        "Thank you for your interest in partnering with us! Our team will contact you shortly.";
}

/// Whether the coffee drinker form requires a name. Some pages ask for it, some don't.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameRule {
    #[default]
    Optional,
    Required,
}

impl NameRule {
    pub fn from_required(required: bool) -> Self {
        if required {
            Self::Required
        } else {
            Self::Optional
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    MissingField,
    InvalidFormat,
}

impl ValidationErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingField => ErrorCode::MissingField,
            Self::InvalidFormat => ErrorCode::InvalidFormat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    fn missing(message: &str) -> Self {
        Self {
            kind: ValidationErrorKind::MissingField,
            message: message.to_string(),
        }
    }

    fn invalid_email() -> Self {
        Self {
            kind: ValidationErrorKind::InvalidFormat,
            message: messages::INVALID_EMAIL.to_string(),
        }
    }
}

/// Validates a form for the given waitlist.
pub fn validate(kind: WaitlistKind, form: &FormState, name_rule: NameRule) -> Result<(), ValidationError> {
    match kind {
        WaitlistKind::User => {
            if name_rule == NameRule::Required && is_blank(form.name.as_deref()) {
                return Err(ValidationError::missing(messages::ENTER_NAME));
            }
            if is_blank(Some(&form.email)) {
                return Err(ValidationError::missing(messages::ENTER_EMAIL));
            }
        }
        WaitlistKind::Partner => {
            if is_blank(Some(&form.email)) || is_blank(form.cafe.as_deref()) {
                return Err(ValidationError::missing(messages::FILL_REQUIRED));
            }
        }
    }

    if !is_valid_email(&form.email) {
        return Err(ValidationError::invalid_email());
    }

    Ok(())
}

/// Checks the `local@domain.tld` shape: no whitespace, exactly one `@`,
/// and a dot inside the domain with characters on both sides.
///
/// Equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$` with ECMAScript `\s`.
/// The input is not trimmed.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(is_pattern_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// ECMAScript `\s`: Unicode `White_Space` plus U+FEFF, minus U+0085 (NEL).
fn is_pattern_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{0085}')
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
