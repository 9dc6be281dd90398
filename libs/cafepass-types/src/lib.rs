//! Shared types and validation rules for the CafePass waitlist.
//!
//! This crate provides:
//! - The waitlist discriminator (`WaitlistKind`) and the form payload (`FormState`)
//! - API response types (`SubmissionResponse`, `SignupCounts`, `SuccessRedirect`)
//! - API error codes
//! - Pure validation of form input, shared by the service and the SDK

mod errors;
mod form;
mod kind;
mod responses;
mod validation;

pub use errors::{ErrorBody, ErrorCode};
pub use form::FormState;
pub use kind::{ParseWaitlistKindError, WaitlistKind};
pub use responses::{SignupCounts, SubmissionResponse, SuccessRedirect};
pub use validation::{
    NameRule, ValidationError, ValidationErrorKind, is_valid_email, messages, validate,
};
