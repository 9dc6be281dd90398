//! Rust client for the CafePass waitlist API.
//!
//! Front ends use it to submit the coffee drinker and café partner forms and
//! to read the sign-up counts shown on the landing page.
//!
//! # Features
//!
//! - **Local validation** - Forms are checked with the same rules the service
//!   applies, so an invalid form never leaves the browser or app
//! - **Typed responses** - Success messages, redirects and counts come back as
//!   the shared `cafepass-types` structs
//!
//! # Example
//!
//! ```rust,ignore
//! use cafepass_sdk::{CafepassClient, CafepassConfig, FormState, WaitlistKind};
//!
//! let client = CafepassClient::new(CafepassConfig {
//!     base_url: "https://cafepass.ca".to_string(),
//!     name_rule: Default::default(),
//! })?;
//!
//! let form = FormState::partner("owner@beanleaf.ca", "Bean & Leaf");
//! match client.submit(WaitlistKind::Partner, &form).await {
//!     Ok(receipt) => println!("{}", receipt.message),
//!     Err(err) => eprintln!("{}", err.user_message()),
//! }
//! ```

mod client;
mod error;

pub use client::{CafepassClient, CafepassConfig};
pub use error::CafepassError;

// Re-export shared types for convenience
pub use cafepass_types::{
    ErrorCode, FormState, NameRule, SignupCounts, SubmissionResponse, SuccessRedirect,
    WaitlistKind,
};
