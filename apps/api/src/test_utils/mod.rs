//! Test utilities for integration testing.
//!
//! This module provides:
//! - An in-memory table store with failure injection
//! - An in-memory rate limiter
//! - A builder for `AppState` wired to those mocks

mod app_state_builder;
mod waitlist_mocks;

pub use app_state_builder::*;
pub use waitlist_mocks::*;
