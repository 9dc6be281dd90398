//! Test app state builder for HTTP-level integration testing.
//!
//! `TestAppStateBuilder` creates a minimal `AppState` backed by in-memory
//! mocks so routes can be exercised without a table store or Redis.

use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::http::HeaderValue;
use cafepass_types::NameRule;

use crate::{
    adapters::http::app_state::AppState,
    infra::{
        RateLimiterTrait,
        config::{AppConfig, TableStoreConfig},
    },
    test_utils::{InMemoryRateLimiter, InMemoryTableStore},
    use_cases::waitlist::{TableStore, WaitlistUseCases},
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryTableStore::new().failing_count(WaitlistKind::User));
///
/// let app_state = TestAppStateBuilder::new()
///     .with_store(store.clone())
///     .with_name_rule(NameRule::Required)
///     .build();
/// ```
pub struct TestAppStateBuilder {
    store: Option<Arc<dyn TableStore>>,
    rate_limiter: Option<Arc<dyn RateLimiterTrait>>,
    name_rule: NameRule,
    trust_proxy: bool,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            rate_limiter: None,
            name_rule: NameRule::Optional,
            trust_proxy: false,
        }
    }

    /// Use `store` for waitlist rows (defaults to an empty in-memory store).
    pub fn with_store(mut self, store: Arc<dyn TableStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_name_rule(mut self, name_rule: NameRule) -> Self {
        self.name_rule = name_rule;
        self
    }

    /// Use `rate_limiter` instead of the permissive default.
    pub fn with_rate_limiter(mut self, rate_limiter: Arc<dyn RateLimiterTrait>) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    pub fn with_trust_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    /// Build the AppState with all configured mocks.
    pub fn build(self) -> AppState {
        let store: Arc<dyn TableStore> = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryTableStore::new()));
        let rate_limiter: Arc<dyn RateLimiterTrait> = self
            .rate_limiter
            .unwrap_or_else(|| Arc::new(InMemoryRateLimiter::permissive()));

        let waitlist_use_cases = Arc::new(WaitlistUseCases::new(store, self.name_rule));

        // Create minimal config for testing
        let config = Arc::new(AppConfig {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 3001)),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            table_store: TableStoreConfig::Unconfigured,
            user_name_rule: self.name_rule,
            redis_url: None,
            rate_limit_window_secs: 60,
            rate_limit_per_ip: 30,
            trust_proxy: self.trust_proxy,
            log_file: None,
        });

        AppState {
            config,
            waitlist_use_cases,
            rate_limiter,
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
