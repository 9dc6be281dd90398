//! In-memory implementations of the table store and rate limiter ports.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use cafepass_types::WaitlistKind;

use crate::{
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::WaitlistRow,
    infra::RateLimiterTrait,
    use_cases::waitlist::{StoreError, TableStore},
};

// ============================================================================
// InMemoryTableStore
// ============================================================================

/// Table store that keeps rows in memory.
///
/// `count` returns the seeded count for a kind plus the rows inserted for it.
#[derive(Default)]
pub struct InMemoryTableStore {
    rows: Mutex<Vec<WaitlistRow>>,
    seeded: HashMap<WaitlistKind, u64>,
    insert_failure: Option<StoreError>,
    failing_counts: Vec<WaitlistKind>,
    insert_calls: AtomicUsize,
    count_calls: AtomicUsize,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert fails with `err` and stores nothing.
    pub fn failing_inserts(mut self, err: StoreError) -> Self {
        self.insert_failure = Some(err);
        self
    }

    /// Counting `kind` fails with a transport error.
    pub fn failing_count(mut self, kind: WaitlistKind) -> Self {
        self.failing_counts.push(kind);
        self
    }

    /// Pretend `count` rows of `kind` already exist.
    pub fn with_seeded_count(mut self, kind: WaitlistKind, count: u64) -> Self {
        self.seeded.insert(kind, count);
        self
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<WaitlistRow> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn insert(&self, row: &WaitlistRow) -> Result<(), StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.insert_failure {
            return Err(err.clone());
        }
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }

    async fn count(&self, kind: WaitlistKind) -> Result<u64, StoreError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_counts.contains(&kind) {
            return Err(StoreError::Transport("connection refused".into()));
        }
        let seeded = self.seeded.get(&kind).copied().unwrap_or(0);
        let stored = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.kind() == kind)
            .count() as u64;
        Ok(seeded + stored)
    }
}

// ============================================================================
// InMemoryRateLimiter
// ============================================================================

pub struct InMemoryRateLimiter {
    counts: Mutex<HashMap<String, u64>>,
    max_per_ip: u64,
}

impl InMemoryRateLimiter {
    pub fn new(max_per_ip: u64) -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
            max_per_ip,
        }
    }

    /// Create a permissive rate limiter that never blocks (for most tests).
    pub fn permissive() -> Self {
        Self::new(u64::MAX)
    }

    /// Requests seen so far from `ip`.
    pub fn count_for(&self, ip: &str) -> u64 {
        self.counts
            .lock()
            .unwrap()
            .get(&format!("rate:ip:{ip}"))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check(&self, ip: &str) -> AppResult<()> {
        let mut counts = self.counts.lock().unwrap();

        let ip_count = counts.entry(format!("rate:ip:{ip}")).or_insert(0);
        *ip_count += 1;
        if *ip_count > self.max_per_ip {
            return Err(AppError::RateLimited);
        }

        Ok(())
    }
}
