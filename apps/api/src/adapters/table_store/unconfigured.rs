use async_trait::async_trait;
use cafepass_types::WaitlistKind;

use crate::{
    domain::entities::waitlist_entry::WaitlistRow,
    use_cases::waitlist::{StoreError, TableStore},
};

/// Stand-in when no table store credentials are configured.
pub struct UnconfiguredTableStore;

#[async_trait]
impl TableStore for UnconfiguredTableStore {
    async fn insert(&self, _row: &WaitlistRow) -> Result<(), StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn count(&self, _kind: WaitlistKind) -> Result<u64, StoreError> {
        Err(StoreError::NotConfigured)
    }
}
