//! Vector-backed `RegionRepository` for database-less deployments and tests.
//!
//! Contents are lost when the process exits.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{RegionRepository, RegionRepositoryError};
use crate::domain::{NewRegion, Region, RegionId};

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    regions: Vec<Region>,
}

/// In-memory implementation of the region repository port.
///
/// Identifiers start at 1 and are assigned under the same lock that appends
/// the record, so insertion order and id order agree.
#[derive(Debug, Default)]
pub struct InMemoryRegionRepository {
    store: Mutex<Store>,
}

impl InMemoryRegionRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, RegionRepositoryError> {
        self.store
            .lock()
            .map_err(|_| RegionRepositoryError::connection("in-memory region store poisoned"))
    }
}

#[async_trait]
impl RegionRepository for InMemoryRegionRepository {
    async fn create(&self, region: NewRegion) -> Result<Region, RegionRepositoryError> {
        let mut store = self.lock()?;
        store.last_id += 1;
        let region = Region::from_new(RegionId::new(store.last_id), region);
        store.regions.push(region.clone());
        Ok(region)
    }

    async fn list_all(&self) -> Result<Vec<Region>, RegionRepositoryError> {
        Ok(self.lock()?.regions.clone())
    }
}
