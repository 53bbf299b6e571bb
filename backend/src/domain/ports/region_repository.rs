//! Driven port for persisting and listing purchased regions.

use async_trait::async_trait;

use crate::domain::{NewRegion, Region};

use super::define_port_error;

define_port_error! {
    /// Errors raised by region persistence adapters.
    pub enum RegionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "region repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "region repository query failed: {message}",
    }
}

/// Port for the region record store.
///
/// Records are append-only: this port offers no update or delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegionRepository: Send + Sync {
    /// Insert a region and return it with its store-issued identifier.
    ///
    /// Inputs are stored as received; overlap and canvas bounds are not
    /// checked.
    async fn create(&self, region: NewRegion) -> Result<Region, RegionRepositoryError>;

    /// Return every stored region in insertion order.
    async fn list_all(&self) -> Result<Vec<Region>, RegionRepositoryError>;
}
