//! Driving ports for buying canvas regions and reading the gallery.

use async_trait::async_trait;

use crate::domain::{Error, Placement, Region};

/// An image upload together with its requested placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRegionRequest {
    /// Client-supplied filename; sanitised before use.
    pub original_name: String,
    pub bytes: Vec<u8>,
    pub placement: Placement,
}

/// Use-case for storing a purchased region and its image.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PixelPurchaseCommand: Send + Sync {
    /// Store the asset, then the region record referencing it.
    async fn upload_region(&self, request: UploadRegionRequest) -> Result<Region, Error>;
}

/// Use-case for reading the gallery and its assets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PixelPurchaseQuery: Send + Sync {
    /// Every stored region, unpaginated, in insertion order.
    async fn list_regions(&self) -> Result<Vec<Region>, Error>;

    /// Bytes of the asset stored under `asset`, which is validated first.
    async fn fetch_asset(&self, asset: &str) -> Result<Vec<u8>, Error>;
}
