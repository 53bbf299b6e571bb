//! Region purchase and gallery services.
//!
//! Implements the pixel purchase driving ports on top of the region
//! repository and asset store. An asset saved before a failed record insert
//! stays on disk; there is no compensation step.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    AssetStore, AssetStoreError, PixelPurchaseCommand, PixelPurchaseQuery, RegionRepository,
    RegionRepositoryError, UploadRegionRequest,
};
use crate::domain::{AssetRef, Error, NewRegion, Region};

fn map_repository_error(error: RegionRepositoryError) -> Error {
    match error {
        RegionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("region repository unavailable: {message}"))
        }
        RegionRepositoryError::Query { message } => {
            Error::internal(format!("region repository error: {message}"))
        }
    }
}

fn map_asset_error(error: AssetStoreError) -> Error {
    match error {
        AssetStoreError::NotFound { asset } => Error::not_found(format!("asset {asset} not found")),
        AssetStoreError::Io { message } => Error::internal(format!("asset store error: {message}")),
    }
}

/// Service implementing [`PixelPurchaseCommand`] and [`PixelPurchaseQuery`].
pub struct PixelPurchaseService<R: ?Sized, A: ?Sized> {
    regions: Arc<R>,
    assets: Arc<A>,
}

impl<R: ?Sized, A: ?Sized> PixelPurchaseService<R, A> {
    /// Create a service over a region repository and an asset store.
    pub fn new(regions: Arc<R>, assets: Arc<A>) -> Self {
        Self { regions, assets }
    }
}

#[async_trait]
impl<R, A> PixelPurchaseCommand for PixelPurchaseService<R, A>
where
    R: RegionRepository + ?Sized,
    A: AssetStore + ?Sized,
{
    async fn upload_region(&self, request: UploadRegionRequest) -> Result<Region, Error> {
        let UploadRegionRequest {
            original_name,
            bytes,
            placement,
        } = request;
        let byte_len = bytes.len();

        let image = self
            .assets
            .save(&original_name, bytes)
            .await
            .map_err(map_asset_error)?;

        let region = self
            .regions
            .create(NewRegion {
                placement,
                image: image.clone(),
            })
            .await
            .map_err(|err| {
                warn!(asset = %image, error = %err, "region insert failed; asset left orphaned");
                map_repository_error(err)
            })?;

        info!(
            region_id = %region.id(),
            asset = %image,
            bytes = byte_len,
            x = placement.x(),
            y = placement.y(),
            size = placement.size(),
            "region purchased"
        );
        Ok(region)
    }
}

#[async_trait]
impl<R, A> PixelPurchaseQuery for PixelPurchaseService<R, A>
where
    R: RegionRepository + ?Sized,
    A: AssetStore + ?Sized,
{
    async fn list_regions(&self) -> Result<Vec<Region>, Error> {
        self.regions.list_all().await.map_err(map_repository_error)
    }

    async fn fetch_asset(&self, asset: &str) -> Result<Vec<u8>, Error> {
        // Unsafe names cannot exist in the store, so they read as missing.
        let asset = AssetRef::parse(asset)
            .map_err(|_| Error::not_found(format!("asset {asset} not found")))?;
        self.assets.fetch(&asset).await.map_err(map_asset_error)
    }
}

#[cfg(test)]
#[path = "pixel_purchase_service_tests.rs"]
mod tests;
