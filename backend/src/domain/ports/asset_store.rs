//! Driven port for storing and reading uploaded image files.

use async_trait::async_trait;

use crate::domain::AssetRef;

use super::define_port_error;

define_port_error! {
    /// Errors raised by asset storage adapters.
    pub enum AssetStoreError {
        /// No asset exists under the requested reference.
        NotFound { asset: String } =>
            "asset {asset} not found",
        /// Reading or writing the backing storage failed.
        Io { message: String } =>
            "asset storage failed: {message}",
    }
}

/// Port for the asset store.
///
/// References are generated by the store as `<unix-millis>-<originalName>`;
/// assets are never modified or deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Persist `bytes` and return the generated reference.
    async fn save(&self, original_name: &str, bytes: Vec<u8>) -> Result<AssetRef, AssetStoreError>;

    /// Read the bytes stored under `asset`.
    async fn fetch(&self, asset: &AssetRef) -> Result<Vec<u8>, AssetStoreError>;
}
