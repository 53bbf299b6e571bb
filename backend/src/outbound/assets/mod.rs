//! Filesystem asset storage adapters.

mod cap_std_asset_store;

pub use cap_std_asset_store::CapStdAssetStore;
