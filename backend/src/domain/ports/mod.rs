//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are consumed by inbound adapters;
//! driven ports (repositories, stores, gateways) are implemented by outbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod asset_store;
mod payment_command;
mod payment_gateway;
mod pixel_purchase;
mod region_repository;

#[cfg(test)]
pub use asset_store::MockAssetStore;
pub use asset_store::{AssetStore, AssetStoreError};
#[cfg(test)]
pub use payment_command::MockPaymentCommand;
pub use payment_command::PaymentCommand;
#[cfg(test)]
pub use payment_gateway::MockPaymentGateway;
pub use payment_gateway::{PaymentGateway, PaymentGatewayError, UnconfiguredPaymentGateway};
#[cfg(test)]
pub use pixel_purchase::{MockPixelPurchaseCommand, MockPixelPurchaseQuery};
pub use pixel_purchase::{PixelPurchaseCommand, PixelPurchaseQuery, UploadRegionRequest};
#[cfg(test)]
pub use region_repository::MockRegionRepository;
pub use region_repository::{RegionRepository, RegionRepositoryError};
