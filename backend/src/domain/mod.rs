//! Domain primitives, ports, and services.
//!
//! Purpose: Define the strongly typed entities of the pixel wall and the
//! services that orchestrate uploads and payments. Types are immutable once
//! constructed and document their invariants in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Placement / Region / RegionId: purchased canvas regions.
//! - AssetRef: generated, path-safe asset filename.
//! - Pricing / ClientSecret: payment quoting and provider output.
//! - PixelPurchaseService / PaymentService: driving port implementations.

pub mod asset;
pub mod error;
pub mod payment;
pub mod payment_service;
pub mod pixel_purchase_service;
pub mod ports;
pub mod region;
pub mod trace_id;

pub use self::asset::{
    AssetRef, AssetRefValidationError, DEFAULT_ASSET_NAME, sanitize_original_name,
};
pub use self::error::{Error, ErrorCode};
pub use self::payment::{
    ClientSecret, Currency, DEFAULT_CURRENCY, DEFAULT_UNIT_PRICE_MINOR, MIN_PURCHASE_PIXELS,
    PaymentIntent, PaymentIntentRequest, Pricing, PricingError,
};
pub use self::payment_service::PaymentService;
pub use self::pixel_purchase_service::PixelPurchaseService;
pub use self::region::{
    MIN_REGION_SIZE, NewRegion, Placement, PlacementValidationError, Region, RegionId,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
