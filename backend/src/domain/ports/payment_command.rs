//! Driving port for pixel payments.

use async_trait::async_trait;

use crate::domain::{ClientSecret, Error};

/// Use-case for creating a payment intent for a pixel purchase.
///
/// The intent is not linked to any region record: payment and upload are
/// independent requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentCommand: Send + Sync {
    /// Price `pixels` and return the provider's client secret.
    async fn create_intent(&self, pixels: i64) -> Result<ClientSecret, Error>;
}
