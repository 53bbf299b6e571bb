//! Payment delegate service.
//!
//! Prices a pixel count and forwards the intent to the payment gateway. No
//! local record of the intent is kept, so a payment is never tied to the
//! region it was meant to cover.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{PaymentCommand, PaymentGateway, PaymentGatewayError};
use crate::domain::{ClientSecret, Error, Pricing, PricingError};

fn map_pricing_error(error: PricingError) -> Error {
    match error {
        PricingError::BelowMinimum { requested } => Error::invalid_request(error.to_string())
            .with_details(json!({ "field": "pixels", "requested": requested })),
        PricingError::AmountOverflow { .. } | PricingError::InvalidCurrency(_) => {
            Error::invalid_request(error.to_string())
        }
    }
}

/// Client-facing text for provider failures; the detail is only logged.
const UPSTREAM_FAILURE_MESSAGE: &str = "payment provider request failed";

fn map_gateway_error(error: PaymentGatewayError) -> Error {
    match error {
        PaymentGatewayError::Unavailable { message } => {
            Error::service_unavailable(format!("payments unavailable: {message}"))
        }
        other => {
            warn!(error = %other, "payment provider call failed");
            Error::upstream(UPSTREAM_FAILURE_MESSAGE)
        }
    }
}

/// Service implementing [`PaymentCommand`].
pub struct PaymentService<G: ?Sized> {
    gateway: Arc<G>,
    pricing: Pricing,
}

impl<G: ?Sized> PaymentService<G> {
    /// Create a service charging according to `pricing`.
    pub fn new(gateway: Arc<G>, pricing: Pricing) -> Self {
        Self { gateway, pricing }
    }
}

#[async_trait]
impl<G> PaymentCommand for PaymentService<G>
where
    G: PaymentGateway + ?Sized,
{
    async fn create_intent(&self, pixels: i64) -> Result<ClientSecret, Error> {
        let request = self.pricing.quote(pixels).map_err(map_pricing_error)?;
        let intent = self
            .gateway
            .create_intent(&request)
            .await
            .map_err(map_gateway_error)?;
        info!(
            intent_id = %intent.id,
            pixels,
            amount_minor = request.amount_minor,
            currency = %request.currency,
            "payment intent created"
        );
        Ok(intent.client_secret)
    }
}

#[cfg(test)]
#[path = "payment_service_tests.rs"]
mod tests;
