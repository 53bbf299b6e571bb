//! Driven port for the external payment provider.
//!
//! The provider is an opaque collaborator: adapters translate a
//! [`PaymentIntentRequest`] into whatever wire call the provider needs and
//! return the client secret verbatim.

use async_trait::async_trait;

use crate::domain::{PaymentIntent, PaymentIntentRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by payment provider adapters.
    pub enum PaymentGatewayError {
        /// The provider could not be reached.
        Transport { message: String } =>
            "payment provider transport failed: {message}",
        /// The provider did not answer in time.
        Timeout { message: String } =>
            "payment provider timed out: {message}",
        /// The provider refused the request.
        Rejected { message: String } =>
            "payment provider rejected the request: {message}",
        /// The provider answered with an unexpected payload.
        Decode { message: String } =>
            "payment provider response could not be decoded: {message}",
        /// No provider is configured for this deployment.
        Unavailable { message: String } =>
            "payment provider unavailable: {message}",
    }
}

/// Port for creating payment intents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an intent for exactly the requested amount and currency.
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentGatewayError>;
}

/// Gateway used when no provider credentials are configured.
///
/// Every call fails with [`PaymentGatewayError::Unavailable`] so the rest of
/// the wall keeps working without payments.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredPaymentGateway;

#[async_trait]
impl PaymentGateway for UnconfiguredPaymentGateway {
    async fn create_intent(
        &self,
        _request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentGatewayError> {
        Err(PaymentGatewayError::unavailable(
            "no payment provider secret key configured",
        ))
    }
}
