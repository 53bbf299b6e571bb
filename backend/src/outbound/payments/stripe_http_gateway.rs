//! Reqwest-backed Stripe payment gateway.
//!
//! This adapter owns transport details only: form encoding, bearer
//! authentication, timeout and HTTP error mapping, and JSON decoding of the
//! created intent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use super::dto::{ErrorEnvelopeDto, PaymentIntentDto};
use crate::domain::ports::{PaymentGateway, PaymentGatewayError};
use crate::domain::{PaymentIntent, PaymentIntentRequest};

const PAYMENT_INTENTS_PATH: &str = "v1/payment_intents";

/// Payment gateway that creates Stripe payment intents over HTTPS.
pub struct StripeHttpGateway {
    client: Client,
    endpoint: Url,
    secret_key: String,
}

impl StripeHttpGateway {
    /// Build a gateway for `api_base` (for example `https://api.stripe.com`).
    ///
    /// # Errors
    ///
    /// Returns [`PaymentGatewayError::Unavailable`] when the base URL is
    /// invalid or the HTTP client cannot be constructed.
    pub fn new(
        api_base: &str,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PaymentGatewayError> {
        let endpoint = payment_intents_endpoint(api_base)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PaymentGatewayError::unavailable(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            secret_key: secret_key.into(),
        })
    }
}

fn payment_intents_endpoint(api_base: &str) -> Result<Url, PaymentGatewayError> {
    let mut base = Url::parse(api_base).map_err(|err| {
        PaymentGatewayError::unavailable(format!("invalid payment API base '{api_base}': {err}"))
    })?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PAYMENT_INTENTS_PATH).map_err(|err| {
        PaymentGatewayError::unavailable(format!("invalid payment API base '{api_base}': {err}"))
    })
}

#[async_trait]
impl PaymentGateway for StripeHttpGateway {
    async fn create_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentGatewayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.secret_key)
            .form(&[
                ("amount", request.amount_minor.to_string()),
                ("currency", request.currency.to_string()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_intent(body.as_ref())
    }
}

fn parse_intent(body: &[u8]) -> Result<PaymentIntent, PaymentGatewayError> {
    let decoded: PaymentIntentDto = serde_json::from_slice(body).map_err(|error| {
        PaymentGatewayError::decode(format!("invalid payment intent JSON: {error}"))
    })?;
    decoded.into_domain().map_err(PaymentGatewayError::decode)
}

fn map_transport_error(error: reqwest::Error) -> PaymentGatewayError {
    if error.is_timeout() {
        PaymentGatewayError::timeout(error.to_string())
    } else {
        PaymentGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PaymentGatewayError {
    let summary = serde_json::from_slice::<ErrorEnvelopeDto>(body)
        .ok()
        .and_then(|envelope| envelope.error.summary());
    let message = match summary {
        Some(summary) => format!("status {}: {summary}", status.as_u16()),
        None => format!("status {}", status.as_u16()),
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            PaymentGatewayError::timeout(message)
        }
        _ if status.is_client_error() => PaymentGatewayError::rejected(message),
        _ => PaymentGatewayError::transport(message),
    }
}
