//! DTOs for decoding payment provider responses.

use serde::Deserialize;

use crate::domain::{ClientSecret, PaymentIntent};

#[derive(Debug, Deserialize)]
pub(super) struct PaymentIntentDto {
    pub(super) id: String,
    pub(super) client_secret: Option<String>,
}

impl PaymentIntentDto {
    pub(super) fn into_domain(self) -> Result<PaymentIntent, String> {
        let client_secret = self
            .client_secret
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| format!("payment intent {} has no client_secret", self.id))?;
        Ok(PaymentIntent {
            id: self.id,
            client_secret: ClientSecret::new(client_secret),
        })
    }
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorDto {
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default, rename = "type")]
    pub(super) error_type: Option<String>,
}

impl ErrorDto {
    pub(super) fn summary(&self) -> Option<String> {
        match (self.error_type.as_deref(), self.message.as_deref()) {
            (Some(kind), Some(message)) => Some(format!("{kind}: {message}")),
            (None, Some(message)) => Some(message.to_owned()),
            (Some(kind), None) => Some(kind.to_owned()),
            (None, None) => None,
        }
    }
}
