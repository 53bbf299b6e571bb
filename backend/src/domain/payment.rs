//! Pixel pricing and payment-intent value types.

use std::fmt;

/// Smallest pixel count that may be purchased in one payment.
pub const MIN_PURCHASE_PIXELS: i64 = 10;

/// Default price of one pixel in minor currency units ($0.05).
pub const DEFAULT_UNIT_PRICE_MINOR: u64 = 5;

/// Default ISO 4217 currency code, lower-cased as the provider expects.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Validation errors raised while pricing a purchase.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    /// The requested pixel count is below [`MIN_PURCHASE_PIXELS`].
    #[error("min 10 pixels")]
    BelowMinimum { requested: i64 },
    /// `pixels * unit_price` does not fit in the amount type.
    #[error("purchase of {pixels} pixels exceeds the maximum payable amount")]
    AmountOverflow { pixels: i64 },
    /// The configured currency code is not three ASCII letters.
    #[error("currency must be a three-letter ISO 4217 code, got '{0}'")]
    InvalidCurrency(String),
}

/// Three-letter currency code in lower case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency(String);

impl Currency {
    /// Validate and normalise a currency code.
    ///
    /// # Examples
    /// ```
    /// use pixelwall::domain::Currency;
    ///
    /// assert_eq!(Currency::parse("USD").expect("valid").as_str(), "usd");
    /// assert!(Currency::parse("dollars").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, PricingError> {
        let trimmed = raw.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PricingError::InvalidCurrency(raw.to_owned()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Borrow the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Price list applied to pixel purchases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pricing {
    unit_price_minor: u64,
    currency: Currency,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            unit_price_minor: DEFAULT_UNIT_PRICE_MINOR,
            currency: Currency(DEFAULT_CURRENCY.to_owned()),
        }
    }
}

impl Pricing {
    /// Build a price list from a unit price and currency.
    #[must_use]
    pub fn new(unit_price_minor: u64, currency: Currency) -> Self {
        Self {
            unit_price_minor,
            currency,
        }
    }

    /// Price of one pixel in minor units.
    #[must_use]
    pub fn unit_price_minor(&self) -> u64 {
        self.unit_price_minor
    }

    /// Currency the price list is expressed in.
    #[must_use]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Validate a pixel count and compute the amount to charge.
    ///
    /// # Examples
    /// ```
    /// use pixelwall::domain::Pricing;
    ///
    /// let request = Pricing::default().quote(10).expect("minimum purchase");
    /// assert_eq!(request.amount_minor, 50);
    /// assert_eq!(request.currency.as_str(), "usd");
    /// ```
    pub fn quote(&self, pixels: i64) -> Result<PaymentIntentRequest, PricingError> {
        if pixels < MIN_PURCHASE_PIXELS {
            return Err(PricingError::BelowMinimum { requested: pixels });
        }
        let amount_minor = u64::try_from(pixels)
            .ok()
            .and_then(|count| count.checked_mul(self.unit_price_minor))
            .ok_or(PricingError::AmountOverflow { pixels })?;
        Ok(PaymentIntentRequest {
            amount_minor,
            currency: self.currency.clone(),
        })
    }
}

/// Amount and currency forwarded to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    pub amount_minor: u64,
    pub currency: Currency,
}

/// Provider-issued token the browser uses to complete the charge.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Wrap a provider-issued secret verbatim.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the secret for the response body.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(<redacted>)")
    }
}

/// A payment intent created by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Provider identifier, logged for manual reconciliation.
    pub id: String,
    pub client_secret: ClientSecret,
}
