//! Application settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `PIXELWALL_*` environment variables over
//! configuration files. The bind address carries a declared default so an
//! empty environment still loads; accessors supply the remaining defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{Currency, DEFAULT_UNIT_PRICE_MINOR, Pricing, PricingError};
use crate::inbound::http::state::DEFAULT_MAX_UPLOAD_BYTES;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const DEFAULT_PAYMENT_TIMEOUT_SECS: u64 = 30;

/// Conventional database URL variable honoured when the prefixed one is
/// unset.
pub const DATABASE_URL_FALLBACK_ENV: &str = "DATABASE_URL";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Runtime configuration for the pixel wall server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PIXELWALL")]
pub struct AppSettings {
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// PostgreSQL URL; the in-memory record store is used when unset.
    pub database_url: Option<String>,
    /// Directory holding uploaded assets.
    pub upload_dir: Option<PathBuf>,
    /// Largest accepted image upload in bytes.
    pub max_upload_bytes: Option<usize>,
    /// Payment provider secret key; payments answer 503 when unset.
    pub stripe_secret_key: Option<String>,
    /// Payment provider API base URL.
    pub stripe_api_base: Option<String>,
    /// Price of one pixel in minor currency units.
    pub unit_price_minor: Option<u64>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
    /// Timeout for payment provider calls.
    pub payment_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Parse the configured bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.trim();
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Configured database URL, falling back to `DATABASE_URL`.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var(DATABASE_URL_FALLBACK_ENV).ok())
            .filter(|url| !url.trim().is_empty())
    }

    /// Directory for uploaded assets.
    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR))
    }

    /// Largest accepted image upload in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Secret key for the payment provider, if one is configured.
    pub fn stripe_secret_key(&self) -> Option<&str> {
        self.stripe_secret_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// Payment provider API base URL.
    pub fn stripe_api_base(&self) -> &str {
        self.stripe_api_base
            .as_deref()
            .unwrap_or(DEFAULT_STRIPE_API_BASE)
    }

    /// Timeout applied to payment provider calls.
    pub fn payment_timeout(&self) -> Duration {
        Duration::from_secs(
            self.payment_timeout_secs
                .unwrap_or(DEFAULT_PAYMENT_TIMEOUT_SECS),
        )
    }

    /// Price list built from the unit price and currency settings.
    pub fn pricing(&self) -> Result<Pricing, SettingsError> {
        let defaults = Pricing::default();
        let currency = match self.currency.as_deref() {
            Some(raw) => Currency::parse(raw)?,
            None => defaults.currency().clone(),
        };
        Ok(Pricing::new(
            self.unit_price_minor.unwrap_or(DEFAULT_UNIT_PRICE_MINOR),
            currency,
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 10] = [
        "PIXELWALL_BIND_ADDR",
        "PIXELWALL_DATABASE_URL",
        "PIXELWALL_UPLOAD_DIR",
        "PIXELWALL_MAX_UPLOAD_BYTES",
        "PIXELWALL_STRIPE_SECRET_KEY",
        "PIXELWALL_STRIPE_API_BASE",
        "PIXELWALL_UNIT_PRICE_MINOR",
        "PIXELWALL_CURRENCY",
        "PIXELWALL_PAYMENT_TIMEOUT_SECS",
        DATABASE_URL_FALLBACK_ENV,
    ];

    fn cleared_env(overrides: &[(&str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("pixelwall")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared_env(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("valid")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.upload_dir(), PathBuf::from("uploads"));
        assert_eq!(settings.max_upload_bytes(), 10 * 1024 * 1024);
        assert!(settings.stripe_secret_key().is_none());
        assert_eq!(settings.stripe_api_base(), "https://api.stripe.com");
        assert_eq!(settings.payment_timeout(), Duration::from_secs(30));
        assert_eq!(settings.pricing().expect("default pricing"), Pricing::default());
    }

    #[rstest]
    fn loads_with_no_flags_variables_or_files() {
        let _guard = lock_env(cleared_env(&[]));

        let settings = AppSettings::load_from_iter([OsString::from("pixelwall")]);
        let settings = settings.expect("an empty environment should load");
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_env(&[
            ("PIXELWALL_BIND_ADDR", "127.0.0.1:8080"),
            ("PIXELWALL_DATABASE_URL", "postgres://localhost/pixels"),
            ("PIXELWALL_UPLOAD_DIR", "/tmp/pixel-uploads"),
            ("PIXELWALL_MAX_UPLOAD_BYTES", "2048"),
            ("PIXELWALL_STRIPE_SECRET_KEY", "sk_test_123"),
            ("PIXELWALL_UNIT_PRICE_MINOR", "7"),
            ("PIXELWALL_CURRENCY", "EUR"),
            ("PIXELWALL_PAYMENT_TIMEOUT_SECS", "5"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address"),
            "127.0.0.1:8080".parse::<SocketAddr>().expect("valid")
        );
        assert_eq!(
            settings.database_url().as_deref(),
            Some("postgres://localhost/pixels")
        );
        assert_eq!(settings.upload_dir(), PathBuf::from("/tmp/pixel-uploads"));
        assert_eq!(settings.max_upload_bytes(), 2048);
        assert_eq!(settings.stripe_secret_key(), Some("sk_test_123"));
        assert_eq!(settings.payment_timeout(), Duration::from_secs(5));
        let pricing = settings.pricing().expect("pricing");
        assert_eq!(pricing.unit_price_minor(), 7);
        assert_eq!(pricing.currency().as_str(), "eur");
    }

    #[rstest]
    fn database_url_falls_back_to_conventional_variable() {
        let _guard = lock_env(cleared_env(&[(
            DATABASE_URL_FALLBACK_ENV,
            "postgres://fallback/pixels",
        )]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url().as_deref(),
            Some("postgres://fallback/pixels")
        );
    }

    #[rstest]
    fn invalid_values_are_reported() {
        let _guard = lock_env(cleared_env(&[
            ("PIXELWALL_BIND_ADDR", "not-an-address"),
            ("PIXELWALL_CURRENCY", "dollars"),
        ]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
        assert!(matches!(settings.pricing(), Err(SettingsError::Pricing(_))));
    }
}
