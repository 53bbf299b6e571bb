//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use pixelwall::domain::Pricing;
use pixelwall::inbound::http::state::DEFAULT_MAX_UPLOAD_BYTES;
use pixelwall::outbound::persistence::DbPool;

/// Payment provider settings.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Provider secret; payments answer 503 when absent.
    pub(crate) secret_key: Option<String>,
    pub(crate) api_base: String,
    pub(crate) timeout: Duration,
    pub(crate) pricing: Pricing,
}

impl PaymentConfig {
    /// Configuration with no provider credentials and default pricing.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            secret_key: None,
            api_base: "https://api.stripe.com".to_owned(),
            timeout: Duration::from_secs(30),
            pricing: Pricing::default(),
        }
    }

    /// Build a configuration from explicit values.
    #[must_use]
    pub fn new(
        secret_key: Option<String>,
        api_base: impl Into<String>,
        timeout: Duration,
        pricing: Pricing,
    ) -> Self {
        Self {
            secret_key,
            api_base: api_base.into(),
            timeout,
            pricing,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upload_dir: PathBuf,
    pub(crate) max_upload_bytes: usize,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) payments: PaymentConfig,
}

impl ServerConfig {
    /// Construct a configuration storing assets under `upload_dir`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            upload_dir: upload_dir.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            db_pool: None,
            payments: PaymentConfig::unconfigured(),
        }
    }

    /// Attach a database connection pool; without one regions live in
    /// memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the largest accepted image upload.
    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Attach payment provider settings.
    #[must_use]
    pub fn with_payments(mut self, payments: PaymentConfig) -> Self {
        self.payments = payments;
        self
    }
}
