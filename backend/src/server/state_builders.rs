//! Builders turning [`ServerConfig`] into port implementations.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use pixelwall::domain::ports::{
    AssetStore, PaymentGateway, PixelPurchaseCommand, PixelPurchaseQuery, RegionRepository,
    UnconfiguredPaymentGateway,
};
use pixelwall::domain::{PaymentService, PixelPurchaseService};
use pixelwall::inbound::http::state::{HttpState, HttpStatePorts};
use pixelwall::outbound::assets::CapStdAssetStore;
use pixelwall::outbound::memory::InMemoryRegionRepository;
use pixelwall::outbound::payments::StripeHttpGateway;
use pixelwall::outbound::persistence::DieselRegionRepository;

use super::config::{PaymentConfig, ServerConfig};

/// Region store: PostgreSQL when a pool is configured, memory otherwise.
fn build_region_repository(config: &ServerConfig) -> Arc<dyn RegionRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselRegionRepository::new(pool.clone())),
        None => {
            warn!("no database configured; regions are kept in memory only");
            Arc::new(InMemoryRegionRepository::new())
        }
    }
}

fn build_asset_store(config: &ServerConfig) -> std::io::Result<Arc<dyn AssetStore>> {
    let store = CapStdAssetStore::open(&config.upload_dir, Arc::new(DefaultClock))
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!(dir = %config.upload_dir.display(), "asset store ready");
    Ok(Arc::new(store))
}

/// Payment gateway: Stripe when a secret key is set, otherwise one that
/// always reports payments as unavailable.
pub(super) fn build_payment_gateway(
    payments: &PaymentConfig,
) -> std::io::Result<Arc<dyn PaymentGateway>> {
    match payments.secret_key.as_deref() {
        Some(key) => {
            let gateway = StripeHttpGateway::new(&payments.api_base, key, payments.timeout)
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            info!(api_base = %payments.api_base, "payment gateway configured");
            Ok(Arc::new(gateway))
        }
        None => {
            warn!("no payment secret key configured; POST /pay will answer 503");
            Ok(Arc::new(UnconfiguredPaymentGateway))
        }
    }
}

/// Assemble handler state from the configured adapters.
///
/// # Errors
/// Returns [`std::io::Error`] when the upload directory cannot be opened or
/// the payment client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let regions = build_region_repository(config);
    let assets = build_asset_store(config)?;
    let gateway = build_payment_gateway(&config.payments)?;

    let purchases = Arc::new(PixelPurchaseService::new(regions, assets));
    let payments = Arc::new(PaymentService::new(gateway, config.payments.pricing.clone()));

    Ok(web::Data::new(HttpState::new(
        HttpStatePorts {
            purchases: purchases.clone() as Arc<dyn PixelPurchaseCommand>,
            gallery: purchases as Arc<dyn PixelPurchaseQuery>,
            payments,
        },
        config.max_upload_bytes,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelwall::domain::{Currency, PaymentIntentRequest};
    use pixelwall::domain::ports::PaymentGatewayError;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    #[tokio::test]
    async fn missing_secret_key_selects_unconfigured_gateway() {
        let gateway = build_payment_gateway(&PaymentConfig::unconfigured()).expect("gateway");
        let request = PaymentIntentRequest {
            amount_minor: 50,
            currency: Currency::parse("usd").expect("valid"),
        };
        let err = gateway.create_intent(&request).await.expect_err("unavailable");
        assert!(matches!(err, PaymentGatewayError::Unavailable { .. }));
    }

    #[rstest]
    fn invalid_api_base_fails_startup() {
        let config = PaymentConfig::new(
            Some("sk_test".to_owned()),
            "not a url",
            Duration::from_secs(1),
            pixelwall::domain::Pricing::default(),
        );
        assert!(build_payment_gateway(&config).is_err());
    }

    #[rstest]
    fn unusable_upload_dir_fails_startup() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let config = ServerConfig::new(
            "127.0.0.1:0".parse().expect("addr"),
            file.path().join("uploads"),
        );
        assert!(build_http_state(&config).is_err());
    }
}
