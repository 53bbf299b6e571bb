//! PixelWall entry-point: loads settings, prepares storage, and serves HTTP.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pixelwall::inbound::http::health::HealthState;
use pixelwall::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pixelwall::settings::AppSettings;
use server::{PaymentConfig, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let pricing = settings.pricing().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, settings.upload_dir())
        .with_max_upload_bytes(settings.max_upload_bytes())
        .with_payments(PaymentConfig::new(
            settings.stripe_secret_key().map(str::to_owned),
            settings.stripe_api_base(),
            settings.payment_timeout(),
            pricing,
        ));

    if let Some(database_url) = settings.database_url() {
        let applied = run_pending_migrations(&database_url)
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations complete");
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "pixel wall listening");

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested; failing health probes");
            health_state.mark_unhealthy();
            handle.stop(true).await;
        }
    });

    server.await
}
