//! Backend entry-point: loads settings, wires adapters, and serves HTTP.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bondbook::inbound::http::health::HealthState;
use bondbook::outbound::lei::LeiHttpSource;
use bondbook::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let config = build_server_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server =
        create_server(health_state.clone(), config).wrap_err("failed to start HTTP server")?;
    actix_web::rt::spawn(async move {
        // actix stops the server on the same signal; liveness reports 503 while it drains.
        if tokio::signal::ctrl_c().await.is_ok() {
            health_state.mark_unhealthy();
            info!("shutdown requested, draining connections");
        }
    });
    server.await.wrap_err("HTTP server terminated abnormally")
}

async fn build_server_config(settings: &AppSettings) -> Result<ServerConfig> {
    let registry = LeiHttpSource::with_user_agent(
        settings.lei_endpoint()?,
        settings.lei_timeout(),
        settings.lei_user_agent(),
    )
    .wrap_err("failed to build LEI registry client")?;
    let config = ServerConfig::new(settings.bind_addr()?, Arc::new(registry));

    let Some(database_url) = settings.database_url.as_deref() else {
        return Ok(config);
    };
    if settings.run_migrations {
        apply_migrations(database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
        info!("database migrations applied");
    }
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.database_max_connections()),
    )
    .await
    .wrap_err("failed to build database pool")?;
    Ok(config.with_db_pool(pool))
}
