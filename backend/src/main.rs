//! Backend entry-point: loads settings, prepares the database and serves the
//! REST API until SIGINT or SIGTERM.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hiring_backend::inbound::http::health::HealthState;
use hiring_backend::inbound::http::session_config::{
    BuildMode, key_fingerprint, session_settings_from_env,
};
use hiring_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use hiring_backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn connect(settings: &ServerSettings) -> Result<Option<DbPool>> {
    let Some(url) = settings.database_url.as_deref() else {
        return Ok(None);
    };
    run_pending_migrations(url)
        .await
        .wrap_err("database migrations failed")?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
        .await
        .wrap_err("database pool could not be built")?;
    Ok(Some(pool))
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::current())
        .wrap_err("invalid session configuration")?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let mut config = ServerConfig::new(session, settings.bind_addr())
        .with_exposure(settings.exposure())
        .with_locale(settings.locale());
    if let Some(pool) = connect(&settings).await? {
        config = config.with_db_pool(pool);
    }

    let bind_addr = config.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to start server on {bind_addr}"))?;
    info!(%bind_addr, "listening");

    let handle = server.handle();
    let drain_state = health_state.clone();
    actix_web::rt::spawn(async move {
        if let Err(err) = shutdown_signal().await {
            warn!(error = %err, "signal listener failed; shutting down");
        }
        info!("shutdown requested; draining connections");
        drain_state.mark_unhealthy();
        handle.stop(true).await;
    });

    server.await.wrap_err("server terminated abnormally")
}
