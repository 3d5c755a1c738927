use anyhow::Result;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use smart_hub_service::{
    api::{self, AppState},
    clock::HubClock,
    config::Config,
    db,
    store::{MemoryStore, PgStore, Store},
    sunset::SunsetClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env (ignore error if file absent — env vars may be set externally)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    let store = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url).await?;
            db::run_migrations(&pool).await?;
            info!("Database ready");
            Store::Postgres(PgStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set; using the in-memory store, data will not survive a restart");
            Store::Memory(MemoryStore::new())
        }
    };

    let clock = HubClock::new(config.timezone);
    let sunset = SunsetClient::new(&config.sunset, clock)?;
    info!(
        latitude = config.sunset.latitude,
        longitude = config.sunset.longitude,
        timezone = %config.timezone,
        "Sunset lookup configured"
    );

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, store = store.backend(), "HTTP server listening");

    axum::serve(listener, api::router(AppState::new(store, sunset, clock)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
