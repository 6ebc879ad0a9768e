use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;

use pharmacy_notify::api::{build_router, AppState};
use pharmacy_notify::cli::Cli;
use pharmacy_notify::config::Config;
use pharmacy_notify::db;
use pharmacy_notify::logging::init_logging;
use pharmacy_notify::metrics::AppMetrics;
use pharmacy_notify::repository::SqliteStore;
use pharmacy_notify::store::PharmacyStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        })
        .with_overrides(cli.port, cli.database_url);

    // Store initialization failure degrades to mock mode rather than
    // aborting: the directory falls back to seed data and dispatch runs
    // dry. Initialized once here and injected; never re-checked globally.
    let store: Option<Arc<dyn PharmacyStore>> = match &config.database_url {
        Some(url) => match db::create_pool(url).await {
            Ok(pool) => Some(Arc::new(SqliteStore::new(pool))),
            Err(err) => {
                tracing::warn!("store initialization failed, running in mock mode: {}", err);
                None
            }
        },
        None => None,
    };

    let mode = if store.is_some() {
        "LIVE (store connected)"
    } else {
        "DEV (seed data)"
    };

    let metrics = Arc::new(AppMetrics::new().unwrap_or_else(|err| {
        tracing::error!("failed to register metrics: {}", err);
        std::process::exit(1);
    }));

    let state = Arc::new(AppState::new(store, metrics));
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("mode: {}", mode);
    tracing::info!("health: http://localhost:{}/api/v1/health", config.port);
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap_or_else(|err| {
        tracing::error!("failed to bind {}: {}", addr, err);
        std::process::exit(1);
    });

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", err);
        std::process::exit(1);
    }
}
