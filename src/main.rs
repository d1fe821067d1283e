//! sports_events - Sport Event Scheduling API
//!
//! Serves event schedules from a table keyed by home team and date, with
//! secondary indexes on away team and city.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sports_events::api;
use sports_events::config::{Config, LogFormat, StoreBackend};
use sports_events::db;
use sports_events::{EventRepository, EventTable, InMemoryEventTable, PgEventTable};

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sports_events=debug,tower_http=debug".into());

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Build the application router
fn build_router(repository: EventRepository, config: &Config) -> Router {
    let api_router = api::create_router()
        .layer(middleware::from_fn(api::middleware::logging_middleware));

    let router = Router::new()
        // Health check
        .route("/health", axum::routing::get(health_check))
        .nest("/api/v1", api_router)
        .layer(TraceLayer::new_for_http());

    let router = if config.is_production() {
        router
    } else {
        router.layer(CorsLayer::permissive())
    };

    router.with_state(repository)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the event table for the configured backend
async fn build_table(config: &Config) -> anyhow::Result<Arc<dyn EventTable>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let pool = db::shared_pool(config).await?;
            db::verify_connection(pool).await?;

            if !db::check_schema(pool).await? {
                tracing::error!("Database schema is not complete. Please run migrations.");
                return Err(anyhow::anyhow!("Database schema incomplete"));
            }

            tracing::info!("Database connected successfully");
            Ok(Arc::new(PgEventTable::new(pool.clone())))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory event table; data is lost on shutdown");
            Ok(Arc::new(InMemoryEventTable::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!(backend = ?config.store_backend, "Starting sports_events server");

    let table = build_table(&config).await?;
    let repository = EventRepository::new(table);

    tracing::info!("Listening on http://{}", addr);

    let app = build_router(repository, &config);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down...");
    db::close_shared_pool().await;
    tracing::info!("Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
