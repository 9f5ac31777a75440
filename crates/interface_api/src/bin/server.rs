//! Billing charge processing - API server binary
//!
//! # Usage
//!
//! ```bash
//! API_DATABASE_URL=postgres://... cargo run --bin cobranca-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `API_LOG_LEVEL` - Log filter when `RUST_LOG` is unset (default: info)
//! * `API_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `API_EVENT_BUFFER` - Consumption event channel capacity (default: 1024)
//! * `API_EVENT_SEND_TIMEOUT_MS` - Wait on a full event channel (default: 2000)

use std::net::SocketAddr;
use std::sync::Arc;

use domain_billing::ChannelEventPublisher;
use infra_db::adapters::{PostgresBillingRecordAdapter, PostgresCustomerAdapter};
use infra_db::{create_pool, run_migrations, DatabaseConfig};
use interface_api::config::{ApiConfig, LogFormat};
use interface_api::events::spawn_event_relay;
use interface_api::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;
    init_tracing(&config.log_level, config.log_format);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting billing API server");

    let pool = create_pool(
        DatabaseConfig::new(&config.database_url).max_connections(config.db_max_connections),
    )
    .await?;
    run_migrations(&pool).await?;

    let (publisher, events) = ChannelEventPublisher::channel(config.event_buffer);
    let publisher = publisher.with_send_timeout(config.event_send_timeout());
    let relay = spawn_event_relay(events);

    let state = AppState::new(
        Arc::new(PostgresBillingRecordAdapter::new(pool.clone())),
        Arc::new(PostgresCustomerAdapter::new(pool)),
        Arc::new(publisher),
    );
    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;
    info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last publisher, so the relay now drains and stops
    match relay.await {
        Ok(relayed) => info!(relayed, "Server shutdown complete"),
        Err(e) => error!(error = %e, "Event relay task failed"),
    }
    Ok(())
}

fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Waits for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
