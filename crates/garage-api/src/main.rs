//! # garage-api: Binary Entry Point
//!
//! Loads configuration from the environment, opens the database and serves
//! the API on `0.0.0.0:$PORT` until Ctrl-C or SIGTERM.

use garage_api::session::SessionKeys;
use garage_api::state::{AppConfig, AppState};
use garage_enquiry_client::EnquiryClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {e}");
        e
    })?;
    tracing::debug!(?config, "configuration loaded");

    let pool = garage_api::db::connect(&config.database_url)
        .await
        .map_err(|e| {
            tracing::error!("Database initialization failed: {e}");
            e
        })?;

    let sessions = SessionKeys::new(config.jwt_secret.as_bytes());
    let mut state = AppState::new(pool, sessions);

    match config.enquiry.clone() {
        Some(enquiry_config) => {
            let client = EnquiryClient::new(enquiry_config).map_err(|e| {
                tracing::error!("Failed to create registry client: {e}");
                e
            })?;
            tracing::info!(endpoint = %client.endpoint(), "MOT registry client configured");
            state = state.with_enquiry(client);
        }
        None => {
            tracing::warn!("MOT_API_KEY not set. /api/mot will return 503.");
        }
    }

    let app = garage_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Garage API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// `RUST_LOG` filtering (default `info`); `LOG_FORMAT=json` for JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
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
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
