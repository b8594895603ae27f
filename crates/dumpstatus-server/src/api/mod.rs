//! HTTP routes and shared state

pub mod status;

use crate::config::Config;
use crate::middleware;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use dumpstatus_scraper::{Backend, StatusAggregator, WikiList};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tracing::{error, info};

/// Body of every 500 response; internal detail only goes to the log
pub const GENERIC_ERROR: &str = "The dumps API application ran into problems. \
                                 Please check your parameters and try again.";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<StatusAggregator>,
    pub wiki_list: WikiList,
    pub skip: Option<String>,
    pub allwikis: String,
    pub workers: usize,
}

impl AppState {
    pub fn from_config(config: &Config) -> dumpstatus_common::Result<Self> {
        let aggregator = match config.backend()? {
            Backend::Scraper => StatusAggregator::with_fs_probe(
                config.directories.dumps.clone(),
                config.limits.probe_limits(),
            ),
        };

        Ok(Self {
            aggregator: Arc::new(aggregator),
            wiki_list: WikiList::new(config.directories.wikilists.clone()),
            skip: config.misc.skip.clone(),
            allwikis: config.misc.allwikis.clone(),
            workers: config.limits.workers,
        })
    }
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/dumpstatus", get(status::dump_status))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
}

async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "dumpstatus",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Any failure escaping a handler; reported to the client generically
pub struct ApiError(anyhow::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain")],
            GENERIC_ERROR,
        )
            .into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
