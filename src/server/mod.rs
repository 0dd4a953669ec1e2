//! HTTP surface
//!
//! | Method | Path                 | Body                        |
//! |--------|----------------------|-----------------------------|
//! | GET    | `/`                  | -                           |
//! | POST   | `/analyze`           | `AnalysisRequest`           |
//! | POST   | `/collect`           | `AnalysisRequest`           |
//! | POST   | `/generate-pipeline` | `PipelineGenerationRequest` |
//!
//! Every failure is answered with `{"detail": "..."}`.

mod error;
mod handlers;
pub mod models;

pub use error::ApiError;
pub use models::{ErrorBody, HealthResponse, PipelineGenerationRequest};

use crate::analysis::AnalysisService;
use crate::config::PipewrightConfig;
use anyhow::{Context, Result};
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnalysisService>,
}

impl AppState {
    pub fn new(service: AnalysisService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/", get(handlers::root))
        .route("/analyze", post(handlers::analyze))
        .route("/collect", post(handlers::collect))
        .route("/generate-pipeline", post(handlers::generate_pipeline))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Binds the configured address and serves until Ctrl-C
pub async fn serve(config: &PipewrightConfig, state: AppState) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    info!("Listening on http://{}", address);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
