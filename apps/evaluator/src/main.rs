mod config;
mod errors;
mod evaluation;
mod extraction;
mod llm_client;
mod models;
mod report;
mod routes;
mod state;
mod ui;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing credential)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS evaluator v{}", env!("CARGO_PKG_VERSION"));

    // Initialize model client
    let gemini = GeminiClient::new(config.google_api_key.clone(), &config.gemini_api_base)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    info!(
        "Run limits: {} resumes, {} byte uploads, {} pending reports",
        config.max_resumes_per_run, config.max_upload_bytes, config.report_cache_capacity
    );

    let state = AppState::new(Arc::new(gemini), config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
