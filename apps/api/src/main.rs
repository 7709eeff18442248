mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::AnalysisHandler;
use crate::config::Config;
use crate::llm_client::build_model;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing credential)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skill Gap Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the model client; the credential lives only inside it and `config`
    let model = build_model(&config)?;
    info!(
        "LLM client initialized (provider: {}, model: {})",
        config.llm_provider,
        model.model_name()
    );

    let state = AppState {
        analyzer: AnalysisHandler::new(model),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!(
        "Listening on {addr} (upload limit {} MiB)",
        config.max_upload_bytes / (1024 * 1024)
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
