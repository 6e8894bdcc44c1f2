mod config;
mod dataset;
mod errors;
mod llm_client;
mod models;
mod recommend;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dataset::{load_dataset, Dataset};
use crate::llm_client::{DisabledGenerator, GeminiClient, TextGenerator};
use crate::recommend::pipeline::RecommendSettings;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparseable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Coach API v{}", env!("CARGO_PKG_VERSION"));

    // Load the job dataset once; a missing or malformed file is fatal
    let dataset = if config.use_sample_dataset {
        warn!("USE_SAMPLE_DATASET is set, serving the built-in sample dataset");
        Dataset::sample()
    } else {
        load_dataset(&config.dataset_path)
            .with_context(|| format!("Failed to load dataset from '{}'", config.dataset_path))?
    };
    if dataset.is_empty() {
        warn!("Dataset contains no job roles; only AI suggestions will be returned");
    }

    // Initialize LLM client (disabled when no API key is configured)
    let llm = build_llm(&config)?;

    let state = AppState {
        dataset: Arc::new(dataset),
        llm,
        settings: RecommendSettings::from(&config),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_llm(config: &Config) -> Result<Arc<dyn TextGenerator>> {
    let Some(api_key) = config.gemini_api_key.clone() else {
        warn!("GEMINI_API_KEY not set, AI suggestions disabled; descriptions use templates");
        return Ok(Arc::new(DisabledGenerator));
    };

    let client = GeminiClient::new(
        api_key,
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
        Duration::from_secs(config.ai_timeout_secs),
    )
    .context("Failed to build Gemini HTTP client")?;
    info!("LLM client initialized (model: {})", client.model());

    Ok(Arc::new(client))
}
