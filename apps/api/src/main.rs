mod config;
mod engine;
mod errors;
mod extraction;
mod llm_client;
mod ontology;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, EvaluationBackend};
use crate::engine::evaluator::{DeterministicEvaluator, Evaluator, LlmEvaluator};
use crate::llm_client::LlmClient;
use crate::ontology::Ontology;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rolefit API v{}", env!("CARGO_PKG_VERSION"));

    // Load and validate the skill ontology once; shared read-only afterwards
    let ontology = match &config.ontology_path {
        Some(path) => {
            info!("Loading ontology from {}", path.display());
            Ontology::from_path(path)
        }
        None => Ontology::builtin(),
    }
    .context("Skill ontology failed validation")?;
    let ontology = Arc::new(ontology);

    let evaluator = build_evaluator(&config, ontology.clone())?;
    info!("Evaluator initialized (backend: {})", evaluator.backend());

    let state = AppState {
        config: config.clone(),
        ontology,
        evaluator,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the client origin is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Deterministic by default; the LLM backend needs `GEMINI_API_KEY`.
fn build_evaluator(config: &Config, ontology: Arc<Ontology>) -> Result<Arc<dyn Evaluator>> {
    match config.evaluation_backend {
        EvaluationBackend::Deterministic => Ok(Arc::new(DeterministicEvaluator::new(ontology))),
        EvaluationBackend::Llm => {
            let api_key = config
                .gemini_api_key
                .clone()
                .context("GEMINI_API_KEY is required for the llm evaluation backend")?;
            let llm = LlmClient::new(api_key, config.gemini_model.clone())
                .context("Failed to build LLM HTTP client")?;
            info!("LLM client initialized (model: {})", llm.model());
            Ok(Arc::new(LlmEvaluator(llm)))
        }
    }
}
