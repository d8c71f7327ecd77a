use std::sync::Arc;

use crate::config::Config;
use crate::engine::evaluator::Evaluator;
use crate::ontology::Ontology;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only after startup; shared by every request.
    pub ontology: Arc<Ontology>,
    /// Pluggable evaluator. Default: DeterministicEvaluator. Swap via EVALUATION_BACKEND.
    pub evaluator: Arc<dyn Evaluator>,
}
