//! Evaluator — pluggable backend that turns a candidate profile into an `EvaluationReport`.
//!
//! Default: `DeterministicEvaluator` (ontology-driven, fast, reproducible, fully testable).
//! Alternative: `LlmEvaluator` (delegates the whole judgement to the generative model).
//!
//! `AppState` holds an `Arc<dyn Evaluator>`, chosen at startup via `EVALUATION_BACKEND`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::engine::evaluate;
use crate::engine::report::EvaluationReport;
use crate::errors::AppError;
use crate::llm_client::prompts::{EVALUATION_PROMPT_TEMPLATE, EVALUATION_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::ontology::Ontology;

/// Everything the caller submitted about one candidate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub resume_text: String,
    pub github_link: Option<String>,
    pub linkedin_link: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap evaluation backends without touching the handler.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, profile: &CandidateProfile) -> Result<EvaluationReport, AppError>;

    /// "deterministic" | "llm" — for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// DeterministicEvaluator — default
// ────────────────────────────────────────────────────────────────────────────

pub struct DeterministicEvaluator {
    ontology: Arc<Ontology>,
}

impl DeterministicEvaluator {
    pub fn new(ontology: Arc<Ontology>) -> Self {
        Self { ontology }
    }
}

#[async_trait]
impl Evaluator for DeterministicEvaluator {
    async fn evaluate(&self, profile: &CandidateProfile) -> Result<EvaluationReport, AppError> {
        // Profile links carry no skill evidence for the ontology matcher.
        Ok(evaluate(&self.ontology, &profile.resume_text)?)
    }

    fn backend(&self) -> &'static str {
        "deterministic"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmEvaluator — generative-model backend
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmEvaluator(pub LlmClient);

#[async_trait]
impl Evaluator for LlmEvaluator {
    async fn evaluate(&self, profile: &CandidateProfile) -> Result<EvaluationReport, AppError> {
        let prompt = build_evaluation_prompt(profile);
        self.0
            .call_json::<EvaluationReport>(&prompt, EVALUATION_SYSTEM)
            .await
            .map_err(map_llm_error)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Quota exhaustion keeps its own outcome; every other model failure is a generic LLM error.
fn map_llm_error(e: LlmError) -> AppError {
    match e {
        LlmError::QuotaExceeded => AppError::QuotaExceeded,
        other => AppError::Llm(format!("Evaluation failed: {other}")),
    }
}

fn build_evaluation_prompt(profile: &CandidateProfile) -> String {
    fill_placeholders(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            ("resume_text", &profile.resume_text),
            (
                "github_link",
                profile.github_link.as_deref().unwrap_or("Not provided"),
            ),
            (
                "linkedin_link",
                profile.linkedin_link.as_deref().unwrap_or("Not provided"),
            ),
        ],
    )
}

/// Single left-to-right pass over `template`: substituted values are never rescanned,
/// so placeholder-like text inside a résumé stays verbatim.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values.iter().find_map(|(key, value)| {
            tail.strip_prefix(key)
                .and_then(|after| after.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
