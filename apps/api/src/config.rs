use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_MODEL;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Which evaluator answers `POST /evaluate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationBackend {
    Deterministic,
    Llm,
}

impl std::str::FromStr for EvaluationBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deterministic" => Ok(Self::Deterministic),
            "llm" => Ok(Self::Llm),
            other => bail!("EVALUATION_BACKEND must be 'deterministic' or 'llm', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup on invalid values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub evaluation_backend: EvaluationBackend,
    /// Required only for the `llm` backend.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Overrides the bundled ontology when set.
    pub ontology_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let evaluation_backend: EvaluationBackend = optional_env("EVALUATION_BACKEND")
            .unwrap_or_else(|| "deterministic".to_string())
            .parse()?;

        let gemini_api_key = optional_env("GEMINI_API_KEY");
        if evaluation_backend == EvaluationBackend::Llm {
            require_env("GEMINI_API_KEY")?;
        }

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            evaluation_backend,
            gemini_api_key,
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ontology_path: optional_env("ONTOLOGY_PATH").map(PathBuf::from),
            max_upload_bytes: parse_max_upload_bytes(optional_env("MAX_UPLOAD_BYTES"))?,
        })
    }
}

fn parse_max_upload_bytes(raw: Option<String>) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MAX_UPLOAD_BYTES);
    };
    let bytes = raw
        .trim()
        .parse::<usize>()
        .context("MAX_UPLOAD_BYTES must be a positive integer")?;
    if bytes == 0 {
        bail!("MAX_UPLOAD_BYTES must be a positive integer");
    }
    Ok(bytes)
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and empty are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            port: 0,
            rust_log: "debug".to_string(),
            evaluation_backend: EvaluationBackend::Deterministic,
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            ontology_path: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
