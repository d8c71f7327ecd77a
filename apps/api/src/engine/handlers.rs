//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::engine::evaluator::CandidateProfile;
use crate::engine::report::EvaluationReport;
use crate::errors::AppError;
use crate::extraction::extract_text_from_pdf;
use crate::state::AppState;

/// Multipart fields accepted by `POST /evaluate`. All optional on the wire.
#[derive(Debug, Default)]
pub struct EvaluateForm {
    pub resume_file: Option<Bytes>,
    pub resume_text: Option<String>,
    pub github_link: Option<String>,
    pub linkedin_link: Option<String>,
}

impl EvaluateForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = EvaluateForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error("multipart field", e))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume_file" => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error("resume_file", e))?;
                    // Browsers send an empty part when no file was picked.
                    if !data.is_empty() {
                        form.resume_file = Some(data);
                    }
                }
                "resume_text" | "github_link" | "linkedin_link" => {
                    let value = field.text().await.map_err(|e| multipart_error(&name, e))?;
                    let value = Some(value).filter(|v| !v.is_empty());
                    match name.as_str() {
                        "resume_text" => form.resume_text = value,
                        "github_link" => form.github_link = value,
                        _ => form.linkedin_link = value,
                    }
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Over-limit bodies keep their 413; any other malformed multipart input is a 400.
fn multipart_error(what: &str, e: MultipartError) -> AppError {
    let message = format!("Failed to read {what}: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}

/// POST /evaluate
///
/// Accepts a PDF résumé (`resume_file`) or plain text (`resume_text`), plus optional
/// profile links, and returns the role-fit report. A file takes precedence over text.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EvaluationReport>, AppError> {
    let form = EvaluateForm::from_multipart(multipart).await?;
    let evaluation_id = Uuid::new_v4();

    async move {
        let resume_text = resolve_resume_text(form.resume_file, form.resume_text).await?;

        let profile = CandidateProfile {
            resume_text,
            github_link: form.github_link,
            linkedin_link: form.linkedin_link,
        };

        let report = state.evaluator.evaluate(&profile).await?;

        info!(
            "Evaluated {} chars via {} backend: {} roles, best fit {:?}",
            profile.resume_text.len(),
            state.evaluator.backend(),
            report.roles.len(),
            report.best_fit
        );

        Ok::<_, AppError>(Json(report))
    }
    .instrument(info_span!("evaluate", %evaluation_id))
    .await
}

async fn resolve_resume_text(
    resume_file: Option<Bytes>,
    resume_text: Option<String>,
) -> Result<String, AppError> {
    match (resume_file, resume_text) {
        (Some(bytes), _) => {
            let extracted = tokio::task::spawn_blocking(move || extract_text_from_pdf(&bytes))
                .await
                .map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
                })??;
            Ok(extracted)
        }
        (None, Some(text)) => Ok(text.trim().to_string()),
        (None, None) => Err(AppError::Validation(
            "Resume file or resume text must be provided.".to_string(),
        )),
    }
}
