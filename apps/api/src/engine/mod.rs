// Role-fit engine: normalization, skill extraction, role scoring, composite roles, best fit.
// Pure and synchronous. The only shared input is the read-only ontology.

pub mod evaluator;
pub mod extractor;
pub mod handlers;
pub mod improvement;
pub mod normalize;
pub mod report;
pub mod resolver;
pub mod scorer;

use crate::engine::extractor::extract_skills;
use crate::engine::improvement::generate_improvement_steps;
use crate::engine::normalize::normalize_text;
use crate::engine::report::{EvaluationReport, RoleEvaluation};
use crate::engine::resolver::{compute_composite_roles, determine_best_fit, sort_by_score};
use crate::engine::scorer::calculate_role_score;
use crate::ontology::{Ontology, OntologyError};

pub const DETERMINISTIC_SUMMARY: &str = "Deterministic ontology-driven role alignment";

/// Evaluates résumé text against every role of the ontology.
///
/// Never fails on user input. An error means the ontology itself is inconsistent.
pub fn evaluate(ontology: &Ontology, resume_text: &str) -> Result<EvaluationReport, OntologyError> {
    let user_skills = extract_skills(ontology, &normalize_text(resume_text))?;

    let mut roles: Vec<RoleEvaluation> = ontology
        .roles()
        .iter()
        .map(|role| {
            let scored = calculate_role_score(&user_skills, role);
            RoleEvaluation {
                role: role.name.clone(),
                score: scored.score,
                improvement_steps: generate_improvement_steps(&scored.missing),
                matched_skills: scored.matched,
                missing_skills: scored.missing,
            }
        })
        .collect();

    compute_composite_roles(&mut roles);
    sort_by_score(&mut roles);
    let best_fit = determine_best_fit(&roles);

    Ok(EvaluationReport {
        roles,
        best_fit,
        summary: DETERMINISTIC_SUMMARY.to_string(),
    })
}
