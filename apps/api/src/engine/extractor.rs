use std::collections::BTreeSet;

use tracing::debug;

use crate::ontology::{Ontology, OntologyError};

/// Detects canonical skills in already-normalized text.
///
/// 1. Alias detection: a skill is present when any of its aliases occurs as a whole word.
/// 2. Hierarchy propagation: every detected skill contributes all of its ancestors.
pub fn extract_skills(
    ontology: &Ontology,
    normalized_text: &str,
) -> Result<BTreeSet<String>, OntologyError> {
    let detected: Vec<&str> = ontology
        .matchers()
        .iter()
        .filter(|m| m.is_present(normalized_text))
        .map(|m| m.skill())
        .collect();

    let mut skills: BTreeSet<String> = BTreeSet::new();
    for skill in &detected {
        skills.insert(skill.to_string());
        for ancestor in ontology.ancestors(skill)? {
            skills.insert(ancestor.to_string());
        }
    }

    debug!(
        "Detected {} skills via aliases, {} after hierarchy propagation",
        detected.len(),
        skills.len()
    );

    Ok(skills)
}
