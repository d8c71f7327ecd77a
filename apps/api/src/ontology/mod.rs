//! Skill Ontology — canonical skills, alias table, parent-skill hierarchy and role definitions.
//!
//! The ontology is data, not code: it is parsed from JSON once at startup, validated,
//! and then shared read-only as `Arc<Ontology>`. Alias patterns are compiled here so
//! the extractor never builds a regex per request.

pub mod model;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

pub use model::{AliasEntry, OntologyData, RoleDefinition, RoleMetadata, SkillCategory, WeightedSkill};

/// Ontology bundled into the binary. Overridable at startup via `ONTOLOGY_PATH`.
const DEFAULT_ONTOLOGY: &str = include_str!("../../ontology/default.json");

/// Upper bound on one role's summed skill weights.
pub const MAX_ROLE_WEIGHT_TOTAL: u64 = 1_000_000;
/// Upper bound on a role's demand multiplier; keeps every score within 0..=1000.
pub const MAX_DEMAND_WEIGHT: f64 = 10.0;

#[derive(Debug, Error)]
pub enum OntologyError {
    #[error("Failed to read ontology file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ontology document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Ontology defines no roles")]
    NoRoles,

    #[error("Duplicate role name '{0}'")]
    DuplicateRole(String),

    #[error("Role '{role}' references unregistered skill '{skill}'")]
    UnknownSkill { role: String, skill: String },

    #[error("Role '{role}' lists skill '{skill}' more than once")]
    DuplicateRoleSkill { role: String, skill: String },

    #[error("Role '{role}' gives skill '{skill}' a zero weight")]
    ZeroWeight { role: String, skill: String },

    #[error("Role '{role}' has invalid demand_weight {value} (must be finite, > 0 and <= 10)")]
    InvalidDemandWeight { role: String, value: f64 },

    #[error("Role '{role}' has total skill weight {total} (must be <= 1000000)")]
    WeightTotalTooLarge { role: String, total: u64 },

    #[error("Skill hierarchy contains a cycle at '{0}'")]
    HierarchyCycle(String),

    #[error("Alias '{alias}' for skill '{skill}' is not a valid pattern: {source}")]
    InvalidAlias {
        skill: String,
        alias: String,
        #[source]
        source: regex::Error,
    },
}

/// Compiled whole-word patterns for one canonical skill.
#[derive(Debug)]
pub struct SkillMatcher {
    skill: String,
    patterns: Vec<Regex>,
}

impl SkillMatcher {
    fn compile(entry: &AliasEntry) -> Result<Self, OntologyError> {
        let patterns = entry
            .aliases
            .iter()
            .map(|alias| {
                Regex::new(&format!(r"\b{}\b", regex::escape(alias))).map_err(|source| {
                    OntologyError::InvalidAlias {
                        skill: entry.skill.clone(),
                        alias: alias.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skill: entry.skill.clone(),
            patterns,
        })
    }

    pub fn skill(&self) -> &str {
        &self.skill
    }

    /// True on the first alias found as a whole word. Remaining aliases are not checked.
    pub fn is_present(&self, normalized_text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(normalized_text))
    }
}

/// Validated, immutable ontology.
#[derive(Debug)]
pub struct Ontology {
    skills: BTreeSet<String>,
    matchers: Vec<SkillMatcher>,
    hierarchy: HashMap<String, String>,
    roles: Vec<RoleDefinition>,
}

impl Ontology {
    /// Loads the ontology bundled with the service.
    pub fn builtin() -> Result<Self, OntologyError> {
        Self::from_json(DEFAULT_ONTOLOGY)
    }

    pub fn from_path(path: &Path) -> Result<Self, OntologyError> {
        let json = std::fs::read_to_string(path).map_err(|source| OntologyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, OntologyError> {
        let data: OntologyData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Validates raw ontology data and compiles its alias patterns.
    /// Fails fast on anything that would otherwise produce silently wrong scores.
    pub fn from_data(data: OntologyData) -> Result<Self, OntologyError> {
        let OntologyData {
            skills,
            aliases,
            hierarchy,
            roles,
        } = data;

        let skills: BTreeSet<String> = skills.into_iter().collect();
        let hierarchy: HashMap<String, String> = hierarchy.into_iter().collect();

        validate_roles(&roles, &skills)?;

        for child in hierarchy.keys() {
            walk_ancestors(&hierarchy, child)?;
        }

        let matchers = aliases
            .iter()
            .map(SkillMatcher::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let ontology = Self {
            skills,
            matchers,
            hierarchy,
            roles,
        };
        ontology.warn_undetectable_skills()?;

        info!(
            "Ontology loaded: {} skills, {} alias groups, {} hierarchy edges, {} roles",
            ontology.skills.len(),
            ontology.matchers.len(),
            ontology.hierarchy.len(),
            ontology.roles.len()
        );

        Ok(ontology)
    }

    pub fn roles(&self) -> &[RoleDefinition] {
        &self.roles
    }

    pub fn matchers(&self) -> &[SkillMatcher] {
        &self.matchers
    }

    /// Every ancestor of `skill`, nearest first. A skill without an entry has none.
    pub fn ancestors<'a>(&'a self, skill: &str) -> Result<Vec<&'a str>, OntologyError> {
        walk_ancestors(&self.hierarchy, skill)
    }

    /// Role skills with no non-empty alias list and no detectable descendant can never
    /// be matched. Accepted, but logged so the data can be fixed.
    fn warn_undetectable_skills(&self) -> Result<(), OntologyError> {
        let mut detectable: HashSet<&str> = HashSet::new();
        for matcher in self.matchers.iter().filter(|m| !m.patterns.is_empty()) {
            detectable.insert(matcher.skill());
            detectable.extend(self.ancestors(matcher.skill())?);
        }

        for role in &self.roles {
            for (_, ws) in role.weighted_skills() {
                if !detectable.contains(ws.skill.as_str()) {
                    warn!(
                        "Role '{}' requires skill '{}' which no alias or descendant can detect",
                        role.name, ws.skill
                    );
                }
            }
        }
        Ok(())
    }
}

fn validate_roles(roles: &[RoleDefinition], skills: &BTreeSet<String>) -> Result<(), OntologyError> {
    if roles.is_empty() {
        return Err(OntologyError::NoRoles);
    }

    let mut names = HashSet::new();
    for role in roles {
        if !names.insert(role.name.as_str()) {
            return Err(OntologyError::DuplicateRole(role.name.clone()));
        }

        let demand = role.metadata.demand_weight;
        if !demand.is_finite() || demand <= 0.0 || demand > MAX_DEMAND_WEIGHT {
            return Err(OntologyError::InvalidDemandWeight {
                role: role.name.clone(),
                value: demand,
            });
        }

        let mut seen = HashSet::new();
        let mut total = 0_u64;
        for (_, ws) in role.weighted_skills() {
            if ws.weight == 0 {
                return Err(OntologyError::ZeroWeight {
                    role: role.name.clone(),
                    skill: ws.skill.clone(),
                });
            }
            if !skills.contains(&ws.skill) {
                return Err(OntologyError::UnknownSkill {
                    role: role.name.clone(),
                    skill: ws.skill.clone(),
                });
            }
            if !seen.insert(ws.skill.as_str()) {
                return Err(OntologyError::DuplicateRoleSkill {
                    role: role.name.clone(),
                    skill: ws.skill.clone(),
                });
            }
            total += u64::from(ws.weight);
        }
        if total > MAX_ROLE_WEIGHT_TOTAL {
            return Err(OntologyError::WeightTotalTooLarge {
                role: role.name.clone(),
                total,
            });
        }
    }
    Ok(())
}

/// Walks skill → parent → grandparent. A revisited node is a cycle and stops the walk.
fn walk_ancestors<'a>(
    hierarchy: &'a HashMap<String, String>,
    skill: &str,
) -> Result<Vec<&'a str>, OntologyError> {
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(skill);

    let mut ancestors = Vec::new();
    let mut current = skill;
    while let Some(parent) = hierarchy.get(current) {
        if !visited.insert(parent.as_str()) {
            return Err(OntologyError::HierarchyCycle(parent.clone()));
        }
        ancestors.push(parent.as_str());
        current = parent;
    }
    Ok(ancestors)
}
