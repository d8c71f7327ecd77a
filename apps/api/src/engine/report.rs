use serde::{Deserialize, Serialize};

/// Result for a single role, including synthesized composite roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEvaluation {
    pub role: String,
    /// Usually 0 – 100. The demand multiplier may push it above 100 and the
    /// composite imbalance penalty may push it below 0.
    pub score: i32,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub improvement_steps: Vec<String>,
}

/// Full evaluation returned to the client. Roles are sorted by descending score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub roles: Vec<RoleEvaluation>,
    pub best_fit: Option<String>,
    pub summary: String,
}
