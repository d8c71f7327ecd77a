use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw ontology document as it is stored on disk.
/// Turned into a validated `Ontology` by `Ontology::from_data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyData {
    /// Canonical skill registry. Role definitions may only reference these.
    pub skills: Vec<String>,
    #[serde(default)]
    pub aliases: Vec<AliasEntry>,
    /// child skill → more general parent skill
    #[serde(default)]
    pub hierarchy: BTreeMap<String, String>,
    pub roles: Vec<RoleDefinition>,
}

/// Surface forms that imply a canonical skill when found as a whole word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasEntry {
    pub skill: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedSkill {
    pub skill: String,
    pub weight: u32,
}

/// The three importance tiers of a role, in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Core,
    Supporting,
    Bonus,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 3] = [
        SkillCategory::Core,
        SkillCategory::Supporting,
        SkillCategory::Bonus,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleMetadata {
    #[serde(default)]
    pub industry: Option<String>,
    /// Market-demand multiplier applied to the final role score.
    #[serde(default = "default_demand_weight")]
    pub demand_weight: f64,
}

impl Default for RoleMetadata {
    fn default() -> Self {
        Self {
            industry: None,
            demand_weight: default_demand_weight(),
        }
    }
}

fn default_demand_weight() -> f64 {
    1.0
}

/// A named role with weighted core / supporting / bonus skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub name: String,
    #[serde(default)]
    pub core: Vec<WeightedSkill>,
    #[serde(default)]
    pub supporting: Vec<WeightedSkill>,
    #[serde(default)]
    pub bonus: Vec<WeightedSkill>,
    #[serde(default)]
    pub metadata: RoleMetadata,
}

impl RoleDefinition {
    pub fn category(&self, category: SkillCategory) -> &[WeightedSkill] {
        match category {
            SkillCategory::Core => &self.core,
            SkillCategory::Supporting => &self.supporting,
            SkillCategory::Bonus => &self.bonus,
        }
    }

    /// Every weighted skill, category-major (core, supporting, bonus), then declaration order.
    pub fn weighted_skills(&self) -> impl Iterator<Item = (SkillCategory, &WeightedSkill)> {
        SkillCategory::ALL
            .into_iter()
            .flat_map(move |category| self.category(category).iter().map(move |ws| (category, ws)))
    }
}
