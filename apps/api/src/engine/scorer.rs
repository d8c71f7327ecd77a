use std::collections::BTreeSet;

use crate::ontology::{RoleDefinition, SkillCategory};

/// Below this share of matched core weight a role cannot score higher than `CORE_SHORTFALL_CAP`.
const CORE_MATCH_THRESHOLD: f64 = 0.4;
const CORE_SHORTFALL_CAP: i32 = 50;

/// Score of one role against one user skill set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleScore {
    pub score: i32,
    /// Category-major (core, supporting, bonus), then declaration order.
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Weighted match percentage for a role.
///
/// Algorithm:
/// 1. Walk core, supporting, bonus in order, summing total / matched weight (and the
///    core-only subtotals) while splitting skills into matched and missing.
/// 2. base = ⌊matched / total × 100⌋, or 0 for a role without skills.
/// 3. Core enforcement: less than 40% of core weight matched caps the score at 50.
/// 4. Demand adjustment: score × demand_weight, truncated. Not clamped to 100.
pub fn calculate_role_score(user_skills: &BTreeSet<String>, role: &RoleDefinition) -> RoleScore {
    let mut total_weight = 0_u64;
    let mut matched_weight = 0_u64;
    let mut core_total = 0_u64;
    let mut core_matched = 0_u64;

    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for (category, ws) in role.weighted_skills() {
        let is_core = category == SkillCategory::Core;
        let weight = u64::from(ws.weight);
        total_weight += weight;
        if is_core {
            core_total += weight;
        }

        if user_skills.contains(&ws.skill) {
            matched_weight += weight;
            if is_core {
                core_matched += weight;
            }
            matched.push(ws.skill.clone());
        } else {
            missing.push(ws.skill.clone());
        }
    }

    let mut score = if total_weight > 0 {
        (matched_weight as f64 / total_weight as f64 * 100.0) as i32
    } else {
        0
    };

    if core_total > 0 && (core_matched as f64 / core_total as f64) < CORE_MATCH_THRESHOLD {
        score = score.min(CORE_SHORTFALL_CAP);
    }

    let score = (score as f64 * role.metadata.demand_weight) as i32;

    RoleScore {
        score,
        matched,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::{Ontology, RoleMetadata, WeightedSkill};

    fn weighted(pairs: &[(&str, u32)]) -> Vec<WeightedSkill> {
        pairs
            .iter()
            .map(|(skill, weight)| WeightedSkill {
                skill: skill.to_string(),
                weight: *weight,
            })
            .collect()
    }

    fn make_role(
        core: &[(&str, u32)],
        supporting: &[(&str, u32)],
        bonus: &[(&str, u32)],
        demand_weight: f64,
    ) -> RoleDefinition {
        RoleDefinition {
            name: "Test Role".to_string(),
            core: weighted(core),
            supporting: weighted(supporting),
            bonus: weighted(bonus),
            metadata: RoleMetadata {
                industry: None,
                demand_weight,
            },
        }
    }

    fn skills(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_match_scores_100() {
        let role = make_role(&[("a", 4), ("b", 6)], &[("c", 3)], &[("d", 1)], 1.0);
        let result = calculate_role_score(&skills(&["a", "b", "c", "d"]), &role);
        assert_eq!(result.score, 100);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_empty_skill_set_scores_zero_and_lists_everything_missing() {
        let role = make_role(&[("a", 4)], &[("b", 3)], &[("c", 1)], 1.0);
        let result = calculate_role_score(&BTreeSet::new(), &role);
        assert_eq!(result.score, 0);
        assert!(result.matched.is_empty());
        assert_eq!(result.missing, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_role_without_skills_scores_zero() {
        let role = make_role(&[], &[], &[], 1.0);
        let result = calculate_role_score(&skills(&["a"]), &role);
        assert_eq!(result.score, 0);
        assert!(result.matched.is_empty() && result.missing.is_empty());
    }

    #[test]
    fn test_base_score_is_floored() {
        // 2 / 3 = 66.66…
        let role = make_role(&[("a", 1), ("b", 1), ("c", 1)], &[], &[], 1.0);
        let result = calculate_role_score(&skills(&["a", "b"]), &role);
        assert_eq!(result.score, 66);
    }

    #[test]
    fn test_core_shortfall_caps_score_at_50() {
        // supporting + bonus fully matched: 20 / 30 = 66, but core ratio is 0.
        let role = make_role(&[("a", 4), ("b", 6)], &[("c", 10)], &[("d", 10)], 1.0);
        let result = calculate_role_score(&skills(&["c", "d"]), &role);
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_core_ratio_at_threshold_is_not_capped() {
        // core ratio 4 / 10 = 0.4 exactly → no cap; 24 / 30 = 80.
        let role = make_role(&[("a", 4), ("b", 6)], &[("c", 10)], &[("d", 10)], 1.0);
        let result = calculate_role_score(&skills(&["a", "c", "d"]), &role);
        assert_eq!(result.score, 80);
    }

    #[test]
    fn test_cap_holds_for_any_core_shortfall() {
        let role = make_role(
            &[("a", 5), ("b", 5), ("c", 5)],
            &[("s1", 10), ("s2", 10)],
            &[("b1", 10)],
            1.0,
        );
        for user in [&["s1", "s2", "b1"][..], &["a", "s1", "s2", "b1"][..]] {
            let result = calculate_role_score(&skills(user), &role);
            assert!(result.score <= 50, "score {} for {:?}", result.score, user);
        }
    }

    #[test]
    fn test_demand_weight_applies_after_cap_and_is_not_clamped() {
        let full = make_role(&[("a", 1)], &[("b", 1)], &[], 1.1);
        assert_eq!(calculate_role_score(&skills(&["a", "b"]), &full).score, 110);

        let capped = make_role(&[("a", 5)], &[("b", 5)], &[], 1.5);
        // base 50, core ratio 0 → cap 50, × 1.5 → 75
        assert_eq!(calculate_role_score(&skills(&["b"]), &capped).score, 75);
    }

    #[test]
    fn test_demand_multiplier_truncates() {
        let role = make_role(&[("a", 1), ("b", 1), ("c", 1)], &[], &[], 1.1);
        // 66 × 1.1 = 72.6 → 72
        assert_eq!(calculate_role_score(&skills(&["a", "b"]), &role).score, 72);
    }

    #[test]
    fn test_weight_total_beyond_u32_is_summed_exactly() {
        let role = make_role(&[("a", u32::MAX)], &[("b", 2)], &[], 1.0);
        // (2^32 - 1) / (2^32 + 1) → 99.99… → 99
        assert_eq!(calculate_role_score(&skills(&["a"]), &role).score, 99);
        assert_eq!(calculate_role_score(&skills(&["b"]), &role).score, 0);
    }

    #[test]
    fn test_matched_and_missing_preserve_category_order() {
        let role = make_role(&[("z", 1), ("a", 1)], &[("m", 1)], &[("b", 1), ("y", 1)], 1.0);
        let result = calculate_role_score(&skills(&["a", "y", "m"]), &role);
        assert_eq!(result.matched, vec!["a", "m", "y"]);
        assert_eq!(result.missing, vec!["z", "b"]);
    }

    #[test]
    fn test_adding_a_missing_skill_never_lowers_the_score() {
        let ontology = Ontology::builtin().unwrap();
        for role in ontology.roles() {
            let mut user: BTreeSet<String> = BTreeSet::new();
            let mut previous = calculate_role_score(&user, role).score;
            for (_, ws) in role.weighted_skills() {
                user.insert(ws.skill.clone());
                let current = calculate_role_score(&user, role).score;
                assert!(
                    current >= previous,
                    "{}: {} dropped to {} after adding {}",
                    role.name,
                    previous,
                    current,
                    ws.skill
                );
                previous = current;
            }
        }
    }

    #[test]
    fn test_backend_role_partial_match() {
        let ontology = Ontology::builtin().unwrap();
        let backend = &ontology.roles()[0];
        // python 5 + sql 5 + docker 2 = 12 of 28 → 42; core 10 / 14 ≥ 0.4
        let result = calculate_role_score(&skills(&["python", "sql", "docker"]), backend);
        assert_eq!(result.score, 42);
        assert_eq!(result.matched, vec!["python", "sql", "docker"]);
        assert_eq!(
            result.missing,
            vec!["apis", "database", "authentication", "aws", "redis", "kafka", "microservices"]
        );
    }
}
