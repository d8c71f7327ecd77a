//! Composite role synthesis and best-fit selection over scored roles.

use std::collections::HashSet;

use crate::engine::report::RoleEvaluation;

pub const BACKEND_ROLE: &str = "Backend Developer";
pub const FRONTEND_ROLE: &str = "Frontend Developer";
pub const FULL_STACK_ROLE: &str = "Full Stack Developer";

/// Backend / frontend score gap above which the full stack composite is penalised.
const IMBALANCE_THRESHOLD: u32 = 30;
const IMBALANCE_PENALTY: i32 = 10;
/// Top two roles within this many points produce a hybrid recommendation.
const HYBRID_MARGIN: u32 = 5;

/// Appends a "Full Stack Developer" entry when both backend and frontend roles were scored.
///
/// score = ⌊(backend + frontend) / 2⌋, minus 10 when the two differ by more than 30.
/// Matched skills are the deduplicated union; missing skills and steps stay empty.
pub fn compute_composite_roles(results: &mut Vec<RoleEvaluation>) {
    let backend = results.iter().find(|r| r.role == BACKEND_ROLE);
    let frontend = results.iter().find(|r| r.role == FRONTEND_ROLE);

    let (Some(backend), Some(frontend)) = (backend, frontend) else {
        return;
    };

    // The mean of two i32 values always fits back into i32.
    let mean = (i64::from(backend.score) + i64::from(frontend.score)).div_euclid(2);
    let mut score = i32::try_from(mean).unwrap_or(i32::MAX);
    if backend.score.abs_diff(frontend.score) > IMBALANCE_THRESHOLD {
        score = score.saturating_sub(IMBALANCE_PENALTY);
    }

    let mut seen = HashSet::new();
    let matched_skills: Vec<String> = backend
        .matched_skills
        .iter()
        .chain(frontend.matched_skills.iter())
        .filter(|skill| seen.insert(skill.as_str()))
        .cloned()
        .collect();

    results.push(RoleEvaluation {
        role: FULL_STACK_ROLE.to_string(),
        score,
        matched_skills,
        missing_skills: vec![],
        improvement_steps: vec![],
    });
}

/// Stable sort, highest score first. Equal scores keep their insertion order.
pub fn sort_by_score(results: &mut [RoleEvaluation]) {
    results.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Picks the recommendation from results already sorted by `sort_by_score`.
pub fn determine_best_fit(results: &[RoleEvaluation]) -> Option<String> {
    match results {
        [] => None,
        [only] => Some(only.role.clone()),
        [top, second, ..] => {
            if top.score.abs_diff(second.score) <= HYBRID_MARGIN {
                Some(format!(
                    "Hybrid: {} + {} (leaning {})",
                    top.role, second.role, top.role
                ))
            } else {
                Some(top.role.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(role: &str, score: i32, matched: &[&str]) -> RoleEvaluation {
        RoleEvaluation {
            role: role.to_string(),
            score,
            matched_skills: matched.iter().map(|s| s.to_string()).collect(),
            missing_skills: vec!["x".to_string()],
            improvement_steps: vec!["Improve proficiency in x".to_string()],
        }
    }

    fn full_stack(results: &[RoleEvaluation]) -> Option<&RoleEvaluation> {
        results.iter().find(|r| r.role == FULL_STACK_ROLE)
    }

    #[test]
    fn test_imbalanced_composite_is_penalised() {
        let mut results = vec![
            make_result(BACKEND_ROLE, 80, &[]),
            make_result(FRONTEND_ROLE, 40, &[]),
        ];
        compute_composite_roles(&mut results);
        assert_eq!(full_stack(&results).unwrap().score, 50);
    }

    #[test]
    fn test_balanced_composite_is_floored_average() {
        let mut results = vec![
            make_result(BACKEND_ROLE, 71, &[]),
            make_result(FRONTEND_ROLE, 50, &[]),
        ];
        compute_composite_roles(&mut results);
        assert_eq!(full_stack(&results).unwrap().score, 60);
    }

    #[test]
    fn test_gap_of_exactly_30_is_not_penalised() {
        let mut results = vec![
            make_result(BACKEND_ROLE, 30, &[]),
            make_result(FRONTEND_ROLE, 60, &[]),
        ];
        compute_composite_roles(&mut results);
        assert_eq!(full_stack(&results).unwrap().score, 45);
    }

    #[test]
    fn test_composite_merges_matched_and_leaves_gaps_empty() {
        let mut results = vec![
            make_result(BACKEND_ROLE, 60, &["python", "javascript", "docker"]),
            make_result(FRONTEND_ROLE, 55, &["html", "javascript"]),
        ];
        compute_composite_roles(&mut results);

        let composite = full_stack(&results).unwrap();
        assert_eq!(
            composite.matched_skills,
            vec!["python", "javascript", "docker", "html"]
        );
        assert!(composite.missing_skills.is_empty());
        assert!(composite.improvement_steps.is_empty());
        assert_eq!(results.last().unwrap().role, FULL_STACK_ROLE);
    }

    #[test]
    fn test_no_composite_without_both_roles() {
        let mut results = vec![
            make_result(BACKEND_ROLE, 80, &[]),
            make_result("Data Engineer", 40, &[]),
        ];
        compute_composite_roles(&mut results);
        assert_eq!(results.len(), 2);
        assert!(full_stack(&results).is_none());
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut results = vec![
            make_result(BACKEND_ROLE, 50, &[]),
            make_result(FRONTEND_ROLE, 50, &[]),
            make_result("DevOps Engineer", 70, &[]),
        ];
        compute_composite_roles(&mut results);
        sort_by_score(&mut results);

        let order: Vec<(&str, i32)> = results.iter().map(|r| (r.role.as_str(), r.score)).collect();
        assert_eq!(
            order,
            vec![
                ("DevOps Engineer", 70),
                (BACKEND_ROLE, 50),
                (FRONTEND_ROLE, 50),
                (FULL_STACK_ROLE, 50),
            ]
        );
    }

    #[test]
    fn test_close_scores_produce_hybrid_leaning_top() {
        let results = vec![make_result("A", 74, &[]), make_result("B", 70, &[])];
        assert_eq!(
            determine_best_fit(&results).unwrap(),
            "Hybrid: A + B (leaning A)"
        );
    }

    #[test]
    fn test_margin_of_exactly_five_is_hybrid() {
        let results = vec![make_result("A", 75, &[]), make_result("B", 70, &[])];
        assert!(determine_best_fit(&results).unwrap().starts_with("Hybrid"));
    }

    #[test]
    fn test_clear_winner_is_named_alone() {
        let results = vec![make_result("A", 70, &[]), make_result("B", 40, &[])];
        assert_eq!(determine_best_fit(&results).unwrap(), "A");
    }

    #[test]
    fn test_extreme_scores_do_not_overflow() {
        let mut results = vec![
            make_result(BACKEND_ROLE, i32::MAX, &[]),
            make_result(FRONTEND_ROLE, i32::MAX, &[]),
        ];
        compute_composite_roles(&mut results);
        assert_eq!(full_stack(&results).unwrap().score, i32::MAX);

        let mut results = vec![
            make_result(BACKEND_ROLE, i32::MAX, &[]),
            make_result(FRONTEND_ROLE, i32::MIN, &[]),
        ];
        compute_composite_roles(&mut results);
        // mean of MAX and MIN is -0.5 → floored to -1, then penalised
        assert_eq!(full_stack(&results).unwrap().score, -11);

        sort_by_score(&mut results);
        assert_eq!(determine_best_fit(&results).unwrap(), BACKEND_ROLE);
    }

    #[test]
    fn test_single_and_empty_results() {
        assert_eq!(
            determine_best_fit(&[make_result("Only", 10, &[])]).unwrap(),
            "Only"
        );
        assert_eq!(determine_best_fit(&[]), None);
    }
}
