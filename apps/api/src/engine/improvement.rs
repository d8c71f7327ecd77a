const MAX_IMPROVEMENT_STEPS: usize = 3;

/// One suggestion per missing skill, for the first three missing skills in order.
pub fn generate_improvement_steps(missing_skills: &[String]) -> Vec<String> {
    missing_skills
        .iter()
        .take(MAX_IMPROVEMENT_STEPS)
        .map(|skill| format!("Improve proficiency in {skill}"))
        .collect()
}
