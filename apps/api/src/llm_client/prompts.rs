/// System instruction for the generative evaluation backend.
pub const EVALUATION_SYSTEM: &str = "You are a strict technical hiring evaluator. \
You respond with a single JSON object and nothing else.";

/// Evaluation prompt. Placeholders: `{resume_text}`, `{github_link}`, `{linkedin_link}`.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"Evaluate the candidate for:
- Backend Developer
- Frontend Developer
- Data Analyst
- DevOps Engineer

Scoring Rules:
80-100 = Strong alignment
60-79 = Moderate
40-59 = Weak
Below 40 = Not suitable

Return ONLY valid JSON in this format:
{
  "roles": [
    {
      "role": "",
      "score": 0,
      "matched_skills": [],
      "missing_skills": [],
      "improvement_steps": []
    }
  ],
  "best_fit": "",
  "summary": ""
}

Candidate Data:
Resume:
{resume_text}

GitHub:
{github_link}

LinkedIn:
{linkedin_link}
"#;
