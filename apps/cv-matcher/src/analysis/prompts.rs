// All LLM prompt constants for the analysis module.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Role description prepended to the shared JSON-only rules.
pub const ANALYSIS_ROLE: &str = "You are an experienced technical recruiter and résumé reviewer. \
    You compare a candidate's résumé with a job description, score the fit honestly, \
    and give concrete feedback on how the résumé is written and laid out.";

/// Task instructions and the exact reply schema. The résumé and job text are appended
/// by [`build_analysis_prompt`].
pub const ANALYSIS_INSTRUCTIONS: &str = r#"Compare the RÉSUMÉ below with the JOB DESCRIPTION below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "match_score": {
    "overall_score": 72.5,
    "skills_match": 80.0,
    "experience_match": 65.0,
    "education_match": 70.0,
    "keywords_match": 60.0
  },
  "formatting_advice": {
    "strengths": ["Clear reverse-chronological layout"],
    "weaknesses": ["Bullets describe duties instead of results"],
    "suggestions": ["Quantify impact, e.g. 'cut p99 latency by 40%'"]
  },
  "summary": "Two or three sentences on overall fit.",
  "recommendation": "One actionable recommendation for the candidate."
}

SCORING RULES:
- Every score is a number from 0 to 100.
- skills_match: required and preferred skills that the résumé demonstrates.
- experience_match: seniority, years, and domain of past roles versus the job.
- education_match: degrees and certifications versus what the job asks for (use 100 when the job states none).
- keywords_match: important job-description terms present in the résumé wording.
- overall_score: your holistic judgement, not a plain average.

FORMATTING ADVICE covers how the résumé is written and structured (length, sections,
bullet quality, quantified results, consistency), not the candidate's qualifications.
Give 2 to 5 items per list.

Base every statement on the texts provided. Do NOT invent experience the résumé does not show."#;

pub fn analysis_system_prompt() -> String {
    format!("{ANALYSIS_ROLE} {JSON_ONLY_SYSTEM}")
}

pub fn build_analysis_prompt(cv_text: &str, job_text: &str) -> String {
    format!("{ANALYSIS_INSTRUCTIONS}\n\nRÉSUMÉ:\n{cv_text}\n\nJOB DESCRIPTION:\n{job_text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_texts_in_order() {
        let prompt = build_analysis_prompt("Jane writes Rust", "Wanted: Rustacean");
        let cv_at = prompt.find("Jane writes Rust").unwrap();
        let job_at = prompt.find("Wanted: Rustacean").unwrap();
        assert!(cv_at < job_at);
        assert!(prompt.contains("\"overall_score\""));
    }

    #[test]
    fn test_placeholder_like_text_is_not_rewritten() {
        let prompt = build_analysis_prompt("{job_text}", "{cv_text}");
        assert!(prompt.ends_with("RÉSUMÉ:\n{job_text}\n\nJOB DESCRIPTION:\n{cv_text}"));
    }

    #[test]
    fn test_system_prompt_demands_json() {
        assert!(analysis_system_prompt().contains("valid JSON only"));
    }
}
