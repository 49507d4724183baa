// Prompt text for capability-backed keyword extraction.

/// Keyword extraction prompt. Replace `{description}` before sending.
pub const KEYWORD_EXTRACTION_PROMPT: &str = r#"Extract technical keywords, required skills, and nice-to-have skills from the following job description. Also determine the primary focus area as one of: "ml", "backend", "data", or "none" if unclear.

Return a JSON object with this EXACT schema (no extra fields):
{
  "keywords": ["python", "docker"],
  "required_skills": ["pytorch"],
  "nice_to_have_skills": ["kubernetes"],
  "focus_area": "ml"
}

Job description:
{description}"#;
