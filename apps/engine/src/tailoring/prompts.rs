// Prompt text for the tailoring pipeline's capability calls.

/// Focus classification prompt. Replace `{title}` and `{description}`.
pub const FOCUS_PROMPT_TEMPLATE: &str = r#"Classify the primary focus of this job posting as exactly one of: ml, backend, data, none.
Reply with the single label and nothing else.

Title: {title}

Description:
{description}"#;

/// Bullet reranking prompt. Replace `{title}`, `{count}` and `{bullets}`.
/// The reply must be a comma-separated permutation of the bullet numbers.
pub const RERANK_PROMPT_TEMPLATE: &str = r#"Reorder the following resume bullets from most to least relevant for the job "{title}".
Reply with a comma-separated list of the bullet numbers 1-{count} and nothing else, e.g. "2,1,3".

Bullets:
{bullets}"#;
