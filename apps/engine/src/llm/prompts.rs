// Cross-cutting prompt fragments. Modules that make LLM calls keep their
// own prompt text in a prompts.rs next to the call site.

/// System prompt for free-text label/sequence replies.
pub const TERSE_SYSTEM: &str = "You are a precise assistant embedded in an automated pipeline. \
    Reply with exactly the requested value and nothing else. \
    Do NOT include explanations, punctuation, or markdown.";

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
