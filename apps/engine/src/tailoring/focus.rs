//! Focus-area detection for a posting.
//!
//! The deterministic detector scores each focus by indicator-keyword hits
//! plus a title bonus; the capability variant classifies the posting text
//! directly and is only trusted for labels in the known set.

use std::collections::HashSet;

use crate::llm::{LlmCapability, LlmError};
use crate::models::{FocusArea, Posting};
use crate::tailoring::prompts::FOCUS_PROMPT_TEMPLATE;

const ML_INDICATORS: &[&str] = &[
    "pytorch", "tensorflow", "machine learning", "deep learning", "computer vision", "nlp",
    "onnx", "cuda", "ml",
];
const BACKEND_INDICATORS: &[&str] = &[
    "backend", "api", "fastapi", "django", "flask", "microservices", "docker", "kubernetes",
];
const DATA_INDICATORS: &[&str] = &[
    "data science", "data engineer", "analytics", "pandas", "statistics", "data",
];

const ML_TITLE_HINTS: &[&str] = &["ml", "machine learning"];
const BACKEND_TITLE_HINTS: &[&str] = &["backend", "software"];
const DATA_TITLE_HINTS: &[&str] = &["data"];

/// Description characters forwarded to the capability, at most.
const MAX_PROMPT_DESCRIPTION_CHARS: usize = 2000;

/// Deterministic focus detection.
///
/// Each focus scores indicator-set hits against the keyword set, plus 2
/// when the lowercased title contains one of its hint phrases. The highest
/// positive score wins; ties resolve in the fixed order ml, backend, data.
pub fn detect_focus(keywords: &HashSet<String>, title: &str) -> Option<FocusArea> {
    let title = title.to_lowercase();
    let mut best: Option<(FocusArea, usize)> = None;

    for focus in FocusArea::ALL {
        let (indicators, hints) = match focus {
            FocusArea::Ml => (ML_INDICATORS, ML_TITLE_HINTS),
            FocusArea::Backend => (BACKEND_INDICATORS, BACKEND_TITLE_HINTS),
            FocusArea::Data => (DATA_INDICATORS, DATA_TITLE_HINTS),
        };

        let keyword_hits = indicators.iter().filter(|term| keywords.contains(**term)).count();
        let title_bonus = if hints.iter().any(|hint| title.contains(hint)) { 2 } else { 0 };
        let score = keyword_hits + title_bonus;

        if score == 0 {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((focus, score)),
        }
    }

    best.map(|(focus, _)| focus)
}

/// Capability-backed focus classification.
///
/// The reply is trimmed and matched against the known labels; "none" and
/// anything unrecognized resolve to `None`. Transport/API failures surface
/// as `Err` so the caller can fall back to [`detect_focus`].
pub async fn detect_focus_llm(
    posting: &Posting,
    llm: &dyn LlmCapability,
) -> Result<Option<FocusArea>, LlmError> {
    let description: String = posting
        .description
        .chars()
        .take(MAX_PROMPT_DESCRIPTION_CHARS)
        .collect();
    let prompt = FOCUS_PROMPT_TEMPLATE
        .replace("{title}", &posting.title)
        .replace("{description}", &description);

    let response = llm.invoke(&prompt).await?;
    let label = response.trim().trim_matches('"').to_lowercase();
    Ok(FocusArea::from_label(&label))
}
