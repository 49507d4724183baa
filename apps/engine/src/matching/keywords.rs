//! Keyword extraction from posting descriptions.
//!
//! The deterministic path matches the injected vocabulary plus the
//! profile's skill names against the description. The capability-augmented
//! path unions an LLM's structured result on top; every capability fault is
//! absorbed here and the deterministic result is returned unchanged.

use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

use crate::config::Vocabulary;
use crate::llm::LlmCapability;
use crate::matching::prompts::KEYWORD_EXTRACTION_PROMPT;
use crate::models::Profile;

/// Description characters forwarded to the capability, at most.
const MAX_PROMPT_DESCRIPTION_CHARS: usize = 3000;

/// Extract keywords from a description: vocabulary terms plus profile skill
/// names, matched per [`word_match`]. Output is sorted, deduplicated,
/// lowercase.
pub fn extract_keywords(
    description: &str,
    profile: Option<&Profile>,
    vocabulary: &Vocabulary,
) -> Vec<String> {
    let text = description.to_lowercase();
    let mut found: BTreeSet<String> = BTreeSet::new();

    for term in &vocabulary.terms {
        let term = term.to_lowercase();
        if word_match(&term, &text) {
            found.insert(term);
        }
    }

    if let Some(profile) = profile {
        for skill in &profile.skills.technical {
            let name = skill.name.to_lowercase();
            if !found.contains(&name) && word_match(&name, &text) {
                found.insert(name);
            }
        }
    }

    found.into_iter().collect()
}

/// Extract keywords, augmented by the capability when it is available.
///
/// The capability's three keyword lists are lowercased and unioned into the
/// deterministic result. Any fault leaves the deterministic result as-is;
/// callers never observe a failure from this path.
pub async fn extract_keywords_augmented(
    description: &str,
    profile: Option<&Profile>,
    vocabulary: &Vocabulary,
    llm: &dyn LlmCapability,
) -> Vec<String> {
    let base = extract_keywords(description, profile, vocabulary);
    if !llm.available() {
        return base;
    }

    let prompt = build_extraction_prompt(description);
    match llm.extract_keywords(&prompt).await {
        Ok(result) => {
            let mut merged: BTreeSet<String> = base.into_iter().collect();
            merged.extend(
                result
                    .keywords
                    .iter()
                    .chain(&result.required_skills)
                    .chain(&result.nice_to_have_skills)
                    .map(|kw| kw.to_lowercase()),
            );
            merged.into_iter().collect()
        }
        Err(err) => {
            debug!("keyword augmentation unavailable, keeping deterministic result: {err}");
            base
        }
    }
}

fn build_extraction_prompt(description: &str) -> String {
    let truncated: String = description.chars().take(MAX_PROMPT_DESCRIPTION_CHARS).collect();
    KEYWORD_EXTRACTION_PROMPT.replace("{description}", &truncated)
}

/// Containment check for one term in lowercased text.
///
/// Terms containing whitespace or any non-alphanumeric character (phrases,
/// "c++", "ci/cd") match as substrings; a single alphanumeric term must sit
/// on word boundaries, so "sql" never matches inside "postgresql".
pub(crate) fn word_match(term: &str, text: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    if term.contains(' ') || !term.chars().all(char::is_alphanumeric) {
        return text.contains(term);
    }
    match Regex::new(&format!(r"\b{}\b", regex::escape(term))) {
        Ok(re) => re.is_match(text),
        Err(_) => text.contains(term),
    }
}
