//! Posting-to-profile scoring.
//!
//! Four independent sub-scores (keyword match, title match, skills overlap,
//! location match), each in [0, 1], combined with configurable weights.
//! `score_posting` is pure; batch scoring applies results through
//! `Posting::apply_score` and returns the same records.

use std::collections::HashSet;

use crate::config::{EngineConfig, LocationConfig};
use crate::matching::keywords::{extract_keywords, word_match};
use crate::models::{Posting, Profile, ScoreBreakdown};

/// Score one posting against the profile. Returns the weighted total and
/// the full breakdown, both rounded to 3 decimals; the breakdown carries
/// the extracted keywords for downstream display and tailoring reuse.
pub fn score_posting(
    posting: &Posting,
    profile: &Profile,
    config: &EngineConfig,
) -> (f64, ScoreBreakdown) {
    let keywords = extract_keywords(&posting.description, Some(profile), &config.vocabulary);

    let keyword_match = keyword_match_score(&keywords, profile);
    let title_match = title_match_score(&posting.title, profile);
    let skills_overlap = skills_overlap_score(&keywords, profile);
    let location_match = location_match_score(&posting.location, &config.locations);

    let weights = &config.weights;
    let total = weights.keyword_match * keyword_match
        + weights.title_match * title_match
        + weights.skills_overlap * skills_overlap
        + weights.location_match * location_match;
    let total = round3(total);

    let breakdown = ScoreBreakdown {
        keyword_match: round3(keyword_match),
        title_match: round3(title_match),
        skills_overlap: round3(skills_overlap),
        location_match: round3(location_match),
        total,
        keywords,
    };

    (total, breakdown)
}

/// Score a batch of postings, applying each result in place. The records
/// come back unchanged apart from the applied score and breakdown — ids
/// assigned at collection/dedup time are preserved.
pub fn score_postings(
    mut postings: Vec<Posting>,
    profile: &Profile,
    config: &EngineConfig,
) -> Vec<Posting> {
    for posting in &mut postings {
        let (total, breakdown) = score_posting(posting, profile, config);
        posting.apply_score(total, breakdown);
    }
    postings
}

/// Fraction of posting keywords found among profile skill names and tags.
fn keyword_match_score(keywords: &[String], profile: &Profile) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }

    let mut matchable: HashSet<String> = profile
        .skills
        .technical
        .iter()
        .map(|skill| skill.name.to_lowercase())
        .collect();
    for skill in &profile.skills.technical {
        matchable.extend(skill.tags.iter().map(|tag| tag.to_lowercase()));
    }

    let matches = keywords.iter().filter(|kw| matchable.contains(kw.as_str())).count();
    matches as f64 / keywords.len() as f64
}

/// Best word-set Jaccard similarity between the posting title and any of
/// the profile's declared titles or experience titles.
fn title_match_score(title: &str, profile: &Profile) -> f64 {
    let posting_words = word_set(title);
    if posting_words.is_empty() {
        return 0.0;
    }

    let references = profile
        .personal
        .titles
        .iter()
        .map(String::as_str)
        .chain(profile.experience.iter().map(|exp| exp.title.as_str()));

    let mut best = 0.0_f64;
    for reference in references {
        let reference_words = word_set(reference);
        if reference_words.is_empty() {
            continue;
        }
        let overlap = posting_words.intersection(&reference_words).count();
        let union = posting_words.union(&reference_words).count();
        if union > 0 {
            best = best.max(overlap as f64 / union as f64);
        }
    }
    best
}

/// Jaccard similarity between the posting keyword set and the profile
/// skill-name set.
fn skills_overlap_score(keywords: &[String], profile: &Profile) -> f64 {
    let profile_skills: HashSet<String> = profile
        .skills
        .technical
        .iter()
        .map(|skill| skill.name.to_lowercase())
        .collect();
    let posting_skills: HashSet<String> = keywords.iter().cloned().collect();

    let union = posting_skills.union(&profile_skills).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = posting_skills.intersection(&profile_skills).count();
    intersection as f64 / union as f64
}

/// Gazetteer-driven location match.
///
/// 1.0 for a remote keyword or any preferred term (both language lists),
/// matched with word-boundary semantics so short terms never fire inside
/// longer words. Whole tokens of at least two characters are also expanded
/// through the abbreviation map before checking. Empty location is unknown
/// and scores a neutral 0.5.
pub(crate) fn location_match_score(location: &str, config: &LocationConfig) -> f64 {
    if location.trim().is_empty() {
        return 0.5;
    }
    let normalized = location.to_lowercase();

    for keyword in &config.remote_keywords {
        if word_match(&keyword.to_lowercase(), &normalized) {
            return 1.0;
        }
    }

    for token in tokens(&normalized) {
        if token.chars().count() < 2 {
            continue;
        }
        if let Some(expansion) = config.abbreviations.get(token) {
            if term_in_gazetteer(expansion, config) {
                return 1.0;
            }
        }
    }

    for term in config.preferred.iter().chain(&config.preferred_es) {
        if word_match(&term.to_lowercase(), &normalized) {
            return 1.0;
        }
    }

    0.0
}

fn term_in_gazetteer(term: &str, config: &LocationConfig) -> bool {
    config
        .remote_keywords
        .iter()
        .chain(&config.preferred)
        .chain(&config.preferred_es)
        .any(|known| known.eq_ignore_ascii_case(term))
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty())
}

fn word_set(text: &str) -> HashSet<String> {
    tokens(&text.to_lowercase()).map(str::to_string).collect()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
