//! Posting normalization and deduplication.
//!
//! Two postings are duplicates when their normalized (company, title,
//! location) triples hash to the same key. The first-seen posting wins its
//! key; a later duplicate with a strictly longer description replaces the
//! winner's content but keeps the winner's record id.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::models::Posting;

/// Legal-entity suffixes stripped (at most one) from normalized company names.
const COMPANY_SUFFIXES: &[&str] = &[
    " inc", " inc.", " ltd", " ltd.", " llc", " s.a.", " s.l.", " gmbh", " plc",
];

/// Lowercase, trim, and collapse internal whitespace runs to one space.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a company name: `normalize_text`, then strip one trailing
/// legal-entity suffix, then re-trim.
pub fn normalize_company(company: &str) -> String {
    let name = normalize_text(company);
    for suffix in COMPANY_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            return stripped.trim_end().to_string();
        }
    }
    name
}

/// Deterministic deduplication key over the normalized identity triple.
/// The separator cannot occur inside normalized text.
pub fn dedup_key(posting: &Posting) -> String {
    let raw = format!(
        "{}|{}|{}",
        normalize_company(&posting.company),
        normalize_text(&posting.title),
        normalize_text(&posting.location),
    );
    hex::encode(Sha256::digest(raw.as_bytes()))
}

/// Deduplicate postings, keeping one winner per key in first-seen order.
///
/// A later duplicate replaces the winner only when its description is
/// strictly longer, and the replacement inherits the original winner's id;
/// ties leave the winner untouched.
pub fn deduplicate(postings: Vec<Posting>) -> Vec<Posting> {
    let mut order: Vec<String> = Vec::new();
    let mut winners: HashMap<String, Posting> = HashMap::new();

    for posting in postings {
        let key = dedup_key(&posting);
        match winners.get_mut(&key) {
            None => {
                order.push(key.clone());
                winners.insert(key, posting);
            }
            Some(winner) => {
                if posting.description.len() > winner.description.len() {
                    let original_id = winner.id;
                    *winner = posting;
                    winner.id = original_id;
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| winners.remove(&key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(source_id: &str, company: &str, title: &str, location: &str) -> Posting {
        let mut posting = Posting::new("indeed", source_id, title, company);
        posting.location = location.to_string();
        posting
    }

    #[test]
    fn test_normalize_text_basic() {
        assert_eq!(normalize_text("  Hello World  "), "hello world");
    }

    #[test]
    fn test_normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("a   b\t\nc"), "a b c");
    }

    #[test]
    fn test_normalize_text_empty() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_normalize_company_strips_suffixes() {
        assert_eq!(normalize_company("Acme Inc."), "acme");
        assert_eq!(normalize_company("Acme Inc"), "acme");
        assert_eq!(normalize_company("Acme Ltd"), "acme");
        assert_eq!(normalize_company("Acme Ltd."), "acme");
        assert_eq!(normalize_company("Acme LLC"), "acme");
        assert_eq!(normalize_company("Empresa S.A."), "empresa");
        assert_eq!(normalize_company("Empresa S.L."), "empresa");
        assert_eq!(normalize_company("Firma GmbH"), "firma");
        assert_eq!(normalize_company("Corp PLC"), "corp");
    }

    #[test]
    fn test_normalize_company_without_suffix() {
        assert_eq!(normalize_company("Google"), "google");
        assert_eq!(normalize_company("Grupo Oesía"), "grupo oesía");
    }

    #[test]
    fn test_normalize_company_strips_one_suffix_only() {
        // Only the trailing suffix goes; an inner one stays.
        assert_eq!(normalize_company("Acme Inc Ltd"), "acme inc");
    }

    #[test]
    fn test_dedup_key_ignores_company_suffix_and_case() {
        let a = posting("a", "Acme Inc.", "ML Engineer", "Madrid");
        let b = posting("b", "acme", "ml  engineer", "MADRID");
        assert_eq!(dedup_key(&a), dedup_key(&b));
    }

    #[test]
    fn test_dedup_key_differs_on_location() {
        let a = posting("a", "Acme", "ML Engineer", "Madrid");
        let b = posting("b", "Acme", "ML Engineer", "London");
        assert_ne!(dedup_key(&a), dedup_key(&b));
    }

    #[test]
    fn test_deduplicate_empty_input() {
        assert!(deduplicate(Vec::new()).is_empty());
    }

    #[test]
    fn test_deduplicate_keeps_distinct_postings() {
        let result = deduplicate(vec![
            posting("a", "Acme", "ML Engineer", "Madrid"),
            posting("b", "Acme", "Backend Engineer", "Madrid"),
        ]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_longer_description_wins_but_keeps_original_id() {
        let mut first = posting("a", "Acme", "ML Engineer", "Madrid");
        first.description = "short".to_string();
        let first_id = first.id;

        let mut second = posting("b", "Acme Inc.", "ML Engineer", "Madrid");
        second.description = "a considerably longer description".to_string();

        let result = deduplicate(vec![first, second]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, first_id);
        assert_eq!(result[0].description, "a considerably longer description");
        assert_eq!(result[0].source_id, "b");
    }

    #[test]
    fn test_equal_length_keeps_first_seen() {
        let mut first = posting("a", "Acme", "ML Engineer", "Madrid");
        first.description = "12345".to_string();
        let mut second = posting("b", "Acme", "ML Engineer", "Madrid");
        second.description = "abcde".to_string();

        let result = deduplicate(vec![first, second]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].source_id, "a");
        assert_eq!(result[0].description, "12345");
    }

    #[test]
    fn test_output_preserves_first_seen_order() {
        let result = deduplicate(vec![
            posting("a", "Alpha", "Engineer", "Madrid"),
            posting("b", "Beta", "Engineer", "Madrid"),
            posting("c", "Alpha", "Engineer", "Madrid"),
            posting("d", "Gamma", "Engineer", "Madrid"),
        ]);
        let companies: Vec<&str> = result.iter().map(|p| p.company.as_str()).collect();
        assert_eq!(companies, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_deduplicate_is_idempotent() {
        let mut a = posting("a", "Acme", "ML Engineer", "Madrid");
        a.description = "first".to_string();
        let mut b = posting("b", "Acme Inc", "ML Engineer", "Madrid");
        b.description = "second, longer".to_string();
        let c = posting("c", "Beta", "Engineer", "London");

        let once = deduplicate(vec![a, b, c]);
        let twice = deduplicate(once.clone());
        assert_eq!(once.len(), twice.len());
        for (x, y) in once.iter().zip(twice.iter()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.description, y.description);
        }
    }
}
