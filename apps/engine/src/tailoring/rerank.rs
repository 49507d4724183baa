//! Capability-backed bullet reordering.
//!
//! The capability sees each multi-bullet entry as a numbered list and must
//! answer with a literal comma-separated permutation of those numbers.
//! Anything else — transport failure, wrong length, out-of-range or
//! repeated indices — leaves the deterministic order untouched. That
//! fallback is a hard contract, not best-effort.

use tracing::debug;

use crate::llm::LlmCapability;
use crate::models::{Posting, TailoredEntry, TailoredSelection};
use crate::tailoring::prompts::RERANK_PROMPT_TEMPLATE;

/// Rerank bullets within every entry of the selection that has more than
/// one bullet. No-op when the capability is unavailable.
pub async fn rerank_bullets(
    selection: &mut TailoredSelection,
    posting: &Posting,
    llm: &dyn LlmCapability,
) {
    if !llm.available() {
        return;
    }
    for entry in selection.entries_mut() {
        rerank_entry(entry, posting, llm).await;
    }
}

async fn rerank_entry(entry: &mut TailoredEntry, posting: &Posting, llm: &dyn LlmCapability) {
    if entry.bullets.len() < 2 {
        return;
    }

    let bullet_list = entry
        .bullets
        .iter()
        .enumerate()
        .map(|(i, bullet)| format!("{}. {}", i + 1, bullet.text))
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = RERANK_PROMPT_TEMPLATE
        .replace("{title}", &posting.title)
        .replace("{count}", &entry.bullets.len().to_string())
        .replace("{bullets}", &bullet_list);

    let response = match llm.invoke(&prompt).await {
        Ok(response) => response,
        Err(err) => {
            debug!("bullet reranking unavailable for entry {}: {err}", entry.id);
            return;
        }
    };

    match parse_permutation(&response, entry.bullets.len()) {
        Some(order) => {
            let mut slots: Vec<Option<_>> = entry.bullets.drain(..).map(Some).collect();
            entry.bullets = order.into_iter().filter_map(|i| slots[i - 1].take()).collect();
        }
        None => {
            debug!("discarding unparseable rerank response for entry {}", entry.id);
        }
    }
}

/// Parses "2,1,3" into a permutation of 1..=expected. Returns `None` for
/// anything that is not exactly that.
fn parse_permutation(response: &str, expected: usize) -> Option<Vec<usize>> {
    let indices: Vec<usize> = response
        .trim()
        .split(',')
        .map(|part| part.trim().parse::<usize>().ok())
        .collect::<Option<Vec<_>>>()?;

    if indices.len() != expected {
        return None;
    }
    let mut seen = vec![false; expected];
    for &index in &indices {
        if index == 0 || index > expected || seen[index - 1] {
            return None;
        }
        seen[index - 1] = true;
    }
    Some(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, LlmKeywordResult, Unavailable};
    use crate::models::{ModuleKind, PersonalInfo, Summary, TailoredBullet};
    use async_trait::async_trait;
    use uuid::Uuid;

    struct ScriptedCapability {
        reply: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl LlmCapability for ScriptedCapability {
        fn available(&self) -> bool {
            true
        }
        async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
            if self.fail {
                Err(LlmError::EmptyContent)
            } else {
                Ok(self.reply.to_string())
            }
        }
        async fn extract_keywords(&self, _prompt: &str) -> Result<LlmKeywordResult, LlmError> {
            Err(LlmError::Unavailable)
        }
    }

    fn entry(bullet_ids: &[&str]) -> TailoredEntry {
        TailoredEntry {
            id: "entry-1".to_string(),
            kind: ModuleKind::Experience,
            title: "AI Engineer".to_string(),
            organization: "Acme".to_string(),
            dates: "2024".to_string(),
            location: String::new(),
            note: None,
            gpa: None,
            skills: vec![],
            bullets: bullet_ids
                .iter()
                .map(|id| TailoredBullet {
                    id: id.to_string(),
                    text: format!("did {id}"),
                    relevance_score: 1.0,
                })
                .collect(),
        }
    }

    fn selection(entries: Vec<TailoredEntry>) -> TailoredSelection {
        TailoredSelection {
            personal: PersonalInfo {
                name: "Test".to_string(),
                name_es: String::new(),
                email: "t@t.com".to_string(),
                phone_uk: String::new(),
                phone_es: String::new(),
                linkedin: String::new(),
                titles: vec![],
                titles_es: vec![],
                summary: Summary::default(),
                hobbies: vec![],
                hobbies_es: vec![],
            },
            summary: String::new(),
            skills: vec![],
            languages: vec![],
            experience: entries,
            education: vec![],
            other: vec![],
            posting_id: Uuid::new_v4(),
            focus: None,
        }
    }

    fn posting() -> Posting {
        Posting::new("indeed", "p-1", "ML Engineer", "DeepTech AI")
    }

    #[test]
    fn test_parse_permutation_valid() {
        assert_eq!(parse_permutation("2,1,3", 3), Some(vec![2, 1, 3]));
        assert_eq!(parse_permutation(" 2 , 1 ", 2), Some(vec![2, 1]));
    }

    #[test]
    fn test_parse_permutation_rejects_garbage() {
        assert_eq!(parse_permutation("invalid response", 2), None);
        assert_eq!(parse_permutation("", 2), None);
        assert_eq!(parse_permutation("1,2,3", 2), None); // wrong length
        assert_eq!(parse_permutation("1,1", 2), None); // repeated
        assert_eq!(parse_permutation("0,1", 2), None); // zero index
        assert_eq!(parse_permutation("1,3", 2), None); // out of range
    }

    #[tokio::test]
    async fn test_rerank_reorders_bullets() {
        let mut sel = selection(vec![entry(&["a", "b"])]);
        let capability = ScriptedCapability { reply: "2,1", fail: false };

        rerank_bullets(&mut sel, &posting(), &capability).await;

        let ids: Vec<&str> = sel.experience[0].bullets.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_unparseable_response_preserves_order() {
        let mut sel = selection(vec![entry(&["a", "b", "c"])]);
        let capability = ScriptedCapability { reply: "definitely not numbers", fail: false };

        rerank_bullets(&mut sel, &posting(), &capability).await;

        let ids: Vec<&str> = sel.experience[0].bullets.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_capability_failure_preserves_order() {
        let mut sel = selection(vec![entry(&["a", "b"])]);
        let capability = ScriptedCapability { reply: "", fail: true };

        rerank_bullets(&mut sel, &posting(), &capability).await;

        let ids: Vec<&str> = sel.experience[0].bullets.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_single_bullet_entries_not_sent_to_capability() {
        // A "1" reply would be valid for a single bullet, but single-bullet
        // entries are skipped entirely; the scripted "2,1" would corrupt a
        // two-bullet entry if it were (wrongly) applied to this one.
        let mut sel = selection(vec![entry(&["only"])]);
        let capability = ScriptedCapability { reply: "2,1", fail: false };

        rerank_bullets(&mut sel, &posting(), &capability).await;
        assert_eq!(sel.experience[0].bullets.len(), 1);
        assert_eq!(sel.experience[0].bullets[0].id, "only");
    }

    #[tokio::test]
    async fn test_unavailable_capability_is_a_noop() {
        let mut sel = selection(vec![entry(&["a", "b"])]);
        rerank_bullets(&mut sel, &posting(), &Unavailable).await;
        let ids: Vec<&str> = sel.experience[0].bullets.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
