//! Matching & tailoring engine for job-application automation.
//!
//! The engine canonicalizes and deduplicates collected postings, extracts
//! keywords from posting text, scores postings against a candidate profile,
//! and tailors profile content (summary, skills, experience bullets) for a
//! specific posting. Acquisition, persistence, rendering and presentation
//! are external collaborators: the engine works on in-memory records only.
//!
//! Optional LLM assistance is consumed through [`llm::LlmCapability`];
//! every capability fault silently degrades to the deterministic path.

pub mod config;
pub mod errors;
pub mod llm;
pub mod matching;
pub mod models;
pub mod profile_loader;
pub mod tailoring;

// Re-export the public API surface.
pub use config::{EngineConfig, LlmConfig, LocationConfig, ScoringWeights, Vocabulary};
pub use errors::EngineError;
pub use llm::{AnthropicCapability, LlmCapability, Unavailable};
pub use matching::dedup::{dedup_key, deduplicate, normalize_company, normalize_text};
pub use matching::keywords::{extract_keywords, extract_keywords_augmented};
pub use matching::score::{score_posting, score_postings};
pub use models::{
    FocusArea, Locale, Posting, PostingStatus, Profile, ScoreBreakdown, TailoredSelection,
};
pub use profile_loader::{load_profile, validate_profile};
pub use tailoring::selector::{select_modules, TailorOptions};

#[cfg(test)]
mod tests {
    //! End-to-end scenarios across deduplication, scoring and tailoring.

    use super::*;
    use crate::models::{Bullet, ExperienceModule, PersonalInfo, Skill, SkillSet, Summary};
    use crate::models::FocusVariants;

    fn candidate_profile() -> Profile {
        Profile {
            personal: PersonalInfo {
                name: "Test Candidate".to_string(),
                name_es: String::new(),
                email: "t@t.com".to_string(),
                phone_uk: String::new(),
                phone_es: String::new(),
                linkedin: String::new(),
                titles: vec!["AI Engineer".to_string()],
                titles_es: vec![],
                summary: Summary {
                    default: "AI Engineer with experience in RAG systems.".to_string(),
                    variants: FocusVariants {
                        ml: Some("ML Engineer specializing in PyTorch.".to_string()),
                        backend: None,
                        data: None,
                    },
                },
                hobbies: vec![],
                hobbies_es: vec![],
            },
            skills: SkillSet {
                technical: vec![
                    Skill {
                        name: "PyTorch".to_string(),
                        tags: vec!["ml".to_string()],
                        priority: 1,
                    },
                    Skill {
                        name: "ONNX".to_string(),
                        tags: vec!["ml".to_string()],
                        priority: 1,
                    },
                    Skill {
                        name: "CUDA".to_string(),
                        tags: vec!["ml".to_string()],
                        priority: 1,
                    },
                    Skill {
                        name: "LangChain".to_string(),
                        tags: vec!["rag".to_string()],
                        priority: 1,
                    },
                ],
                languages: vec![],
            },
            experience: vec![ExperienceModule {
                id: "ml_role".to_string(),
                company: "DeepTech".to_string(),
                title: "Machine Learning Engineer".to_string(),
                title_es: String::new(),
                dates: "2022 - Present".to_string(),
                dates_es: String::new(),
                location: String::new(),
                note: None,
                note_es: None,
                priority: 1,
                tags: vec!["ml".to_string()],
                skills: vec![],
                bullets: vec![Bullet {
                    id: "b1".to_string(),
                    text: "Optimized inference with ONNX and CUDA.".to_string(),
                    text_es: String::new(),
                    tags: vec!["onnx".to_string(), "cuda".to_string()],
                    priority: 1,
                    variants: FocusVariants::default(),
                }],
                enabled: true,
            }],
            education: vec![],
            other: vec![],
        }
    }

    fn ml_posting() -> Posting {
        let mut posting = Posting::new(
            "indeed",
            "ml-e2e",
            "Senior Machine Learning Engineer",
            "DeepTech AI",
        );
        posting.location = "Remote".to_string();
        posting.description =
            "Looking for engineers experienced with PyTorch, ONNX, CUDA, RAG.".to_string();
        posting
    }

    #[test]
    fn test_ml_posting_scores_high_on_keywords_and_skills() {
        let (_, breakdown) =
            score_posting(&ml_posting(), &candidate_profile(), &EngineConfig::default());
        assert!(breakdown.keyword_match > 0.5, "keyword_match = {}", breakdown.keyword_match);
        assert!(breakdown.skills_overlap > 0.5, "skills_overlap = {}", breakdown.skills_overlap);
    }

    #[tokio::test]
    async fn test_ml_posting_resolves_ml_focus() {
        let selection = select_modules(
            &candidate_profile(),
            &ml_posting(),
            &EngineConfig::default(),
            TailorOptions::default(),
            &Unavailable,
        )
        .await;
        assert_eq!(selection.focus, Some(FocusArea::Ml));
        assert!(selection.summary.contains("PyTorch"));
    }

    #[test]
    fn test_company_suffix_collapses_to_one_dedup_key() {
        let mut a = Posting::new("indeed", "a", "ML Engineer", "Acme Inc.");
        a.location = "Madrid".to_string();
        let mut b = Posting::new("linkedin", "b", "ML Engineer", "Acme");
        b.location = "Madrid".to_string();

        assert_eq!(dedup_key(&a), dedup_key(&b));
        assert_eq!(deduplicate(vec![a, b]).len(), 1);
    }

    #[test]
    fn test_scored_batch_feeds_tailoring_keywords() {
        let scored = score_postings(
            vec![ml_posting()],
            &candidate_profile(),
            &EngineConfig::default(),
        );
        let breakdown = scored[0].breakdown.as_ref().unwrap();
        assert!(breakdown.keywords.contains(&"pytorch".to_string()));
        assert!(breakdown.keywords.contains(&"rag".to_string()));
    }
}
