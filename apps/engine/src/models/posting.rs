use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a collected posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    #[default]
    New,
    Reviewed,
    Interested,
    Applied,
    Rejected,
    Archived,
}

/// The four sub-scores, the weighted total, and the keywords that produced
/// them. All score values are in [0, 1] and rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_match: f64,
    pub title_match: f64,
    pub skills_overlap: f64,
    pub location_match: f64,
    pub total: f64,
    pub keywords: Vec<String>,
}

/// A collected job posting.
///
/// Uniqueness is defined by (source, source_id). `id` is an opaque record
/// handle assigned at first sight; deduplication preserves the original
/// winner's `id` even when a later duplicate replaces its content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub id: Uuid,
    pub source: String,
    #[serde(default)]
    pub source_id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub collected_at: DateTime<Utc>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub breakdown: Option<ScoreBreakdown>,
    #[serde(default)]
    pub status: PostingStatus,
}

impl Posting {
    /// Creates a fresh posting record with a newly assigned id.
    pub fn new(source: &str, source_id: &str, title: &str, company: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: source.to_string(),
            source_id: source_id.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: String::new(),
            description: String::new(),
            url: String::new(),
            salary_min: None,
            salary_max: None,
            posted_at: None,
            collected_at: Utc::now(),
            score: None,
            breakdown: None,
            status: PostingStatus::New,
        }
    }

    /// Applies a computed score and breakdown to this record.
    pub fn apply_score(&mut self, total: f64, breakdown: ScoreBreakdown) {
        self.score = Some(total);
        self.breakdown = Some(breakdown);
    }
}
