use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::profile::{FocusArea, Language, PersonalInfo};

/// Which profile collection a tailored entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Experience,
    Education,
    Other,
}

/// A bullet selected for a specific posting, with the relevance score that
/// ranked it (kept for downstream display).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredBullet {
    pub id: String,
    pub text: String,
    pub relevance_score: f64,
}

/// A profile entry tailored for a specific posting. Title, organization and
/// dates are already resolved for the requested locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredEntry {
    pub id: String,
    pub kind: ModuleKind,
    pub title: String,
    pub organization: String,
    pub dates: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<TailoredBullet>,
}

/// The per-posting customized subset and ordering of profile content.
/// A derived, disposable artifact: recomputed per posting, never persisted
/// by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredSelection {
    pub personal: PersonalInfo,
    pub summary: String,
    pub skills: Vec<String>,
    pub languages: Vec<Language>,
    pub experience: Vec<TailoredEntry>,
    pub education: Vec<TailoredEntry>,
    pub other: Vec<TailoredEntry>,
    pub posting_id: Uuid,
    pub focus: Option<FocusArea>,
}

impl TailoredSelection {
    /// All tailored entries across the three collections, mutably.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut TailoredEntry> {
        self.experience
            .iter_mut()
            .chain(self.education.iter_mut())
            .chain(self.other.iter_mut())
    }
}
