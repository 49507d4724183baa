use serde::{Deserialize, Serialize};

/// Coarse classification of a posting's emphasis, used to pick variant
/// text. "No detectable focus" is modeled as `Option::None` at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusArea {
    Ml,
    Backend,
    Data,
}

impl FocusArea {
    /// Fixed enumeration order; ties in focus detection resolve in this order.
    pub const ALL: [FocusArea; 3] = [FocusArea::Ml, FocusArea::Backend, FocusArea::Data];

    pub fn label(self) -> &'static str {
        match self {
            FocusArea::Ml => "ml",
            FocusArea::Backend => "backend",
            FocusArea::Data => "data",
        }
    }

    /// Parses a classification label. Anything outside the known set
    /// (including "none") yields `None`.
    pub fn from_label(label: &str) -> Option<FocusArea> {
        match label {
            "ml" => Some(FocusArea::Ml),
            "backend" => Some(FocusArea::Backend),
            "data" => Some(FocusArea::Data),
            _ => None,
        }
    }
}

/// Output locale. Localized (`*_es`) fields resolve only under `Es`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

/// Focus-keyed text variants. Lookups go through `text_for` so every focus
/// case is enumerated and checked at compile time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FocusVariants {
    #[serde(default)]
    pub ml: Option<String>,
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

impl FocusVariants {
    /// Returns the variant for `focus` if present and non-empty.
    pub fn text_for(&self, focus: FocusArea) -> Option<&str> {
        let text = match focus {
            FocusArea::Ml => self.ml.as_deref(),
            FocusArea::Backend => self.backend.as_deref(),
            FocusArea::Data => self.data.as_deref(),
        };
        text.filter(|t| !t.trim().is_empty())
    }
}

/// Professional summary: a default text plus focus-keyed variants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub default: String,
    #[serde(default)]
    pub variants: FocusVariants,
}

/// Personal identity and contact info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default)]
    pub name_es: String,
    pub email: String,
    #[serde(default)]
    pub phone_uk: String,
    #[serde(default)]
    pub phone_es: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde(default)]
    pub titles_es: Vec<String>,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub hobbies_es: Vec<String>,
}

/// A technical skill. Priority 1 is most important; valid range is 1..=3
/// (the profile loader clamps out-of-range values).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_priority")]
    pub priority: u8,
}

/// A spoken language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    pub level: String,
    #[serde(default)]
    pub level_es: String,
}

/// All skills and languages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillSet {
    #[serde(default)]
    pub technical: Vec<Skill>,
    #[serde(default)]
    pub languages: Vec<Language>,
}

/// A single achievement line within a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub text_es: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub variants: FocusVariants,
}

/// A work experience entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceModule {
    pub id: String,
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub title_es: String,
    pub dates: String,
    #[serde(default)]
    pub dates_es: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub note_es: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// An education entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationModule {
    pub id: String,
    pub institution: String,
    #[serde(default)]
    pub institution_es: Option<String>,
    pub degree: String,
    #[serde(default)]
    pub degree_es: String,
    pub dates: String,
    #[serde(default)]
    pub dates_es: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// A non-work, non-education entry (hackathon, leadership, volunteering).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherModule {
    pub id: String,
    pub organization: String,
    pub title: String,
    #[serde(default)]
    pub title_es: String,
    pub dates: String,
    #[serde(default)]
    pub dates_es: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<Bullet>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// The complete assembled candidate profile. Loaded once per run and
/// treated as read-only input by the scoring and tailoring paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub experience: Vec<ExperienceModule>,
    #[serde(default)]
    pub education: Vec<EducationModule>,
    #[serde(default)]
    pub other: Vec<OtherModule>,
}

fn default_priority() -> u8 {
    1
}

fn default_true() -> bool {
    true
}
