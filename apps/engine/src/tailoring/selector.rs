//! Selects and orders profile content for a single posting.
//!
//! Pipeline per posting: extract keywords → resolve focus → pick summary →
//! rank skills → score and truncate bullets per module → resolve localized
//! and focus-variant text → optionally rerank via the capability. Each step
//! feeds the next; the profile and posting are never mutated.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::config::EngineConfig;
use crate::llm::LlmCapability;
use crate::matching::keywords::extract_keywords;
use crate::models::{
    Bullet, EducationModule, ExperienceModule, FocusArea, Locale, ModuleKind, OtherModule,
    Posting, Profile, TailoredBullet, TailoredEntry, TailoredSelection,
};
use crate::tailoring::focus::{detect_focus, detect_focus_llm};
use crate::tailoring::rerank::rerank_bullets;

/// Ranked skill names kept in a selection, at most.
const MAX_SKILLS: usize = 15;

/// Tailoring knobs: output locale and the per-entry bullet cap.
#[derive(Debug, Clone, Copy)]
pub struct TailorOptions {
    pub locale: Locale,
    pub max_bullets_per_entry: usize,
}

impl Default for TailorOptions {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            max_bullets_per_entry: 4,
        }
    }
}

impl TailorOptions {
    /// Options taken from the engine configuration's output section.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            locale: config.output.language,
            max_bullets_per_entry: config.output.max_bullets_per_entry,
        }
    }
}

/// Build a [`TailoredSelection`] for one posting.
///
/// Infallible: every capability fault collapses to the deterministic path,
/// so a valid selection always comes back.
pub async fn select_modules(
    profile: &Profile,
    posting: &Posting,
    config: &EngineConfig,
    options: TailorOptions,
    llm: &dyn LlmCapability,
) -> TailoredSelection {
    let keywords: HashSet<String> =
        extract_keywords(&posting.description, Some(profile), &config.vocabulary)
            .into_iter()
            .collect();

    let focus = resolve_focus(&keywords, posting, llm).await;
    let summary = select_summary(profile, focus);
    let skills = select_skills(profile, &keywords);

    let mut experience: Vec<&ExperienceModule> =
        profile.experience.iter().filter(|module| module.enabled).collect();
    experience.sort_by_key(|module| module.priority);
    let experience = experience
        .into_iter()
        .map(|module| tailor_experience(module, &keywords, focus, options))
        .collect();

    let mut education: Vec<&EducationModule> =
        profile.education.iter().filter(|module| module.enabled).collect();
    education.sort_by_key(|module| module.priority);
    let education = education
        .into_iter()
        .map(|module| tailor_education(module, &keywords, focus, options))
        .collect();

    let mut other: Vec<&OtherModule> = profile.other.iter().filter(|module| module.enabled).collect();
    other.sort_by_key(|module| module.priority);
    let other = other
        .into_iter()
        .map(|module| tailor_other(module, &keywords, focus, options))
        .collect();

    let mut selection = TailoredSelection {
        personal: profile.personal.clone(),
        summary,
        skills,
        languages: profile.skills.languages.clone(),
        experience,
        education,
        other,
        posting_id: posting.id,
        focus,
    };

    rerank_bullets(&mut selection, posting, llm).await;

    selection
}

/// Capability classification when available, deterministic detection
/// otherwise (and on any capability failure).
async fn resolve_focus(
    keywords: &HashSet<String>,
    posting: &Posting,
    llm: &dyn LlmCapability,
) -> Option<FocusArea> {
    if llm.available() {
        match detect_focus_llm(posting, llm).await {
            Ok(focus) => return focus,
            Err(err) => {
                debug!("focus classification unavailable, using detector: {err}");
            }
        }
    }
    detect_focus(keywords, &posting.title)
}

/// The focus variant when one is defined and non-empty, else the default
/// summary.
fn select_summary(profile: &Profile, focus: Option<FocusArea>) -> String {
    let summary = &profile.personal.summary;
    focus
        .and_then(|focus| summary.variants.text_for(focus))
        .unwrap_or(summary.default.as_str())
        .to_string()
}

/// Rank skills for the posting and keep the top names.
///
/// Per skill: 3 for a verbatim name hit in the keyword set, plus tag
/// overlap normalized by tag count, plus the priority bonus. The sort is
/// stable, so equal scores keep profile order.
fn select_skills(profile: &Profile, keywords: &HashSet<String>) -> Vec<String> {
    let mut scored: Vec<(&str, f64)> = profile
        .skills
        .technical
        .iter()
        .map(|skill| {
            let name_hit = if keywords.contains(&skill.name.to_lowercase()) { 3.0 } else { 0.0 };
            let tag_hits = skill
                .tags
                .iter()
                .filter(|tag| keywords.contains(&tag.to_lowercase()))
                .count();
            let tag_overlap = tag_hits as f64 / skill.tags.len().max(1) as f64;
            let score = name_hit + tag_overlap + priority_bonus(skill.priority);
            (skill.name.as_str(), score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.into_iter().take(MAX_SKILLS).map(|(name, _)| name.to_string()).collect()
}

/// Bullet relevance: tag overlap count plus priority bonus. A bullet with
/// no tags at all scores exactly 0.0 — the priority bonus does not apply.
fn score_bullet(bullet: &Bullet, keywords: &HashSet<String>) -> f64 {
    if bullet.tags.is_empty() {
        return 0.0;
    }
    let overlap = bullet
        .tags
        .iter()
        .filter(|tag| keywords.contains(&tag.to_lowercase()))
        .count();
    overlap as f64 + priority_bonus(bullet.priority)
}

/// Priority bonus: 1 → 1.0, 2 → 0.67, 3 → 0.33. Priorities are clamped to
/// 1..=3 at profile load time.
fn priority_bonus(priority: u8) -> f64 {
    (4.0 - priority as f64) / 3.0
}

/// Score, stable-sort, truncate, and resolve text for a module's bullets.
fn select_bullets(
    bullets: &[Bullet],
    keywords: &HashSet<String>,
    focus: Option<FocusArea>,
    options: TailorOptions,
) -> Vec<TailoredBullet> {
    let mut scored: Vec<(&Bullet, f64)> =
        bullets.iter().map(|bullet| (bullet, score_bullet(bullet, keywords))).collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(options.max_bullets_per_entry);

    scored
        .into_iter()
        .map(|(bullet, relevance_score)| TailoredBullet {
            id: bullet.id.clone(),
            text: bullet_text(bullet, focus, options.locale).to_string(),
            relevance_score,
        })
        .collect()
}

/// Text precedence: localized (non-default locale, non-empty) over focus
/// variant over default.
fn bullet_text(bullet: &Bullet, focus: Option<FocusArea>, locale: Locale) -> &str {
    if locale == Locale::Es && !bullet.text_es.is_empty() {
        return &bullet.text_es;
    }
    if let Some(variant) = focus.and_then(|focus| bullet.variants.text_for(focus)) {
        return variant;
    }
    &bullet.text
}

/// Localized-over-default resolution for module-level fields (which have no
/// focus variants).
fn localized<'a>(default: &'a str, translated: &'a str, locale: Locale) -> &'a str {
    if locale == Locale::Es && !translated.is_empty() {
        translated
    } else {
        default
    }
}

fn localized_opt(default: &Option<String>, translated: &Option<String>, locale: Locale) -> Option<String> {
    if locale == Locale::Es {
        if let Some(text) = translated.as_deref().filter(|t| !t.is_empty()) {
            return Some(text.to_string());
        }
    }
    default.clone()
}

fn tailor_experience(
    module: &ExperienceModule,
    keywords: &HashSet<String>,
    focus: Option<FocusArea>,
    options: TailorOptions,
) -> TailoredEntry {
    TailoredEntry {
        id: module.id.clone(),
        kind: ModuleKind::Experience,
        title: localized(&module.title, &module.title_es, options.locale).to_string(),
        organization: module.company.clone(),
        dates: localized(&module.dates, &module.dates_es, options.locale).to_string(),
        location: module.location.clone(),
        note: localized_opt(&module.note, &module.note_es, options.locale),
        gpa: None,
        skills: module.skills.clone(),
        bullets: select_bullets(&module.bullets, keywords, focus, options),
    }
}

fn tailor_education(
    module: &EducationModule,
    keywords: &HashSet<String>,
    focus: Option<FocusArea>,
    options: TailorOptions,
) -> TailoredEntry {
    let institution = match options.locale {
        Locale::Es => module
            .institution_es
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(module.institution.as_str()),
        Locale::En => module.institution.as_str(),
    };
    TailoredEntry {
        id: module.id.clone(),
        kind: ModuleKind::Education,
        title: localized(&module.degree, &module.degree_es, options.locale).to_string(),
        organization: institution.to_string(),
        dates: localized(&module.dates, &module.dates_es, options.locale).to_string(),
        location: module.location.clone(),
        note: None,
        gpa: module.gpa.clone(),
        skills: module.skills.clone(),
        bullets: select_bullets(&module.bullets, keywords, focus, options),
    }
}

fn tailor_other(
    module: &OtherModule,
    keywords: &HashSet<String>,
    focus: Option<FocusArea>,
    options: TailorOptions,
) -> TailoredEntry {
    TailoredEntry {
        id: module.id.clone(),
        kind: ModuleKind::Other,
        title: localized(&module.title, &module.title_es, options.locale).to_string(),
        organization: module.organization.clone(),
        dates: localized(&module.dates, &module.dates_es, options.locale).to_string(),
        location: module.location.clone(),
        note: None,
        gpa: None,
        skills: module.skills.clone(),
        bullets: select_bullets(&module.bullets, keywords, focus, options),
    }
}
