//! Loads and assembles a multi-file YAML profile.
//!
//! Layout: `personal.yaml`, `skills.yaml`, plus `experience/`, `education/`
//! and `other/` directories holding one YAML file per entry, read in sorted
//! filename order. Files marked `enabled: false` are skipped at load time.
//! Modules are sorted by priority, and all priorities are clamped to 1..=3
//! (the selection formulas assume that range).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::errors::EngineError;
use crate::models::{
    EducationModule, ExperienceModule, OtherModule, PersonalInfo, Profile, SkillSet,
};

/// Load the full profile from a directory. The profile is the engine's one
/// hard precondition: failure here must stop the caller before scoring.
pub fn load_profile(profile_dir: impl AsRef<Path>) -> Result<Profile, EngineError> {
    assemble(profile_dir.as_ref()).map_err(EngineError::Profile)
}

/// Validate the profile directory. Returns human-readable problems; an
/// empty list means the profile loads cleanly.
pub fn validate_profile(profile_dir: impl AsRef<Path>) -> Vec<String> {
    let dir = profile_dir.as_ref();
    let mut problems = Vec::new();

    for required in ["personal.yaml", "skills.yaml"] {
        let path = dir.join(required);
        if !path.exists() {
            problems.push(format!("missing required file: {}", path.display()));
        }
    }

    for subdir in ["experience", "education"] {
        let path = dir.join(subdir);
        if !path.is_dir() {
            problems.push(format!("missing directory: {}", path.display()));
        } else if yaml_files(&path).map(|files| files.is_empty()).unwrap_or(true) {
            problems.push(format!("no YAML files in: {}", path.display()));
        }
    }

    if problems.is_empty() {
        if let Err(err) = assemble(dir) {
            problems.push(format!("failed to load profile: {err:#}"));
        }
    }

    problems
}

fn assemble(dir: &Path) -> Result<Profile> {
    let personal: PersonalInfo = read_yaml(&dir.join("personal.yaml"))?;
    let skills: SkillSet = read_yaml(&dir.join("skills.yaml"))?;

    let mut experience: Vec<ExperienceModule> = read_module_dir(&dir.join("experience"))?;
    let mut education: Vec<EducationModule> = read_module_dir(&dir.join("education"))?;
    let mut other: Vec<OtherModule> = read_module_dir(&dir.join("other"))?;

    experience.sort_by_key(|module| module.priority);
    education.sort_by_key(|module| module.priority);
    other.sort_by_key(|module| module.priority);

    let mut profile = Profile {
        personal,
        skills,
        experience,
        education,
        other,
    };
    clamp_priorities(&mut profile);
    Ok(profile)
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Reads every YAML file in a directory, in sorted filename order, skipping
/// files that disable themselves with `enabled: false`.
fn read_module_dir<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut modules = Vec::new();
    for path in yaml_files(dir)? {
        let text =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        if value.get("enabled").and_then(serde_yaml::Value::as_bool) == Some(false) {
            continue;
        }
        let module = serde_yaml::from_value(value)
            .with_context(|| format!("parsing {}", path.display()))?;
        modules.push(module);
    }
    Ok(modules)
}

fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("yaml") | Some("yml")
            )
        })
        .collect();
    paths.sort();
    Ok(paths)
}

fn clamp_priorities(profile: &mut Profile) {
    for skill in &mut profile.skills.technical {
        skill.priority = skill.priority.clamp(1, 3);
    }
    for module in &mut profile.experience {
        module.priority = module.priority.clamp(1, 3);
        for bullet in &mut module.bullets {
            bullet.priority = bullet.priority.clamp(1, 3);
        }
    }
    for module in &mut profile.education {
        module.priority = module.priority.clamp(1, 3);
        for bullet in &mut module.bullets {
            bullet.priority = bullet.priority.clamp(1, 3);
        }
    }
    for module in &mut profile.other {
        module.priority = module.priority.clamp(1, 3);
        for bullet in &mut module.bullets {
            bullet.priority = bullet.priority.clamp(1, 3);
        }
    }
}
