use std::collections::HashMap;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::Locale;

/// Engine configuration.
///
/// Every section carries serde defaults, so `EngineConfig::default()` is a
/// complete working configuration and a config file only needs the values
/// it overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub thresholds: ScoreThresholds,
    #[serde(default)]
    pub locations: LocationConfig,
    #[serde(default)]
    pub vocabulary: Vocabulary,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl EngineConfig {
    /// Load configuration from `engine.yaml` (if present) and environment
    /// variables prefixed with `ENGINE_` (e.g. `ENGINE_LLM__ENABLED=false`).
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("engine").required(false))
            .add_source(
                Environment::with_prefix("ENGINE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from an explicit file path plus env overrides.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ENGINE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// Weights for the four scoring components. Not required to sum to 1,
/// though the defaults do.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_keyword_weight")]
    pub keyword_match: f64,
    #[serde(default = "default_title_weight")]
    pub title_match: f64,
    #[serde(default = "default_skills_weight")]
    pub skills_overlap: f64,
    #[serde(default = "default_location_weight")]
    pub location_match: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_match: default_keyword_weight(),
            title_match: default_title_weight(),
            skills_overlap: default_skills_weight(),
            location_match: default_location_weight(),
        }
    }
}

fn default_keyword_weight() -> f64 {
    0.35
}
fn default_title_weight() -> f64 {
    0.25
}
fn default_skills_weight() -> f64 {
    0.25
}
fn default_location_weight() -> f64 {
    0.15
}

/// Score bands used by downstream consumers to triage scored postings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScoreThresholds {
    #[serde(default = "default_high_interest")]
    pub high_interest: f64,
    #[serde(default = "default_low_interest")]
    pub low_interest: f64,
}

impl ScoreThresholds {
    pub fn is_high(&self, score: f64) -> bool {
        score >= self.high_interest
    }

    pub fn is_low(&self, score: f64) -> bool {
        score < self.low_interest
    }
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            high_interest: default_high_interest(),
            low_interest: default_low_interest(),
        }
    }
}

fn default_high_interest() -> f64 {
    0.75
}
fn default_low_interest() -> f64 {
    0.30
}

/// Location gazetteer: preferred terms per language, remote keywords, and a
/// whole-token abbreviation lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_preferred")]
    pub preferred: Vec<String>,
    #[serde(default = "default_preferred_es")]
    pub preferred_es: Vec<String>,
    #[serde(default = "default_remote_keywords")]
    pub remote_keywords: Vec<String>,
    #[serde(default = "default_abbreviations")]
    pub abbreviations: HashMap<String, String>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            preferred: default_preferred(),
            preferred_es: default_preferred_es(),
            remote_keywords: default_remote_keywords(),
            abbreviations: default_abbreviations(),
        }
    }
}

fn default_preferred() -> Vec<String> {
    Vec::from(["madrid", "london", "edinburgh", "spain", "united kingdom", "remote"].map(String::from))
}

fn default_preferred_es() -> Vec<String> {
    Vec::from(["españa", "reino unido", "edimburgo", "londres", "remoto"].map(String::from))
}

fn default_remote_keywords() -> Vec<String> {
    Vec::from(["remote", "remoto"].map(String::from))
}

fn default_abbreviations() -> HashMap<String, String> {
    HashMap::from([
        ("uk".to_string(), "united kingdom".to_string()),
        ("es".to_string(), "spain".to_string()),
    ])
}

/// Technology and domain terms recognized by the keyword extractor.
/// Injected configuration so tests can substitute minimal vocabularies;
/// the default carries the full shipped term table.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    pub terms: Vec<String>,
}

impl Vocabulary {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new([
            // Languages
            "python", "java", "javascript", "typescript", "c++", "c#", "go", "rust", "ruby",
            "php", "swift", "kotlin", "scala", "r", "matlab",
            // ML frameworks
            "pytorch", "tensorflow", "keras", "scikit-learn", "sklearn", "pandas", "numpy",
            "scipy", "matplotlib",
            // LLM / GenAI
            "langchain", "llm", "rag", "gpt", "bert", "transformer",
            // Infrastructure
            "docker", "kubernetes", "aws", "azure", "gcp", "cloud",
            // Data stores
            "sql", "postgresql", "mysql", "mongodb", "redis", "elasticsearch",
            // Web
            "react", "vue", "angular", "node", "fastapi", "flask", "django",
            // Practices
            "git", "ci/cd", "linux", "agile", "scrum",
            // Domains
            "machine learning", "deep learning", "computer vision", "nlp",
            "natural language processing", "reinforcement learning", "data science",
            "data engineering", "mlops",
            // Acceleration
            "onnx", "cuda", "tensorrt",
            // Architecture
            "api", "rest", "graphql", "microservices",
        ])
    }
}

/// LLM capability settings. The capability also requires an API key from
/// the environment before it reports itself available.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_enabled")]
    pub enabled: bool,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_temperature")]
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_llm_enabled(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
        }
    }
}

fn default_llm_enabled() -> bool {
    true
}
fn default_llm_model() -> String {
    "claude-sonnet-4-5".to_string()
}
fn default_llm_temperature() -> f64 {
    0.3
}

/// Defaults for tailored output.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub language: Locale,
    #[serde(default = "default_max_bullets")]
    pub max_bullets_per_entry: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            language: Locale::default(),
            max_bullets_per_entry: default_max_bullets(),
        }
    }
}

fn default_max_bullets() -> usize {
    4
}
