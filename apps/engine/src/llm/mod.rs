//! Capability interface for optional LLM assistance.
//!
//! The engine consumes the capability, it never requires it: call sites
//! check [`LlmCapability::available`] before invoking and treat every
//! failure, timeout, or malformed response as equivalent to absence.
//! Retry policy beyond the adapter's own transport retries belongs to the
//! capability implementation, not the engine.

pub mod anthropic;
pub mod prompts;

pub use anthropic::AnthropicCapability;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("capability unavailable")]
    Unavailable,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("json parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("empty completion")]
    EmptyContent,
}

/// Structured result of capability-backed keyword extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmKeywordResult {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    #[serde(default)]
    pub focus_area: Option<String>,
}

/// An optional LLM capability.
///
/// `available()` must be checked before use; `false` means "do not call".
/// Implementations own their timeout and retry behavior.
#[async_trait]
pub trait LlmCapability: Send + Sync {
    /// Whether the capability can be called at all.
    fn available(&self) -> bool;

    /// Free-text completion.
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError>;

    /// Structured keyword extraction — the only structured call the engine
    /// makes.
    async fn extract_keywords(&self, prompt: &str) -> Result<LlmKeywordResult, LlmError>;
}

/// The no-op capability: never available, every call errors.
///
/// Call sites hold a `&dyn LlmCapability` and query `available()` instead
/// of branching on an `Option`, so "no LLM configured" is just this value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl LlmCapability for Unavailable {
    fn available(&self) -> bool {
        false
    }

    async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Unavailable)
    }

    async fn extract_keywords(&self, _prompt: &str) -> Result<LlmKeywordResult, LlmError> {
        Err(LlmError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_reports_false_and_errors() {
        assert!(!Unavailable.available());
        assert!(matches!(Unavailable.invoke("hi").await, Err(LlmError::Unavailable)));
        assert!(matches!(
            Unavailable.extract_keywords("hi").await,
            Err(LlmError::Unavailable)
        ));
    }

    #[test]
    fn test_keyword_result_tolerates_missing_fields() {
        let result: LlmKeywordResult = serde_json::from_str(r#"{"keywords": ["python"]}"#).unwrap();
        assert_eq!(result.keywords, vec!["python".to_string()]);
        assert!(result.required_skills.is_empty());
        assert!(result.focus_area.is_none());
    }
}
