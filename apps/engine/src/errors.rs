use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Capability (LLM) faults never appear here — they are absorbed at the
/// point of use and the deterministic path runs instead. Only load-time
/// precondition failures (configuration, profile) reach the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("profile error: {0}")]
    Profile(#[source] anyhow::Error),
}
