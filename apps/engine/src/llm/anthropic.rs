//! Anthropic Messages API adapter for the [`LlmCapability`] trait.
//!
//! The one place in the crate that talks to the provider. Availability
//! requires both the config flag and an API key in the environment; the
//! adapter retries transient failures (429, 5xx) with exponential backoff
//! and leaves all further fallback behavior to its callers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::llm::prompts::{JSON_ONLY_SYSTEM, TERSE_SYSTEM};
use crate::llm::{LlmCapability, LlmError, LlmKeywordResult};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
const MAX_TOKENS: u32 = 1024;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// LLM capability backed by the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicCapability {
    client: Client,
    config: LlmConfig,
    api_key: Option<String>,
}

impl AnthropicCapability {
    /// Builds the capability, reading the API key from the environment
    /// (`.env` is loaded first if present). A missing key is not an error;
    /// it just makes the capability unavailable.
    pub fn new(config: LlmConfig) -> Self {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty());
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("failed to build HTTP client"),
            config,
            api_key,
        }
    }

    /// Raw call with retry on 429 and 5xx, exponential backoff (1s, 2s).
    async fn call(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::Unavailable)?;

        let request_body = MessagesRequest {
            model: &self.config.model,
            max_tokens: MAX_TOKENS,
            temperature: self.config.temperature,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {attempt} failed, retrying after {}ms",
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => response,
                Err(err) => {
                    last_error = Some(LlmError::Http(err));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {status}: {body}");
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: MessagesResponse = response.json().await?;
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                parsed.usage.input_tokens, parsed.usage.output_tokens
            );

            return parsed
                .text()
                .map(str::to_owned)
                .ok_or(LlmError::EmptyContent);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl LlmCapability for AnthropicCapability {
    fn available(&self) -> bool {
        self.config.enabled && self.api_key.is_some()
    }

    async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        self.call(prompt, TERSE_SYSTEM).await
    }

    async fn extract_keywords(&self, prompt: &str) -> Result<LlmKeywordResult, LlmError> {
        let text = self.call(prompt, JSON_ONLY_SYSTEM).await?;
        let json = strip_json_fences(&text);
        serde_json::from_str(json).map_err(LlmError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` fences that models sometimes wrap
/// around JSON output despite instructions.
fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(str::trim_start)
        .unwrap_or(trimmed);
    body.strip_suffix("```").map(str::trim).unwrap_or(body)
}
