//! LLM client for text generation.
//!
//! Supports OpenAI and Anthropic APIs behind one handle. The provider is
//! chosen by a pure classification of the model identifier, and the client
//! is constructed explicitly by the caller; there is no ambient singleton
//! or per-call cache.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LlmError, LlmResult};

/// Seam for anything that turns a prompt into generated text.
///
/// [`LlmClient`] is the production implementation; tests substitute
/// scripted fakes so the call-parse-persist flows can run offline.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> LlmResult<String>;
}

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4.1";
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// LLM provider, classified from the model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    /// Classify a model identifier string into its provider.
    pub fn classify(model: &str) -> Self {
        if model.starts_with("claude") {
            Provider::Anthropic
        } else {
            Provider::OpenAi
        }
    }

    /// Environment variable carrying the provider's API key.
    pub fn key_env_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Client handle for a single model/temperature configuration.
pub struct LlmClient {
    provider: Provider,
    model: String,
    temperature: f32,
    api_key: String,
    http: reqwest::Client,
}

impl LlmClient {
    /// Create a client for the given model. The provider follows from the
    /// model identifier.
    pub fn new(model: impl Into<String>, temperature: f32, api_key: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            provider: Provider::classify(&model),
            model,
            temperature,
            api_key: api_key.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client reading the API key from the provider's environment
    /// variable.
    pub fn from_env(model: impl Into<String>, temperature: f32) -> LlmResult<Self> {
        let model = model.into();
        let provider = Provider::classify(&model);
        let api_key = std::env::var(provider.key_env_var())
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(LlmError::NotConfigured)?;
        Ok(Self::new(model, temperature, api_key))
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the generated text.
    ///
    /// A single attempt is made; transport or API failures surface as hard
    /// errors of the calling operation.
    pub async fn complete(&self, prompt: &str) -> LlmResult<String> {
        debug!(
            "Sending prompt to {} ({} chars)",
            self.model,
            prompt.len()
        );
        match self.provider {
            Provider::OpenAi => self.complete_openai(prompt).await,
            Provider::Anthropic => self.complete_anthropic(prompt).await,
        }
    }

    async fn complete_openai(&self, prompt: &str) -> LlmResult<String> {
        let request = OpenAiRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .http
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Request(format!("Failed to parse response: {}", e)))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    async fn complete_anthropic(&self, prompt: &str) -> LlmResult<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: 4096,
            temperature: self.temperature,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .http
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Request(format!("Failed to parse response: {}", e)))?;

        result
            .content
            .into_iter()
            .next()
            .map(|content| content.text)
            .filter(|text| !text.is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        LlmClient::complete(self, prompt).await
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    temperature: f32,
    messages: Vec<OpenAiMessage>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: String,
}

// Anthropic API types
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_model_prefix() {
        assert_eq!(Provider::classify("claude-sonnet-4.5"), Provider::Anthropic);
        assert_eq!(Provider::classify("gpt-4.1"), Provider::OpenAi);
        assert_eq!(Provider::classify("o4-mini"), Provider::OpenAi);
    }

    #[test]
    fn client_keeps_configured_model() {
        let client = LlmClient::new("gpt-4.1", 0.3, "test-key");
        assert_eq!(client.model(), "gpt-4.1");
        assert_eq!(client.provider(), Provider::OpenAi);

        let client = LlmClient::new("claude-sonnet-4.5", 0.0, "test-key");
        assert_eq!(client.provider(), Provider::Anthropic);
    }

    #[test]
    fn from_env_requires_key() {
        std::env::remove_var("OPENAI_API_KEY");
        assert!(LlmClient::from_env(DEFAULT_MODEL, DEFAULT_TEMPERATURE).is_err());

        std::env::set_var("OPENAI_API_KEY", "test-key");
        assert!(LlmClient::from_env(DEFAULT_MODEL, DEFAULT_TEMPERATURE).is_ok());
        std::env::remove_var("OPENAI_API_KEY");
    }
}
