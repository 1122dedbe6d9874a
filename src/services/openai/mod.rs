use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::Config,
    error::UpstreamError,
    services::openai::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Role},
};

pub mod types;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that turns a prompt into raw completion text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

#[derive(Clone)]
pub struct ChatCompletionsConfig {
    pub api_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl From<&Config> for ChatCompletionsConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_url: config.llm_api_url.clone(),
            model: config.llm_model.clone(),
            api_key: config.llm_api_key.clone(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

/// Client for any OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    config: ChatCompletionsConfig,
}

impl ChatCompletionsClient {
    pub fn new(config: ChatCompletionsConfig) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: Role::User,
                content: prompt.to_string(),
            }],
        };

        debug!("Sending prompt to LLM");

        let resp = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(UpstreamError::EmptyContent)
    }
}
