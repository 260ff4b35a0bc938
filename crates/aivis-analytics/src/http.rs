//! OpenAI-compatible chat-completions client used as the insight provider.

use std::time::Duration;

use aivis_core::AppConfig;
use serde::{Deserialize, Serialize};

use crate::error::InsightError;
use crate::provider::InsightProvider;

const SYSTEM_PROMPT: &str =
    "You are a brand strategy analyst. Provide direct, concise, actionable insights.";
const TEMPERATURE: f32 = 0.7;

/// Insight provider backed by `POST {base_url}/chat/completions`.
#[derive(Debug, Clone)]
pub struct HttpInsightProvider {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl HttpInsightProvider {
    /// Build a provider against `base_url` (e.g. `https://api.openai.com/v1`).
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, InsightError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
        })
    }

    /// Build a provider from app config, or `None` when no API key is set.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, InsightError> {
        let Some(api_key) = config.insight_api_key.as_deref() else {
            return Ok(None);
        };
        Self::new(
            &config.insight_base_url,
            api_key,
            &config.insight_model,
            config.insight_max_tokens,
            Duration::from_secs(config.insight_timeout_secs),
        )
        .map(Some)
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, InsightError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(InsightError::EmptyResponse)
    }
}

impl InsightProvider for HttpInsightProvider {
    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "requesting insight");
        self.complete(prompt).await
    }
}
