use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{LlmProvider, SummaryRequest};
use crate::{MtgmapError, Result};

const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-5-mini";

/// Summarization can take a while for long transcripts.
const REQUEST_TIMEOUT_SECS: u64 = 120;

pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(MtgmapError::Config(
                "OpenAI API key is missing. Set llm.api_key in config or the OPENAI_API_KEY \
                 environment variable."
                    .to_string(),
            ));
        }

        let model = if settings.llm.model.trim().is_empty() {
            DEFAULT_OPENAI_MODEL.to_string()
        } else {
            settings.llm.model.trim().to_string()
        };

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_OPENAI_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        Ok(Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .map_err(|e| {
                    MtgmapError::Config(format!("Failed to build OpenAI HTTP client: {}", e))
                })?,
            api_key,
            model,
            endpoint,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    async fn summarize(&self, request: SummaryRequest<'_>) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.style.instruction(),
                },
                ChatMessage {
                    role: "user",
                    content: request.transcript,
                },
            ],
        };

        tracing::debug!("Requesting summary from model {}", self.model);

        let response = self
            .http
            .post(self.request_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| MtgmapError::Summarization(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MtgmapError::Summarization(format!(
                "OpenAI returned {}: {}",
                status, detail
            )));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|e| {
            MtgmapError::Summarization(format!("Failed to parse OpenAI response: {}", e))
        })?;

        // The summary passes through untouched; only a response with no
        // content at all is an error.
        payload
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| {
                MtgmapError::Summarization(
                    "OpenAI response did not contain summary text".to_string(),
                )
            })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
