use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::openai::OpenAiClient;
use crate::llm::prompts::MinutesStyle;
use crate::{MtgmapError, Result};

/// Summary generation request payload.
pub struct SummaryRequest<'a> {
    pub transcript: &'a str,
    pub style: MinutesStyle,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn summarize(&self, request: SummaryRequest<'_>) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        other => Err(MtgmapError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: openai",
            other
        ))),
    }
}
