//! LLM module for mtgmap
//!
//! Styled summary generation behind a provider trait, with an OpenAI
//! chat-completions implementation.

mod client;
mod openai;
mod prompts;

pub use client::{build_provider, LlmProvider, SummaryRequest};
pub use openai::OpenAiClient;
pub use prompts::{MinutesStyle, ALL_STYLES};
