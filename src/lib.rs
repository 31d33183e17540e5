//! mtgmap - Turn meeting audio into structured minutes
//!
//! Transcribes a recording locally with Whisper, asks an LLM for a styled
//! summary, and writes the result as Markdown.

pub mod cli;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod transcription;

use thiserror::Error;

/// Main error type for mtgmap
///
/// Each variant names the pipeline stage that failed.
#[derive(Error, Debug)]
pub enum MtgmapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, MtgmapError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "mtgmap";
