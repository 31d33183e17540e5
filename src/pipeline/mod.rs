//! Pipeline module for mtgmap
//!
//! Sequences transcription, summarization, and persistence into one
//! audio-to-minutes run.

mod orchestrator;

pub use orchestrator::{MinutesOutput, MinutesPipeline};
