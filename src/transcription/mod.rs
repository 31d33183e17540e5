//! Transcription module for mtgmap
//!
//! Handles speech-to-text using whisper-rs.

mod audio;
mod whisper;

use std::path::Path;

use crate::Result;

/// Speech-to-text engine seam.
///
/// Implementations turn an audio file on disk into plain text in the
/// configured language.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

pub use whisper::WhisperTranscriber;
