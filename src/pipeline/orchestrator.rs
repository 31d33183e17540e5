//! Audio-to-minutes pipeline orchestration

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::llm::{build_provider, LlmProvider, MinutesStyle, SummaryRequest};
use crate::transcription::{Transcriber, WhisperTranscriber};
use crate::{MtgmapError, Result};

/// Marker appended to a transcript preview that was cut short.
const PREVIEW_MARKER: &str = "...";

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct MinutesOutput {
    /// Transcript preview, truncated to the configured character budget
    pub transcript_preview: String,
    /// Full generated minutes (Markdown)
    pub summary: String,
    /// Where the minutes were written
    pub minutes_path: PathBuf,
}

/// Audio-to-minutes pipeline.
///
/// Owns its transcription engine and LLM provider, so repeated runs reuse
/// the loaded Whisper model instead of reloading it per file.
pub struct MinutesPipeline {
    transcriber: Box<dyn Transcriber>,
    provider: Box<dyn LlmProvider>,
    output_dir: PathBuf,
    preview_chars: usize,
}

impl MinutesPipeline {
    /// Build the pipeline from settings.
    ///
    /// The provider is constructed first so a missing API key surfaces
    /// before the Whisper model is loaded.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let provider = build_provider(settings)?;
        let transcriber = Box::new(WhisperTranscriber::new(settings)?);

        Ok(Self {
            transcriber,
            provider,
            output_dir: settings.output.dir.clone(),
            preview_chars: settings.output.preview_chars,
        })
    }

    /// Build a pipeline from explicit components.
    pub fn new(
        transcriber: Box<dyn Transcriber>,
        provider: Box<dyn LlmProvider>,
        output_dir: PathBuf,
        preview_chars: usize,
    ) -> Self {
        Self {
            transcriber,
            provider,
            output_dir,
            preview_chars,
        }
    }

    /// Process one audio file: transcribe, summarize, persist.
    ///
    /// The full transcript is written next to the audio input as `<base>.txt`
    /// before the LLM is called; the minutes land at
    /// `<output dir>/<base>.minutes.md`. Both files are overwritten on
    /// repeated runs with the same base name.
    pub async fn process_audio(
        &self,
        audio_path: &Path,
        style: MinutesStyle,
    ) -> Result<MinutesOutput> {
        tracing::info!("Transcribing {}", audio_path.display());
        let transcript = self.transcriber.transcribe(audio_path)?;

        let transcript_path = audio_path.with_extension("txt");
        std::fs::write(&transcript_path, &transcript).map_err(|e| {
            MtgmapError::Transcription(format!(
                "Failed to write transcript {}: {}",
                transcript_path.display(),
                e
            ))
        })?;
        tracing::info!("Transcript saved to {}", transcript_path.display());

        tracing::info!("Summarizing with style '{}'", style.key());
        let summary = self
            .provider
            .summarize(SummaryRequest {
                transcript: &transcript,
                style,
            })
            .await?;

        let minutes_path = self.minutes_path(audio_path)?;
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            MtgmapError::Persistence(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;
        std::fs::write(&minutes_path, &summary).map_err(|e| {
            MtgmapError::Persistence(format!(
                "Failed to write minutes {}: {}",
                minutes_path.display(),
                e
            ))
        })?;
        tracing::info!("Minutes saved to {}", minutes_path.display());

        Ok(MinutesOutput {
            transcript_preview: truncate_preview(&transcript, self.preview_chars),
            summary,
            minutes_path,
        })
    }

    /// Target path for the minutes, derived from the audio file's base name.
    fn minutes_path(&self, audio_path: &Path) -> Result<PathBuf> {
        let base = audio_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                MtgmapError::Persistence(format!(
                    "Cannot derive an output name from {}",
                    audio_path.display()
                ))
            })?;

        Ok(self.output_dir.join(format!("{}.minutes.md", base)))
    }
}

/// Truncate `text` to `budget` characters, appending a marker when cut.
///
/// The budget counts characters rather than bytes, so multi-byte text is
/// never split mid-character.
fn truncate_preview(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => {
            let mut preview = text[..idx].to_string();
            preview.push_str(PREVIEW_MARKER);
            preview
        }
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_transcript_passes_through() {
        assert_eq!(truncate_preview("hello", 500), "hello");
    }

    #[test]
    fn transcript_at_budget_gets_no_marker() {
        let text = "a".repeat(500);
        assert_eq!(truncate_preview(&text, 500), text);
    }

    #[test]
    fn long_transcript_is_cut_with_marker() {
        let text = "a".repeat(600);
        let preview = truncate_preview(&text, 500);
        assert_eq!(preview.len(), 503);
        assert!(preview.ends_with("..."));
        assert_eq!(&preview[..500], &text[..500]);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "議".repeat(600);
        let preview = truncate_preview(&text, 500);
        assert_eq!(preview.chars().count(), 503);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn empty_transcript_stays_empty() {
        assert_eq!(truncate_preview("", 800), "");
    }
}
