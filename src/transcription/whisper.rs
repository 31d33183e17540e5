//! Whisper transcription using whisper-rs

use std::path::Path;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::config::Settings;
use crate::transcription::audio::decode_samples;
use crate::transcription::Transcriber;
use crate::{MtgmapError, Result};

/// Whisper-based transcriber
///
/// The ggml model is loaded once; each transcription runs on a fresh state
/// created from the shared context.
pub struct WhisperTranscriber {
    ctx: WhisperContext,
    language: Option<String>,
    threads: u32,
}

impl WhisperTranscriber {
    /// Create a new transcriber with the configured model
    pub fn new(settings: &Settings) -> Result<Self> {
        let model_path = settings.model_path();

        if !model_path.exists() {
            return Err(MtgmapError::Transcription(format!(
                "Whisper model not found at {}. Download ggml-{}.bin into the models \
                 directory first.",
                model_path.display(),
                settings.whisper.model
            )));
        }

        let model_path = model_path.to_str().ok_or_else(|| {
            MtgmapError::Transcription(format!(
                "Model path is not valid UTF-8: {}",
                model_path.display()
            ))
        })?;

        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .map_err(|e| {
                MtgmapError::Transcription(format!("Failed to load Whisper model: {}", e))
            })?;

        Ok(Self {
            ctx,
            language: configured_language(&settings.whisper.language),
            threads: settings.whisper.threads,
        })
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let samples = decode_samples(audio_path)?;

        tracing::debug!("Running Whisper inference on {} samples", samples.len());

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        // `None` selects Whisper's language auto-detection.
        params.set_language(self.language.as_deref());

        if self.threads > 0 {
            params.set_n_threads(self.threads as i32);
        }

        let mut state = self.ctx.create_state().map_err(|e| {
            MtgmapError::Transcription(format!("Failed to create Whisper state: {}", e))
        })?;
        state
            .full(params, &samples)
            .map_err(|e| MtgmapError::Transcription(format!("Whisper inference failed: {}", e)))?;

        let num_segments = state.full_n_segments().map_err(|e| {
            MtgmapError::Transcription(format!("Failed to get segment count: {}", e))
        })?;

        // Segment text is concatenated exactly as Whisper emitted it, in
        // order, with no separator.
        let mut text = String::new();
        for i in 0..num_segments {
            let segment = state.full_get_segment_text(i).map_err(|e| {
                MtgmapError::Transcription(format!("Failed to get segment text: {}", e))
            })?;
            text.push_str(&segment);
        }

        Ok(text)
    }
}

/// Map the configured language to Whisper's parameter. An empty or blank
/// setting selects auto-detection.
fn configured_language(language: &str) -> Option<String> {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn empty_language_selects_auto_detection() {
        assert_eq!(configured_language(""), None);
        assert_eq!(configured_language("  "), None);
        assert_eq!(configured_language("ja"), Some("ja".to_string()));
        assert_eq!(configured_language(" en "), Some("en".to_string()));
    }

    #[test]
    fn missing_model_reports_download_hint() {
        let mut settings = Settings::default();
        settings.whisper.models_dir = PathBuf::from("/nonexistent/models");

        let err = match WhisperTranscriber::new(&settings) {
            Ok(_) => panic!("expected transcriber creation to fail"),
            Err(e) => e,
        };

        match err {
            MtgmapError::Transcription(msg) => {
                assert!(msg.contains("ggml-medium-q8_0.bin"));
            }
            other => panic!("expected a transcription error, got: {:?}", other),
        }
    }
}
