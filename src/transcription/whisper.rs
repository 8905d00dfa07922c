//! Local Whisper transcription implementation.

use super::Transcriber;
use crate::audio::load_samples;
use crate::error::{EstanteError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Whisper-based transcriber running inference on a local ggml model.
pub struct WhisperTranscriber {
    model_path: PathBuf,
    language: String,
    threads: i32,
}

impl WhisperTranscriber {
    /// Create a transcriber for the given model file.
    ///
    /// The model is loaded lazily at transcription time, once per run.
    pub fn new(model_path: &Path, language: &str, threads: i32) -> Self {
        Self {
            model_path: model_path.to_path_buf(),
            language: language.to_string(),
            threads,
        }
    }

    fn load_context(&self) -> Result<WhisperContext> {
        if !self.model_path.exists() {
            return Err(EstanteError::Transcription(format!(
                "Whisper model not found at {}",
                self.model_path.display()
            )));
        }

        let path = self.model_path.to_str().ok_or_else(|| {
            EstanteError::Transcription("Model path is not valid UTF-8".to_string())
        })?;

        let ctx = WhisperContext::new_with_params(path, WhisperContextParameters::default())
            .map_err(|e| EstanteError::Transcription(format!("Failed to load model: {e}")))?;

        info!("Whisper model loaded from {}", self.model_path.display());
        Ok(ctx)
    }

    fn run_inference(&self, ctx: &WhisperContext, samples: &[f32]) -> Result<String> {
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(self.language.as_str()));
        params.set_n_threads(self.threads);
        params.set_print_progress(false);
        params.set_print_special(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        let mut state = ctx
            .create_state()
            .map_err(|e| EstanteError::Transcription(format!("Failed to create state: {e}")))?;

        state
            .full(params, samples)
            .map_err(|e| EstanteError::Transcription(format!("Inference failed: {e}")))?;

        let num_segments = state.full_n_segments();
        let mut text = String::new();

        for i in 0..num_segments {
            let segment = state.get_segment(i).ok_or_else(|| {
                EstanteError::Transcription(format!("Failed to get segment {i}"))
            })?;
            text.push_str(&segment.to_string());
            text.push(' ');
        }

        debug!("Transcribed {} segments", num_segments);
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let samples = load_samples(audio_path).await?;

        if samples.is_empty() {
            return Err(EstanteError::Transcription(
                "Audio file decoded to zero samples".to_string(),
            ));
        }

        let ctx = self.load_context()?;
        self.run_inference(&ctx, &samples)
    }
}
