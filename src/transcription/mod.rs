//! Speech-to-text transcription.
//!
//! The [`Transcriber`] trait hides the model backend; [`WhisperTranscriber`]
//! runs local Whisper inference. [`TranscriptionStage`] adds the
//! missing-input policy: if the audio file does not exist, a configured
//! sample transcript is returned so the rest of the pipeline still has
//! text to work with. Inference failures on an existing file propagate —
//! there is no usable transcript without the model.

mod whisper;

pub use whisper::WhisperTranscriber;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Trait for transcription backends.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file and return the recognized text.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Transcription stage with the missing-input fallback policy.
pub struct TranscriptionStage {
    transcriber: Arc<dyn Transcriber>,
    fallback_text: String,
}

impl TranscriptionStage {
    pub fn new(transcriber: Arc<dyn Transcriber>, fallback_text: &str) -> Self {
        Self {
            transcriber,
            fallback_text: fallback_text.to_string(),
        }
    }

    /// Transcribe `audio_path`, or return the fallback text when it is absent.
    pub async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        if !audio_path.exists() {
            warn!("Audio file not found at {}, using fallback text", audio_path.display());
            println!(
                "Erro: Arquivo de áudio não encontrado em '{}'",
                audio_path.display()
            );
            return Ok(self.fallback_text.clone());
        }

        self.transcriber.transcribe(audio_path).await
    }
}
