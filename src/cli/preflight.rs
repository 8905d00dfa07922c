//! Pre-flight checks before expensive operations.
//!
//! Validates that transcription prerequisites are available before
//! starting a run that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{EstanteError, Result};
use std::path::Path;
use std::process::Command;

/// Run pre-flight checks for a pipeline run.
///
/// Transcription prerequisites (ffmpeg, Whisper model) are only required
/// when the audio file actually exists; a missing file takes the fallback
/// path and never touches the model.
pub fn check(settings: &Settings, audio_path: &Path) -> Result<()> {
    if audio_path.exists() {
        check_tool("ffmpeg")?;
        check_model(settings)?;
    }
    Ok(())
}

/// Check that the configured Whisper model file is present.
fn check_model(settings: &Settings) -> Result<()> {
    let model_path = settings.model_path();
    if model_path.exists() {
        Ok(())
    } else {
        Err(EstanteError::Config(format!(
            "Whisper model not found at {}. Download a ggml model (e.g. ggml-base.bin) \
             and set transcription.model_path.",
            model_path.display()
        )))
    }
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    // ffmpeg/ffprobe use -version (single dash), others use --version
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(EstanteError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(EstanteError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(EstanteError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_audio_skips_prerequisites() {
        // With no audio file, the fallback path needs neither ffmpeg nor
        // a model, so pre-flight must pass.
        let settings = Settings::default();
        assert!(check(&settings, Path::new("/nonexistent/audio.opus")).is_ok());
    }

    #[test]
    fn test_missing_tool_is_reported() {
        let err = check_tool("definitely-not-a-real-tool-xyz").unwrap_err();
        assert!(matches!(err, EstanteError::ToolNotFound(_)));
    }
}
