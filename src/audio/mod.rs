//! Audio decoding utilities.
//!
//! Whisper expects 16 kHz mono f32 samples. Input files can be in any
//! format ffmpeg understands (opus, mp3, m4a, ...), so decoding shells
//! out to ffmpeg and the resulting WAV is read back with hound.

use crate::error::{EstanteError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Sample rate required by the Whisper model.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Decode an audio file into 16 kHz mono f32 samples.
#[instrument(fields(path = %path.display()))]
pub async fn load_samples(path: &Path) -> Result<Vec<f32>> {
    let temp_dir = tempfile::tempdir()?;
    let wav_path = temp_dir.path().join("decoded.wav");

    let result = Command::new("ffmpeg")
        .arg("-i").arg(path)
        .arg("-ar").arg(WHISPER_SAMPLE_RATE.to_string())
        .arg("-ac").arg("1")
        .arg("-sample_fmt").arg("s16")
        .arg("-y")
        .arg(&wav_path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await;

    let output = match result {
        Ok(o) => o,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(EstanteError::ToolNotFound("ffmpeg".into()));
        }
        Err(e) => {
            return Err(EstanteError::Audio(format!("ffmpeg execution failed: {e}")));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(EstanteError::Audio(format!("ffmpeg failed: {stderr}")));
    }

    let samples = read_wav_samples(&wav_path)?;
    debug!("Decoded {} samples", samples.len());
    Ok(samples)
}

/// Read f32 samples from a 16 kHz mono 16-bit WAV file.
pub fn read_wav_samples(wav_path: &Path) -> Result<Vec<f32>> {
    let mut reader = hound::WavReader::open(wav_path)
        .map_err(|e| EstanteError::Audio(format!("Failed to open WAV: {e}")))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(EstanteError::Audio(format!(
            "Expected mono audio, found {} channels",
            spec.channels
        )));
    }

    if spec.sample_rate != WHISPER_SAMPLE_RATE {
        return Err(EstanteError::Audio(format!(
            "Expected {} Hz sample rate, found {} Hz",
            WHISPER_SAMPLE_RATE, spec.sample_rate
        )));
    }

    if spec.bits_per_sample != 16 || spec.sample_format != hound::SampleFormat::Int {
        return Err(EstanteError::Audio(format!(
            "Expected 16-bit integer samples, found {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    reader
        .samples::<i16>()
        .map(|sample| {
            sample
                .map(|s| s as f32 / i16::MAX as f32)
                .map_err(|e| EstanteError::Audio(format!("Failed to read sample: {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_wav(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_read_wav_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.wav");
        write_test_wav(&path, WHISPER_SAMPLE_RATE, 1, &[0, i16::MAX, i16::MIN + 1]);

        let samples = read_wav_samples(&path).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 1.0).abs() < f32::EPSILON);
        assert!((samples[2] + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_read_wav_rejects_wrong_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_rate.wav");
        write_test_wav(&path, 44_100, 1, &[0]);

        assert!(read_wav_samples(&path).is_err());
    }

    #[test]
    fn test_read_wav_rejects_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_test_wav(&path, WHISPER_SAMPLE_RATE, 2, &[0, 0]);

        assert!(read_wav_samples(&path).is_err());
    }

    #[test]
    fn test_read_wav_missing_file() {
        assert!(read_wav_samples(Path::new("/nonexistent/audio.wav")).is_err());
    }
}
