//! Configuration settings for Estante.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcription: TranscriptionSettings,
    pub extraction: ExtractionSettings,
    pub books: BookSearchSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Default audio file to process when none is given on the command line.
    pub audio_path: String,
    /// Directory where reports are written.
    pub report_dir: String,
    /// File name of the recommendation report.
    pub report_file: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            audio_path: "Audios/matematica.opus".to_string(),
            report_dir: "relatorios".to_string(),
            report_file: "relatorio_recomendacoes.json".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Local speech-recognition settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Path to the ggml Whisper model file.
    pub model_path: String,
    /// Language hint passed to the model.
    pub language: String,
    /// Number of threads for inference.
    pub threads: i32,
    /// Sample transcript used when the audio file is missing.
    pub fallback_text: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            model_path: "models/ggml-base.bin".to_string(),
            language: "pt".to_string(),
            threads: 4,
            fallback_text: "Eu quero aprender sobre programação orientada a objetos, \
                            talvez em Python. Também me interesso por algoritmos de busca \
                            e a estrutura de dados de grafos."
                .to_string(),
        }
    }
}

/// Topic-extraction (chat completion) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Base URL of the OpenAI-compatible completion endpoint.
    pub base_url: String,
    /// API key (local servers usually accept any placeholder).
    pub api_key: String,
    /// Model identifier to request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1234/v1".to_string(),
            api_key: "not-needed".to_string(),
            model: "phi-3-mini-4k-instruct".to_string(),
            temperature: 0.7,
        }
    }
}

/// Book catalog search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookSearchSettings {
    /// Volumes endpoint of the catalog API.
    pub endpoint: String,
    /// Maximum results requested per topic.
    pub max_results: u32,
    /// Language filter applied to every query.
    pub language: String,
    /// Connect/read timeout for catalog requests, in seconds.
    pub timeout_seconds: u64,
}

impl Default for BookSearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/books/v1/volumes".to_string(),
            max_results: 3,
            language: "pt".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::EstanteError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("estante")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded default audio path.
    pub fn audio_path(&self) -> PathBuf {
        Self::expand_path(&self.general.audio_path)
    }

    /// Get the expanded report directory.
    pub fn report_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.report_dir)
    }

    /// Get the expanded Whisper model path.
    pub fn model_path(&self) -> PathBuf {
        Self::expand_path(&self.transcription.model_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.general.report_file, "relatorio_recomendacoes.json");
        assert_eq!(settings.books.max_results, 3);
        assert_eq!(settings.books.language, "pt");
        assert_eq!(settings.extraction.base_url, "http://localhost:1234/v1");
        assert!(settings.transcription.fallback_text.contains("grafos"));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [books]
            max_results = 5
            "#,
        )
        .unwrap();
        assert_eq!(settings.books.max_results, 5);
        assert_eq!(settings.books.language, "pt");
        assert_eq!(settings.extraction.model, "phi-3-mini-4k-instruct");
    }

    #[test]
    fn test_roundtrip_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.general.report_dir = "saida".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.general.report_dir, "saida");
    }
}
