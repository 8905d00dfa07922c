//! Error types for Estante.

use thiserror::Error;

/// Library-level error type for Estante operations.
#[derive(Error, Debug)]
pub enum EstanteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio decoding failed: {0}")]
    Audio(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Topic extraction failed: {0}")]
    TopicExtraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion API error: {0}")]
    Completion(String),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),
}

/// Result type alias for Estante operations.
pub type Result<T> = std::result::Result<T, EstanteError>;
