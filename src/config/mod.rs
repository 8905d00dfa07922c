//! Configuration module for Estante.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    BookSearchSettings, ExtractionSettings, GeneralSettings, Settings, TranscriptionSettings,
};
