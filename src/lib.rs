//! Estante - Spoken study notes to book recommendations
//!
//! A local-first CLI that turns an audio recording of study interests into
//! a structured book-recommendation report.
//!
//! "Estante" is Portuguese for "bookshelf."
//!
//! # Overview
//!
//! One run moves through four stages, strictly in sequence:
//!
//! 1. Transcribe the audio with a local Whisper model (or fall back to a
//!    configured sample text when the file is missing)
//! 2. Ask a locally reachable language model for the study topics
//! 3. Search a public book catalog for each topic
//! 4. Write a consolidated JSON report
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `audio` - Audio decoding to Whisper's input format
//! - `transcription` - Speech-to-text transcription and fallback policy
//! - `topics` - Topic extraction from completion replies
//! - `books` - Book catalog search
//! - `report` - Report assembly and persistence
//! - `pipeline` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use estante::config::Settings;
//! use estante::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(&settings)?;
//!
//!     let outcome = pipeline.run(&settings.audio_path()).await?;
//!     if let Some(path) = outcome.report_path {
//!         println!("Report written to {}", path.display());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod books;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod pipeline;
pub mod report;
pub mod topics;
pub mod transcription;

pub use error::{EstanteError, Result};
