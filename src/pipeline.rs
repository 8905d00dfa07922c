//! Pipeline orchestrator for Estante.
//!
//! Drives the run end to end: transcription, topic extraction, per-topic
//! book search, report writing. Stages execute strictly in sequence and
//! each external call is attempted exactly once.

use crate::books::{BookCatalog, BookRecord, GoogleBooksClient};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::Result;
use crate::report::{Report, ReportWriter};
use crate::topics::{ChatTopicExtractor, Topic, TopicExtractor};
use crate::transcription::{TranscriptionStage, Transcriber, WhisperTranscriber};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The main orchestrator for the Estante pipeline.
pub struct Pipeline {
    transcription: TranscriptionStage,
    extractor: Arc<dyn TopicExtractor>,
    catalog: Arc<dyn BookCatalog>,
    writer: ReportWriter,
}

impl Pipeline {
    /// Create a pipeline with the default component implementations.
    pub fn new(settings: &Settings) -> Result<Self> {
        let transcriber: Arc<dyn Transcriber> = Arc::new(WhisperTranscriber::new(
            &settings.model_path(),
            &settings.transcription.language,
            settings.transcription.threads,
        ));

        let extractor: Arc<dyn TopicExtractor> =
            Arc::new(ChatTopicExtractor::new(&settings.extraction));

        let catalog: Arc<dyn BookCatalog> = Arc::new(GoogleBooksClient::new(&settings.books)?);

        Ok(Self::with_components(settings, transcriber, extractor, catalog))
    }

    /// Create a pipeline with custom components.
    pub fn with_components(
        settings: &Settings,
        transcriber: Arc<dyn Transcriber>,
        extractor: Arc<dyn TopicExtractor>,
        catalog: Arc<dyn BookCatalog>,
    ) -> Self {
        Self {
            transcription: TranscriptionStage::new(
                transcriber,
                &settings.transcription.fallback_text,
            ),
            extractor,
            catalog,
            writer: ReportWriter::new(&settings.report_dir(), &settings.general.report_file),
        }
    }

    /// Run the full pipeline against one audio file.
    #[instrument(skip(self), fields(audio = %audio_path.display()))]
    pub async fn run(&self, audio_path: &Path) -> Result<RunOutcome> {
        info!("Transcribing {}", audio_path.display());
        let transcript = self.transcription.transcribe(audio_path).await?;
        Output::stage(1, 3, &format!("Transcrição concluída:\n\"{transcript}\""));

        let topics = self.extractor.extract_topics(&transcript).await;
        Output::stage(2, 3, &format!("Tópicos extraídos pela IA: {}", format_topics(&topics)));

        if topics.is_empty() {
            warn!("No topics extracted, skipping book search and report");
            println!("\nNenhum tópico foi extraído. Processo encerrado.");
            return Ok(RunOutcome {
                transcript,
                topics,
                recommendations: BTreeMap::new(),
                report_path: None,
            });
        }

        Output::stage(3, 3, "Buscando livros recomendados...");
        let mut recommendations: BTreeMap<String, Vec<BookRecord>> = BTreeMap::new();

        for topic in &topics {
            let Some(label) = topic.label() else {
                continue;
            };

            println!("  - Buscando por: '{label}'");
            let books = self.catalog.search(&label).await;
            if !books.is_empty() {
                recommendations.insert(label, books);
            }
        }

        let report = Report {
            transcript: transcript.clone(),
            topics: topics.clone(),
            recommendations: recommendations.clone(),
        };

        let report_path = self.writer.write(&report)?;
        println!(
            "\n--- Processo finalizado. Relatório salvo em '{}' ---",
            report_path.display()
        );

        Ok(RunOutcome {
            transcript,
            topics,
            recommendations,
            report_path: Some(report_path),
        })
    }
}

fn format_topics(topics: &[Topic]) -> String {
    serde_json::to_string(topics).unwrap_or_else(|_| format!("{topics:?}"))
}

/// Result of a pipeline run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The transcript used for extraction.
    pub transcript: String,
    /// Raw topic entries, in extraction order.
    pub topics: Vec<Topic>,
    /// Topics that yielded at least one recommendation.
    pub recommendations: BTreeMap<String, Vec<BookRecord>>,
    /// Path of the written report; `None` when no topics were extracted.
    pub report_path: Option<std::path::PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::HashMap;

    struct FixedTranscriber(String);

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        async fn transcribe(&self, _audio_path: &Path) -> crate::error::Result<String> {
            Ok(self.0.clone())
        }
    }

    struct FixedExtractor(Vec<Topic>);

    #[async_trait]
    impl TopicExtractor for FixedExtractor {
        async fn extract_topics(&self, _transcript: &str) -> Vec<Topic> {
            self.0.clone()
        }
    }

    struct MapCatalog(HashMap<String, Vec<BookRecord>>);

    #[async_trait]
    impl BookCatalog for MapCatalog {
        async fn search(&self, topic: &str) -> Vec<BookRecord> {
            self.0.get(topic).cloned().unwrap_or_default()
        }
    }

    fn book(title: &str) -> BookRecord {
        BookRecord {
            title: Some(title.to_string()),
            authors: vec!["N/A".to_string()],
            link: None,
        }
    }

    fn test_settings(report_dir: &Path) -> Settings {
        let mut settings = Settings::default();
        settings.general.report_dir = report_dir.to_string_lossy().to_string();
        settings
    }

    #[tokio::test]
    async fn test_missing_audio_with_partial_matches() {
        // Scenario: audio missing (fallback transcript), two topics, only
        // one of them yields catalog results.
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(&dir.path().join("relatorios"));

        let mut catalog = HashMap::new();
        catalog.insert("grafos".to_string(), vec![book("Teoria dos Grafos")]);

        let pipeline = Pipeline::with_components(
            &settings,
            Arc::new(FixedTranscriber("unused".into())),
            Arc::new(FixedExtractor(vec![
                Topic::Text("grafos".into()),
                Topic::Text("algoritmos de busca".into()),
            ])),
            Arc::new(MapCatalog(catalog)),
        );

        let outcome = pipeline
            .run(Path::new("/nonexistent/audio.opus"))
            .await
            .unwrap();

        assert_eq!(outcome.transcript, settings.transcription.fallback_text);
        assert_eq!(outcome.topics.len(), 2);
        assert_eq!(outcome.recommendations.len(), 1);

        let report_path = outcome.report_path.unwrap();
        let value: Value =
            serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();

        let recs = value["recomendacoes_livros"].as_object().unwrap();
        assert_eq!(recs.len(), 1);
        assert!(recs.contains_key("grafos"));
        // Both raw topics still appear in the report.
        assert_eq!(value["topicos_detectados_pela_ia"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_no_topics_writes_no_report() {
        let dir = tempfile::tempdir().unwrap();
        let report_dir = dir.path().join("relatorios");
        let settings = test_settings(&report_dir);

        let pipeline = Pipeline::with_components(
            &settings,
            Arc::new(FixedTranscriber("texto sem tópicos".into())),
            Arc::new(FixedExtractor(Vec::new())),
            Arc::new(MapCatalog(HashMap::new())),
        );

        let dummy = dir.path().join("audio.opus");
        std::fs::write(&dummy, b"fake audio").unwrap();

        let outcome = pipeline.run(&dummy).await.unwrap();
        assert!(outcome.report_path.is_none());
        assert!(outcome.recommendations.is_empty());
        assert!(!report_dir.exists());
    }

    #[tokio::test]
    async fn test_unlabeled_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(&dir.path().join("relatorios"));

        let mut catalog = HashMap::new();
        catalog.insert("grafos".to_string(), vec![book("Grafos")]);
        // An empty-label search would match this; it must never be issued.
        catalog.insert("".to_string(), vec![book("fantasma")]);

        let record = match serde_json::json!({"topic": "grafos"}) {
            Value::Object(map) => Topic::Record(map),
            _ => unreachable!(),
        };
        let empty_record = match serde_json::json!({"topic": null}) {
            Value::Object(map) => Topic::Record(map),
            _ => unreachable!(),
        };

        let pipeline = Pipeline::with_components(
            &settings,
            Arc::new(FixedTranscriber("texto".into())),
            Arc::new(FixedExtractor(vec![
                record,
                empty_record,
                Topic::Text("   ".into()),
            ])),
            Arc::new(MapCatalog(catalog)),
        );

        let dummy = dir.path().join("audio.opus");
        std::fs::write(&dummy, b"fake audio").unwrap();

        let outcome = pipeline.run(&dummy).await.unwrap();
        assert_eq!(outcome.recommendations.len(), 1);
        assert!(outcome.recommendations.contains_key("grafos"));
        // Raw entries are preserved even when skipped for search.
        assert_eq!(outcome.topics.len(), 3);
    }

    #[tokio::test]
    async fn test_identical_runs_produce_identical_reports() {
        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(&dir.path().join("relatorios"));

        let mut catalog = HashMap::new();
        catalog.insert("grafos".to_string(), vec![book("Grafos")]);

        let pipeline = Pipeline::with_components(
            &settings,
            Arc::new(FixedTranscriber("texto".into())),
            Arc::new(FixedExtractor(vec![Topic::Text("grafos".into())])),
            Arc::new(MapCatalog(catalog)),
        );

        let dummy = dir.path().join("audio.opus");
        std::fs::write(&dummy, b"fake audio").unwrap();

        let first_path = pipeline.run(&dummy).await.unwrap().report_path.unwrap();
        let first = std::fs::read(&first_path).unwrap();
        let second_path = pipeline.run(&dummy).await.unwrap().report_path.unwrap();
        let second = std::fs::read(&second_path).unwrap();

        assert_eq!(first, second);
    }
}
