//! Recommendation report assembly and persistence.

use crate::books::BookRecord;
use crate::error::Result;
use crate::topics::Topic;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// The consolidated report written at the end of a run.
#[derive(Debug, Serialize)]
pub struct Report {
    /// The transcript, verbatim.
    #[serde(rename = "texto_original")]
    pub transcript: String,
    /// Every raw topic entry, in extraction order, including entries that
    /// produced no label or no recommendations.
    #[serde(rename = "topicos_detectados_pela_ia")]
    pub topics: Vec<Topic>,
    /// Topic label to recommended books. Only topics with at least one
    /// result appear here.
    #[serde(rename = "recomendacoes_livros")]
    pub recommendations: BTreeMap<String, Vec<BookRecord>>,
}

/// Writes reports as indented UTF-8 JSON, creating the destination
/// directory on demand.
pub struct ReportWriter {
    dir: PathBuf,
    file_name: String,
}

impl ReportWriter {
    pub fn new(dir: &Path, file_name: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            file_name: file_name.to_string(),
        }
    }

    /// Serialize and persist the report, returning its path.
    #[instrument(skip(self, report))]
    pub fn write(&self, report: &Report) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        // 4-space indent; serde_json leaves non-ASCII unescaped.
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        report.serialize(&mut serializer)?;

        let path = self.dir.join(&self.file_name);
        std::fs::write(&path, &buf)?;

        info!("Report written to {}", path.display());
        Ok(path)
    }
}
