//! Google Books volumes client.

use super::{BookCatalog, BookRecord, VolumesResponse};
use crate::config::BookSearchSettings;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Book catalog backed by the Google Books volumes API.
pub struct GoogleBooksClient {
    http: reqwest::Client,
    endpoint: String,
    max_results: u32,
    language: String,
}

impl GoogleBooksClient {
    pub fn new(settings: &BookSearchSettings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.timeout_seconds);
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            max_results: settings.max_results,
            language: settings.language.clone(),
        })
    }

    async fn search_inner(&self, topic: &str) -> Result<Vec<BookRecord>> {
        let max_results = self.max_results.to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", topic),
                ("maxResults", max_results.as_str()),
                ("lang", self.language.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<VolumesResponse>()
            .await?;

        let records = response
            .items
            .into_iter()
            .map(|volume| volume.volume_info.into())
            .collect();

        Ok(records)
    }
}

#[async_trait]
impl BookCatalog for GoogleBooksClient {
    #[instrument(skip(self), fields(topic = %topic))]
    async fn search(&self, topic: &str) -> Vec<BookRecord> {
        match self.search_inner(topic).await {
            Ok(records) => {
                debug!("Found {} books", records.len());
                records
            }
            Err(e) => {
                warn!("Book search degraded to empty: {}", e);
                println!("Erro ao buscar livros para o tópico '{topic}': {e}");
                Vec::new()
            }
        }
    }
}
