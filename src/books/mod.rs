//! Book catalog search.

mod google;

pub use google::GoogleBooksClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A recommended book, in report wire shape.
///
/// Missing title/link stay absent (serialized as `null`); a missing author
/// list defaults to a single `"N/A"` placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookRecord {
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "autores")]
    pub authors: Vec<String>,
    #[serde(rename = "link")]
    pub link: Option<String>,
}

/// Catalog response: a JSON object with an `items` array of volumes.
#[derive(Debug, Deserialize)]
pub(crate) struct VolumesResponse {
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Volume {
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub info_link: Option<String>,
}

impl From<VolumeInfo> for BookRecord {
    fn from(info: VolumeInfo) -> Self {
        Self {
            title: info.title,
            authors: info.authors.unwrap_or_else(|| vec!["N/A".to_string()]),
            link: info.info_link,
        }
    }
}

/// Trait for book catalog backends.
///
/// Query failure is non-fatal by contract: implementations log the cause
/// and return an empty list for that topic, without affecting other topics.
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// Search the catalog for books matching a topic label. Never fails;
    /// degraded queries yield an empty list.
    async fn search(&self, topic: &str) -> Vec<BookRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_authors_default_to_placeholder() {
        let response: VolumesResponse = serde_json::from_str(
            r#"{"items": [{"volumeInfo": {"title": "Grafos", "infoLink": "http://x"}}]}"#,
        )
        .unwrap();

        let record: BookRecord = response.items.into_iter().next().unwrap().volume_info.into();
        assert_eq!(record.title.as_deref(), Some("Grafos"));
        assert_eq!(record.authors, vec!["N/A".to_string()]);
        assert_eq!(record.link.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_missing_items_yields_no_records() {
        let response: VolumesResponse = serde_json::from_str(r#"{"kind": "books#volumes"}"#).unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_missing_title_and_link_stay_absent() {
        let response: VolumesResponse = serde_json::from_str(
            r#"{"items": [{"volumeInfo": {"authors": ["Fulano", "Beltrana"]}}]}"#,
        )
        .unwrap();

        let record: BookRecord = response.items.into_iter().next().unwrap().volume_info.into();
        assert_eq!(record.title, None);
        assert_eq!(record.link, None);
        assert_eq!(record.authors.len(), 2);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["titulo"].is_null());
        assert!(json["link"].is_null());
        assert_eq!(json["autores"][0], "Fulano");
    }

    #[test]
    fn test_empty_volume_info() {
        let response: VolumesResponse =
            serde_json::from_str(r#"{"items": [{}]}"#).unwrap();

        let record: BookRecord = response.items.into_iter().next().unwrap().volume_info.into();
        assert_eq!(record.title, None);
        assert_eq!(record.authors, vec!["N/A".to_string()]);
    }
}
