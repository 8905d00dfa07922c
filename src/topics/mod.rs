//! Study-topic extraction.
//!
//! The language model is asked for a JSON array of topics, but its reply
//! is free text and may wrap the array in commentary. Extraction is
//! therefore lenient: the substring between the first `[` and the last
//! `]` is parsed, and any failure yields an empty topic list instead of
//! aborting the run.

mod chat;

pub use chat::ChatTopicExtractor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A topic entry as returned by the model.
///
/// Models are inconsistent about shape: sometimes a bare string, sometimes
/// an object like `{"topic": "grafos"}`. Both variants are preserved
/// verbatim in the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Topic {
    Text(String),
    Record(serde_json::Map<String, Value>),
}

impl Topic {
    /// Derive the canonical label for this topic, if it has one.
    ///
    /// Record entries use their `topic` field when it yields a non-empty
    /// label, otherwise the first value that does. Entries with no usable
    /// label return `None` and are skipped by the caller.
    pub fn label(&self) -> Option<String> {
        match self {
            Topic::Text(text) => non_empty(text.trim()),
            Topic::Record(fields) => fields
                .get("topic")
                .and_then(value_label)
                .or_else(|| fields.values().find_map(value_label)),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Render a JSON value as a topic label. Strings are used as-is, other
/// scalars via their JSON form; null, arrays and objects make no sense
/// as a catalog query and yield nothing.
fn value_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s.trim()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Locate the JSON array embedded in a free-text completion.
///
/// Returns the substring from the first `[` through the last `]`, or
/// `None` when no such span exists.
pub fn extract_json_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end > start {
        Some(&raw[start..=end])
    } else {
        None
    }
}

/// Trait for topic-extraction backends.
///
/// Extraction failure is non-fatal by contract: implementations log the
/// cause and return an empty list rather than an error.
#[async_trait]
pub trait TopicExtractor: Send + Sync {
    /// Extract study topics from a transcript. Never fails; degraded runs
    /// yield an empty list.
    async fn extract_topics(&self, transcript: &str) -> Vec<Topic>;
}

/// Parse the topic array out of a raw completion reply.
///
/// Used by extractor implementations once they have the model's text.
pub fn parse_topics(raw: &str) -> Option<Vec<Topic>> {
    let span = extract_json_array(raw)?;
    serde_json::from_str(span).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Topic {
        match value {
            Value::Object(map) => Topic::Record(map),
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_extract_json_array_with_commentary() {
        let raw = r#"Claro! Aqui estão os tópicos: [ "a", "b" ] Espero ter ajudado."#;
        assert_eq!(extract_json_array(raw), Some(r#"[ "a", "b" ]"#));
    }

    #[test]
    fn test_extract_json_array_without_brackets() {
        assert_eq!(extract_json_array("nenhum JSON aqui"), None);
    }

    #[test]
    fn test_extract_json_array_reversed_brackets() {
        assert_eq!(extract_json_array("] antes de ["), None);
    }

    #[test]
    fn test_parse_topics_with_prefix_and_suffix() {
        let topics = parse_topics(r#"prefix [ "a", "b" ] suffix"#).unwrap();
        assert_eq!(
            topics,
            vec![Topic::Text("a".into()), Topic::Text("b".into())]
        );
    }

    #[test]
    fn test_parse_topics_invalid_json() {
        assert!(parse_topics("resposta [não é json] fim").is_none());
    }

    #[test]
    fn test_parse_topics_heterogeneous_shapes() {
        let topics = parse_topics(r#"[ "grafos", {"topic": "algoritmos"} ]"#).unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].label().as_deref(), Some("grafos"));
        assert_eq!(topics[1].label().as_deref(), Some("algoritmos"));
    }

    #[test]
    fn test_label_from_string() {
        assert_eq!(
            Topic::Text("  grafos  ".into()).label().as_deref(),
            Some("grafos")
        );
        assert_eq!(Topic::Text("   ".into()).label(), None);
    }

    #[test]
    fn test_label_prefers_topic_field() {
        let topic = record(json!({"nome": "outro", "topic": "grafos"}));
        assert_eq!(topic.label().as_deref(), Some("grafos"));
    }

    #[test]
    fn test_label_falls_back_to_first_usable_value() {
        let topic = record(json!({"assunto": "estruturas de dados"}));
        assert_eq!(topic.label().as_deref(), Some("estruturas de dados"));
    }

    #[test]
    fn test_label_skips_empty_topic_field() {
        let topic = record(json!({"topic": "", "assunto": "grafos"}));
        assert_eq!(topic.label().as_deref(), Some("grafos"));
    }

    #[test]
    fn test_label_empty_record_is_skipped() {
        let topic = record(json!({}));
        assert_eq!(topic.label(), None);

        let topic = record(json!({"topic": null, "extra": []}));
        assert_eq!(topic.label(), None);
    }

    #[test]
    fn test_topic_roundtrips_verbatim() {
        let raw = r#"[{"topic":"grafos","nivel":2},"busca"]"#;
        let topics: Vec<Topic> = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&topics).unwrap(), raw);
    }
}
