//! OpenAI-compatible client configuration.

use crate::config::ExtractionSettings;
use async_openai::{config::OpenAIConfig, Client};

/// Create a completion client for a locally reachable OpenAI-compatible server.
///
/// No request timeout is set: local model servers can take arbitrarily long
/// to produce a completion, and the pipeline makes exactly one attempt.
pub fn create_client(settings: &ExtractionSettings) -> Client<OpenAIConfig> {
    let config = OpenAIConfig::new()
        .with_api_base(settings.base_url.as_str())
        .with_api_key(settings.api_key.as_str());

    Client::with_config(config)
}
