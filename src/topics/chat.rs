//! Chat-completion topic extractor.

use super::{parse_topics, Topic, TopicExtractor};
use crate::config::ExtractionSettings;
use crate::error::{EstanteError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

const SYSTEM_PROMPT: &str = "Você é um especialista em educação. Sua tarefa é analisar o texto \
                             e extrair os principais tópicos técnicos. Retorne a resposta \
                             como uma lista de strings em formato JSON.";

/// Topic extractor backed by an OpenAI-compatible chat endpoint.
pub struct ChatTopicExtractor {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl ChatTopicExtractor {
    pub fn new(settings: &ExtractionSettings) -> Self {
        Self {
            client: create_client(settings),
            model: settings.model.clone(),
            temperature: settings.temperature,
        }
    }

    /// Issue the completion request and return the raw reply text.
    async fn request_completion(&self, transcript: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_PROMPT)
                .build()
                .map_err(|e| EstanteError::TopicExtraction(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!(
                    "Analise o texto a seguir e extraia os tópicos de estudo em formato \
                     de lista JSON: \"{transcript}\""
                ))
                .build()
                .map_err(|e| EstanteError::TopicExtraction(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| EstanteError::TopicExtraction(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| EstanteError::Completion(format!("Completion request failed: {e}")))?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| EstanteError::Completion("Empty completion response".to_string()))
    }
}

#[async_trait]
impl TopicExtractor for ChatTopicExtractor {
    #[instrument(skip(self, transcript))]
    async fn extract_topics(&self, transcript: &str) -> Vec<Topic> {
        println!("Conectando ao servidor de IA para extrair tópicos...");

        let raw = match self.request_completion(transcript).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Topic extraction degraded to empty: {}", e);
                println!("ERRO DE CONEXÃO: Não foi possível obter resposta do servidor de IA.");
                return Vec::new();
            }
        };

        debug!("Raw completion: {}", raw);
        println!("Texto recebido da IA: {raw}");

        match parse_topics(&raw) {
            Some(topics) => topics,
            None => {
                warn!("No parseable JSON array in completion reply");
                println!("ERRO: JSON não encontrado na resposta da IA.");
                Vec::new()
            }
        }
    }
}
