use std::time::Duration;

use async_openai::config::OpenAIConfig;
use async_openai::Client;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("No content in model response")]
    EmptyResponse,

    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),
}

/// One chat completion call: a system message followed by a user message.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub model: String,
    pub temperature: f32,
}

impl GenerationRequest {
    /// Chat completion body: the system instruction followed by the prompt.
    fn chat_body(&self) -> serde_json::Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": self.system_instruction },
                { "role": "user", "content": self.prompt },
            ],
        })
    }
}

/// Sends a prompt to a language model and returns its raw text reply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerationService: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl ChatCompletion {
    fn into_text(self) -> Result<String, GenerationError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

pub struct OpenAiQuestionGenerator {
    client: Client<OpenAIConfig>,
}

impl OpenAiQuestionGenerator {
    pub fn new(config: &Config) -> Self {
        let mut openai_config =
            OpenAIConfig::new().with_api_key(config.openai_api_key.expose_secret());
        if let Some(base) = &config.openai_api_base {
            openai_config = openai_config.with_api_base(base);
        }

        Self {
            client: Client::with_config(openai_config),
        }
    }
}

#[async_trait]
impl QuestionGenerationService for OpenAiQuestionGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = request.chat_body();

        log::debug!("Sending chat completion request to model {}", request.model);
        let completion: ChatCompletion = self
            .client
            .chat()
            .create_byot(body)
            .await
            .map_err(|e| {
                log::warn!("OpenAI call failed: {}", e);
                GenerationError::OpenAi(e)
            })?;

        completion.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(value: serde_json::Value) -> ChatCompletion {
        serde_json::from_value(value).expect("completion should decode")
    }

    #[test]
    fn test_extracts_first_choice_content() {
        let reply = completion(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "{\"question\": \"Q\"}" } },
                { "index": 1, "message": { "role": "assistant", "content": "ignored" } }
            ]
        }));

        assert_eq!(reply.into_text().unwrap(), "{\"question\": \"Q\"}");
    }

    #[test]
    fn test_missing_or_blank_content_is_empty_response() {
        let no_choices = completion(json!({ "choices": [] }));
        assert!(matches!(no_choices.into_text(), Err(GenerationError::EmptyResponse)));

        let null_content = completion(json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        }));
        assert!(matches!(null_content.into_text(), Err(GenerationError::EmptyResponse)));

        let blank = completion(json!({
            "choices": [{ "message": { "role": "assistant", "content": "  " } }]
        }));
        assert!(matches!(blank.into_text(), Err(GenerationError::EmptyResponse)));
    }

    #[test]
    fn test_chat_body_sends_system_then_user_message() {
        let request = GenerationRequest {
            system_instruction: "You are an MS-900 examiner.".to_string(),
            prompt: "Create a question.".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.5,
        };

        let body = request.chat_body();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(
            body["messages"],
            json!([
                { "role": "system", "content": "You are an MS-900 examiner." },
                { "role": "user", "content": "Create a question." }
            ])
        );
    }
}
