use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TextGenerationError, TextGenerator};
use crate::infrastructure::audio::DEFAULT_OPENAI_BASE_URL;

pub const DEFAULT_OPENAI_CHAT_MODEL: &str = "gpt-4o-mini";

const IM_START: &str = "<|im_start|>";
const IM_END: &str = "<|im_end|>";

/// Text generation through an OpenAI-compatible `/chat/completions` API.
///
/// ChatML prompts are unpacked into role messages; the server applies its
/// own chat template.
pub struct OpenAiChatGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatTurn<'a>>,
    max_tokens: usize,
    temperature: f32,
}

/// One role-tagged message of a chat-completions request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChatTurn<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Splits a ChatML prompt into its turns. The open assistant turn at the end
/// carries no content and is dropped. Text without ChatML markers becomes a
/// single user turn.
pub fn split_chatml(prompt: &str) -> Vec<ChatTurn<'_>> {
    let turns: Vec<ChatTurn<'_>> = prompt
        .split(IM_START)
        .filter_map(|segment| {
            let (role, body) = segment.split_once('\n')?;
            let role = role.trim();
            let content = body.split(IM_END).next().unwrap_or(body).trim();
            (!role.is_empty() && !content.is_empty()).then_some(ChatTurn { role, content })
        })
        .collect();

    if turns.is_empty() {
        return vec![ChatTurn {
            role: "user",
            content: prompt.trim(),
        }];
    }
    turns
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiChatGenerator {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        model: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TextGenerationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TextGenerationError::ApiRequestFailed(format!("http client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_OPENAI_CHAT_MODEL.to_string()),
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiChatGenerator {
    async fn generate(
        &self,
        prompt: &str,
        max_new_tokens: usize,
    ) -> Result<String, TextGenerationError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let request_body = ChatRequest {
            model: &self.model,
            messages: split_chatml(prompt),
            max_tokens: max_new_tokens,
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| TextGenerationError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TextGenerationError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| TextGenerationError::InvalidResponse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| TextGenerationError::InvalidResponse("no choices".to_string()))?;

        tracing::debug!(model = %self.model, chars = content.len(), "Chat completion received");

        Ok(content)
    }
}
