use std::future::Future;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};

/// Anything that can turn a prompt into generated text.
pub trait CompletionClient: Send + Sync {
    /// Request a single completion for `prompt`.
    fn complete(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .ok_or_else(|| BotError::CompletionResponse("No choices in response".to_string()))?
            .message
            .content
            .ok_or_else(|| BotError::CompletionResponse("Choice has no content".to_string()))
    }
}

/// Client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiClient {
    api_key: String,
    client: reqwest::Client,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, base_url: &str) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            model,
            endpoint: format!("{base_url}/chat/completions"),
        }
    }

    fn request<'a>(&'a self, prompt: &'a str, temperature: f32) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        }
    }
}

impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        debug!(
            "Sending {} character prompt to {} (model {}, temperature {temperature})",
            prompt.len(),
            self.endpoint,
            self.model
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request(prompt, temperature))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BotError::CompletionApi { status, message });
        }

        let reply = response.json::<ChatResponse>().await?.into_text()?;
        debug!("Received {} character completion", reply.len());
        Ok(reply)
    }
}
