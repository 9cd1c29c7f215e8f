use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::BackendSettings;

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    text: String,
}

pub struct AnthropicBackend {
    client: reqwest::Client,
    model: String,
    max_tokens: u32,
    endpoint: String,
}

impl AnthropicBackend {
    pub fn new(settings: &BackendSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            endpoint: format!("{}/v1/messages", settings.base_url.trim_end_matches('/')),
        }
    }

    pub async fn complete(&self, prompt: &str, api_key: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "Sending request to Anthropic");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Anthropic API")?
            .error_for_status()
            .context("Anthropic API error")?;

        let api_response: AnthropicResponse = response
            .json()
            .await
            .context("Failed to parse Anthropic API response")?;

        extract_text(api_response)
    }
}

fn extract_text(response: AnthropicResponse) -> Result<String> {
    Ok(response
        .content
        .into_iter()
        .next()
        .context("No content in Anthropic response")?
        .text)
}
