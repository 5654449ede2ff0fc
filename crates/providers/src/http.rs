//! OpenAI-compatible chat completion client.
//!
//! One implementation covers every provider exposing the common chat
//! completions shape (OpenAI, most proxies and local servers); the endpoint
//! and key come from configuration.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use frontier_core::{
    traits::{Generation, TextGenerator},
    Error, Result,
};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Text generator speaking the OpenAI chat completions protocol.
pub struct HttpGenerator {
    client: reqwest::Client,
    model: String,
    api_base: String,
    api_key: Option<Secret<String>>,
}

impl HttpGenerator {
    /// Client for a model behind the default OpenAI endpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
        }
    }

    /// Point at a different OpenAI-compatible endpoint.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Attach a bearer API key.
    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// The model name sent in requests.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<Generation> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        };

        let mut request = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let started = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| Error::provider(format!("{}: request failed: {}", self.model, e)))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::provider(format!(
                "{}: {} from {}: {}",
                self.model,
                status,
                url,
                detail.chars().take(200).collect::<String>()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::provider(format!("{}: malformed response: {}", self.model, e)))?;
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        // Fall back to a rough length-based estimate for servers that omit
        // the usage block.
        let usage = parsed.usage.unwrap_or(Usage {
            prompt_tokens: prompt.len() as u64 / 4,
            completion_tokens: text.len() as u64 / 4,
        });

        tracing::trace!(
            model = %self.model,
            latency_ms,
            output_tokens = usage.completion_tokens,
            "generation completed"
        );

        Ok(Generation {
            text,
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            latency_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_configuration() {
        let generator = HttpGenerator::new("gpt-4o-mini")
            .with_api_base("http://localhost:11434/v1/")
            .with_api_key(Secret::new("sk-test".to_string()));

        assert_eq!(generator.model(), "gpt-4o-mini");
        assert_eq!(generator.api_base, "http://localhost:11434/v1/");
        assert!(generator.api_key.is_some());
    }

    #[test]
    fn test_response_parsing_with_and_without_usage() {
        let full: ChatResponse = serde_json::from_str(
            r#"{
                "choices": [{"message": {"role": "assistant", "content": "hello"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            }"#,
        )
        .unwrap();
        assert_eq!(full.choices[0].message.content.as_deref(), Some("hello"));
        assert_eq!(full.usage.as_ref().map(|u| u.completion_tokens), Some(3));

        let bare: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(bare.usage.is_none());
        assert!(bare.choices[0].message.content.is_none());
    }
}
