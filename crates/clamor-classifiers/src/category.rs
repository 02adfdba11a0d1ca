//! LLM-backed category classification clients
//!
//! Two interchangeable strategies share the chat-completions wire
//! format: `OpenAiCategory` talks to the OpenAI endpoint directly,
//! `OpenRouterCategory` goes through the OpenRouter routing endpoint
//! (optionally via a SOCKS5 proxy for restricted networks). Which one
//! is active is a deployment decision.
//!
//! The prompt pins the model to a deterministic single-word answer
//! (`temperature: 0`) drawn from the fixed three-value category set.
//! The upstream answers in Russian; the client trims, lowercases, and
//! maps the word onto the `Category` enumeration, falling back to
//! `Other` for anything else.

use async_trait::async_trait;
use clamor_core::{Category, CategoryLabel};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::capability::CategoryClassifier;
use crate::error::ClassifierError;

/// Default OpenAI chat completions endpoint
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default OpenRouter chat completions endpoint
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const OPENROUTER_MODEL: &str = "openai/gpt-4.1-nano";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

fn classification_prompt(text: &str) -> String {
    format!(
        "Определи категорию жалобы: \"{text}\". \
         Варианты: техническая, оплата, другое. Ответ только одним словом."
    )
}

/// Parse a chat-completions response body into a category, falling
/// back to `Other` for malformed payloads or unexpected answers.
fn parse_category(body: &str) -> Category {
    let response = match serde_json::from_str::<ChatResponse>(body) {
        Ok(r) => r,
        Err(e) => {
            warn!("malformed category response: {e}");
            return Category::Other;
        }
    };

    let answer = response
        .choices
        .first()
        .map(|c| c.message.content.trim().to_lowercase())
        .unwrap_or_default();

    match answer.as_str() {
        "техническая" => Category::Technical,
        "оплата" => Category::Billing,
        "другое" => Category::Other,
        other => {
            warn!("unknown or malformed category received from model: {other}");
            Category::Other
        }
    }
}

/// Shared request/response handling for both strategies
async fn classify_via(
    http: &reqwest::Client,
    api_url: &str,
    api_key: &str,
    model: &str,
    text: &str,
) -> CategoryLabel {
    let request = ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: "user",
            content: classification_prompt(text),
        }],
        temperature: 0.0,
    };

    let response = http
        .post(api_url)
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await;

    let response = match response {
        Ok(r) => r,
        Err(e) => {
            warn!("HTTP error while fetching category: {e}");
            return CategoryLabel::other();
        }
    };

    if !response.status().is_success() {
        warn!(status = %response.status(), "category service returned error status");
        return CategoryLabel::other();
    }

    let body = match response.text().await {
        Ok(b) => b,
        Err(e) => {
            warn!("failed to read category response body: {e}");
            return CategoryLabel::other();
        }
    };

    debug!(model, "category raw response: {body}");
    CategoryLabel::new(parse_category(&body))
}

/// Category classifier backed by the OpenAI chat completions API
#[derive(Debug, Clone)]
pub struct OpenAiCategory {
    api_key: String,
    api_url: String,
    model: String,
    http: reqwest::Client,
}

impl OpenAiCategory {
    /// Create a new client; the API key must be non-empty
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Result<Self, ClassifierError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClassifierError::config(
                "API key for OpenAI must be provided",
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClassifierError::config(format!("category http client: {e}")))?;

        Ok(Self {
            api_key,
            api_url: api_url.into(),
            model: OPENAI_MODEL.to_string(),
            http,
        })
    }

    /// Override the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl CategoryClassifier for OpenAiCategory {
    async fn classify(&self, text: &str) -> Result<CategoryLabel, ClassifierError> {
        Ok(classify_via(&self.http, &self.api_url, &self.api_key, &self.model, text).await)
    }
}

/// Category classifier backed by the OpenRouter routing API
///
/// Supports an optional SOCKS5 proxy for environments where the
/// endpoint is not directly reachable.
#[derive(Debug, Clone)]
pub struct OpenRouterCategory {
    api_key: String,
    api_url: String,
    model: String,
    http: reqwest::Client,
}

impl OpenRouterCategory {
    /// Create a new client; the API key must be non-empty and the
    /// proxy URL, when given, must be valid (e.g. `socks5://host:port`)
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        proxy: Option<&str>,
    ) -> Result<Self, ClassifierError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClassifierError::config(
                "API key for OpenRouter must be provided",
            ));
        }

        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy_url) = proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| ClassifierError::config(format!("invalid proxy url: {e}")))?;
            builder = builder.proxy(proxy);
        }
        let http = builder
            .build()
            .map_err(|e| ClassifierError::config(format!("category http client: {e}")))?;

        Ok(Self {
            api_key,
            api_url: api_url.into(),
            model: OPENROUTER_MODEL.to_string(),
            http,
        })
    }

    /// Override the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl CategoryClassifier for OpenRouterCategory {
    async fn classify(&self, text: &str) -> Result<CategoryLabel, ClassifierError> {
        Ok(classify_via(&self.http, &self.api_url, &self.api_key, &self.model, text).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[test]
    fn maps_each_category_word() {
        assert_eq!(parse_category(&chat_body("техническая")), Category::Technical);
        assert_eq!(parse_category(&chat_body("оплата")), Category::Billing);
        assert_eq!(parse_category(&chat_body("другое")), Category::Other);
    }

    #[test]
    fn trims_and_lowercases_the_answer() {
        assert_eq!(parse_category(&chat_body("  Оплата \n")), Category::Billing);
    }

    #[test]
    fn unexpected_answer_falls_back_to_other() {
        assert_eq!(
            parse_category(&chat_body("I think this is a billing issue")),
            Category::Other
        );
    }

    #[test]
    fn empty_choices_falls_back_to_other() {
        assert_eq!(parse_category(r#"{"choices":[]}"#), Category::Other);
    }

    #[test]
    fn malformed_payload_falls_back_to_other() {
        assert_eq!(parse_category("<html>bad gateway</html>"), Category::Other);
    }

    #[test]
    fn prompt_embeds_the_complaint_text() {
        let prompt = classification_prompt("интернет не работает");
        assert!(prompt.contains("\"интернет не работает\""));
        assert!(prompt.contains("техническая, оплата, другое"));
    }

    #[test]
    fn empty_api_key_is_rejected_at_construction() {
        assert!(OpenAiCategory::new("", OPENAI_API_URL).is_err());
        assert!(OpenRouterCategory::new("", OPENROUTER_API_URL, None).is_err());
    }

    #[test]
    fn bad_proxy_url_is_rejected_at_construction() {
        assert!(OpenRouterCategory::new("key", OPENROUTER_API_URL, Some("::not a url::")).is_err());
    }
}
