//! AI provider abstraction and implementations.
//!
//! Defines the [`ProviderClient`] trait and two interchangeable backends:
//! - **[`DeepSeekClient`]** — OpenAI-compatible chat-completion envelope.
//! - **[`GeminiClient`]** — Google single-blob generate envelope.
//!
//! Both send one system+user prompt pair and return the provider's raw
//! text. By default a single attempt is made per call; `max_retries > 0`
//! enables exponential backoff on rate limits, server errors, and network
//! failures:
//! - HTTP 429 and 5xx → retry
//! - HTTP 4xx (not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use async_trait::async_trait;
use std::time::Duration;

use crate::config::ProviderConfig;

const DEEPSEEK_URL: &str = "https://api.deepseek.com/v1/chat/completions";
const DEEPSEEK_DEFAULT_MODEL: &str = "deepseek-chat";
const GEMINI_URL_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Fixed sampling temperature used by both providers.
const TEMPERATURE: f64 = 0.7;

/// Which hosted backend to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    DeepSeek,
    Gemini,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "deepseek",
            Provider::Gemini => "gemini",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "deepseek" => Some(Provider::DeepSeek),
            "gemini" => Some(Provider::Gemini),
            _ => None,
        }
    }

    /// Default environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// Error surfaced by a provider call.
#[derive(Debug)]
pub enum ProviderError {
    /// Non-2xx HTTP response; message extracted best-effort from the body.
    Http { status: u16, message: String },
    /// Connection, DNS, or timeout failure before a response arrived.
    Network(String),
    /// Response arrived but its shape did not match the provider contract.
    Malformed(String),
    /// No API key available.
    MissingApiKey(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Http { status, message } => {
                write!(f, "provider returned HTTP {}: {}", status, message)
            }
            ProviderError::Network(e) => write!(f, "provider request failed: {}", e),
            ProviderError::Malformed(e) => write!(f, "unexpected provider response: {}", e),
            ProviderError::MissingApiKey(var) => {
                write!(f, "{} environment variable not set", var)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Interface both provider backends implement.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Provider identifier (`"deepseek"` / `"gemini"`).
    fn name(&self) -> &'static str;
    /// Model identifier this client calls.
    fn model(&self) -> &str;
    /// Send one prompt pair, return the provider's raw response text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError>;
}

/// Instantiate the client for `provider`, resolving the API key from the
/// configured environment variable (or the provider default).
pub fn create_client(
    provider: Provider,
    config: &ProviderConfig,
) -> Result<Box<dyn ProviderClient>, ProviderError> {
    let env_var = config
        .api_key_env
        .clone()
        .unwrap_or_else(|| provider.api_key_env().to_string());
    let api_key =
        std::env::var(&env_var).map_err(|_| ProviderError::MissingApiKey(env_var.clone()))?;

    match provider {
        Provider::DeepSeek => Ok(Box::new(DeepSeekClient {
            api_key,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEEPSEEK_DEFAULT_MODEL.to_string()),
            config: config.clone(),
        })),
        Provider::Gemini => Ok(Box::new(GeminiClient {
            api_key,
            model: config
                .model
                .clone()
                .unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_string()),
            config: config.clone(),
        })),
    }
}

fn build_http(config: &ProviderConfig) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| ProviderError::Network(e.to_string()))
}

/// Run `send` with the shared retry policy: retries only 429/5xx/network.
async fn with_retries<F, Fut>(max_retries: u32, send: F) -> Result<String, ProviderError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<String, ProviderError>>,
{
    let mut last_err = None;

    for attempt in 0..=max_retries {
        if attempt > 0 {
            let delay = Duration::from_secs(1 << (attempt - 1).min(5));
            tokio::time::sleep(delay).await;
        }

        match send().await {
            Ok(text) => return Ok(text),
            Err(ProviderError::Http { status, message })
                if status == 429 || (500..600).contains(&status) =>
            {
                last_err = Some(ProviderError::Http { status, message });
            }
            Err(e @ ProviderError::Network(_)) => {
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err
        .unwrap_or_else(|| ProviderError::Network("request failed after retries".to_string())))
}

// ============ DeepSeek (chat-completion envelope) ============

/// Client for the DeepSeek chat-completions endpoint.
pub struct DeepSeekClient {
    api_key: String,
    model: String,
    config: ProviderConfig,
}

#[async_trait]
impl ProviderClient for DeepSeekClient {
    fn name(&self) -> &'static str {
        "deepseek"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let client = build_http(&self.config)?;
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": self.config.max_output_tokens,
        });

        with_retries(self.config.max_retries, || {
            let client = client.clone();
            let body = body.clone();
            async move {
                let resp = client
                    .post(DEEPSEEK_URL)
                    .header("Authorization", format!("Bearer {}", self.api_key))
                    .header("Content-Type", "application/json")
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| ProviderError::Network(e.to_string()))?;

                let status = resp.status();
                if !status.is_success() {
                    // DeepSeek failures surface the HTTP status text; fall
                    // back to the body when the status has no reason phrase.
                    let message = match status.canonical_reason() {
                        Some(reason) => reason.to_string(),
                        None => resp.text().await.unwrap_or_default(),
                    };
                    return Err(ProviderError::Http {
                        status: status.as_u16(),
                        message,
                    });
                }

                let json: serde_json::Value = resp
                    .json()
                    .await
                    .map_err(|e| ProviderError::Malformed(e.to_string()))?;
                extract_chat_content(&json)
            }
        })
        .await
    }
}

/// Success path: `choices[0].message.content`.
fn extract_chat_content(json: &serde_json::Value) -> Result<String, ProviderError> {
    json.pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            ProviderError::Malformed("missing choices[0].message.content".to_string())
        })
}

// ============ Gemini (single-blob generate envelope) ============

/// Client for the Gemini generateContent endpoint. The API key rides as a
/// query parameter; system and user prompts are joined into one text blob.
pub struct GeminiClient {
    api_key: String,
    model: String,
    config: ProviderConfig,
}

#[async_trait]
impl ProviderClient for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let client = build_http(&self.config)?;
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_URL_BASE, self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{"parts": [{"text": format!("{}\n\n{}", system, user)}]}],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": self.config.max_output_tokens,
            },
        });

        with_retries(self.config.max_retries, || {
            let client = client.clone();
            let url = url.clone();
            let body = body.clone();
            async move {
                let resp = client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| ProviderError::Network(e.to_string()))?;

                let status = resp.status();
                if !status.is_success() {
                    let message = gemini_error_message(resp, status).await;
                    return Err(ProviderError::Http {
                        status: status.as_u16(),
                        message,
                    });
                }

                let json: serde_json::Value = resp
                    .json()
                    .await
                    .map_err(|e| ProviderError::Malformed(e.to_string()))?;
                extract_generate_content(&json)
            }
        })
        .await
    }
}

/// Success path: `candidates[0].content.parts[0].text`.
fn extract_generate_content(json: &serde_json::Value) -> Result<String, ProviderError> {
    json.pointer("/candidates/0/content/parts/0/text")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            ProviderError::Malformed("missing candidates[0].content.parts[0].text".to_string())
        })
}

/// Best-effort error message chain: structured `error.message` → top-level
/// `message` → HTTP status text → status code.
async fn gemini_error_message(resp: reqwest::Response, status: reqwest::StatusCode) -> String {
    let body = resp.text().await.unwrap_or_default();
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(msg) = json.pointer("/error/message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }
    status
        .canonical_reason()
        .map(|r| r.to_string())
        .unwrap_or_else(|| status.as_u16().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parse() {
        assert_eq!(Provider::parse("DeepSeek"), Some(Provider::DeepSeek));
        assert_eq!(Provider::parse("gemini"), Some(Provider::Gemini));
        assert_eq!(Provider::parse("openai"), None);
    }

    #[test]
    fn chat_content_extraction() {
        let json = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        });
        assert_eq!(extract_chat_content(&json).unwrap(), "hello");

        let bad = serde_json::json!({"choices": []});
        assert!(matches!(
            extract_chat_content(&bad),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn generate_content_extraction() {
        let json = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "hi there"}]}}]
        });
        assert_eq!(extract_generate_content(&json).unwrap(), "hi there");

        let bad = serde_json::json!({"candidates": [{"content": {"parts": []}}]});
        assert!(matches!(
            extract_generate_content(&bad),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn missing_key_error_names_the_variable() {
        std::env::remove_var("DOCLENS_TEST_KEY");
        let mut cfg = ProviderConfig::default();
        cfg.api_key_env = Some("DOCLENS_TEST_KEY".to_string());
        let err = create_client(Provider::DeepSeek, &cfg).err().unwrap();
        assert!(err.to_string().contains("DOCLENS_TEST_KEY"));
    }
}
