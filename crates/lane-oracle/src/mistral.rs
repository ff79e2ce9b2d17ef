//! Mistral chat-completions transport.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{OracleError, Result};
use crate::transport::ChatCompletion;

/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "MISTRAL_API_KEY";

/// Connection settings for [`MistralClient`].
#[derive(Debug, Clone)]
pub struct MistralConfig {
    pub endpoint: String,
    pub model: String,
    /// Checked on the first call, so runs that never reach the oracle do not
    /// need a key.
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl MistralConfig {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
            timeout,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        self
    }

    /// Reads the API key from `MISTRAL_API_KEY`.
    pub fn with_api_key_from_env(self) -> Self {
        self.with_api_key(std::env::var(API_KEY_ENV_VAR).ok())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking client for the chat-completions endpoint.
pub struct MistralClient {
    client: Client,
    config: MistralConfig,
}

impl MistralClient {
    pub fn new(config: MistralConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(OracleError::from)?;
        Ok(Self { client, config })
    }
}

impl ChatCompletion for MistralClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(OracleError::MissingApiKey {
                var: API_KEY_ENV_VAR,
            })?;
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(endpoint = %self.config.endpoint, model = %self.config.model, "calling oracle");
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(
                USER_AGENT,
                format!("lane-normalizer/{}", env!("CARGO_PKG_VERSION")),
            )
            .json(&request)
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(OracleError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse().ok());
            return Err(OracleError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(OracleError::Unavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let body = response.text()?;
        Ok(reply_content(&body))
    }
}

/// First choice's message content. An unreadable body counts as an empty
/// reply rather than a transport failure.
fn reply_content(body: &str) -> String {
    match serde_json::from_str::<ChatResponse>(body) {
        Ok(parsed) => parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default(),
        Err(error) => {
            warn!(%error, "oracle reply is not a chat completion");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_has_single_user_message() {
        let request = ChatRequest {
            model: "mistral-large-latest",
            messages: [ChatMessage {
                role: "user",
                content: "prompt Pérou",
            }],
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["model"], "mistral-large-latest");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "prompt Pérou");
    }

    #[test]
    fn reply_content_reads_first_choice() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"PE"}},{"index":1,"message":{"role":"assistant","content":"FR"}}]}"#;
        assert_eq!(reply_content(body), "PE");
        assert_eq!(reply_content(r#"{"choices":[]}"#), "");
        assert_eq!(reply_content("<html>bad gateway</html>"), "");
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let config = MistralConfig::new(
            "http://127.0.0.1:9/v1/chat/completions",
            "mistral-large-latest",
            Duration::from_secs(1),
        )
        .with_api_key(Some("   ".to_string()));
        let client = MistralClient::new(config).expect("client");
        let err = client.complete("prompt").unwrap_err();
        assert!(matches!(err, OracleError::MissingApiKey { .. }));
    }
}
