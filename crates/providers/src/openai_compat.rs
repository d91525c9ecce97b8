//! OpenAI-compatible provider implementation.
//!
//! Serves the `openai` backend (fixed chat-completions endpoint) and the
//! `custom` backend (any OpenAI-compatible endpoint at a user-supplied
//! URL; the API key is optional there).

use async_trait::async_trait;
use notewright_core::error::ProviderError;
use notewright_core::provider::{ChatRequest, Provider};
use notewright_core::turn::Role;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const NO_RESPONSE: &str = "No response";

/// A provider speaking the OpenAI chat-completions wire format.
pub struct OpenAiCompatProvider {
    name: String,
    url: String,
    api_key: String,
    /// Whether an empty API key is rejected at call time.
    require_key: bool,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create an OpenAI provider (fixed endpoint, key required).
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new("openai", OPENAI_URL, api_key, true)
    }

    /// Create a custom-endpoint provider (key optional).
    pub fn custom(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::new("custom", url, api_key, false)
    }

    fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        api_key: impl Into<String>,
        require_key: bool,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            name: name.into(),
            url: url.into(),
            api_key: api_key.into(),
            require_key,
            client,
        }
    }

    /// Build the outbound message list: system prompt, injected context,
    /// history window, then the new user message.
    fn build_messages(request: &ChatRequest) -> Vec<ApiMessage> {
        let mut messages = Vec::with_capacity(request.history.len() + 3);

        messages.push(ApiMessage {
            role: "system".into(),
            content: request.system_prompt.clone(),
        });
        messages.push(ApiMessage {
            role: "system".into(),
            content: format!("Current vault context: {}", request.context),
        });
        for turn in &request.history {
            messages.push(ApiMessage {
                role: match turn.role {
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                    Role::System => "system".into(),
                },
                content: turn.content.clone(),
            });
        }
        messages.push(ApiMessage {
            role: "user".into(),
            content: request.user_message.clone(),
        });

        messages
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, ProviderError> {
        if self.require_key && self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "API key is not set; configure it in the plugin settings".into(),
            ));
        }
        if self.url.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Custom endpoint URL is not set".into(),
            ));
        }

        let body = serde_json::json!({
            "model": request.model,
            "messages": Self::build_messages(&request),
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        debug!(provider = %self.name, model = %request.model, "Sending completion request");

        let mut http_request = self.client.post(&self.url).json(&body);
        if !self.api_key.is_empty() {
            http_request =
                http_request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(provider = %self.name, status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: status,
                message: format!("Failed to parse response: {e}"),
            })?;

        let reply = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_else(|| NO_RESPONSE.to_string());

        Ok(reply)
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ApiReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use notewright_core::turn::Turn;

    fn request() -> ChatRequest {
        ChatRequest {
            system_prompt: "You are helpful".into(),
            context: "Vault files: a.md".into(),
            history: vec![Turn::user("earlier"), Turn::assistant("reply")],
            user_message: "Hello".into(),
            model: "gpt-4-turbo".into(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }

    #[test]
    fn message_order_system_context_history_user() {
        let messages = OpenAiCompatProvider::build_messages(&request());
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "You are helpful");
        assert_eq!(messages[1].role, "system");
        assert!(messages[1].content.starts_with("Current vault context:"));
        assert_eq!(messages[2].role, "user");
        assert_eq!(messages[3].role, "assistant");
        assert_eq!(messages[4].role, "user");
        assert_eq!(messages[4].content, "Hello");
    }

    #[tokio::test]
    async fn openai_requires_api_key() {
        let provider = OpenAiCompatProvider::openai("");
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn custom_requires_url_but_not_key() {
        let provider = OpenAiCompatProvider::custom("", "");
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        // A keyless custom provider with a URL gets past configuration
        // checks and fails on the network instead.
        let provider = OpenAiCompatProvider::custom("http://127.0.0.1:1/v1/chat", "");
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }

    #[test]
    fn parse_reply() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Hi there"}}]}"#,
        )
        .unwrap();
        let reply = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap();
        assert_eq!(reply, "Hi there");
    }

    #[test]
    fn missing_content_yields_placeholder() {
        let resp: ApiResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        let reply = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_else(|| NO_RESPONSE.to_string());
        assert_eq!(reply, "No response");
    }

    #[test]
    fn empty_choices_yields_placeholder() {
        let resp: ApiResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(resp.choices.is_empty());
    }
}
