//! Provider trait — the abstraction over chat backends.
//!
//! A Provider knows how to send a prompt plus its surrounding context to a
//! backend and return the reply text.
//!
//! Implementations: OpenAI-compatible (OpenAI + custom endpoints),
//! Anthropic, local executable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::turn::Turn;

/// Everything a provider needs for a single chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The primary system prompt (assistant identity and rules).
    pub system_prompt: String,

    /// Ambient vault context (active document excerpt, file listing).
    pub context: String,

    /// Trailing window of prior conversation turns.
    pub history: Vec<Turn>,

    /// The new user message.
    pub user_message: String,

    /// The model to use (ignored by the local backend).
    pub model: String,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
}

/// The core Provider trait.
///
/// Every backend (OpenAI, Anthropic, custom endpoint, local executable)
/// implements this trait. The session calls `complete()` without knowing
/// which backend is configured.
///
/// Providers are stateless across calls: each `complete` is a single
/// attempt with no retry or connection reuse guarantees.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "anthropic", "local").
    fn name(&self) -> &str;

    /// Send a request and get the reply text.
    async fn complete(&self, request: ChatRequest) -> std::result::Result<String, ProviderError>;
}
