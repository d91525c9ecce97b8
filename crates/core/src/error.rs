//! Error types for the Notewright domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Notewright operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Vault errors ---
    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Local process failed: {0}")]
    Process(String),

    #[error("Local process output exceeded {limit} bytes")]
    OutputTooLarge { limit: usize },
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool call failed: {tool_name} (status: {status_code})")]
    CallFailed { tool_name: String, status_code: u16 },

    #[error("Tool transport error: {0}")]
    Transport(String),

    #[error("Malformed tool server reply: {0}")]
    MalformedReply(String),
}

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Write failed for {path}: {reason}")]
    WriteError { path: String, reason: String },
}
