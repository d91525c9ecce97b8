//! Chat backend implementations for Notewright.
//!
//! All providers implement the `notewright_core::Provider` trait.
//! The router selects the correct provider based on settings.

pub mod anthropic;
pub mod local;
pub mod openai_compat;
pub mod router;

pub use anthropic::AnthropicProvider;
pub use local::LocalProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use router::build_provider;
