//! Provider router — selects the correct chat backend from settings.

use crate::anthropic::AnthropicProvider;
use crate::local::LocalProvider;
use crate::openai_compat::OpenAiCompatProvider;
use notewright_core::provider::Provider;
use notewright_config::{ProviderKind, Settings};
use std::path::PathBuf;
use std::sync::Arc;

/// Build the provider selected by the settings.
///
/// Credential checks are deliberately lazy: the provider is always built,
/// and a missing key surfaces as `NotConfigured` at call time.
/// `workspace_root` is the working directory for the local backend.
pub fn build_provider(settings: &Settings, workspace_root: Option<PathBuf>) -> Arc<dyn Provider> {
    match settings.provider {
        ProviderKind::Local => Arc::new(LocalProvider::new(&settings.local_command, workspace_root)),
        ProviderKind::OpenAi => Arc::new(OpenAiCompatProvider::openai(&settings.api_key)),
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(&settings.api_key)),
        ProviderKind::Custom => Arc::new(OpenAiCompatProvider::custom(
            &settings.custom_api_url,
            &settings.api_key,
        )),
    }
}
