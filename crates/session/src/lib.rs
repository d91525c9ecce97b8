//! Conversation session for Notewright.
//!
//! The session owns the ordered turn history and sequences the request
//! lifecycle: append the user turn, assemble context, fold in a matching
//! skill, call the provider, append the assistant turn. Provider failures
//! become a visible assistant message rather than an error — the
//! conversation stays usable.
//!
//! At most one submission is in flight per session, enforced by a busy
//! flag: a concurrent submission is dropped, not queued.

use notewright_config::Settings;
use notewright_core::provider::{ChatRequest, Provider};
use notewright_core::turn::Turn;
use notewright_core::vault::Vault;
use notewright_skills::SkillRegistry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

pub mod context;

pub use context::ContextAssembler;

/// Trailing window of prior turns included in each outbound request.
const HISTORY_WINDOW: usize = 10;

/// The result of a `submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The assistant replied (possibly with an error-labeled message).
    Replied(String),
    /// Empty input, or another submission was in flight. Nothing happened.
    Ignored,
}

/// A single conversation with the configured backend.
pub struct ConversationSession {
    provider: Arc<dyn Provider>,
    vault: Arc<dyn Vault>,
    skills: Arc<RwLock<SkillRegistry>>,
    settings: Settings,
    assembler: ContextAssembler,
    history: Mutex<Vec<Turn>>,
    busy: AtomicBool,
}

impl ConversationSession {
    pub fn new(
        provider: Arc<dyn Provider>,
        vault: Arc<dyn Vault>,
        skills: Arc<RwLock<SkillRegistry>>,
        settings: Settings,
    ) -> Self {
        Self {
            provider,
            vault,
            skills,
            settings,
            assembler: ContextAssembler::new(),
            history: Mutex::new(Vec::new()),
            busy: AtomicBool::new(false),
        }
    }

    /// Submit a user message and await the assistant's reply.
    ///
    /// Empty input is ignored. A submission while another is in flight is
    /// ignored, not queued. Provider failures come back as an
    /// `Error: …` assistant reply.
    pub async fn submit(&self, user_message: &str) -> SubmitOutcome {
        let message = user_message.trim();
        if message.is_empty() {
            return SubmitOutcome::Ignored;
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Submission dropped: another request is in flight");
            return SubmitOutcome::Ignored;
        }

        let reply = self.process(message).await;
        self.busy.store(false, Ordering::Release);

        SubmitOutcome::Replied(reply)
    }

    async fn process(&self, message: &str) -> String {
        // Window of prior turns, snapshotted before the new user turn.
        let window = {
            let mut history = self.history.lock().await;
            let window: Vec<Turn> = history
                .iter()
                .rev()
                .take(HISTORY_WINDOW)
                .rev()
                .cloned()
                .collect();
            history.push(Turn::user(message));
            window
        };

        let context = self.assembler.build(self.vault.as_ref()).await;

        let mut system_prompt = self.settings.system_prompt.clone();
        if let Some(skill) = self.skills.read().await.find_matching(message) {
            debug!(skill = %skill.name, "Folding matched skill into system context");
            system_prompt.push_str("\n\n");
            system_prompt.push_str(&skill.instructions);
        }

        let request = ChatRequest {
            system_prompt,
            context,
            history: window,
            user_message: message.to_string(),
            model: self.settings.model.clone(),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let reply = match self.provider.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(provider = %self.provider.name(), error = %e, "Provider call failed");
                format!("Error: {e}")
            }
        };

        self.history.lock().await.push(Turn::assistant(&reply));
        reply
    }

    /// Empty the history. Skills and tool state are unaffected.
    pub async fn clear(&self) {
        self.history.lock().await.clear();
    }

    /// A snapshot of the turn history.
    pub async fn history(&self) -> Vec<Turn> {
        self.history.lock().await.clone()
    }
}
