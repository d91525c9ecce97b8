//! `notewright chat` — Interactive or single-message chat mode.

use notewright_config::Settings;
use notewright_core::vault::Vault;
use notewright_session::{ConversationSession, SubmitOutcome};
use notewright_skills::SkillRegistry;
use notewright_vault::FsVault;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

pub async fn run(vault_root: PathBuf, message: Option<String>) -> anyhow::Result<()> {
    let settings = Settings::load().map_err(|e| anyhow::anyhow!("Failed to load settings: {e}"))?;

    let vault: Arc<dyn Vault> = Arc::new(FsVault::new(&vault_root));

    let mut registry = SkillRegistry::new();
    registry.load(vault.as_ref(), &settings.skills_dir).await;
    let skills = Arc::new(RwLock::new(registry));

    let provider = notewright_providers::build_provider(&settings, Some(vault_root));
    let session = ConversationSession::new(provider, vault, skills, settings.clone());

    if let Some(msg) = message {
        // Single message mode
        match session.submit(&msg).await {
            SubmitOutcome::Replied(reply) => println!("{reply}"),
            SubmitOutcome::Ignored => eprintln!("Nothing to send."),
        }
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Notewright — {} / {}", settings.provider, settings.model);
    println!("  Type your message and press Enter. 'clear' resets, 'exit' quits.");
    println!();

    let stdin = std::io::stdin();
    print!("  You > ");
    std::io::stdout().flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "exit" | "quit" => break,
            "clear" => {
                session.clear().await;
                println!("  (history cleared)");
            }
            input => match session.submit(input).await {
                SubmitOutcome::Replied(reply) => {
                    println!();
                    for reply_line in reply.lines() {
                        println!("  Assistant > {reply_line}");
                    }
                    println!();
                }
                SubmitOutcome::Ignored => {}
            },
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    Ok(())
}
