//! `notewright skills` — List loaded skills.

use notewright_config::Settings;
use notewright_skills::SkillRegistry;
use notewright_vault::FsVault;
use std::path::PathBuf;

pub async fn run(vault_root: PathBuf) -> anyhow::Result<()> {
    let settings = Settings::load().map_err(|e| anyhow::anyhow!("Failed to load settings: {e}"))?;
    let vault = FsVault::new(&vault_root);

    let mut registry = SkillRegistry::new();
    registry.load(&vault, &settings.skills_dir).await;

    println!();
    println!("  {} skills loaded from '{}':", registry.len(), settings.skills_dir);
    println!();
    for skill in registry.skills() {
        let state = if skill.enabled { "enabled" } else { "disabled" };
        println!("  {} (v{}, {})", skill.name, skill.version, state);
        if !skill.description.is_empty() {
            println!("      {}", skill.description);
        }
        if !skill.triggers.is_empty() {
            println!("      triggers: {}", skill.triggers.join(", "));
        }
    }
    println!();

    Ok(())
}
