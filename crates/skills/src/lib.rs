//! Skill registry for Notewright.
//!
//! A skill is a named bundle of instructions plus trigger phrases. When a
//! user message contains a trigger, the matching skill's instructions are
//! folded into the outgoing system context. Skills are loaded from markdown
//! documents in the vault, or from a built-in set when the configured
//! directory is unreachable.

use notewright_core::Vault;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub mod defaults;
pub mod parser;

pub use parser::parse_skill;

/// A named instruction bundle with trigger phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    /// Unique registry key
    pub name: String,
    pub description: String,
    pub version: String,
    /// Free-text instructions folded into the system context on match
    pub instructions: String,
    /// Case-insensitive substring triggers
    pub triggers: Vec<String>,
    pub enabled: bool,
}

/// The skill registry.
///
/// Skills are kept in insertion order because trigger matching is
/// first-match-wins; re-adding an existing name replaces the skill in
/// place without changing its position.
#[derive(Debug, Default)]
pub struct SkillRegistry {
    skills: Vec<Skill>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load skills from markdown documents under `dir` in the vault.
    ///
    /// An unreachable directory (no listing, read error) falls back to the
    /// built-in skill set, so the registry is never left empty.
    pub async fn load(&mut self, vault: &dyn Vault, dir: &str) {
        self.skills.clear();

        let files = vault.list_files_with_prefix(dir).await;
        let markdown: Vec<_> = files
            .into_iter()
            .filter(|f| f.path.ends_with(".md"))
            .collect();

        if markdown.is_empty() {
            self.load_defaults();
            info!(count = self.skills.len(), "Skills directory unreachable, loaded built-in skills");
            return;
        }

        for file in markdown {
            match vault.read_file(&file.path).await {
                Ok(content) => {
                    let stem = file.name.trim_end_matches(".md");
                    self.add(parse_skill(&content, stem));
                }
                Err(e) => {
                    warn!(path = %file.path, error = %e, "Skill file read failed, loading built-in skills");
                    self.load_defaults();
                    break;
                }
            }
        }

        info!(count = self.skills.len(), "Loaded skills");
    }

    fn load_defaults(&mut self) {
        for skill in defaults::default_skills() {
            self.add(skill);
        }
    }

    /// All skills, in insertion order.
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Look up a skill by name.
    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }

    /// Find the first enabled skill with a trigger contained in the prompt.
    ///
    /// Matching is case-insensitive substring; iteration order is insertion
    /// order, first match wins.
    pub fn find_matching(&self, prompt: &str) -> Option<&Skill> {
        let lower = prompt.to_lowercase();
        self.skills.iter().find(|skill| {
            skill.enabled
                && skill
                    .triggers
                    .iter()
                    .any(|t| lower.contains(&t.to_lowercase()))
        })
    }

    /// Enable or disable a skill. Unknown names are a no-op.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) {
        if let Some(skill) = self.skills.iter_mut().find(|s| s.name == name) {
            skill.enabled = enabled;
        }
    }

    /// Add a skill. A skill with the same name is replaced in place.
    pub fn add(&mut self, skill: Skill) {
        match self.skills.iter_mut().find(|s| s.name == skill.name) {
            Some(existing) => *existing = skill,
            None => self.skills.push(skill),
        }
    }

    /// Remove a skill by name.
    pub fn remove(&mut self, name: &str) {
        self.skills.retain(|s| s.name != name);
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use notewright_core::error::VaultError;
    use notewright_core::vault::{Document, FileEntry};
    use std::collections::HashMap;

    /// A minimal vault stub backed by a path → content map.
    struct StubVault {
        files: HashMap<String, String>,
    }

    impl StubVault {
        fn new(files: &[(&str, &str)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, c)| (p.to_string(), c.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl Vault for StubVault {
        async fn active_document(&self) -> Option<Document> {
            None
        }

        async fn list_files(&self) -> Vec<FileEntry> {
            let mut paths: Vec<&String> = self.files.keys().collect();
            paths.sort();
            paths
                .into_iter()
                .map(|p| FileEntry {
                    path: p.clone(),
                    name: p.rsplit('/').next().unwrap_or(p).to_string(),
                })
                .collect()
        }

        async fn read_file(&self, path: &str) -> Result<String, VaultError> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| VaultError::NotFound(path.to_string()))
        }

        async fn write_file(&self, _path: &str, _content: &str) -> Result<(), VaultError> {
            Ok(())
        }
    }

    fn make_skill(name: &str, triggers: &[&str]) -> Skill {
        Skill {
            name: name.into(),
            description: String::new(),
            version: "1.0.0".into(),
            instructions: format!("instructions for {name}"),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            enabled: true,
        }
    }

    #[tokio::test]
    async fn unreachable_dir_loads_five_builtins() {
        let vault = StubVault::new(&[]);
        let mut registry = SkillRegistry::new();
        registry.load(&vault, ".notewright/skills").await;
        assert_eq!(registry.len(), 5);
        assert!(registry.get("code-review").is_some());
        assert!(registry.get("doc").is_some());
    }

    #[tokio::test]
    async fn loads_from_vault_documents() {
        let vault = StubVault::new(&[(
            ".notewright/skills/summarize.md",
            "---\nname: summarize\ntriggers: tldr\n---\nSummarize things.",
        )]);
        let mut registry = SkillRegistry::new();
        registry.load(&vault, ".notewright/skills").await;
        assert_eq!(registry.len(), 1);
        let skill = registry.get("summarize").unwrap();
        assert_eq!(skill.instructions, "Summarize things.");
    }

    #[tokio::test]
    async fn non_markdown_files_ignored() {
        let vault = StubVault::new(&[(".notewright/skills/notes.txt", "not a skill")]);
        let mut registry = SkillRegistry::new();
        registry.load(&vault, ".notewright/skills").await;
        // No markdown → treated as unreachable → built-ins.
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn find_matching_is_case_insensitive() {
        let mut registry = SkillRegistry::new();
        registry.add(make_skill("review", &["review code"]));
        let found = registry.find_matching("Could you REVIEW CODE for me?");
        assert_eq!(found.map(|s| s.name.as_str()), Some("review"));
    }

    #[test]
    fn find_matching_first_wins_in_insertion_order() {
        let mut registry = SkillRegistry::new();
        registry.add(make_skill("first", &["shared trigger"]));
        registry.add(make_skill("second", &["shared trigger"]));
        let found = registry.find_matching("this has the shared trigger phrase");
        assert_eq!(found.map(|s| s.name.as_str()), Some("first"));
    }

    #[test]
    fn disabled_skills_never_match() {
        let mut registry = SkillRegistry::new();
        registry.add(make_skill("off", &["hello"]));
        registry.set_enabled("off", false);
        assert!(registry.find_matching("hello there").is_none());
    }

    #[test]
    fn no_trigger_no_match() {
        let mut registry = SkillRegistry::new();
        registry.add(make_skill("a", &["alpha"]));
        assert!(registry.find_matching("completely unrelated").is_none());
    }

    #[test]
    fn add_replaces_in_place() {
        let mut registry = SkillRegistry::new();
        registry.add(make_skill("a", &["one"]));
        registry.add(make_skill("b", &["two"]));
        let mut replacement = make_skill("a", &["updated"]);
        replacement.instructions = "new instructions".into();
        registry.add(replacement);

        assert_eq!(registry.len(), 2);
        // Position preserved: "a" still comes first.
        assert_eq!(registry.skills()[0].name, "a");
        assert_eq!(registry.skills()[0].instructions, "new instructions");
    }

    #[test]
    fn remove_deletes_by_name() {
        let mut registry = SkillRegistry::new();
        registry.add(make_skill("a", &["one"]));
        registry.remove("a");
        assert!(registry.is_empty());
        // Removing again is a no-op.
        registry.remove("a");
    }
}
