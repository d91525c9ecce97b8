//! Ambient context assembly.
//!
//! Gathers the active document and the vault file listing into a single
//! text blob for the outgoing request. Both sections are capped to bound
//! request size; truncation is silent.

use notewright_core::vault::Vault;

/// Character cap on the active document excerpt.
const DOC_CHAR_CAP: usize = 2000;
/// Maximum number of file paths listed.
const FILE_LIST_CAP: usize = 50;

/// Assembles the ambient context blob. Stateless and side-effect free.
pub struct ContextAssembler {
    doc_char_cap: usize,
    file_list_cap: usize,
}

impl ContextAssembler {
    pub fn new() -> Self {
        Self {
            doc_char_cap: DOC_CHAR_CAP,
            file_list_cap: FILE_LIST_CAP,
        }
    }

    /// Build the context blob from the vault's current state.
    pub async fn build(&self, vault: &dyn Vault) -> String {
        let mut context = String::new();

        if let Some(doc) = vault.active_document().await {
            let excerpt: String = doc.content.chars().take(self.doc_char_cap).collect();
            context.push_str(&format!("\n\nCurrent file ({}):\n{}", doc.name, excerpt));
        }

        let files = vault.list_files().await;
        let listing = files
            .iter()
            .take(self.file_list_cap)
            .map(|f| f.path.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        context.push_str(&format!("\n\nVault files: {listing}"));

        context
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notewright_core::vault::Document;
    use notewright_vault::InMemoryVault;

    #[tokio::test]
    async fn includes_active_document_and_listing() {
        let vault = InMemoryVault::with_files(&[("notes/a.md", ""), ("notes/b.md", "")]);
        vault
            .set_active_document(Some(Document {
                name: "a.md".into(),
                content: "# Heading\nBody text".into(),
            }))
            .await;

        let context = ContextAssembler::new().build(&vault).await;
        assert!(context.contains("Current file (a.md):"));
        assert!(context.contains("# Heading"));
        assert!(context.contains("Vault files: notes/a.md, notes/b.md"));
    }

    #[tokio::test]
    async fn no_active_document_lists_files_only() {
        let vault = InMemoryVault::with_files(&[("x.md", "")]);
        let context = ContextAssembler::new().build(&vault).await;
        assert!(!context.contains("Current file"));
        assert!(context.contains("Vault files: x.md"));
    }

    #[tokio::test]
    async fn document_excerpt_is_capped() {
        let vault = InMemoryVault::new();
        vault
            .set_active_document(Some(Document {
                name: "big.md".into(),
                content: "x".repeat(5000),
            }))
            .await;

        let context = ContextAssembler::new().build(&vault).await;
        let xs = context.chars().filter(|&c| c == 'x').count();
        assert_eq!(xs, 2000);
    }

    #[tokio::test]
    async fn excerpt_cap_respects_char_boundaries() {
        let vault = InMemoryVault::new();
        vault
            .set_active_document(Some(Document {
                name: "uni.md".into(),
                content: "é".repeat(3000),
            }))
            .await;

        // Multi-byte content must not panic or split a character.
        let context = ContextAssembler::new().build(&vault).await;
        assert!(context.contains("é"));
    }

    #[tokio::test]
    async fn file_listing_is_capped_at_fifty() {
        let files: Vec<(String, String)> = (0..80)
            .map(|i| (format!("note{i:02}.md"), String::new()))
            .collect();
        let refs: Vec<(&str, &str)> = files
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        let vault = InMemoryVault::with_files(&refs);

        let context = ContextAssembler::new().build(&vault).await;
        let listed = context.split("Vault files: ").nth(1).unwrap();
        assert_eq!(listed.split(", ").count(), 50);
    }
}
