//! In-memory vault — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use notewright_core::error::VaultError;
use notewright_core::vault::{Document, FileEntry, Vault};
use tokio::sync::RwLock;

/// A vault that stores files in a Vec, preserving insertion order.
pub struct InMemoryVault {
    files: RwLock<Vec<(String, String)>>,
    active: RwLock<Option<Document>>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self {
            files: RwLock::new(Vec::new()),
            active: RwLock::new(None),
        }
    }

    /// Create a vault pre-populated with `(path, content)` pairs.
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        Self {
            files: RwLock::new(
                files
                    .iter()
                    .map(|(p, c)| (p.to_string(), c.to_string()))
                    .collect(),
            ),
            active: RwLock::new(None),
        }
    }

    /// Set the document reported as active in the editor.
    pub async fn set_active_document(&self, doc: Option<Document>) {
        *self.active.write().await = doc;
    }
}

impl Default for InMemoryVault {
    fn default() -> Self {
        Self::new()
    }
}

fn file_name(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

#[async_trait]
impl Vault for InMemoryVault {
    async fn active_document(&self) -> Option<Document> {
        self.active.read().await.clone()
    }

    async fn list_files(&self) -> Vec<FileEntry> {
        self.files
            .read()
            .await
            .iter()
            .map(|(path, _)| FileEntry {
                path: path.clone(),
                name: file_name(path),
            })
            .collect()
    }

    async fn read_file(&self, path: &str) -> Result<String, VaultError> {
        self.files
            .read()
            .await
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| VaultError::NotFound(path.to_string()))
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let mut files = self.files.write().await;
        match files.iter_mut().find(|(p, _)| p == path) {
            Some((_, existing)) => *existing = content.to_string(),
            None => files.push((path.to_string(), content.to_string())),
        }
        Ok(())
    }
}
