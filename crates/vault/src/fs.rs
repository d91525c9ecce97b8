//! Filesystem vault — a note store rooted at a directory on disk.

use async_trait::async_trait;
use notewright_core::error::VaultError;
use notewright_core::vault::{Document, FileEntry, Vault};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use walkdir::WalkDir;

/// A vault backed by a directory tree. Paths are vault-relative with
/// forward slashes; hidden entries (dot-prefixed) are skipped in listings.
pub struct FsVault {
    root: PathBuf,
    active_path: RwLock<Option<String>>,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            active_path: RwLock::new(None),
        }
    }

    /// Mark a vault-relative path as the active document.
    pub async fn set_active_path(&self, path: Option<String>) {
        *self.active_path.write().await = path;
    }

    fn absolute(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn relative(&self, path: &Path) -> Option<String> {
        path.strip_prefix(&self.root)
            .ok()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
    }

    fn is_hidden(entry: &walkdir::DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
    }
}

#[async_trait]
impl Vault for FsVault {
    async fn active_document(&self) -> Option<Document> {
        let path = self.active_path.read().await.clone()?;
        let content = tokio::fs::read_to_string(self.absolute(&path)).await.ok()?;
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        Some(Document { name, content })
    }

    async fn list_files(&self) -> Vec<FileEntry> {
        let mut entries: Vec<FileEntry> = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !Self::is_hidden(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = self.relative(e.path())?;
                let name = e.file_name().to_string_lossy().to_string();
                Some(FileEntry { path, name })
            })
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }

    async fn read_file(&self, path: &str) -> Result<String, VaultError> {
        tokio::fs::read_to_string(self.absolute(path))
            .await
            .map_err(|_| VaultError::NotFound(path.to_string()))
    }

    async fn write_file(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let abs = self.absolute(path);
        if let Some(parent) = abs.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| VaultError::WriteError {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?;
        }
        tokio::fs::write(&abs, content)
            .await
            .map_err(|e| VaultError::WriteError {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn root(&self) -> Option<PathBuf> {
        Some(self.root.clone())
    }
}
