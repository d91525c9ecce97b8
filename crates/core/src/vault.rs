//! Vault trait — the abstraction over the host application's note store.
//!
//! The host owns the documents; this layer only reads, writes, and lists
//! them through a narrow interface. Implementations live in the
//! `notewright-vault` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::VaultError;

/// The document currently open in the editor, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub content: String,
}

/// One entry in a vault file listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub name: String,
}

/// The note-store interface consumed by the core.
#[async_trait]
pub trait Vault: Send + Sync {
    /// The document currently active in the editor, if any.
    async fn active_document(&self) -> Option<Document>;

    /// All files known to the vault, in a stable order.
    async fn list_files(&self) -> Vec<FileEntry>;

    /// Files whose path starts with the given prefix.
    async fn list_files_with_prefix(&self, prefix: &str) -> Vec<FileEntry> {
        self.list_files()
            .await
            .into_iter()
            .filter(|f| f.path.starts_with(prefix))
            .collect()
    }

    /// Read a file's content. Fails with `NotFound` if absent.
    async fn read_file(&self, path: &str) -> std::result::Result<String, VaultError>;

    /// Write a file's content, creating it if needed.
    async fn write_file(&self, path: &str, content: &str)
    -> std::result::Result<(), VaultError>;

    /// The vault's root directory on disk, when it has one.
    ///
    /// Used as the working directory for the local provider executable.
    fn root(&self) -> Option<PathBuf> {
        None
    }
}
