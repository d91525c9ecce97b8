//! Vault implementations for Notewright.
//!
//! The `Vault` trait lives in `notewright_core`; this crate provides the
//! concrete stores: an in-memory vault for tests and ephemeral sessions,
//! and a filesystem vault rooted at a directory.

pub mod fs;
pub mod in_memory;

pub use fs::FsVault;
pub use in_memory::InMemoryVault;
