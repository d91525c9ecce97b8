//! # Notewright Core
//!
//! Domain types, traits, and error definitions for the Notewright assistant
//! orchestration layer. This crate has **zero framework dependencies** — it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod provider;
pub mod turn;
pub mod vault;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result, ToolError, VaultError};
pub use provider::{ChatRequest, Provider};
pub use turn::{Role, Turn};
pub use vault::{Document, FileEntry, Vault};
