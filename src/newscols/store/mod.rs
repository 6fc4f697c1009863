//! # Storage Layer
//!
//! Documents are stored as plain markup text under a name. The
//! [`DocumentStore`] trait lets the command layer work without knowing where
//! that text lives.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one file per document in a directory.
//! - [`memory::InMemoryStore`]: for testing command logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <dir>/
//! ├── .newscols/config.json   # Optional local configuration
//! └── {name}{ext}             # Document markup (ext defaults to .html)
//! ```
//!
//! Names are bare: `post` and `post.html` refer to the same document.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for document storage.
pub trait DocumentStore {
    /// Read a document's markup
    fn read(&self, name: &str) -> Result<String>;

    /// Write a document (create or replace)
    fn write(&mut self, name: &str, markup: &str) -> Result<()>;

    /// Names of all stored documents, sorted
    fn list(&self) -> Result<Vec<String>>;

    fn exists(&self, name: &str) -> bool;
}
