//! Passport QA Adapters - External adapters for passport-qa.
//!
//! This crate provides adapters for:
//! - The in-memory country spec store and its bundled seed
//! - Gemini content assessment, plus a local-only fallback
//! - Filesystem photo source

pub mod fs;
pub mod gemini;
pub mod local;
pub mod store;

pub use fs::{mime_for_path, FsPhotoSource};
pub use gemini::{GeminiAssessor, GeminiConfig};
pub use local::LocalOnlyAssessor;
pub use store::{InMemorySpecStore, SeedError};
