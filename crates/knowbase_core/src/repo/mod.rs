//! Persistence gateway for per-language knowledge text.
//!
//! # Responsibility
//! - Define the fetch/save contract the editor session depends on.
//! - Keep SQLite details behind that contract.
//!
//! # Invariants
//! - The two languages are stored as independent blobs; no cross-language
//!   schema is enforced here.

pub mod knowledge_repo;
