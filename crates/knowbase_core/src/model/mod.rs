//! Bilingual knowledge domain model.
//!
//! # Responsibility
//! - Define the in-memory structures the knowledge editor mutates.
//! - Keep EN/VI variants of one topic together as a single unit.
//!
//! # Invariants
//! - Every topic is identified by a stable `TopicId` for its session lifetime.
//! - Topic order is meaningful and preserved through parse -> edit -> compile.

pub mod lang;
pub mod topic;
