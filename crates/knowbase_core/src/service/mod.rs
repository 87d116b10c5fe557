//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate gateway calls, parsing and alignment into editor use-cases.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod knowledge_service;
