//! Core engine for the bilingual knowledge-base editor.
//! This crate is the single source of truth for the text format and its
//! alignment rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod text;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::lang::{Lang, UnknownLang};
pub use model::topic::{placeholder_title, LangLines, LangText, Topic, TopicId, TopicSet};
pub use repo::knowledge_repo::{
    GatewayError, GatewayResult, InMemoryKnowledgeStore, KnowledgeDocument, KnowledgeGateway,
    SaveReceipt, SqliteKnowledgeRepository,
};
pub use service::knowledge_service::{KnowledgeEditor, Notice};
pub use text::align::align_topics;
pub use text::classify::{classify_line, LineKind};
pub use text::compiler::compile_text;
pub use text::parser::{parse_text, ParsedTopic};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
