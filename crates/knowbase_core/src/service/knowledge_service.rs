//! Knowledge editor session.
//!
//! # Responsibility
//! - Own the `TopicSet` for one editing session.
//! - Run the load sequence (fetch EN+VI concurrently, parse, align).
//! - Run the save sequence (compile EN+VI, store both concurrently).
//! - Convert gateway failures into user-facing `Notice` values.
//!
//! # Invariants
//! - A failed load leaves the topic set empty, never partially populated.
//! - Save never mutates the topic set, whether it succeeds or fails.
//! - Save succeeds only when both languages report success.
//! - No retry and no rollback is attempted on partial save failure.

use crate::model::lang::Lang;
use crate::model::topic::{TopicId, TopicSet};
use crate::repo::knowledge_repo::{GatewayError, GatewayResult, KnowledgeGateway, SaveReceipt};
use crate::text::align::align_topics;
use crate::text::compiler::compile_text;
use crate::text::parser::parse_text;
use futures::future::join;
use log::{error, info};
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// User-facing outcome of a load or save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Both languages were fetched and aligned.
    Loaded { topics: usize },
    /// At least one fetch failed; the topic set is empty.
    LoadFailed { message: String },
    /// Both languages were stored.
    Saved,
    /// At least one language was not stored; edits remain in memory.
    SaveFailed { message: String },
}

impl Notice {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Loaded { .. } | Self::Saved)
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded { topics } => write!(f, "Loaded {topics} topic(s)."),
            Self::LoadFailed { message } => write!(f, "Failed to load knowledge: {message}"),
            Self::Saved => write!(f, "Knowledge saved."),
            Self::SaveFailed { message } => write!(f, "Failed to save knowledge: {message}"),
        }
    }
}

/// Editor session over a knowledge gateway.
pub struct KnowledgeEditor<G: KnowledgeGateway> {
    gateway: G,
    topics: TopicSet,
}

impl<G: KnowledgeGateway> KnowledgeEditor<G> {
    /// Creates an editor with an empty topic set.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            topics: TopicSet::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }

    pub fn topics_mut(&mut self) -> &mut TopicSet {
        &mut self.topics
    }

    /// Returns the text that `save` would store for `lang`.
    pub fn compiled(&self, lang: Lang) -> String {
        compile_text(&self.topics, lang)
    }

    /// Replaces the topic set with freshly fetched and aligned content.
    pub async fn load(&mut self) -> Notice {
        let started_at = Instant::now();
        info!("event=knowledge_load module=service status=start");

        let (en, vi) = join(
            self.gateway.fetch_knowledge(Lang::En),
            self.gateway.fetch_knowledge(Lang::Vi),
        )
        .await;

        match (en, vi) {
            (Ok(en), Ok(vi)) => {
                let en_topics = parse_text(&en.content);
                let vi_topics = parse_text(&vi.content);
                info!(
                    "event=knowledge_load module=service status=ok duration_ms={} en_topics={} vi_topics={}",
                    started_at.elapsed().as_millis(),
                    en_topics.len(),
                    vi_topics.len()
                );
                self.topics = align_topics(en_topics, vi_topics);
                Notice::Loaded {
                    topics: self.topics.len(),
                }
            }
            (Err(err), _) | (_, Err(err)) => {
                self.topics.reset_all();
                error!(
                    "event=knowledge_load module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Notice::LoadFailed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Compiles and stores both languages.
    pub async fn save(&self) -> Notice {
        let started_at = Instant::now();
        let en_text = self.compiled(Lang::En);
        let vi_text = self.compiled(Lang::Vi);
        info!(
            "event=knowledge_save module=service status=start topics={} en_bytes={} vi_bytes={}",
            self.topics.len(),
            en_text.len(),
            vi_text.len()
        );

        let (en, vi) = join(
            self.gateway.save_knowledge(Lang::En, &en_text),
            self.gateway.save_knowledge(Lang::Vi, &vi_text),
        )
        .await;

        let failures = [(Lang::En, en), (Lang::Vi, vi)]
            .into_iter()
            .filter_map(|(lang, result)| accepted(lang, result).err())
            .map(|err| err.to_string())
            .collect::<Vec<_>>();

        if failures.is_empty() {
            info!(
                "event=knowledge_save module=service status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Notice::Saved
        } else {
            error!(
                "event=knowledge_save module=service status=error duration_ms={} failed={}",
                started_at.elapsed().as_millis(),
                failures.len()
            );
            Notice::SaveFailed {
                message: failures.join("; "),
            }
        }
    }

    pub fn add_topic(&mut self) -> TopicId {
        self.topics.add_topic()
    }

    pub fn remove_topic(&mut self, index: usize) -> bool {
        self.topics.remove_topic(index)
    }

    pub fn set_title(&mut self, index: usize, lang: Lang, text: impl Into<String>) -> bool {
        self.topics.set_title(index, lang, text)
    }

    pub fn add_line(&mut self, index: usize, lang: Lang) -> bool {
        self.topics.add_line(index, lang)
    }

    pub fn remove_line(&mut self, index: usize, lang: Lang, line_index: usize) -> bool {
        self.topics.remove_line(index, lang, line_index)
    }

    pub fn set_line(
        &mut self,
        index: usize,
        lang: Lang,
        line_index: usize,
        text: impl Into<String>,
    ) -> bool {
        self.topics.set_line(index, lang, line_index, text)
    }

    /// Clears the in-memory set; persisting it requires `save`.
    pub fn reset_all(&mut self) {
        self.topics.reset_all();
    }
}

fn accepted(lang: Lang, result: GatewayResult<SaveReceipt>) -> GatewayResult<()> {
    match result {
        Ok(SaveReceipt { success: true }) => Ok(()),
        Ok(SaveReceipt { success: false }) => Err(GatewayError::Rejected { lang }),
        Err(err) => Err(err),
    }
}
