//! Knowledge persistence gateway contract and implementations.
//!
//! # Responsibility
//! - Define the async per-language fetch/save contract used by the editor.
//! - Provide a SQLite-backed store and an in-memory store.
//!
//! # Invariants
//! - Fetching a language with nothing stored yields an empty `content`.
//! - Saving one language overwrites its whole blob and never touches the
//!   other language.
//! - Logs carry lang/byte counts only, never knowledge text.

use crate::db::{migrations, open_db, DbError};
use crate::model::lang::Lang;
use async_trait::async_trait;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Raw knowledge text stored for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeDocument {
    pub content: String,
}

/// Acknowledgement returned by a save call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReceipt {
    pub success: bool,
}

/// Gateway transport/storage error.
#[derive(Debug)]
pub enum GatewayError {
    Db(DbError),
    /// Backend cannot serve the request right now.
    Unavailable(String),
    /// Backend answered but refused to store the text.
    Rejected { lang: Lang },
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "knowledge gateway unavailable: {message}"),
            Self::Rejected { lang } => write!(f, "knowledge save rejected for `{lang}`"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::Rejected { .. } => None,
        }
    }
}

impl From<DbError> for GatewayError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Per-language knowledge text storage.
#[async_trait]
pub trait KnowledgeGateway: Send + Sync {
    /// Returns the stored text for `lang`, or empty content when none exists.
    async fn fetch_knowledge(&self, lang: Lang) -> GatewayResult<KnowledgeDocument>;
    /// Replaces the stored text for `lang`.
    async fn save_knowledge(&self, lang: Lang, content: &str) -> GatewayResult<SaveReceipt>;
}

#[async_trait]
impl<G: KnowledgeGateway + ?Sized> KnowledgeGateway for Arc<G> {
    async fn fetch_knowledge(&self, lang: Lang) -> GatewayResult<KnowledgeDocument> {
        (**self).fetch_knowledge(lang).await
    }

    async fn save_knowledge(&self, lang: Lang, content: &str) -> GatewayResult<SaveReceipt> {
        (**self).save_knowledge(lang, content).await
    }
}

/// SQLite-backed knowledge store; one row per language.
pub struct SqliteKnowledgeRepository {
    conn: Mutex<Connection>,
}

impl SqliteKnowledgeRepository {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `DbError::SchemaNotMigrated` when the connection has pending
    ///   migrations (open it through `open_db` first).
    /// - `DbError::SchemaTooNew` when a newer build wrote the database.
    pub fn try_new(conn: Connection) -> GatewayResult<Self> {
        migrations::ensure_current(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> GatewayResult<Self> {
        Self::try_new(open_db(path)?)
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> GatewayResult<T>) -> GatewayResult<T> {
        let guard = self
            .conn
            .lock()
            .map_err(|_| GatewayError::Unavailable("knowledge connection lock poisoned".into()))?;
        f(&guard)
    }

    fn fetch_sync(&self, lang: Lang) -> GatewayResult<KnowledgeDocument> {
        self.with_conn(|conn| {
            let content: Option<String> = conn
                .query_row(
                    "SELECT content FROM knowledge_texts WHERE lang = ?1;",
                    [lang.code()],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(KnowledgeDocument {
                content: content.unwrap_or_default(),
            })
        })
    }

    fn save_sync(&self, lang: Lang, content: &str) -> GatewayResult<SaveReceipt> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO knowledge_texts (lang, content, updated_at)
                 VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
                 ON CONFLICT(lang) DO UPDATE SET
                    content = excluded.content,
                    updated_at = excluded.updated_at;",
                params![lang.code(), content],
            )?;
            Ok(SaveReceipt { success: true })
        })
    }
}

#[async_trait]
impl KnowledgeGateway for SqliteKnowledgeRepository {
    async fn fetch_knowledge(&self, lang: Lang) -> GatewayResult<KnowledgeDocument> {
        let result = self.fetch_sync(lang);
        match &result {
            Ok(document) => info!(
                "event=knowledge_fetch module=repo status=ok lang={lang} bytes={}",
                document.content.len()
            ),
            Err(err) => error!(
                "event=knowledge_fetch module=repo status=error lang={lang} error={err}"
            ),
        }
        result
    }

    async fn save_knowledge(&self, lang: Lang, content: &str) -> GatewayResult<SaveReceipt> {
        let result = self.save_sync(lang, content);
        match &result {
            Ok(_) => info!(
                "event=knowledge_store module=repo status=ok lang={lang} bytes={}",
                content.len()
            ),
            Err(err) => error!(
                "event=knowledge_store module=repo status=error lang={lang} error={err}"
            ),
        }
        result
    }
}

/// Process-local knowledge store.
#[derive(Debug, Default)]
pub struct InMemoryKnowledgeStore {
    texts: Mutex<BTreeMap<Lang, String>>,
}

impl InMemoryKnowledgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with both languages.
    pub fn with_texts(en: impl Into<String>, vi: impl Into<String>) -> Self {
        let mut texts = BTreeMap::new();
        texts.insert(Lang::En, en.into());
        texts.insert(Lang::Vi, vi.into());
        Self {
            texts: Mutex::new(texts),
        }
    }

    /// Returns the stored text for `lang`, if any was ever saved.
    pub fn text(&self, lang: Lang) -> Option<String> {
        self.texts
            .lock()
            .ok()
            .and_then(|texts| texts.get(&lang).cloned())
    }
}

#[async_trait]
impl KnowledgeGateway for InMemoryKnowledgeStore {
    async fn fetch_knowledge(&self, lang: Lang) -> GatewayResult<KnowledgeDocument> {
        let texts = self
            .texts
            .lock()
            .map_err(|_| GatewayError::Unavailable("knowledge store lock poisoned".into()))?;
        Ok(KnowledgeDocument {
            content: texts.get(&lang).cloned().unwrap_or_default(),
        })
    }

    async fn save_knowledge(&self, lang: Lang, content: &str) -> GatewayResult<SaveReceipt> {
        let mut texts = self
            .texts
            .lock()
            .map_err(|_| GatewayError::Unavailable("knowledge store lock poisoned".into()))?;
        texts.insert(lang, content.to_string());
        Ok(SaveReceipt { success: true })
    }
}

#[cfg(test)]
mod tests {
    use super::{GatewayError, KnowledgeGateway, SqliteKnowledgeRepository};
    use crate::db::{open_db_in_memory, DbError};
    use crate::model::lang::Lang;
    use rusqlite::Connection;

    #[test]
    fn try_new_rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteKnowledgeRepository::try_new(conn)
            .err()
            .expect("unmigrated connection must be rejected");
        assert!(matches!(
            err,
            GatewayError::Db(DbError::SchemaNotMigrated { db_version: 0, expected: 1 })
        ));
        assert_eq!(
            err.to_string(),
            "knowledge schema version 0 is not migrated; expected 1"
        );
    }

    #[tokio::test]
    async fn save_overwrites_only_the_target_language() {
        let repo = SqliteKnowledgeRepository::try_new(open_db_in_memory().unwrap()).unwrap();
        repo.save_knowledge(Lang::En, "A:\n- one").await.unwrap();
        repo.save_knowledge(Lang::Vi, "B:\n- một").await.unwrap();
        repo.save_knowledge(Lang::En, "C:").await.unwrap();

        assert_eq!(repo.fetch_knowledge(Lang::En).await.unwrap().content, "C:");
        assert_eq!(
            repo.fetch_knowledge(Lang::Vi).await.unwrap().content,
            "B:\n- một"
        );
    }
}
