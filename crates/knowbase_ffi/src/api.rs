//! FFI use-case API for the knowledge editor screen.
//!
//! # Responsibility
//! - Expose one process-wide knowledge editing session to Dart via FRB.
//! - Keep error semantics simple: every call returns an envelope.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Topic and line indices are positional in the current topic order.
//! - The session database is opened lazily on first use.

use knowbase_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    KnowledgeEditor, Lang, SqliteKnowledgeRepository, Topic, TopicSet,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const KNOWLEDGE_DB_FILE_NAME: &str = "knowbase.sqlite3";
const KNOWLEDGE_DB_ENV: &str = "KNOWBASE_DB_PATH";

static KNOWLEDGE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<Option<KnowledgeEditor<SqliteKnowledgeRepository>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the knowledge database location before the session is opened.
///
/// # FFI contract
/// - Must be called before any `knowledge_*` call to take effect.
/// - Returns empty string on success and error message on conflict.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_knowledge_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "knowledge db path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = KNOWLEDGE_DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "knowledge db already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// One bilingual topic row as rendered by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeTopicView {
    /// Session-stable topic id for row keys.
    pub id: String,
    pub title_en: String,
    pub title_vi: String,
    pub content_en: Vec<String>,
    pub content_vi: Vec<String>,
}

/// Envelope returned by every knowledge call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeResponse {
    /// Whether the call applied / succeeded.
    pub ok: bool,
    /// Human-readable notification text.
    pub message: String,
    /// Snapshot of the topic set after the call.
    pub topics: Vec<KnowledgeTopicView>,
}

impl KnowledgeResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            topics: Vec::new(),
        }
    }
}

/// Fetches both languages and rebuilds the session's topic set.
#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_load() -> KnowledgeResponse {
    with_session(|editor| {
        let notice = futures::executor::block_on(editor.load());
        (notice.is_ok(), notice.to_string())
    })
}

/// Compiles and stores both languages; edits stay in memory on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_save() -> KnowledgeResponse {
    with_session(|editor| {
        let notice = futures::executor::block_on(editor.save());
        (notice.is_ok(), notice.to_string())
    })
}

/// Returns the current topic set without touching storage.
#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_topics() -> KnowledgeResponse {
    with_session(|_| (true, String::new()))
}

/// Returns the text that would be stored for `lang`.
#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_preview(lang: String) -> KnowledgeResponse {
    with_lang(&lang, |editor, lang| (true, editor.compiled(lang)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_add_topic() -> KnowledgeResponse {
    with_session(|editor| {
        editor.add_topic();
        (true, String::new())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_remove_topic(index: u32) -> KnowledgeResponse {
    with_session(|editor| applied(editor.remove_topic(index as usize)))
}

#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_set_title(index: u32, lang: String, text: String) -> KnowledgeResponse {
    with_lang(&lang, |editor, lang| {
        applied(editor.set_title(index as usize, lang, text))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_add_line(index: u32, lang: String) -> KnowledgeResponse {
    with_lang(&lang, |editor, lang| {
        applied(editor.add_line(index as usize, lang))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_remove_line(index: u32, lang: String, line_index: u32) -> KnowledgeResponse {
    with_lang(&lang, |editor, lang| {
        applied(editor.remove_line(index as usize, lang, line_index as usize))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_set_line(
    index: u32,
    lang: String,
    line_index: u32,
    text: String,
) -> KnowledgeResponse {
    with_lang(&lang, |editor, lang| {
        applied(editor.set_line(index as usize, lang, line_index as usize, text))
    })
}

/// Clears the in-memory topic set. Persisting the reset requires a save.
#[flutter_rust_bridge::frb(sync)]
pub fn knowledge_reset_all() -> KnowledgeResponse {
    with_session(|editor| {
        editor.reset_all();
        (true, String::new())
    })
}

fn applied(changed: bool) -> (bool, String) {
    if changed {
        (true, String::new())
    } else {
        (false, "index out of range; nothing changed".to_string())
    }
}

fn resolve_knowledge_db_path() -> PathBuf {
    KNOWLEDGE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(KNOWLEDGE_DB_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(KNOWLEDGE_DB_FILE_NAME)
        })
        .clone()
}

fn with_lang(
    lang: &str,
    f: impl FnOnce(&mut KnowledgeEditor<SqliteKnowledgeRepository>, Lang) -> (bool, String),
) -> KnowledgeResponse {
    match lang.parse::<Lang>() {
        Ok(lang) => with_session(|editor| f(editor, lang)),
        Err(err) => KnowledgeResponse::failure(err.to_string()),
    }
}

fn with_session(
    f: impl FnOnce(&mut KnowledgeEditor<SqliteKnowledgeRepository>) -> (bool, String),
) -> KnowledgeResponse {
    let mut guard = match SESSION.lock() {
        Ok(guard) => guard,
        Err(_) => return KnowledgeResponse::failure("knowledge session lock poisoned"),
    };

    if guard.is_none() {
        let path = resolve_knowledge_db_path();
        match SqliteKnowledgeRepository::open(&path) {
            Ok(repo) => *guard = Some(KnowledgeEditor::new(repo)),
            Err(err) => {
                log::error!(
                    "event=knowledge_session module=ffi status=error error_code=db_open_failed error={err}"
                );
                return KnowledgeResponse::failure(format!("knowledge DB open failed: {err}"));
            }
        }
    }

    let Some(editor) = guard.as_mut() else {
        return KnowledgeResponse::failure("knowledge session unavailable");
    };
    let (ok, message) = f(editor);
    KnowledgeResponse {
        ok,
        message,
        topics: to_topic_views(editor.topics()),
    }
}

fn to_topic_views(set: &TopicSet) -> Vec<KnowledgeTopicView> {
    set.iter().map(to_topic_view).collect()
}

fn to_topic_view(topic: &Topic) -> KnowledgeTopicView {
    KnowledgeTopicView {
        id: topic.id.to_string(),
        title_en: topic.title.en.clone(),
        title_vi: topic.title.vi.clone(),
        content_en: topic.content.en.clone(),
        content_vi: topic.content.vi.clone(),
    }
}
