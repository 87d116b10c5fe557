//! Topic domain model and editor mutation operations.
//!
//! # Responsibility
//! - Define `Topic` (bilingual title + independent per-language points).
//! - Define `TopicSet`, the ordered collection owned by one editing session.
//! - Provide the index-addressed mutation operations used by the editor UI.
//!
//! # Invariants
//! - `content.en` and `content.vi` always exist; an empty vector is valid.
//! - EN and VI point vectors are independently sized.
//! - Mutation operations never fail: out-of-range indices are no-ops that
//!   report `false`.
//! - `TopicId` is assigned at construction and is never written into the
//!   knowledge text format.

use crate::model::lang::Lang;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable in-session identifier for a topic.
///
/// Lets UI layers key rows without depending on positional indices.
pub type TopicId = Uuid;

/// Returns the synthesized default title for the topic at 1-based `number`.
pub fn placeholder_title(lang: Lang, number: usize) -> String {
    match lang {
        Lang::En => format!("Topic {number}"),
        Lang::Vi => format!("Chủ đề {number}"),
    }
}

/// One text value per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangText {
    pub en: String,
    pub vi: String,
}

impl LangText {
    pub fn new(en: impl Into<String>, vi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            vi: vi.into(),
        }
    }

    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::En => &self.en,
            Lang::Vi => &self.vi,
        }
    }

    pub fn set(&mut self, lang: Lang, text: impl Into<String>) {
        match lang {
            Lang::En => self.en = text.into(),
            Lang::Vi => self.vi = text.into(),
        }
    }
}

/// One ordered point list per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangLines {
    pub en: Vec<String>,
    pub vi: Vec<String>,
}

impl LangLines {
    pub fn new(en: Vec<String>, vi: Vec<String>) -> Self {
        Self { en, vi }
    }

    pub fn get(&self, lang: Lang) -> &[String] {
        match lang {
            Lang::En => &self.en,
            Lang::Vi => &self.vi,
        }
    }

    pub fn get_mut(&mut self, lang: Lang) -> &mut Vec<String> {
        match lang {
            Lang::En => &mut self.en,
            Lang::Vi => &mut self.vi,
        }
    }
}

/// A titled group of bullet points, the unit of knowledge content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Session-stable id; regenerated on every load.
    pub id: TopicId,
    pub title: LangText,
    pub content: LangLines,
}

impl Topic {
    /// Creates a topic with a generated stable ID.
    pub fn new(title: LangText, content: LangLines) -> Self {
        Self::with_id(Uuid::new_v4(), title, content)
    }

    /// Creates a topic with a caller-provided ID.
    pub fn with_id(id: TopicId, title: LangText, content: LangLines) -> Self {
        Self { id, title, content }
    }

    /// Creates the blank topic inserted by "add topic": numbered default
    /// titles and one empty point per language.
    pub fn placeholder(number: usize) -> Self {
        Self::new(
            LangText::new(
                placeholder_title(Lang::En, number),
                placeholder_title(Lang::Vi, number),
            ),
            LangLines::new(vec![String::new()], vec![String::new()]),
        )
    }
}

/// Ordered topic collection for one editing session.
///
/// Serialized transparently as a JSON array of topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicSet {
    topics: Vec<Topic>,
}

impl TopicSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_topics(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn get(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Topic> {
        self.topics.iter()
    }

    /// Returns the current position of the topic with `id`.
    pub fn position_of(&self, id: TopicId) -> Option<usize> {
        self.topics.iter().position(|topic| topic.id == id)
    }

    /// Appends a placeholder topic numbered after the current length.
    ///
    /// Returns the new topic's stable ID.
    pub fn add_topic(&mut self) -> TopicId {
        let topic = Topic::placeholder(self.topics.len() + 1);
        let id = topic.id;
        self.topics.push(topic);
        id
    }

    /// Removes the topic at `index`, keeping the relative order of the rest.
    pub fn remove_topic(&mut self, index: usize) -> bool {
        if index >= self.topics.len() {
            return false;
        }
        self.topics.remove(index);
        true
    }

    pub fn set_title(&mut self, index: usize, lang: Lang, text: impl Into<String>) -> bool {
        match self.topics.get_mut(index) {
            Some(topic) => {
                topic.title.set(lang, text);
                true
            }
            None => false,
        }
    }

    /// Appends an empty point to `content[lang]` of topic `index`.
    pub fn add_line(&mut self, index: usize, lang: Lang) -> bool {
        match self.topics.get_mut(index) {
            Some(topic) => {
                topic.content.get_mut(lang).push(String::new());
                true
            }
            None => false,
        }
    }

    /// Removes one point; the language may end up with zero points.
    pub fn remove_line(&mut self, index: usize, lang: Lang, line_index: usize) -> bool {
        let Some(lines) = self.lines_mut(index, lang) else {
            return false;
        };
        if line_index >= lines.len() {
            return false;
        }
        lines.remove(line_index);
        true
    }

    pub fn set_line(
        &mut self,
        index: usize,
        lang: Lang,
        line_index: usize,
        text: impl Into<String>,
    ) -> bool {
        match self
            .lines_mut(index, lang)
            .and_then(|lines| lines.get_mut(line_index))
        {
            Some(line) => {
                *line = text.into();
                true
            }
            None => false,
        }
    }

    /// Drops every topic. There is no undo.
    pub fn reset_all(&mut self) {
        self.topics.clear();
    }

    fn lines_mut(&mut self, index: usize, lang: Lang) -> Option<&mut Vec<String>> {
        self.topics
            .get_mut(index)
            .map(|topic| topic.content.get_mut(lang))
    }
}

impl<'a> IntoIterator for &'a TopicSet {
    type Item = &'a Topic;
    type IntoIter = std::slice::Iter<'a, Topic>;

    fn into_iter(self) -> Self::IntoIter {
        self.topics.iter()
    }
}
