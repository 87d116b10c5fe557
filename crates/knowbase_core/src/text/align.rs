//! Positional EN/VI alignment.
//!
//! # Responsibility
//! - Merge two independently parsed topic lists into one bilingual set.
//! - Synthesize placeholder titles where one language is shorter.
//!
//! # Invariants
//! - Output length is `max(en.len(), vi.len())`.
//! - Index `i` of the output is built from index `i` of each input only.
//! - `title.vi` falls back to the EN title before using a placeholder.

use crate::model::lang::Lang;
use crate::model::topic::{placeholder_title, LangLines, LangText, Topic, TopicSet};
use crate::text::parser::ParsedTopic;

/// Aligns EN and VI topic lists by position.
pub fn align_topics(en: Vec<ParsedTopic>, vi: Vec<ParsedTopic>) -> TopicSet {
    let count = en.len().max(vi.len());
    let mut en = en.into_iter();
    let mut vi = vi.into_iter();
    let mut topics = Vec::with_capacity(count);

    for index in 0..count {
        let number = index + 1;
        let en_topic = en.next();
        let vi_topic = vi.next();

        let title_en = en_topic
            .as_ref()
            .map(|topic| topic.title.clone())
            .unwrap_or_else(|| placeholder_title(Lang::En, number));
        let title_vi = match (&vi_topic, &en_topic) {
            (Some(topic), _) => topic.title.clone(),
            (None, Some(topic)) => topic.title.clone(),
            (None, None) => placeholder_title(Lang::Vi, number),
        };

        topics.push(Topic::new(
            LangText::new(title_en, title_vi),
            LangLines::new(
                en_topic.map(|topic| topic.points).unwrap_or_default(),
                vi_topic.map(|topic| topic.points).unwrap_or_default(),
            ),
        ));
    }

    TopicSet::from_topics(topics)
}

#[cfg(test)]
mod tests {
    use super::align_topics;
    use crate::text::parser::ParsedTopic;

    fn parsed(title: &str, points: &[&str]) -> ParsedTopic {
        ParsedTopic {
            title: title.to_string(),
            points: points.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn vi_title_falls_back_to_en_when_vi_is_missing() {
        let set = align_topics(
            vec![parsed("Shipping", &["Worldwide"]), parsed("Returns", &[])],
            Vec::new(),
        );
        assert_eq!(set.len(), 2);
        for topic in set.iter() {
            assert_eq!(topic.title.vi, topic.title.en);
            assert!(topic.content.vi.is_empty());
        }
        assert_eq!(set.get(0).unwrap().content.en, vec!["Worldwide"]);
    }

    #[test]
    fn en_title_gets_placeholder_when_en_is_shorter() {
        let set = align_topics(
            vec![parsed("Shipping", &[])],
            vec![parsed("Vận chuyển", &["Toàn cầu"]), parsed("Đổi trả", &["30 ngày"])],
        );
        let second = set.get(1).unwrap();
        assert_eq!(second.title.en, "Topic 2");
        assert_eq!(second.title.vi, "Đổi trả");
        assert!(second.content.en.is_empty());
        assert_eq!(second.content.vi, vec!["30 ngày"]);
    }

    #[test]
    fn positional_merge_ignores_title_similarity() {
        let set = align_topics(
            vec![parsed("Shipping", &[]), parsed("Returns", &[])],
            vec![parsed("Đổi trả", &[]), parsed("Vận chuyển", &[])],
        );
        assert_eq!(set.get(0).unwrap().title.en, "Shipping");
        assert_eq!(set.get(0).unwrap().title.vi, "Đổi trả");
    }

    #[test]
    fn empty_inputs_align_to_empty_set() {
        assert!(align_topics(Vec::new(), Vec::new()).is_empty());
    }
}
