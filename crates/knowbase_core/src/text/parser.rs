//! Single-language knowledge text parser.
//!
//! # Responsibility
//! - Split raw text into lines and group points under their titles.
//!
//! # Invariants
//! - Blank lines never open or close a topic.
//! - Lines before the first title are discarded.
//! - Only one leading bullet marker run (`-`/`–`) is stripped from a point.

use crate::text::classify::{classify_line, LineKind};
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n]+").expect("valid line break regex"));
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-–]+\s*").expect("valid bullet regex"));

/// One topic as read from a single language's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTopic {
    pub title: String,
    pub points: Vec<String>,
}

/// Parses one language's raw text into topics in source order.
pub fn parse_text(raw: &str) -> Vec<ParsedTopic> {
    let mut topics = Vec::new();
    let mut current: Option<ParsedTopic> = None;

    for line in LINE_BREAK_RE.split(raw) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match classify_line(line) {
            LineKind::Title => {
                if let Some(done) = current.take() {
                    topics.push(done);
                }
                let title = line.strip_suffix(':').unwrap_or(line).trim();
                current = Some(ParsedTopic {
                    title: title.to_string(),
                    points: Vec::new(),
                });
            }
            LineKind::Point => {
                if let Some(topic) = current.as_mut() {
                    topic.points.push(strip_bullet(line).to_string());
                }
            }
        }
    }

    if let Some(done) = current {
        topics.push(done);
    }
    topics
}

fn strip_bullet(line: &str) -> &str {
    match BULLET_RE.find(line) {
        Some(marker) => &line[marker.end()..],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_text, strip_bullet, ParsedTopic};

    #[test]
    fn parses_single_topic_with_points() {
        let topics = parse_text("Shipping:\n- Ships worldwide\n- 3-5 day delivery");
        assert_eq!(
            topics,
            vec![ParsedTopic {
                title: "Shipping".to_string(),
                points: vec!["Ships worldwide".to_string(), "3-5 day delivery".to_string()],
            }]
        );
    }

    #[test]
    fn discards_lines_before_first_title_and_blank_lines() {
        let topics = parse_text("orphan line\n\n  \nReturns:\n\n\n- 30 days\r\n\r\nWarranty:");
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].title, "Returns");
        assert_eq!(topics[0].points, vec!["30 days"]);
        assert_eq!(topics[1].title, "Warranty");
        assert!(topics[1].points.is_empty());
    }

    #[test]
    fn title_is_retrimmed_after_colon_removal() {
        let topics = parse_text("  Payment methods   :  ");
        assert_eq!(topics[0].title, "Payment methods");
    }

    #[test]
    fn strips_one_marker_run_and_keeps_inner_colons() {
        assert_eq!(strip_bullet("-- – Open: 9am"), "– Open: 9am");
        assert_eq!(strip_bullet("–– En dash"), "En dash");
        assert_eq!(strip_bullet("No marker"), "No marker");
    }

    #[test]
    fn unmarked_lines_become_points() {
        let topics = parse_text("Hours:\nOpen daily\n- closed on holidays");
        assert_eq!(topics[0].points, vec!["Open daily", "closed on holidays"]);
    }

    #[test]
    fn empty_input_yields_no_topics() {
        assert!(parse_text("").is_empty());
        assert!(parse_text("\n\n\n").is_empty());
    }
}
