//! Title/point line classification.
//!
//! A title is any line that starts with an ASCII letter (`A-Z` in either
//! case) and ends with `:`.
//! Ordinary sentences such as `Note: see below:` also match; stored content
//! depends on this exact rule, so it is kept as-is.

use once_cell::sync::Lazy;
use regex::Regex;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z].*:$").expect("valid title regex"));

/// Classification of one trimmed, non-empty line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opens a new topic.
    Title,
    /// Continues the open topic's point list.
    Point,
}

/// Classifies a trimmed, non-empty line.
pub fn classify_line(line: &str) -> LineKind {
    if TITLE_RE.is_match(line) {
        LineKind::Title
    } else {
        LineKind::Point
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_line, LineKind};

    #[test]
    fn capitalized_line_with_trailing_colon_is_title() {
        assert_eq!(classify_line("Shipping:"), LineKind::Title);
        assert_eq!(classify_line("A:"), LineKind::Title);
    }

    #[test]
    fn first_letter_test_ignores_case() {
        assert_eq!(classify_line("shipping policy:"), LineKind::Title);
    }

    #[test]
    fn colon_must_be_last_character() {
        assert_eq!(classify_line("Note: see below"), LineKind::Point);
        assert_eq!(classify_line("Shipping: "), LineKind::Point);
    }

    #[test]
    fn sentence_ending_in_colon_is_misread_as_title() {
        assert_eq!(classify_line("Note: see below:"), LineKind::Title);
    }

    #[test]
    fn non_latin_first_letter_is_point() {
        assert_eq!(classify_line("- Item:"), LineKind::Point);
        assert_eq!(classify_line("3 steps:"), LineKind::Point);
        assert_eq!(classify_line("Đổi trả:"), LineKind::Point);
    }

    #[test]
    fn case_folded_lookalikes_are_not_titles() {
        assert_eq!(classify_line("\u{212A}elvin:"), LineKind::Point);
        assert_eq!(classify_line("\u{017F}ection:"), LineKind::Point);
    }
}
