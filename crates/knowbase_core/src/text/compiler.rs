//! Single-language knowledge text compiler.

use crate::model::lang::Lang;
use crate::model::topic::TopicSet;

/// Serializes `set` back into raw bullet text for `lang`.
///
/// Each topic becomes `Title:` followed by one `- point` line per point; an
/// empty point becomes a blank line. Topic blocks are separated by one blank
/// line and the result is trimmed.
pub fn compile_text(set: &TopicSet, lang: Lang) -> String {
    let blocks = set
        .iter()
        .map(|topic| {
            let mut block = format!("{}:", topic.title.get(lang));
            for point in topic.content.get(lang) {
                block.push('\n');
                if !point.is_empty() {
                    block.push_str("- ");
                    block.push_str(point);
                }
            }
            block
        })
        .collect::<Vec<_>>();

    blocks.join("\n\n").trim().to_string()
}
