use unicode_segmentation::UnicodeSegmentation;

use crate::core::model::Sentence;

/// Splits text into trimmed, non-empty sentences on Unicode sentence
/// boundaries. A line break ends a sentence, so each OCR line stands on its
/// own. Every sentence is a substring of `text` at its byte `offset`.
pub fn segment(text: &str) -> Vec<Sentence> {
    text.split_sentence_bound_indices()
        .filter_map(|(offset, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            let lead = raw.len() - raw.trim_start().len();
            Some(Sentence {
                text: trimmed.to_string(),
                offset: offset + lead,
            })
        })
        .collect()
}
