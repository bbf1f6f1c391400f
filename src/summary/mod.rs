pub mod score;
pub mod segment;
pub mod tagger;

use crate::core::config::DEFAULT_SENTENCE_COUNT;
use crate::core::model::{ScoredSentence, Summary};

pub use score::SentenceScorer;
pub use segment::segment;
pub use tagger::{PosTagger, Tag, TaggedToken, WordClassTagger};

/// Picks the highest-scoring sentences and replays them in page order.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer<T: PosTagger = WordClassTagger> {
    tagger: T,
    sentence_count: usize,
}

impl ExtractiveSummarizer<WordClassTagger> {
    pub fn new(sentence_count: usize) -> Self {
        Self::with_tagger(WordClassTagger::new(), sentence_count)
    }
}

impl Default for ExtractiveSummarizer<WordClassTagger> {
    fn default() -> Self {
        Self::new(DEFAULT_SENTENCE_COUNT)
    }
}

impl<T: PosTagger> ExtractiveSummarizer<T> {
    pub fn with_tagger(tagger: T, sentence_count: usize) -> Self {
        Self {
            tagger,
            sentence_count,
        }
    }

    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    /// Returns an empty summary when the page has no more sentences than the
    /// summary would keep.
    pub fn summarize(&self, text: &str) -> Summary {
        let sentences = segment(text);
        if sentences.len() <= self.sentence_count {
            tracing::debug!(
                sentences = sentences.len(),
                limit = self.sentence_count,
                "page too short to summarize"
            );
            return Summary::empty();
        }

        let scorer = SentenceScorer::new(&self.tagger);
        let total = sentences.len();
        let mut scored: Vec<ScoredSentence> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| scorer.score(sentence, index, total))
            .collect();

        // Stable: equal scores keep reading order.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.sentence_count);
        scored.sort_by_key(|entry| entry.sentence.offset);

        tracing::debug!(
            picked = ?scored.iter().map(|entry| entry.index).collect::<Vec<_>>(),
            total,
            "selected summary sentences"
        );

        Summary::from_sentences(scored.into_iter().map(|entry| entry.sentence).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use unicode_segmentation::UnicodeSegmentation;

    /// Every word is a noun, so scores are word counts plus position.
    struct AllNouns;

    impl PosTagger for AllNouns {
        fn tag<'a>(&self, sentence: &'a str) -> Vec<TaggedToken<'a>> {
            sentence
                .unicode_word_indices()
                .map(|(offset, text)| TaggedToken {
                    text,
                    offset,
                    tag: Tag::Noun,
                })
                .collect()
        }
    }

    const PAGE: &str = "Rain falls. It is so. Dense clouds gather moisture over mountains. \
                        And so on. Rivers carry water home.";

    #[test]
    fn short_pages_are_not_summarized() {
        let summarizer = ExtractiveSummarizer::new(3);
        assert!(summarizer.summarize("One idea. Two ideas.").is_empty());
        assert!(summarizer
            .summarize("First point. Second point. Third point.")
            .is_empty());
        assert!(summarizer.summarize("").is_empty());
    }

    #[test]
    fn keeps_top_sentences_in_page_order() {
        let summarizer = ExtractiveSummarizer::new(3);
        let summary = summarizer.summarize(PAGE);
        assert_eq!(
            summary.text,
            "Rain falls. Dense clouds gather moisture over mountains. Rivers carry water home."
        );
        let offsets: Vec<usize> = summary.sentences.iter().map(|s| s.offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted);
    }

    #[test]
    fn ties_resolve_to_reading_order() {
        let summarizer = ExtractiveSummarizer::with_tagger(AllNouns, 2);
        // scores: 3.0, 3.0, 3.0, 1.5
        let summary = summarizer.summarize("Aa bb. Cc dd ee. Ff gg hh. Ii.");
        assert_eq!(summary.text, "Aa bb. Cc dd ee.");
    }

    #[test]
    fn summary_never_exceeds_sentence_count() {
        let summarizer = ExtractiveSummarizer::with_tagger(AllNouns, 1);
        let summary = summarizer.summarize(PAGE);
        assert_eq!(summary.sentences.len(), 1);
        assert_eq!(
            summary.text,
            "Dense clouds gather moisture over mountains."
        );
    }
}
