use crate::core::model::{ScoredSentence, Sentence};
use crate::summary::tagger::PosTagger;

pub const FIRST_SENTENCE_BONUS: f64 = 1.0;
pub const LAST_SENTENCE_BONUS: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct SentenceScorer<'t, T: PosTagger + ?Sized> {
    tagger: &'t T,
}

impl<'t, T: PosTagger + ?Sized> SentenceScorer<'t, T> {
    pub fn new(tagger: &'t T) -> Self {
        Self { tagger }
    }

    /// Number of noun, verb and adjective tokens.
    pub fn content_score(&self, text: &str) -> usize {
        self.tagger
            .tag(text)
            .iter()
            .filter(|token| token.tag.is_content())
            .count()
    }

    pub fn score(&self, sentence: &Sentence, index: usize, total: usize) -> ScoredSentence {
        let score = self.content_score(&sentence.text) as f64 + positional_bonus(index, total);
        ScoredSentence {
            index,
            sentence: sentence.clone(),
            score,
        }
    }
}

/// The opening sentence outranks the closing one; a single sentence counts as
/// the opening.
pub fn positional_bonus(index: usize, total: usize) -> f64 {
    if index == 0 {
        FIRST_SENTENCE_BONUS
    } else if index + 1 == total {
        LAST_SENTENCE_BONUS
    } else {
        0.0
    }
}
