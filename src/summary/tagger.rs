//! Word-class tagging for sentence scoring.
//!
//! [`WordClassTagger`] runs layered-nlp's dictionary part-of-speech resolver
//! over a sentence and folds its tags into the coarse classes the scorer
//! needs. Any other tagger can be plugged in through [`PosTagger`].

use std::collections::HashMap;

use layered_nlp::{create_line_from_string, x, LToken, TextTag};
use layered_part_of_speech::{POSTagResolver, Tag as PosTag};
use once_cell::sync::Lazy;

static RESOLVER: Lazy<POSTagResolver> = Lazy::new(POSTagResolver::default);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Pronoun,
    Number,
    Other,
}

impl Tag {
    /// Nouns, verbs and adjectives carry a sentence's content.
    pub fn is_content(self) -> bool {
        matches!(
            self,
            Tag::Noun | Tag::ProperNoun | Tag::Verb | Tag::Adjective
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedToken<'a> {
    pub text: &'a str,
    pub offset: usize,
    pub tag: Tag,
}

/// Tags the word tokens of one sentence. Punctuation and whitespace are not
/// returned.
pub trait PosTagger: Send + Sync {
    fn tag<'a>(&self, sentence: &'a str) -> Vec<TaggedToken<'a>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WordClassTagger;

impl WordClassTagger {
    pub fn new() -> Self {
        Self
    }
}

impl PosTagger for WordClassTagger {
    fn tag<'a>(&self, sentence: &'a str) -> Vec<TaggedToken<'a>> {
        let line = create_line_from_string(sentence).run(&*RESOLVER);

        // one word can carry several dictionary senses
        let mut senses: HashMap<usize, Vec<PosTag>> = HashMap::new();
        for found in line.find(&x::attr::<PosTag>()) {
            let (start, _end) = found.range();
            senses.entry(start).or_default().push((**found.attr()).clone());
        }

        let mut cursor = 0;
        let mut tokens = Vec::new();
        for (index, token) in line.ll_tokens().iter().enumerate() {
            let (text, text_tag) = match token.get_token() {
                LToken::Text(text, text_tag) => (text.as_str(), text_tag),
                LToken::Value => continue,
            };
            let tag = if *text_tag == TextTag::WORD {
                word_class(senses.get(&index).map(Vec::as_slice).unwrap_or_default())
            } else if *text_tag == TextTag::NATN {
                Tag::Number
            } else {
                continue;
            };
            let Some(found) = sentence[cursor..].find(text) else {
                continue;
            };
            let offset = cursor + found;
            cursor = offset + text.len();
            tokens.push(TaggedToken {
                text: &sentence[offset..cursor],
                offset,
                tag,
            });
        }
        tokens
    }
}

/// Pronouns stay closed-class even when the dictionary also lists a noun
/// sense. Words the dictionary does not know are treated as nouns.
fn word_class(senses: &[PosTag]) -> Tag {
    if senses.is_empty() {
        return Tag::Noun;
    }
    let has = |tag: PosTag| senses.contains(&tag);
    if has(PosTag::Pronoun) {
        Tag::Pronoun
    } else if has(PosTag::ProperNoun) {
        Tag::ProperNoun
    } else if has(PosTag::Noun) {
        Tag::Noun
    } else if has(PosTag::Verb) {
        Tag::Verb
    } else if has(PosTag::Adjective) {
        Tag::Adjective
    } else {
        Tag::Other
    }
}
