use std::path::Path;

use anyhow::Result;
use unicode_segmentation::UnicodeSegmentation;

use crate::core::model::PageType;

/// What a classifier may look at: the page image when one exists, and the
/// recognized text.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierInput<'a> {
    pub image: Option<&'a Path>,
    pub text: &'a str,
}

impl<'a> ClassifierInput<'a> {
    pub fn text(text: &'a str) -> Self {
        Self { image: None, text }
    }

    pub fn with_image(image: &'a Path, text: &'a str) -> Self {
        Self {
            image: Some(image),
            text,
        }
    }
}

pub trait PageClassifier {
    fn classify(&self, input: &ClassifierInput<'_>) -> Result<PageType>;
}

/// A fixed label, for callers that already know the page type.
#[derive(Debug, Clone)]
pub struct FixedClassifier(pub PageType);

impl PageClassifier for FixedClassifier {
    fn classify(&self, _input: &ClassifierInput<'_>) -> Result<PageType> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PageSignals {
    pub words: usize,
    pub sentences: usize,
    pub letters: usize,
    pub digits: usize,
    pub operators: usize,
}

impl PageSignals {
    pub fn from_text(text: &str) -> Self {
        let mut signals = PageSignals {
            words: text.unicode_words().count(),
            sentences: text
                .unicode_sentences()
                .filter(|sentence| !sentence.trim().is_empty())
                .count(),
            ..PageSignals::default()
        };
        for ch in text.chars() {
            if ch.is_alphabetic() {
                signals.letters += 1;
            } else if ch.is_ascii_digit() {
                signals.digits += 1;
            } else if matches!(ch, '+' | '-' | '*' | '/' | '=' | '×' | '÷' | '(' | ')') {
                signals.operators += 1;
            }
        }
        signals
    }

    pub fn math_ratio(&self) -> f32 {
        let math = (self.digits + self.operators) as f32;
        let total = math + self.letters as f32;
        if total == 0.0 {
            0.0
        } else {
            math / total
        }
    }
}

pub fn classify_page(signals: PageSignals) -> PageType {
    let math_ratio = signals.math_ratio();

    if signals.letters == 0 && signals.digits == 0 {
        PageType::Unknown
    } else if math_ratio >= 0.35 && signals.operators > 0 {
        PageType::Math
    } else if signals.words >= 20 && signals.sentences >= 2 && math_ratio < 0.2 {
        PageType::Text
    } else if signals.operators > 0 && signals.words < 8 {
        PageType::Math
    } else {
        PageType::Unknown
    }
}

/// Offline stand-in for the image classifier, driven by text signals alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignalClassifier;

impl SignalClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl PageClassifier for SignalClassifier {
    fn classify(&self, input: &ClassifierInput<'_>) -> Result<PageType> {
        let signals = PageSignals::from_text(input.text);
        let page_type = classify_page(signals);
        tracing::debug!(?signals, %page_type, "classified page from text signals");
        Ok(page_type)
    }
}
