use std::fmt;

use serde::{Deserialize, Serialize};

/// Page label produced by the external classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum PageType {
    Math,
    Text,
    #[default]
    Unknown,
    /// Any other classifier-defined tag, kept verbatim.
    Other(String),
}

impl PageType {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Math" => PageType::Math,
            "Text" => PageType::Text,
            "Unknown" | "" => PageType::Unknown,
            other => PageType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PageType::Math => "Math",
            PageType::Text => "Text",
            PageType::Unknown => "Unknown",
            PageType::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for PageType {
    fn from(label: String) -> Self {
        PageType::from_label(&label)
    }
}

impl From<PageType> for String {
    fn from(page_type: PageType) -> Self {
        page_type.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MathOutcome {
    #[default]
    None,
    Symbolic {
        expression: String,
        result: String,
    },
    Solved {
        expression: String,
        result: String,
    },
}

impl MathOutcome {
    pub fn is_none(&self) -> bool {
        matches!(self, MathOutcome::None)
    }

    pub fn expression(&self) -> Option<&str> {
        match self {
            MathOutcome::None => None,
            MathOutcome::Symbolic { expression, .. } | MathOutcome::Solved { expression, .. } => {
                Some(expression)
            }
        }
    }

    pub fn result(&self) -> Option<&str> {
        match self {
            MathOutcome::None => None,
            MathOutcome::Symbolic { result, .. } | MathOutcome::Solved { result, .. } => {
                Some(result)
            }
        }
    }
}

/// A trimmed sentence and its byte offset in the recognized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    pub index: usize,
    pub sentence: Sentence,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Summary {
    pub sentences: Vec<Sentence>,
    pub text: String,
}

impl Summary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Joins sentences already ordered by offset.
    pub fn from_sentences(sentences: Vec<Sentence>) -> Self {
        let text = sentences
            .iter()
            .map(|sentence| sentence.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self { sentences, text }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisResult {
    pub full_text: String,
    pub page_type: PageType,
    pub math: MathOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

impl AnalysisResult {
    /// Fully degraded result: Unknown page, no math, no summary.
    pub fn degraded(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            page_type: PageType::Unknown,
            math: MathOutcome::None,
            summary: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.page_type == PageType::Unknown && self.math.is_none() && self.summary.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudyDocument {
    pub pages: Vec<AnalysisResult>,
}
