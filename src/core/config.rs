use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::model::PageType;

pub const DEFAULT_SENTENCE_COUNT: usize = 3;
pub const DEFAULT_SYMBOLIC_LABEL: &str = "Symbolic Evaluation Required";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sentences kept in a summary; pages with this many or fewer are not summarized.
    pub sentence_count: usize,
    /// Result text reported for expressions that contain a variable.
    pub symbolic_label: String,
    /// Page label that enables summarization.
    pub summarize_label: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sentence_count: DEFAULT_SENTENCE_COUNT,
            symbolic_label: DEFAULT_SYMBOLIC_LABEL.to_string(),
            summarize_label: PageType::Text.label().to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: AnalysisConfig = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_sentence_count(mut self, sentence_count: usize) -> Self {
        self.sentence_count = sentence_count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.sentence_count == 0 {
            anyhow::bail!("sentence_count must be at least 1");
        }
        if self.symbolic_label.trim().is_empty() {
            anyhow::bail!("symbolic_label must not be empty");
        }
        Ok(())
    }

    pub fn summarizes(&self, page_type: &PageType) -> bool {
        page_type.label() == self.summarize_label
    }
}
