use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;

use crate::core::config::AnalysisConfig;
use crate::core::model::{AnalysisResult, PageType};
use crate::core::page_classifier::{ClassifierInput, PageClassifier};
use crate::math::MathResolver;
use crate::ocr::TextRecognizer;
use crate::summary::{ExtractiveSummarizer, PosTagger, WordClassTagger};

/// One recognized page waiting for analysis.
#[derive(Debug, Clone)]
pub struct PageText {
    pub text: String,
    pub page_type: PageType,
}

impl PageText {
    pub fn new(text: impl Into<String>, page_type: PageType) -> Self {
        Self {
            text: text.into(),
            page_type,
        }
    }
}

/// Math is always resolved; summaries are only built for prose pages. Holds no
/// per-page state, so one pipeline can serve many pages at once.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline<T: PosTagger = WordClassTagger> {
    config: AnalysisConfig,
    resolver: MathResolver,
    summarizer: ExtractiveSummarizer<T>,
}

impl AnalysisPipeline<WordClassTagger> {
    pub fn new(config: AnalysisConfig) -> Self {
        Self::with_tagger(config, WordClassTagger::new())
    }
}

impl Default for AnalysisPipeline<WordClassTagger> {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl<T: PosTagger> AnalysisPipeline<T> {
    pub fn with_tagger(config: AnalysisConfig, tagger: T) -> Self {
        let resolver = MathResolver::new(&config);
        let summarizer = ExtractiveSummarizer::with_tagger(tagger, config.sentence_count);
        Self {
            config,
            resolver,
            summarizer,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, full_text: &str, page_type: PageType) -> AnalysisResult {
        if full_text.trim().is_empty() {
            tracing::warn!("no recognized text; returning degraded result");
            return AnalysisResult::degraded(full_text);
        }

        let math = self.resolver.resolve(full_text);
        let summary = self
            .config
            .summarizes(&page_type)
            .then(|| self.summarizer.summarize(full_text));

        tracing::debug!(
            %page_type,
            math = ?math,
            summarized = summary.as_ref().is_some_and(|s| !s.is_empty()),
            "page analyzed"
        );

        AnalysisResult {
            full_text: full_text.to_string(),
            page_type,
            math,
            summary,
        }
    }

    /// Same as [`analyze`](Self::analyze), but takes collaborator results as
    /// they arrive. A failed recognition or classification degrades the whole
    /// result; recognized text is still carried in `full_text`.
    pub fn analyze_recognized(
        &self,
        text: Result<String>,
        page_type: Result<PageType>,
    ) -> AnalysisResult {
        let text = match text {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "text recognition failed");
                return AnalysisResult::degraded("");
            }
        };
        match page_type {
            Ok(page_type) => self.analyze(&text, page_type),
            Err(err) => {
                tracing::warn!(error = %err, "page classification failed");
                AnalysisResult::degraded(text)
            }
        }
    }

    /// Recognizes and classifies `image`, then analyzes it. Never fails.
    pub fn analyze_page(
        &self,
        recognizer: &dyn TextRecognizer,
        classifier: &dyn PageClassifier,
        image: &Path,
    ) -> AnalysisResult {
        let text = recognizer.recognize(image);
        let page_type = match &text {
            Ok(text) => classifier.classify(&ClassifierInput::with_image(image, text)),
            Err(_) => Ok(PageType::Unknown),
        };
        self.analyze_recognized(text, page_type)
    }

    /// Analyzes independent pages in parallel. Results keep input order.
    pub fn analyze_batch(&self, pages: &[PageText]) -> Vec<AnalysisResult> {
        pages
            .par_iter()
            .map(|page| self.analyze(&page.text, page.page_type.clone()))
            .collect()
    }
}

/// Analyzes one page with the default configuration.
pub fn analyze(full_text: &str, page_type: PageType) -> AnalysisResult {
    AnalysisPipeline::default().analyze(full_text, page_type)
}
