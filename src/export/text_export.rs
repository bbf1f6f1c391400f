use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::model::{AnalysisResult, MathOutcome, StudyDocument};
use crate::export::Exporter;

pub const TEXT_FILE_NAME: &str = "study.txt";

/// Plain-text study sheet: one section per page.
#[derive(Debug, Clone)]
pub struct TextExporter {
    out_dir: PathBuf,
}

impl TextExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }

    pub fn format_page(page: &AnalysisResult) -> String {
        let mut out = format!("Type: {}\n", page.page_type);

        match &page.math {
            MathOutcome::None => {}
            MathOutcome::Solved { expression, result } => {
                out.push_str(&format!("Math: {expression} = {result}\n"));
            }
            MathOutcome::Symbolic { expression, result } => {
                out.push_str(&format!("Math: {expression}: {result}\n"));
            }
        }

        if let Some(summary) = page.summary.as_ref().filter(|s| !s.is_empty()) {
            out.push_str(&format!("Summary: {}\n", summary.text));
        }

        out
    }
}

impl Exporter for TextExporter {
    fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn file_name(&self) -> &'static str {
        TEXT_FILE_NAME
    }

    fn render(&self, document: &StudyDocument) -> Result<String> {
        let mut sheet = String::new();
        for (idx, page) in document.pages.iter().enumerate() {
            sheet.push_str(&format!("=== Page {} ===\n", idx + 1));
            sheet.push_str(&Self::format_page(page));
            sheet.push('\n');
        }
        Ok(sheet)
    }
}
