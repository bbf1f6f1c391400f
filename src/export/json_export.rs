use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::model::StudyDocument;
use crate::export::Exporter;

pub const JSON_FILE_NAME: &str = "analysis.json";

/// Pretty-printed JSON of every page result, in page order.
pub fn render_json(document: &StudyDocument) -> Result<String> {
    serde_json::to_string_pretty(document).context("Failed to serialize study document")
}

#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for JsonExporter {
    fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn file_name(&self) -> &'static str {
        JSON_FILE_NAME
    }

    fn render(&self, document: &StudyDocument) -> Result<String> {
        render_json(document)
    }
}
