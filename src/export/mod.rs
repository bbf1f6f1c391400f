pub mod json_export;
pub mod text_export;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::model::StudyDocument;

pub use json_export::{render_json, JsonExporter};
pub use text_export::TextExporter;

/// Renders a study document into a single file under an output directory.
pub trait Exporter {
    fn out_dir(&self) -> &Path;

    fn file_name(&self) -> &'static str;

    fn render(&self, document: &StudyDocument) -> Result<String>;

    /// Writes the rendered document and returns the written path.
    fn export(&self, document: &StudyDocument) -> Result<PathBuf> {
        let out_dir = self.out_dir();
        fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

        let path = out_dir.join(self.file_name());
        let rendered = self.render(document)?;
        fs::write(&path, rendered)
            .with_context(|| format!("Failed to write: {}", path.display()))?;

        tracing::debug!(path = %path.display(), pages = document.pages.len(), "exported");
        Ok(path)
    }
}
