pub mod bridge;
pub mod classifier_bridge;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub use bridge::{OcrBridge, OcrToken};
pub use classifier_bridge::ClassifierBridge;

/// Turns a page image into text. Implementations wrap an external engine.
pub trait TextRecognizer {
    fn recognize(&self, image: &Path) -> Result<String>;
}

/// A page that was already recognized and saved as UTF-8 text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextSource;

impl PlainTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextRecognizer for PlainTextSource {
    fn recognize(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read recognized text from {}", path.display()))
    }
}
