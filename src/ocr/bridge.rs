use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::ocr::TextRecognizer;

/// One recognized line as reported by the OCR script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrToken {
    pub text: String,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

fn default_confidence() -> f32 {
    1.0
}

#[derive(Debug, Clone)]
pub struct OcrBridge {
    script_path: PathBuf,
    interpreter: String,
    lang: String,
    min_confidence: f32,
}

impl OcrBridge {
    pub fn new(script_path: PathBuf) -> Self {
        Self {
            script_path,
            interpreter: "python3".to_string(),
            lang: "eng".to_string(),
            min_confidence: 0.0,
        }
    }

    pub fn with_interpreter(mut self, interpreter: String) -> Self {
        self.interpreter = interpreter;
        self
    }

    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = lang;
        self
    }

    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn run(&self, image_path: &Path) -> Result<Vec<OcrToken>> {
        let output = Command::new(&self.interpreter)
            .arg(&self.script_path)
            .arg("--image")
            .arg(image_path)
            .arg("--lang")
            .arg(&self.lang)
            .output()
            .with_context(|| "failed to invoke OCR bridge")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("OCR bridge failed: {stderr}");
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_tokens(&stdout)
    }

    /// Joins the kept lines with `\n`, one line per recognized row.
    pub fn join_tokens(&self, tokens: &[OcrToken]) -> String {
        tokens
            .iter()
            .filter(|token| token.confidence >= self.min_confidence)
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_tokens(raw: &str) -> Result<Vec<OcrToken>> {
    serde_json::from_str(raw).with_context(|| "failed to parse OCR JSON response")
}

impl TextRecognizer for OcrBridge {
    fn recognize(&self, image: &Path) -> Result<String> {
        let tokens = self.run(image)?;
        tracing::debug!(lines = tokens.len(), image = %image.display(), "OCR finished");
        Ok(self.join_tokens(&tokens))
    }
}
