use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Command;

use crate::core::model::PageType;
use crate::core::page_classifier::{ClassifierInput, PageClassifier};

#[derive(Debug, Deserialize)]
struct ClassifierResponse {
    label: String,
}

/// Runs an external page-type classifier on the page image. The script
/// prints `{"label": "..."}` on stdout.
#[derive(Debug, Clone)]
pub struct ClassifierBridge {
    script_path: PathBuf,
    interpreter: String,
}

impl ClassifierBridge {
    pub fn new(script_path: PathBuf) -> Self {
        Self {
            script_path,
            interpreter: "python3".to_string(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: String) -> Self {
        self.interpreter = interpreter;
        self
    }
}

fn parse_label(raw: &str) -> Result<PageType> {
    let response: ClassifierResponse =
        serde_json::from_str(raw).with_context(|| "failed to parse classifier JSON response")?;
    Ok(PageType::from_label(&response.label))
}

impl PageClassifier for ClassifierBridge {
    fn classify(&self, input: &ClassifierInput<'_>) -> Result<PageType> {
        let image = input
            .image
            .ok_or_else(|| anyhow::anyhow!("classifier bridge needs a page image"))?;

        let output = Command::new(&self.interpreter)
            .arg(&self.script_path)
            .arg("--image")
            .arg(image)
            .output()
            .with_context(|| "failed to invoke classifier bridge")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("classifier bridge failed: {stderr}");
        }

        parse_label(&String::from_utf8_lossy(&output.stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_and_custom_labels() -> Result<()> {
        assert_eq!(parse_label(r#"{"label": "Text"}"#)?, PageType::Text);
        assert_eq!(parse_label(r#"{"label": "Math"}"#)?, PageType::Math);
        assert_eq!(
            parse_label(r#"{"label": "Table"}"#)?,
            PageType::Other("Table".to_string())
        );
        Ok(())
    }

    #[test]
    fn requires_an_image() {
        let bridge = ClassifierBridge::new(PathBuf::from("classify.py"));
        assert!(bridge.classify(&ClassifierInput::text("anything")).is_err());
    }
}
