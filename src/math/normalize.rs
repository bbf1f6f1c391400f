use std::fmt;

use crate::core::error::{MathError, MathResult};

/// A cleaned expression over `0-9 . + - * / ( )` with single spaces between
/// tokens. Never empty and always carries a digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedExpression {
    text: String,
    has_variable: bool,
}

impl NormalizedExpression {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the candidate named `x` or `y` before filtering removed it.
    pub fn has_variable(&self) -> bool {
        self.has_variable
    }

    /// The expression with all whitespace removed, as the evaluator reads it.
    pub fn compact(&self) -> String {
        self.text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for NormalizedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

const ALLOWED: &str = "0123456789.+-*/()";

pub fn normalize(candidate: &str) -> MathResult<NormalizedExpression> {
    let replaced = candidate
        .replace('—', "/")
        .replace('÷', "/")
        .replace('×', "*")
        .replace(['\n', '\r'], "");

    let lhs = replaced.split('=').next().unwrap_or_default();
    let has_variable = lhs.contains(['x', 'y']);

    let filtered: String = lhs
        .chars()
        .filter(|c| ALLOWED.contains(*c) || c.is_whitespace())
        .collect();
    let text = filtered.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.is_empty() {
        return Err(MathError::CandidateRejected {
            reason: "empty after cleanup",
        });
    }
    if !text.chars().any(|c| c.is_ascii_digit()) {
        return Err(MathError::CandidateRejected {
            reason: "no digits",
        });
    }

    Ok(NormalizedExpression { text, has_variable })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn maps_ocr_glyphs_to_operators() -> MathResult<()> {
        assert_eq!(normalize("12 ÷ 4")?.as_str(), "12 / 4");
        assert_eq!(normalize("2 × 3")?.as_str(), "2 * 3");
        assert_eq!(normalize("9—3")?.as_str(), "9/3");
        Ok(())
    }

    #[test]
    fn drops_stated_answer_and_newlines() -> MathResult<()> {
        assert_eq!(normalize(" 3 + 4 * 2 = 11 ")?.as_str(), "3 + 4 * 2");
        assert_eq!(normalize("1\n2 + 3")?.as_str(), "12 + 3");
        Ok(())
    }

    #[test]
    fn rejects_candidates_without_digits() {
        assert!(matches!(
            normalize("   "),
            Err(MathError::CandidateRejected { .. })
        ));
        assert!(matches!(
            normalize(" ( . ) "),
            Err(MathError::CandidateRejected { .. })
        ));
        assert!(matches!(
            normalize("= 42"),
            Err(MathError::CandidateRejected { .. })
        ));
    }

    #[test]
    fn detects_variables_before_filtering() -> MathResult<()> {
        let expr = normalize("2x + 3 = 7")?;
        assert!(expr.has_variable());
        assert_eq!(expr.as_str(), "2 + 3");
        assert!(!normalize("2 + 3")?.has_variable());
        Ok(())
    }

    #[test]
    fn normalization_is_idempotent() -> MathResult<()> {
        for input in [" 3 + 4 * 2 = ?", "12 ÷ 4", "(1.5 +2)*  3", "10\n/ 0"] {
            let once = normalize(input)?;
            let twice = normalize(once.as_str())?;
            assert_eq!(once.as_str(), twice.as_str());
        }
        Ok(())
    }

    #[test]
    fn compact_form_strips_spaces() -> MathResult<()> {
        assert_eq!(normalize("( 1 + 2 ) * 3")?.compact(), "(1+2)*3");
        Ok(())
    }
}
