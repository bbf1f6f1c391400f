pub mod eval;
pub mod extract;
pub mod normalize;

use unicode_normalization::UnicodeNormalization;

use crate::core::config::AnalysisConfig;
use crate::core::error::MathResult;
use crate::core::model::MathOutcome;

pub use eval::ArithmeticEvaluator;
pub use extract::{candidates, ExpressionCandidate};
pub use normalize::{normalize, NormalizedExpression};

/// Finds the first expression on a page that either evaluates or is
/// recognizably symbolic. No ranking between candidates: reading order wins.
#[derive(Debug, Clone)]
pub struct MathResolver {
    evaluator: ArithmeticEvaluator,
}

impl MathResolver {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            evaluator: ArithmeticEvaluator::new(config.symbolic_label.clone()),
        }
    }

    pub fn resolve(&self, text: &str) -> MathOutcome {
        // Full-width digits and operators fold to ASCII.
        let folded: String = text.nfkc().collect();

        for candidate in candidates(&folded) {
            match self.try_candidate(candidate.text) {
                Ok(outcome) => {
                    tracing::debug!(
                        start = candidate.start,
                        expression = outcome.expression().unwrap_or_default(),
                        "resolved math candidate"
                    );
                    return outcome;
                }
                Err(err) => {
                    tracing::debug!(candidate = candidate.text, %err, "skipping math candidate");
                }
            }
        }

        MathOutcome::None
    }

    fn try_candidate(&self, candidate: &str) -> MathResult<MathOutcome> {
        let expression = normalize(candidate)?;
        self.evaluator.evaluate(&expression)
    }
}

impl Default for MathResolver {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn solved(expression: &str, result: &str) -> MathOutcome {
        MathOutcome::Solved {
            expression: expression.to_string(),
            result: result.to_string(),
        }
    }

    #[test]
    fn text_without_digits_has_no_math() {
        let resolver = MathResolver::default();
        assert_eq!(
            resolver.resolve("The mitochondria is the powerhouse of the cell."),
            MathOutcome::None
        );
        assert_eq!(resolver.resolve(""), MathOutcome::None);
    }

    #[test]
    fn solves_expression_with_stated_placeholder() {
        let resolver = MathResolver::default();
        assert_eq!(resolver.resolve("3 + 4 * 2 = ?"), solved("3 + 4 * 2", "11"));
    }

    #[test]
    fn flags_symbolic_expressions() {
        let resolver = MathResolver::default();
        let outcome = resolver.resolve("2x + 3 = 7");
        match outcome {
            MathOutcome::Symbolic { expression, result } => {
                assert!(!expression.is_empty());
                assert_eq!(result, "Symbolic Evaluation Required");
            }
            other => panic!("expected symbolic outcome, got {other:?}"),
        }
    }

    #[test]
    fn skips_division_by_zero_and_takes_next_candidate() {
        let resolver = MathResolver::default();
        assert_eq!(resolver.resolve("10 / 0 and 6 / 2"), solved("6 / 2", "3"));
        assert_eq!(resolver.resolve("10 / 0"), MathOutcome::None);
    }

    #[test]
    fn first_candidate_in_reading_order_wins() {
        let resolver = MathResolver::default();
        assert_eq!(
            resolver.resolve("Q1: 2 + 2\nQ2: 100 * 100"),
            solved("1", "1")
        );
        assert_eq!(
            resolver.resolve("Warm-up: 2 + 2, then 100 * 100"),
            solved("2 + 2", "4")
        );
    }

    #[test]
    fn maps_ocr_glyphs_and_full_width_digits() {
        let resolver = MathResolver::default();
        assert_eq!(resolver.resolve("12 ÷ 4"), solved("12 / 4", "3"));
        assert_eq!(resolver.resolve("2 × 3"), solved("2 * 3", "6"));
        assert_eq!(resolver.resolve("１２＋３"), solved("12+3", "15"));
    }

    #[test]
    fn skips_malformed_candidates() {
        let resolver = MathResolver::default();
        assert_eq!(resolver.resolve("(1 + 2 is open"), MathOutcome::None);
        assert_eq!(
            resolver.resolve("see 4 + then (5 - 1)"),
            solved("(5 - 1)", "4")
        );
    }

    #[test]
    fn overflowing_literal_is_not_solved() {
        let resolver = MathResolver::default();
        let literal = "9".repeat(400);
        assert_eq!(resolver.resolve(&literal), MathOutcome::None);
        assert_eq!(
            resolver.resolve(&format!("{literal} then 2 + 2")),
            solved("2 + 2", "4")
        );
    }

    #[test]
    fn deep_nesting_is_skipped() {
        let resolver = MathResolver::default();
        let deep = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
        assert_eq!(resolver.resolve(&deep), MathOutcome::None);
        assert_eq!(
            resolver.resolve(&format!("{deep} and 3 * 3")),
            solved("3 * 3", "9")
        );
    }

    #[test]
    fn uses_configured_symbolic_label() {
        let config = AnalysisConfig {
            symbolic_label: "needs algebra".to_string(),
            ..AnalysisConfig::default()
        };
        let resolver = MathResolver::new(&config);
        assert_eq!(resolver.resolve("y = 3x").result(), None);
        assert_eq!(resolver.resolve("x - 4").result(), Some("needs algebra"));
    }
}
