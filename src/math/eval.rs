//! Arithmetic evaluation over normalized expressions.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := '-' unary | primary
//! primary := number | '(' expr ')'
//! ```
//!
//! Same-precedence operators associate to the left and all arithmetic is `f64`.
//! Parentheses and unary minus may nest at most [`MAX_NESTING`] levels.

use crate::core::error::{EvalError, MathResult};
use crate::core::model::MathOutcome;
use crate::math::normalize::NormalizedExpression;

pub const MAX_NESTING: usize = 256;

#[derive(Debug, Clone)]
pub struct ArithmeticEvaluator {
    symbolic_label: String,
}

impl ArithmeticEvaluator {
    pub fn new(symbolic_label: impl Into<String>) -> Self {
        Self {
            symbolic_label: symbolic_label.into(),
        }
    }

    pub fn evaluate(&self, expression: &NormalizedExpression) -> MathResult<MathOutcome> {
        if expression.has_variable() {
            return Ok(MathOutcome::Symbolic {
                expression: expression.as_str().to_string(),
                result: self.symbolic_label.clone(),
            });
        }

        let value = evaluate_str(&expression.compact())?;
        Ok(MathOutcome::Solved {
            expression: expression.as_str().to_string(),
            result: format_number(value),
        })
    }
}

/// Evaluates a whitespace-free arithmetic string.
pub fn evaluate_str(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: input.len(),
        depth: 0,
    };
    let value = parser.expr()?;
    match parser.peek() {
        None => Ok(value),
        Some(Token {
            kind: Kind::RParen, ..
        }) => Err(EvalError::UnbalancedParens),
        Some(token) => Err(EvalError::TrailingInput {
            position: token.position,
        }),
    }
}

/// Integral values print without a fractional part; everything else uses the
/// shortest `f64` representation.
pub fn format_number(value: f64) -> String {
    const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < EXACT_INT_LIMIT {
        // -0.0 prints as "0"
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Token {
    kind: Kind,
    position: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        let kind = match ch {
            '+' => Kind::Plus,
            '-' => Kind::Minus,
            '*' => Kind::Star,
            '/' => Kind::Slash,
            '(' => Kind::LParen,
            ')' => Kind::RParen,
            c if c.is_ascii_digit() || c == '.' => {
                let mut end = position + c.len_utf8();
                while let Some(&(idx, next)) = chars.peek() {
                    if next.is_ascii_digit() || next == '.' {
                        end = idx + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[position..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber {
                        literal: literal.to_string(),
                    })?;
                check_finite(value)?;
                Kind::Number(value)
            }
            _ => return Err(EvalError::TrailingInput { position }),
        };
        tokens.push(Token { kind, position });
    }

    Ok(tokens)
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    end: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn here(&self) -> usize {
        self.peek().map(|token| token.position).unwrap_or(self.end)
    }

    fn nested<F>(&mut self, inner: F) -> Result<f64, EvalError>
    where
        F: FnOnce(&mut Self) -> Result<f64, EvalError>,
    {
        if self.depth >= MAX_NESTING {
            return Err(EvalError::NestingTooDeep { limit: MAX_NESTING });
        }
        self.depth += 1;
        let value = inner(self);
        self.depth -= 1;
        value
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(token) = self.peek() {
            let op = token.kind;
            if !matches!(op, Kind::Plus | Kind::Minus) {
                break;
            }
            self.bump();
            let rhs = self.term()?;
            value = match op {
                Kind::Plus => value + rhs,
                _ => value - rhs,
            };
            check_finite(value)?;
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some(token) = self.peek() {
            let op = token.kind;
            if !matches!(op, Kind::Star | Kind::Slash) {
                break;
            }
            self.bump();
            let rhs = self.unary()?;
            value = match op {
                Kind::Star => value * rhs,
                _ => {
                    if rhs == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value / rhs
                }
            };
            check_finite(value)?;
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        if let Some(Token {
            kind: Kind::Minus, ..
        }) = self.peek()
        {
            self.bump();
            let value = -self.nested(Self::unary)?;
            check_finite(value)?;
            return Ok(value);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        let position = self.here();
        match self.bump().map(|token| token.kind) {
            Some(Kind::Number(value)) => Ok(value),
            Some(Kind::LParen) => {
                let value = self.nested(Self::expr)?;
                match self.bump() {
                    Some(Token {
                        kind: Kind::RParen, ..
                    }) => Ok(value),
                    Some(token) => Err(EvalError::TrailingInput {
                        position: token.position,
                    }),
                    None => Err(EvalError::UnbalancedParens),
                }
            }
            _ => Err(EvalError::MissingOperand { position }),
        }
    }
}

fn check_finite(value: f64) -> Result<(), EvalError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EvalError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MathError;
    use crate::math::normalize::normalize;
    use pretty_assertions::assert_eq;

    fn eval(input: &str) -> Result<f64, EvalError> {
        evaluate_str(input)
    }

    #[test]
    fn respects_precedence_and_associativity() {
        assert_eq!(eval("3+4*2"), Ok(11.0));
        assert_eq!(eval("8-3-2"), Ok(3.0));
        assert_eq!(eval("16/4/2"), Ok(2.0));
        assert_eq!(eval("(3+4)*2"), Ok(14.0));
        assert_eq!(eval("-(2+3)*2"), Ok(-10.0));
        assert_eq!(eval("2*-3"), Ok(-6.0));
        assert_eq!(eval("--4"), Ok(4.0));
        assert_eq!(eval("1.5+.5"), Ok(2.0));
    }

    #[test]
    fn reports_malformed_input() {
        assert_eq!(eval("10/0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("(1+2"), Err(EvalError::UnbalancedParens));
        assert_eq!(eval("1+2)"), Err(EvalError::UnbalancedParens));
        assert_eq!(eval("1+"), Err(EvalError::MissingOperand { position: 2 }));
        assert_eq!(eval("()"), Err(EvalError::MissingOperand { position: 1 }));
        assert_eq!(eval("*2"), Err(EvalError::MissingOperand { position: 0 }));
        assert_eq!(eval("2(3)"), Err(EvalError::TrailingInput { position: 1 }));
        assert_eq!(
            eval("1.2.3"),
            Err(EvalError::InvalidNumber {
                literal: "1.2.3".to_string()
            })
        );
    }

    #[test]
    fn reports_overflow() {
        let huge = format!("{}*{}", "9".repeat(200), "9".repeat(200));
        assert_eq!(eval(&huge), Err(EvalError::Overflow));
    }

    #[test]
    fn oversized_literals_overflow() {
        let literal = "9".repeat(400);
        assert_eq!(eval(&literal), Err(EvalError::Overflow));
        assert_eq!(eval(&format!("-{literal}")), Err(EvalError::Overflow));
        assert_eq!(eval(&format!("({literal})")), Err(EvalError::Overflow));
    }

    #[test]
    fn limits_nesting_depth() {
        let deep = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
        assert_eq!(
            eval(&deep),
            Err(EvalError::NestingTooDeep { limit: MAX_NESTING })
        );
        let minus = format!("{}1", "-".repeat(2000));
        assert_eq!(
            eval(&minus),
            Err(EvalError::NestingTooDeep { limit: MAX_NESTING })
        );

        let within = format!("{}7{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(eval(&within), Ok(7.0));
    }

    #[test]
    fn formats_results_consistently() {
        assert_eq!(format_number(11.0), "11");
        assert_eq!(format_number(-10.0), "-10");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333333333");
    }

    #[test]
    fn evaluator_solves_and_flags_symbolic() -> MathResult<()> {
        let evaluator = ArithmeticEvaluator::new("Symbolic Evaluation Required");

        let solved = evaluator.evaluate(&normalize("3 + 4 * 2 = ?")?)?;
        assert_eq!(
            solved,
            MathOutcome::Solved {
                expression: "3 + 4 * 2".to_string(),
                result: "11".to_string(),
            }
        );

        let symbolic = evaluator.evaluate(&normalize("2x + 3 = 7")?)?;
        assert_eq!(
            symbolic,
            MathOutcome::Symbolic {
                expression: "2 + 3".to_string(),
                result: "Symbolic Evaluation Required".to_string(),
            }
        );

        let failed = evaluator.evaluate(&normalize("10 / 0")?);
        assert_eq!(
            failed,
            Err(MathError::EvaluationFailed(EvalError::DivisionByZero))
        );
        Ok(())
    }
}
