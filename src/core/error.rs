//! Local failure types for the math stack.
//!
//! None of these reach the caller of the pipeline: the resolver logs them and
//! moves on to the next candidate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("missing operand at position {position}")]
    MissingOperand { position: usize },

    #[error("unexpected input at position {position}")]
    TrailingInput { position: usize },

    #[error("invalid number literal: {literal}")]
    InvalidNumber { literal: String },

    #[error("result is not a finite number")]
    Overflow,

    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("candidate rejected: {reason}")]
    CandidateRejected { reason: &'static str },

    #[error("evaluation failed")]
    EvaluationFailed(#[from] EvalError),
}

pub type MathResult<T> = std::result::Result<T, MathError>;
