//! Errors raised while building or evaluating a fuzzy system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FuzzyError {
    #[error("universe of '{variable}' is empty: [{min}, {max}]")]
    EmptyUniverse {
        variable: String,
        min: f64,
        max: f64,
    },
    #[error("membership function '{term}' of '{variable}' is malformed: {reason}")]
    InvalidMembership {
        variable: String,
        term: String,
        reason: String,
    },
    #[error("variable '{0}' is declared more than once")]
    DuplicateVariable(String),
    #[error("unknown variable: {0}")]
    UnknownVariable(String),
    #[error("variable '{variable}' has no term named '{term}'")]
    UnknownTerm { variable: String, term: String },
    #[error("term code {code} is out of range for '{variable}' ({available} terms)")]
    TermIndexOutOfRange {
        variable: String,
        code: usize,
        available: usize,
    },
    #[error("rule {0} has no antecedent")]
    EmptyAntecedent(usize),
    #[error("rule {rule} weight {weight} is outside [0, 1]")]
    InvalidWeight { rule: usize, weight: f64 },
    #[error("malformed rule on line {line}: {reason}")]
    MalformedRule { line: usize, reason: String },
    #[error("expected {expected} input values, got {found}")]
    InputArity { expected: usize, found: usize },
    #[error("input for '{0}' is not a finite number")]
    NonFiniteInput(String),
    #[error("output resolution must be at least 2 samples, got {0}")]
    InvalidResolution(usize),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FuzzyError>;
