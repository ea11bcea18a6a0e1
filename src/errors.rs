use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// a single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinancingError {
    #[error("{}", join_violations(.violations))]
    Validation {
        violations: Vec<FieldViolation>,
    },

    #[error("invalid term: {term_months} months")]
    InvalidTerm {
        term_months: u32,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

impl FinancingError {
    /// validation error for a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        FinancingError::Validation {
            violations: vec![FieldViolation::new(field, message)],
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FinancingError::Validation { .. })
    }

    /// arithmetic left the representable decimal range
    pub fn overflow(context: &str) -> Self {
        FinancingError::CalculationError {
            message: format!("arithmetic overflow computing {context}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, FinancingError>;

/// turn a failed checked operation into a calculation error
pub(crate) trait OrOverflow<T> {
    fn or_overflow(self, context: &str) -> Result<T>;
}

impl<T> OrOverflow<T> for Option<T> {
    fn or_overflow(self, context: &str) -> Result<T> {
        self.ok_or_else(|| FinancingError::overflow(context))
    }
}
