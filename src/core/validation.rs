//! Field validation for entity forms
//!
//! Raw text comes in from whatever front end collects it; validated,
//! typed fields come out. Nothing here performs I/O.

use miette::Diagnostic;
use thiserror::Error;

/// Kind of number a field expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Integer,
    Decimal,
}

impl std::fmt::Display for NumberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberKind::Integer => write!(f, "whole number"),
            NumberKind::Decimal => write!(f, "decimal number"),
        }
    }
}

/// A rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    #[diagnostic(code(stockroom::validation::empty))]
    EmptyRequiredField { field: &'static str },

    #[error("{field} must be a valid {expected}")]
    #[diagnostic(
        code(stockroom::validation::number),
        help("enter digits only, e.g. 12 for a quantity (at most 2147483647) or 4.99 for a price")
    )]
    InvalidNumber {
        field: &'static str,
        expected: NumberKind,
    },

    #[error("{field} cannot be negative")]
    #[diagnostic(code(stockroom::validation::negative))]
    NegativeValue { field: &'static str },
}

/// A raw, unvalidated entity form
pub trait FormInput {
    /// Typed fields produced by a successful validation
    type Fields;

    fn validate(&self) -> Result<Self::Fields, ValidationError>;
}

/// Require non-blank text, returning it trimmed
pub fn required_text(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyRequiredField { field });
    }
    Ok(trimmed.to_string())
}

/// Free text that may be left blank
pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a whole number in the 32-bit range
///
/// Larger values are invalid numbers, so any sum over stored rows fits
/// comfortably in an `i64`.
pub fn parse_integer(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i32>()
        .map(i64::from)
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            expected: NumberKind::Integer,
        })
}

/// Parse a finite decimal; `NaN` and infinities are not prices
pub fn parse_decimal(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidNumber {
            field,
            expected: NumberKind::Decimal,
        }),
    }
}

pub fn non_negative_integer(field: &'static str, value: i64) -> Result<i64, ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(value)
}

pub fn non_negative_decimal(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(value)
}
