// ============================================================================
// Numeric Errors
// Error types surfaced at the boundary of decimal arithmetic
// ============================================================================

use std::fmt;

/// Errors that can be observed when leaving the sticky-marker world of
/// [`Dec128`](super::Dec128), or when converting into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// The value is not a number
    NaN,
    /// Magnitude or exponent exceeded the representable range
    Overflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Square root of a negative value
    SqrtNegative,
    /// Input string or value is invalid
    InvalidInput,
    /// Conversion would lose significant digits
    PrecisionLoss,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "not a number"),
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded 128-bit range")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::SqrtNegative => write!(f, "square root of a negative value"),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
