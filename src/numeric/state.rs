// ============================================================================
// Value State
// Sign of a finite decimal, or the sticky error marker that replaced it
// ============================================================================

use super::errors::NumericError;
use std::fmt;

/// Sign of a finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Opposite sign.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }

    /// Sign of a product or quotient of two operands.
    #[inline]
    pub const fn xor(self, other: Self) -> Self {
        match (self, other) {
            (Sign::Positive, Sign::Positive) | (Sign::Negative, Sign::Negative) => Sign::Positive,
            _ => Sign::Negative,
        }
    }
}

/// State carried alongside every [`Dec128`](super::Dec128).
///
/// Finite variants are declared first, so every finite state orders strictly
/// before every error marker. Error markers are absorbing: once a value
/// carries one, every operation involving it returns that marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    /// A finite value with the given sign
    Finite(Sign),
    /// Not a number
    NaN,
    /// Magnitude or exponent exceeded the representable range
    Overflow,
    /// Division by a zero-valued divisor
    DivisionByZero,
    /// Square root of a negative value
    SqrtNegative,
}

impl State {
    pub const POSITIVE: Self = State::Finite(Sign::Positive);
    pub const NEGATIVE: Self = State::Finite(Sign::Negative);

    /// True for every marker at or above the error threshold.
    #[inline]
    pub const fn is_error(self) -> bool {
        !matches!(self, State::Finite(_))
    }

    /// Sign of a finite state, `None` for error markers.
    #[inline]
    pub const fn sign(self) -> Option<Sign> {
        match self {
            State::Finite(sign) => Some(sign),
            _ => None,
        }
    }

    /// The error this marker stands for, `None` for finite states.
    pub const fn error(self) -> Option<NumericError> {
        match self {
            State::Finite(_) => None,
            State::NaN => Some(NumericError::NaN),
            State::Overflow => Some(NumericError::Overflow),
            State::DivisionByZero => Some(NumericError::DivisionByZero),
            State::SqrtNegative => Some(NumericError::SqrtNegative),
        }
    }
}

impl From<NumericError> for State {
    fn from(err: NumericError) -> Self {
        match err {
            NumericError::Overflow => State::Overflow,
            NumericError::DivisionByZero => State::DivisionByZero,
            NumericError::SqrtNegative => State::SqrtNegative,
            NumericError::NaN | NumericError::InvalidInput | NumericError::PrecisionLoss => {
                State::NaN
            },
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Finite(Sign::Positive) => "Positive",
            State::Finite(Sign::Negative) => "Negative",
            State::NaN => "NaN",
            State::Overflow => "Overflow",
            State::DivisionByZero => "DivisionByZero",
            State::SqrtNegative => "SqrtNegative",
        };
        f.write_str(name)
    }
}
