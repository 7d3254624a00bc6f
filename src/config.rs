// ============================================================================
// Rounding Configuration
// Named rounding rules and reusable precision policies
// ============================================================================

use crate::numeric::{Dec128, NumericError, NumericResult, MAX_PRECISION};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Rounding Mode
// ============================================================================

/// Rule used to discard digits past the target precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Toward negative infinity
    Floor,
    /// Toward positive infinity
    Ceiling,
    /// Drop the digits (truncation)
    TowardZero,
    /// Away from zero whenever anything is dropped
    AwayFromZero,
    /// Nearest, ties toward zero
    HalfTowardZero,
    /// Nearest, ties away from zero
    /// Use case: invoices, tax calculations
    HalfAwayFromZero,
    /// Nearest, ties to even (banker's rounding)
    /// Use case: ledgers and aggregates, avoids upward drift
    #[default]
    HalfEven,
}

// ============================================================================
// Rounding Policy
// ============================================================================

/// Target precision together with the rule used to reach it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundingPolicy {
    /// Digits kept after the decimal point
    pub precision: u8,

    /// Rule applied to the discarded digits
    pub mode: RoundingMode,
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self::new(MAX_PRECISION, RoundingMode::default())
    }
}

impl RoundingPolicy {
    /// Create a new policy
    pub fn new(precision: u8, mode: RoundingMode) -> Self {
        Self { precision, mode }
    }

    /// Builder method: Set the target precision
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: Set the rounding rule
    pub fn with_mode(mut self, mode: RoundingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate the policy
    pub fn validate(&self) -> NumericResult<()> {
        if self.precision > MAX_PRECISION {
            return Err(NumericError::InvalidInput);
        }
        Ok(())
    }

    /// Round `value` according to this policy.
    ///
    /// Values already at or below the target precision are returned as is.
    pub fn apply(&self, value: Dec128) -> Dec128 {
        value.round(self.precision, self.mode)
    }
}

// ============================================================================
// Preset Policies (Factory Methods)
// ============================================================================

impl RoundingPolicy {
    /// Currency amounts
    /// - 2 digits after the point
    /// - Banker's rounding
    pub fn currency() -> Self {
        Self::new(2, RoundingMode::HalfEven)
    }

    /// Accounting rates and intermediate amounts
    /// - 4 digits after the point
    /// - Half away from zero
    pub fn accounting() -> Self {
        Self::new(4, RoundingMode::HalfAwayFromZero)
    }
}
