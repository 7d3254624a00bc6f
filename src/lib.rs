// ============================================================================
// dec128 Library
// Fixed-point 128-bit decimal arithmetic with sticky error states
// ============================================================================

//! # dec128
//!
//! Exact decimal arithmetic for financial calculations, backed by a 128-bit
//! coefficient and a small decimal exponent.
//!
//! ## Features
//!
//! - **No binary floating point**: `coefficient × 10^-exponent`, up to
//!   19 digits after the decimal point
//! - **Errors as values**: overflow, division by zero and negative square
//!   roots become sticky markers that absorb every later operation
//! - **Fast path first**: operations run on the operands as given and retry
//!   once on their canonical forms before reporting overflow
//! - **Eight rounding rules** including banker's rounding
//!
//! ## Example
//!
//! ```rust
//! use dec128::prelude::*;
//!
//! let price: Dec128 = "19.99".parse().unwrap();
//! let qty = Dec128::from_i64(3);
//! let rate: Dec128 = "0.0825".parse().unwrap();
//!
//! let subtotal = price.mul(qty);
//! let tax = subtotal.mul(rate).round_bank(2);
//! let total = subtotal.add(tax);
//! assert_eq!(total.to_string(), "64.92");
//!
//! // Errors travel through the computation instead of panicking
//! let broken = total.div(Dec128::ZERO).add(Dec128::ONE);
//! assert_eq!(broken.state(), State::DivisionByZero);
//! assert_eq!(broken.into_result(), Err(NumericError::DivisionByZero));
//! ```

pub mod config;
pub mod numeric;

pub use config::{RoundingMode, RoundingPolicy};
pub use numeric::{Dec128, NumericError, NumericResult, Sign, State, MAX_PRECISION};

// Re-exports for convenience
pub mod prelude {
    pub use crate::config::{RoundingMode, RoundingPolicy};
    pub use crate::numeric::{Dec128, NumericError, NumericResult, Sign, State};
}
