// ============================================================================
// Numeric Module
// 128-bit fixed-point decimal arithmetic for financial calculations
// ============================================================================
//
// This module provides:
// - Dec128: coefficient × 10^-exponent with a sticky error state
// - State/Sign: the tagged sign-or-error marker
// - NumericError: Error types for leaving the marker world
//
// Design principles:
// - No floating-point operations
// - Errors are values: operations never panic, markers are absorbing
// - Fast path first, one retry on canonical operands, then Overflow
// - Values are Copy and immutable

mod arithmetic;
mod convert;
mod dec128;
mod errors;
mod rounding;
mod state;
mod wide;

pub use dec128::{Dec128, MAX_PRECISION};
pub use errors::{NumericError, NumericResult};
pub use state::{Sign, State};
