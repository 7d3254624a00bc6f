// ============================================================================
// Wide Intermediates
// 256-bit helpers for division scaling and square roots
// ============================================================================

use ethnum::U256;

/// Narrow a 256-bit intermediate back to a coefficient, `None` if it does not fit.
#[inline]
pub(crate) fn narrow(value: U256) -> Option<u128> {
    let (high, low) = value.into_words();
    if high == 0 {
        Some(low)
    } else {
        None
    }
}

/// Full 256-bit product of two coefficients.
#[inline]
pub(crate) fn widening_mul(a: u128, b: u128) -> U256 {
    // (2^128 - 1)^2 < 2^256, so this never wraps
    U256::from(a) * U256::from(b)
}

/// Floor of the square root, extracted one bit pair at a time.
pub(crate) fn isqrt(n: U256) -> U256 {
    let mut rem = n;
    let mut root = U256::ZERO;

    // Highest power of four not above n
    let mut bit = U256::ONE << 254u32;
    while bit > rem {
        bit >>= 2u32;
    }

    while bit != U256::ZERO {
        let trial = root + bit;
        if rem >= trial {
            rem -= trial;
            root = (root >> 1u32) + bit;
        } else {
            root >>= 1u32;
        }
        bit >>= 2u32;
    }

    root
}
