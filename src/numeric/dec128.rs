// ============================================================================
// 128-bit Decimal Value
// Coefficient, exponent and sticky state, plus canonicalization
// ============================================================================

use super::errors::{NumericError, NumericResult};
use super::state::{Sign, State};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Maximum number of digits after the decimal point.
pub const MAX_PRECISION: u8 = 19;

/// Compute the powers of ten 10^0..10^N-1 at compile time
const fn pow10_u128<const N: usize>() -> [u128; N] {
    let mut table = [1u128; N];
    let mut i = 1;
    while i < N {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
}

const fn pow10_u64<const N: usize>() -> [u64; N] {
    let mut table = [1u64; N];
    let mut i = 1;
    while i < N {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
}

/// 10^0 ..= 10^38, every power of ten that fits in a `u128`.
pub(crate) const POW10_U128: [u128; 39] = pow10_u128::<39>();

/// 10^0 ..= 10^MAX_PRECISION, used to split coefficients when rounding.
pub(crate) const POW10_U64: [u64; MAX_PRECISION as usize + 1] =
    pow10_u64::<{ MAX_PRECISION as usize + 1 }>();

/// Fixed-point decimal backed by a 128-bit coefficient.
///
/// The represented quantity is `coefficient × 10^-exponent`. The exponent is
/// bounded by [`MAX_PRECISION`].
///
/// Errors are not raised; they travel inside the value as a sticky [`State`]
/// marker. Once a value carries an error marker its coefficient and exponent
/// are meaningless and every operation involving it returns the marker.
///
/// Equality and hashing compare quantities, so `1.50 == 1.5` and `-0 == 0`.
///
/// # Example
/// ```
/// use dec128::Dec128;
///
/// let price = Dec128::new(123, 2, false); // 1.23
/// let fee = Dec128::new(456, 2, false); // 4.56
/// let total = price.add(fee);
/// assert_eq!(total.coefficient(), 579);
/// assert_eq!(total.exponent(), 2);
/// assert_eq!(total.to_string(), "5.79");
/// ```
#[derive(Clone, Copy)]
pub struct Dec128 {
    pub(crate) coef: u128,
    pub(crate) exp: u8,
    pub(crate) state: State,
}

impl Dec128 {
    /// Zero value
    pub const ZERO: Self = Self::from_parts(0, 0, Sign::Positive);

    /// One (1)
    pub const ONE: Self = Self::from_parts(1, 0, Sign::Positive);

    /// Not-a-number marker
    pub const NAN: Self = Self::from_state(State::NaN);

    pub(crate) const OVERFLOW: Self = Self::from_state(State::Overflow);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create `coef × 10^-exp`.
    ///
    /// Returns the Overflow marker when `exp` exceeds [`MAX_PRECISION`].
    #[inline]
    pub const fn new(coef: u128, exp: u8, negative: bool) -> Self {
        if exp > MAX_PRECISION {
            return Self::OVERFLOW;
        }
        let sign = if negative {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Self::from_parts(coef, exp, sign)
    }

    /// Create a value carrying `state` with a zero coefficient.
    ///
    /// For error states this is the marker itself.
    #[inline]
    pub const fn from_state(state: State) -> Self {
        Self {
            coef: 0,
            exp: 0,
            state,
        }
    }

    /// Create from a signed integer.
    #[inline]
    pub const fn from_i64(value: i64) -> Self {
        let sign = if value < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Self::from_parts(value.unsigned_abs() as u128, 0, sign)
    }

    /// Create from an unsigned integer.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self::from_parts(value as u128, 0, Sign::Positive)
    }

    /// Unchecked finite constructor; `exp` must not exceed `MAX_PRECISION`.
    #[inline]
    pub(crate) const fn from_parts(coef: u128, exp: u8, sign: Sign) -> Self {
        Self {
            coef,
            exp,
            state: State::Finite(sign),
        }
    }

    /// Finite constructor that folds every zero into `ZERO`.
    #[inline]
    pub(crate) const fn signed(coef: u128, exp: u8, sign: Sign) -> Self {
        if coef == 0 {
            Self::ZERO
        } else {
            Self::from_parts(coef, exp, sign)
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The unsigned coefficient. Meaningless for error markers.
    #[inline]
    pub const fn coefficient(self) -> u128 {
        self.coef
    }

    /// Number of digits after the decimal point. Meaningless for error markers.
    #[inline]
    pub const fn exponent(self) -> u8 {
        self.exp
    }

    #[inline]
    pub const fn state(self) -> State {
        self.state
    }

    /// Check if the value carries an error marker.
    #[inline]
    pub const fn is_error(self) -> bool {
        self.state.is_error()
    }

    /// Check if value is a finite zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        !self.is_error() && self.coef == 0
    }

    /// Check if value is finite and strictly negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        matches!(self.state, State::Finite(Sign::Negative)) && self.coef != 0
    }

    /// Sign of a finite value. Error markers report `Positive`; callers check
    /// `is_error` first.
    #[inline]
    pub(crate) const fn finite_sign(self) -> Sign {
        match self.state {
            State::Finite(sign) => sign,
            _ => Sign::Positive,
        }
    }

    /// The error carried by this value, if any.
    #[inline]
    pub const fn error(self) -> Option<NumericError> {
        self.state.error()
    }

    /// Leave the marker world: `Ok` for finite values, the carried error
    /// otherwise.
    pub fn into_result(self) -> NumericResult<Self> {
        match self.error() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    // ========================================================================
    // Canonicalization
    // ========================================================================

    /// Reduce to the minimal-coefficient representation of the same quantity.
    ///
    /// Trailing zeros are stripped from the coefficient while the exponent is
    /// positive. Zero becomes `ZERO`. Error markers pass through unchanged.
    pub fn canonical(self) -> Self {
        if self.is_error() {
            return self;
        }
        if self.coef == 0 {
            return Self::ZERO;
        }

        let mut coef = self.coef;
        let mut exp = self.exp;
        while exp > 0 && coef % 10 == 0 {
            coef /= 10;
            exp -= 1;
        }

        Self {
            coef,
            exp,
            state: self.state,
        }
    }

    /// Check if value is already in canonical form.
    pub fn is_canonical(self) -> bool {
        if self.is_error() {
            return true;
        }
        if self.coef == 0 {
            return self.exp == 0 && self.state == State::POSITIVE;
        }
        self.exp == 0 || self.coef % 10 != 0
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Default for Dec128 {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<NumericError> for Dec128 {
    fn from(err: NumericError) -> Self {
        Self::from_state(State::from(err))
    }
}

impl PartialEq for Dec128 {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_error(), other.is_error()) {
            (true, true) => self.state == other.state,
            (false, false) => {
                let a = self.canonical();
                let b = other.canonical();
                a.coef == b.coef && a.exp == b.exp && a.state == b.state
            },
            _ => false,
        }
    }
}

impl Eq for Dec128 {}

impl Hash for Dec128 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_error() {
            self.state.hash(state);
            return;
        }
        let c = self.canonical();
        c.coef.hash(state);
        c.exp.hash(state);
        c.state.hash(state);
    }
}

impl fmt::Debug for Dec128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error() {
            write!(f, "Dec128({})", self.state)
        } else {
            write!(
                f,
                "Dec128({}, coef={}, exp={})",
                self, self.coef, self.exp
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables() {
        assert_eq!(POW10_U128[0], 1);
        assert_eq!(POW10_U128[38], 10u128.pow(38));
        assert_eq!(POW10_U64[19], 10_000_000_000_000_000_000);
        assert_eq!(POW10_U64.len(), MAX_PRECISION as usize + 1);
    }

    #[test]
    fn test_constants() {
        assert_eq!(Dec128::ZERO.coefficient(), 0);
        assert_eq!(Dec128::ONE.coefficient(), 1);
        assert_eq!(Dec128::ONE.exponent(), 0);
        assert!(Dec128::NAN.is_error());
        assert_eq!(Dec128::default(), Dec128::ZERO);
    }

    #[test]
    fn test_new_rejects_large_exponent() {
        let x = Dec128::new(1, MAX_PRECISION, false);
        assert!(!x.is_error());

        let y = Dec128::new(1, MAX_PRECISION + 1, false);
        assert_eq!(y.state(), State::Overflow);
    }

    #[test]
    fn test_from_i64() {
        let x = Dec128::from_i64(-42);
        assert_eq!(x.coefficient(), 42);
        assert!(x.is_negative());

        let min = Dec128::from_i64(i64::MIN);
        assert_eq!(min.coefficient(), 9_223_372_036_854_775_808);
        assert!(min.is_negative());
    }

    #[test]
    fn test_canonical() {
        let x = Dec128::new(12_300, 4, false).canonical();
        assert_eq!(x.coefficient(), 123);
        assert_eq!(x.exponent(), 2);

        // Exponent zero stops the reduction even with trailing zeros
        let y = Dec128::new(1_000, 0, true).canonical();
        assert_eq!(y.coefficient(), 1_000);
        assert_eq!(y.exponent(), 0);
        assert!(y.is_negative());

        let z = Dec128::new(0, 7, true).canonical();
        assert_eq!(z.state(), State::POSITIVE);
        assert_eq!(z.exponent(), 0);
    }

    #[test]
    fn test_canonical_idempotent() {
        let x = Dec128::new(5_000_000, 6, true);
        let once = x.canonical();
        let twice = once.canonical();
        assert_eq!(once.coefficient(), twice.coefficient());
        assert_eq!(once.exponent(), twice.exponent());
        assert!(once.is_canonical());
        assert!(!x.is_canonical());
    }

    #[test]
    fn test_canonical_passes_errors() {
        let x = Dec128::from_state(State::DivisionByZero).canonical();
        assert_eq!(x.state(), State::DivisionByZero);
    }

    #[test]
    fn test_equality_is_by_quantity() {
        assert_eq!(Dec128::new(150, 2, false), Dec128::new(15, 1, false));
        assert_eq!(Dec128::new(0, 3, true), Dec128::ZERO);
        assert_ne!(Dec128::new(15, 1, true), Dec128::new(15, 1, false));
        assert_ne!(Dec128::NAN, Dec128::ZERO);
        assert_eq!(Dec128::NAN, Dec128::NAN);
        assert_ne!(Dec128::NAN, Dec128::from(NumericError::Overflow));
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(Dec128::new(150, 2, false));
        assert!(set.contains(&Dec128::new(15, 1, false)));
        assert!(!set.contains(&Dec128::new(15, 1, true)));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(Dec128::ONE.into_result(), Ok(Dec128::ONE));
        assert_eq!(
            Dec128::from(NumericError::SqrtNegative).into_result(),
            Err(NumericError::SqrtNegative)
        );
        assert_eq!(Dec128::from(NumericError::InvalidInput).state(), State::NaN);
    }
}
