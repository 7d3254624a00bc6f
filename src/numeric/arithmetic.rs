// ============================================================================
// Arithmetic Engine
// Sticky-error arithmetic with a fast path and one canonical retry
// ============================================================================
//
// Every binary operator follows the same protocol:
// 1. Error short-circuit (left operand's marker wins)
// 2. Fast attempt on the operands as given (`try_*`, returns Option)
// 3. One retry on canonical operands, then the Overflow marker

use super::dec128::{Dec128, MAX_PRECISION, POW10_U128};
use super::state::{Sign, State};
use super::wide::{isqrt, narrow, widening_mul};
use ethnum::U256;
use std::cmp::Ordering;

// ============================================================================
// Retry Policy
// ============================================================================

/// Operands that can be reduced to canonical form before a retry.
trait Canonicalize: Copy {
    fn canonicalize(self) -> Self;
}

impl Canonicalize for Dec128 {
    #[inline]
    fn canonicalize(self) -> Self {
        self.canonical()
    }
}

impl Canonicalize for (Dec128, Dec128) {
    #[inline]
    fn canonicalize(self) -> Self {
        (self.0.canonical(), self.1.canonical())
    }
}

/// Run `attempt` on the operands as given and, if it fails, exactly once more
/// on their canonical forms. `None` means both attempts overflowed.
fn with_canonical_retry<A, T>(
    op: &'static str,
    operands: A,
    attempt: impl Fn(A) -> Option<T>,
) -> Option<T>
where
    A: Canonicalize,
{
    if let Some(result) = attempt(operands) {
        return Some(result);
    }

    tracing::trace!(op, "fast path failed, retrying on canonical operands");
    let result = attempt(operands.canonicalize());
    if result.is_none() {
        tracing::debug!(op, "result not representable, returning overflow marker");
    }
    result
}

/// Error short-circuit shared by every binary operator.
#[inline]
fn propagate(a: Dec128, b: Dec128) -> Option<Dec128> {
    if a.is_error() {
        Some(a)
    } else if b.is_error() {
        Some(b)
    } else {
        None
    }
}

// ============================================================================
// Fast Attempts
// ============================================================================

impl Dec128 {
    /// Scale the coefficient up so the value is expressed at `exp`.
    #[inline]
    fn try_rescale(self, exp: u8) -> Option<Self> {
        if exp > MAX_PRECISION || exp < self.exp {
            return None;
        }
        let factor = POW10_U128[(exp - self.exp) as usize];
        let coef = self.coef.checked_mul(factor)?;
        Some(Self::from_parts(coef, exp, self.finite_sign()))
    }

    /// Finite negation, no error check.
    #[inline]
    fn negated(self) -> Self {
        Self::from_parts(self.coef, self.exp, self.finite_sign().flip())
    }

    fn try_add(self, other: Self) -> Option<Self> {
        let exp = self.exp.max(other.exp);
        let a = self.try_rescale(exp)?;
        let b = other.try_rescale(exp)?;
        let (sa, sb) = (a.finite_sign(), b.finite_sign());

        if sa == sb {
            let coef = a.coef.checked_add(b.coef)?;
            return Some(Self::signed(coef, exp, sa));
        }

        // Opposite signs: the larger magnitude is the minuend and keeps its sign
        Some(match a.coef.cmp(&b.coef) {
            Ordering::Greater => Self::signed(a.coef - b.coef, exp, sa),
            Ordering::Less => Self::signed(b.coef - a.coef, exp, sb),
            Ordering::Equal => Self::ZERO,
        })
    }

    fn try_mul(self, other: Self) -> Option<Self> {
        let exp = self.exp + other.exp;
        if exp > MAX_PRECISION {
            return None;
        }
        let coef = self.coef.checked_mul(other.coef)?;
        let sign = self.finite_sign().xor(other.finite_sign());
        Some(Self::signed(coef, exp, sign))
    }

    /// Quotient at the highest exponent (at most `MAX_PRECISION`) whose
    /// coefficient still fits; excess digits are truncated.
    fn try_div(self, other: Self) -> Option<Self> {
        // a / b = (ca * 10^shift / cb) * 10^-MAX_PRECISION
        let shift = (MAX_PRECISION + other.exp).checked_sub(self.exp)?;
        let scaled = widening_mul(self.coef, *POW10_U128.get(shift as usize)?);
        let mut quotient = scaled / U256::from(other.coef);
        let mut exp = MAX_PRECISION;

        let ten = U256::from(10u128);
        let coef = loop {
            if let Some(coef) = narrow(quotient) {
                break coef;
            }
            if exp == 0 {
                return None;
            }
            quotient /= ten;
            exp -= 1;
        };

        let sign = self.finite_sign().xor(other.finite_sign());
        Some(Self::signed(coef, exp, sign).canonical())
    }

    /// Truncated integer quotient and the matching remainder.
    ///
    /// The quotient has exponent zero and the sign of the operands' product;
    /// the remainder is expressed at the common exponent and carries the
    /// dividend's sign, so `self == q * other + r`.
    fn try_quo_rem(self, other: Self) -> Option<(Self, Self)> {
        let exp = self.exp.max(other.exp);
        let a = self.try_rescale(exp)?;
        let b = other.try_rescale(exp)?;

        let (sa, sb) = (a.finite_sign(), b.finite_sign());
        let q = Self::signed(a.coef / b.coef, 0, sa.xor(sb));
        let r = Self::signed(a.coef % b.coef, exp, sa);
        Some((q, r))
    }

    fn try_sqrt(self) -> Option<Self> {
        // sqrt(c * 10^-e) = sqrt(c * 10^(2P - e)) * 10^-P
        let shift = (2 * MAX_PRECISION).checked_sub(self.exp)?;
        let radicand = widening_mul(self.coef, *POW10_U128.get(shift as usize)?);
        let root = narrow(isqrt(radicand))?;
        Some(Self::signed(root, MAX_PRECISION, Sign::Positive).canonical())
    }
}

// ============================================================================
// Public Operators
// ============================================================================

impl Dec128 {
    /// Returns `self + other`.
    ///
    /// Exponents are aligned to the larger one; the Overflow marker is
    /// returned when the aligned sum does not fit even after canonicalization.
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Self) -> Self {
        if let Some(err) = propagate(self, other) {
            return err;
        }
        with_canonical_retry("add", (self, other), |(a, b)| a.try_add(b))
            .unwrap_or(Self::OVERFLOW)
    }

    /// Returns `self - other`.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(self, other: Self) -> Self {
        if let Some(err) = propagate(self, other) {
            return err;
        }
        with_canonical_retry("sub", (self, other), |(a, b)| a.try_add(b.negated()))
            .unwrap_or(Self::OVERFLOW)
    }

    /// Returns `self * other`.
    ///
    /// Exponents add, so the product fails with Overflow when the combined
    /// exponent of the canonical operands exceeds [`MAX_PRECISION`].
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, other: Self) -> Self {
        if let Some(err) = propagate(self, other) {
            return err;
        }
        if self.coef == 0 || other.coef == 0 {
            return Self::ZERO;
        }
        with_canonical_retry("mul", (self, other), |(a, b)| a.try_mul(b))
            .unwrap_or(Self::OVERFLOW)
    }

    /// Returns `self / other`, truncated to at most [`MAX_PRECISION`] digits
    /// after the decimal point and returned in canonical form.
    ///
    /// A zero divisor yields `DivisionByZero`, including `0 / 0`.
    #[allow(clippy::should_implement_trait)]
    pub fn div(self, other: Self) -> Self {
        if let Some(err) = propagate(self, other) {
            return err;
        }
        if other.coef == 0 {
            return Self::from_state(State::DivisionByZero);
        }
        if self.coef == 0 {
            return Self::ZERO;
        }
        with_canonical_retry("div", (self, other), |(a, b)| a.try_div(b))
            .unwrap_or(Self::OVERFLOW)
    }

    /// Returns the remainder of truncated division; it carries the dividend's sign.
    #[allow(clippy::should_implement_trait)]
    pub fn rem(self, other: Self) -> Self {
        self.quo_rem(other).1
    }

    /// Returns the truncated integer quotient and the remainder of `self / other`.
    ///
    /// Both parts carry the same marker when the division fails.
    pub fn quo_rem(self, other: Self) -> (Self, Self) {
        if let Some(err) = propagate(self, other) {
            return (err, err);
        }
        if other.coef == 0 {
            let err = Self::from_state(State::DivisionByZero);
            return (err, err);
        }
        if self.coef == 0 {
            return (Self::ZERO, Self::ZERO);
        }
        with_canonical_retry("quo_rem", (self, other), |(a, b)| a.try_quo_rem(b))
            .unwrap_or((Self::OVERFLOW, Self::OVERFLOW))
    }

    /// Returns `|self|`.
    pub fn abs(self) -> Self {
        if self.is_error() {
            return self;
        }
        Self::from_parts(self.coef, self.exp, Sign::Positive)
    }

    /// Returns `-self` with the same coefficient and exponent.
    #[allow(clippy::should_implement_trait)]
    pub fn neg(self) -> Self {
        if self.is_error() {
            return self;
        }
        self.negated()
    }

    /// Square root, truncated to at most [`MAX_PRECISION`] digits.
    ///
    /// Negative inputs yield `SqrtNegative`.
    pub fn sqrt(self) -> Self {
        if self.is_error() {
            return self;
        }
        if self.coef == 0 {
            return Self::ZERO;
        }
        if self.finite_sign() == Sign::Negative {
            return Self::from_state(State::SqrtNegative);
        }
        if self == Self::ONE {
            return Self::ONE;
        }
        with_canonical_retry("sqrt", self, Self::try_sqrt).unwrap_or(Self::OVERFLOW)
    }

    /// Raise to an integer power by repeated squaring.
    ///
    /// Negative powers are the reciprocal of the positive power. Overflow in
    /// any intermediate product is returned as is.
    pub fn pow_int(self, n: i32) -> Self {
        if self.is_error() {
            return self;
        }
        if n == i32::MIN {
            tracing::debug!(n, "exponent cannot be negated, returning overflow marker");
            return Self::OVERFLOW;
        }
        if n < 0 {
            return Self::ONE.div(self.pow_int(-n));
        }

        match n {
            0 => Self::ONE,
            1 => self,
            _ if n & 1 == 0 => self.mul(self).pow_int(n / 2),
            _ => self.mul(self).pow_int((n - 1) / 2).mul(self),
        }
    }

    // ========================================================================
    // Integer Overloads
    // ========================================================================

    /// Returns `self + other`.
    pub fn add_i64(self, other: i64) -> Self {
        self.add(Self::from_i64(other))
    }

    /// Returns `self - other`.
    pub fn sub_i64(self, other: i64) -> Self {
        self.sub(Self::from_i64(other))
    }

    /// Returns `self * other`.
    pub fn mul_i64(self, other: i64) -> Self {
        self.mul(Self::from_i64(other))
    }

    /// Returns `self / other`.
    pub fn div_i64(self, other: i64) -> Self {
        self.div(Self::from_i64(other))
    }

    /// Returns `self % other`.
    pub fn rem_i64(self, other: i64) -> Self {
        self.rem(Self::from_i64(other))
    }

    /// Returns the quotient and remainder of `self / other`.
    pub fn quo_rem_i64(self, other: i64) -> (Self, Self) {
        self.quo_rem(Self::from_i64(other))
    }
}

// ============================================================================
// Operator Traits
// ============================================================================

// Errors travel as markers, so none of these panic.
macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl std::ops::$trait for Dec128 {
            type Output = Dec128;

            #[inline]
            fn $method(self, rhs: Dec128) -> Dec128 {
                Dec128::$method(self, rhs)
            }
        }

        impl std::ops::$trait<i64> for Dec128 {
            type Output = Dec128;

            #[inline]
            fn $method(self, rhs: i64) -> Dec128 {
                Dec128::$method(self, Dec128::from_i64(rhs))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);
forward_binop!(Rem, rem);

impl std::ops::Neg for Dec128 {
    type Output = Dec128;

    #[inline]
    fn neg(self) -> Dec128 {
        Dec128::neg(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
