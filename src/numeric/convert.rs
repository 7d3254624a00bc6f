// ============================================================================
// Conversions
// Text, primitive integers, rust_decimal and serde
// ============================================================================

use super::dec128::{Dec128, MAX_PRECISION, POW10_U128};
use super::errors::{NumericError, NumericResult};
use super::state::{Sign, State};
use std::fmt;

// ============================================================================
// Display and Parsing
// ============================================================================

impl fmt::Display for Dec128 {
    /// Prints the value at its own exponent (`1.50` stays `1.50`); error
    /// markers print their name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_error() {
            return write!(f, "{}", self.state);
        }

        let sign = if self.is_negative() { "-" } else { "" };
        if self.exp == 0 {
            return write!(f, "{}{}", sign, self.coef);
        }

        let scale = POW10_U128[self.exp as usize];
        write!(
            f,
            "{}{}.{:0>width$}",
            sign,
            self.coef / scale,
            self.coef % scale,
            width = self.exp as usize
        )
    }
}

impl std::str::FromStr for Dec128 {
    type Err = NumericError;

    /// Parse from a decimal string, keeping the written scale.
    ///
    /// # Examples
    /// - "123" -> coef 123, exp 0
    /// - "-0.050" -> coef 50, exp 3, negative
    /// - "NaN" -> the NaN marker
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "" => return Err(NumericError::InvalidInput),
            "NaN" => return Ok(Self::NAN),
            "Overflow" => return Ok(Self::from_state(State::Overflow)),
            "DivisionByZero" => return Ok(Self::from_state(State::DivisionByZero)),
            "SqrtNegative" => return Ok(Self::from_state(State::SqrtNegative)),
            _ => {},
        }

        let (sign, s) = if let Some(rest) = s.strip_prefix('-') {
            (Sign::Negative, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (Sign::Positive, rest)
        } else {
            (Sign::Positive, s)
        };

        let (int_str, frac_str) = s.split_once('.').unwrap_or((s, ""));
        if int_str.is_empty() && frac_str.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        if frac_str.len() > MAX_PRECISION as usize {
            return Err(NumericError::PrecisionLoss);
        }

        let mut coef: u128 = 0;
        for b in int_str.bytes().chain(frac_str.bytes()) {
            if !b.is_ascii_digit() {
                return Err(NumericError::InvalidInput);
            }
            coef = coef
                .checked_mul(10)
                .and_then(|c| c.checked_add((b - b'0') as u128))
                .ok_or(NumericError::Overflow)?;
        }

        Ok(Self::from_parts(coef, frac_str.len() as u8, sign))
    }
}

// ============================================================================
// Primitive Integers
// ============================================================================

impl From<i64> for Dec128 {
    #[inline]
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i32> for Dec128 {
    #[inline]
    fn from(value: i32) -> Self {
        Self::from_i64(value as i64)
    }
}

impl From<u64> for Dec128 {
    #[inline]
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

// ============================================================================
// Conversion from rust_decimal (for API boundaries)
// ============================================================================

impl TryFrom<rust_decimal::Decimal> for Dec128 {
    type Error = NumericError;

    /// Convert from `rust_decimal::Decimal`, keeping its scale when it fits.
    ///
    /// # Errors
    /// - `PrecisionLoss` if more than `MAX_PRECISION` significant fraction
    ///   digits would be needed
    fn try_from(d: rust_decimal::Decimal) -> NumericResult<Self> {
        let max_scale = MAX_PRECISION as u32;
        let d = if d.scale() > max_scale { d.normalize() } else { d };
        if d.scale() > max_scale {
            return Err(NumericError::PrecisionLoss);
        }

        let mantissa = d.mantissa();
        let sign = if mantissa < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Ok(Self::from_parts(mantissa.unsigned_abs(), d.scale() as u8, sign))
    }
}

impl TryFrom<Dec128> for rust_decimal::Decimal {
    type Error = NumericError;

    /// Convert to `rust_decimal::Decimal`.
    ///
    /// # Errors
    /// - the carried marker for error values
    /// - `Overflow` if the coefficient exceeds the 96-bit mantissa even in
    ///   canonical form
    fn try_from(value: Dec128) -> NumericResult<Self> {
        let value = value.into_result()?;

        let convert = |v: Dec128| -> Option<rust_decimal::Decimal> {
            let mantissa = i128::try_from(v.coef).ok()?;
            let mantissa = if v.is_negative() { -mantissa } else { mantissa };
            rust_decimal::Decimal::try_from_i128_with_scale(mantissa, v.exp as u32).ok()
        };

        convert(value)
            .or_else(|| convert(value.canonical()))
            .ok_or(NumericError::Overflow)
    }
}

// ============================================================================
// Serde (string form)
// ============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Dec128 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Dec128 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
