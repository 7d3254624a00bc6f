// ============================================================================
// Rounding Engine
// Precision reduction built on one quotient/remainder split
// ============================================================================

use super::dec128::{Dec128, POW10_U64};
use super::state::Sign;
use crate::config::RoundingMode;

/// Coefficient split at the requested precision.
#[derive(Debug, Clone, Copy)]
struct Split {
    /// Retained digits
    quotient: u128,
    /// Discarded digits
    remainder: u64,
    /// Half of the discarded unit, `factor / 2`
    half: u64,
    negative: bool,
}

impl Dec128 {
    /// Reduce to `prec` digits after the decimal point, bumping the retained
    /// digits by one when `increment` says so.
    ///
    /// Error markers and values already at or below `prec` are returned as is.
    fn round_with(self, prec: u8, increment: impl FnOnce(Split) -> bool) -> Self {
        if self.is_error() || prec >= self.exp {
            return self;
        }

        let Some(&factor) = POW10_U64.get((self.exp - prec) as usize) else {
            return Self::OVERFLOW;
        };
        let split = Split {
            quotient: self.coef / factor as u128,
            remainder: (self.coef % factor as u128) as u64,
            half: factor / 2,
            negative: self.finite_sign() == Sign::Negative,
        };

        let coef = if increment(split) {
            match split.quotient.checked_add(1) {
                Some(q) => q,
                None => return Self::OVERFLOW,
            }
        } else {
            split.quotient
        };

        Self {
            coef,
            exp: prec,
            state: self.state,
        }
    }

    /// Round toward negative infinity (floor).
    ///
    /// ```text
    /// RoundDown(1.236, 2)  =  1.23
    /// RoundDown(-1.234, 2) = -1.24
    /// ```
    pub fn round_down(self, prec: u8) -> Self {
        self.round_with(prec, |s| s.negative && s.remainder > 0)
    }

    /// Round toward positive infinity (ceil).
    ///
    /// ```text
    /// RoundUp(1.234, 2)  =  1.24
    /// RoundUp(-1.236, 2) = -1.23
    /// ```
    pub fn round_up(self, prec: u8) -> Self {
        self.round_with(prec, |s| !s.negative && s.remainder > 0)
    }

    /// Round toward zero; same as [`trunc`](Self::trunc).
    pub fn round_toward_zero(self, prec: u8) -> Self {
        self.trunc(prec)
    }

    /// Round away from zero whenever digits are discarded.
    ///
    /// ```text
    /// RoundAwayFromZero(1.234, 2)  =  1.24
    /// RoundAwayFromZero(-1.234, 2) = -1.24
    /// ```
    pub fn round_away_from_zero(self, prec: u8) -> Self {
        self.round_with(prec, |s| s.remainder > 0)
    }

    /// Round to nearest, ties toward zero.
    ///
    /// ```text
    /// RoundHalfTowardZero(1.235, 2)  =  1.23
    /// RoundHalfTowardZero(-1.236, 2) = -1.24
    /// ```
    pub fn round_half_toward_zero(self, prec: u8) -> Self {
        self.round_with(prec, |s| s.remainder > s.half)
    }

    /// Round to nearest, ties away from zero.
    ///
    /// ```text
    /// RoundHalfAwayFromZero(1.235, 2)  =  1.24
    /// RoundHalfAwayFromZero(-1.235, 2) = -1.24
    /// ```
    pub fn round_half_away_from_zero(self, prec: u8) -> Self {
        self.round_with(prec, |s| s.remainder >= s.half)
    }

    /// Banker's rounding: to nearest, ties to an even last digit.
    ///
    /// ```text
    /// RoundBank(2.125, 2) = 2.12   tie, 2 is even
    /// RoundBank(2.135, 2) = 2.14   tie, 3 is odd
    /// RoundBank(2.127, 2) = 2.13
    /// ```
    pub fn round_bank(self, prec: u8) -> Self {
        self.round_with(prec, |s| {
            s.remainder > s.half || (s.remainder == s.half && s.quotient & 1 == 1)
        })
    }

    /// Drop every digit past `prec`.
    pub fn trunc(self, prec: u8) -> Self {
        self.round_with(prec, |_| false)
    }

    /// Round to `prec` digits with the given rule.
    pub fn round(self, prec: u8, mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::Floor => self.round_down(prec),
            RoundingMode::Ceiling => self.round_up(prec),
            RoundingMode::TowardZero => self.round_toward_zero(prec),
            RoundingMode::AwayFromZero => self.round_away_from_zero(prec),
            RoundingMode::HalfTowardZero => self.round_half_toward_zero(prec),
            RoundingMode::HalfAwayFromZero => self.round_half_away_from_zero(prec),
            RoundingMode::HalfEven => self.round_bank(prec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::State;

    fn dec(s: &str) -> Dec128 {
        s.parse().unwrap()
    }

    /// Runs `f` over 1.236, 1.235, 1.234, -1.234, -1.235, -1.236 at precision 2.
    fn check(f: fn(Dec128, u8) -> Dec128, expected: [&str; 6]) {
        let inputs = ["1.236", "1.235", "1.234", "-1.234", "-1.235", "-1.236"];
        for (input, want) in inputs.iter().zip(expected) {
            let got = f(dec(input), 2);
            assert_eq!(got, dec(want), "{} -> {}, want {}", input, got, want);
            assert_eq!(got.exponent(), 2);
        }
    }

    #[test]
    fn test_round_down() {
        check(
            Dec128::round_down,
            ["1.23", "1.23", "1.23", "-1.24", "-1.24", "-1.24"],
        );
    }

    #[test]
    fn test_round_up() {
        check(
            Dec128::round_up,
            ["1.24", "1.24", "1.24", "-1.23", "-1.23", "-1.23"],
        );
    }

    #[test]
    fn test_round_toward_zero() {
        check(
            Dec128::round_toward_zero,
            ["1.23", "1.23", "1.23", "-1.23", "-1.23", "-1.23"],
        );
    }

    #[test]
    fn test_round_away_from_zero() {
        check(
            Dec128::round_away_from_zero,
            ["1.24", "1.24", "1.24", "-1.24", "-1.24", "-1.24"],
        );
    }

    #[test]
    fn test_round_half_toward_zero() {
        check(
            Dec128::round_half_toward_zero,
            ["1.24", "1.23", "1.23", "-1.23", "-1.23", "-1.24"],
        );
    }

    #[test]
    fn test_round_half_away_from_zero() {
        check(
            Dec128::round_half_away_from_zero,
            ["1.24", "1.24", "1.23", "-1.23", "-1.24", "-1.24"],
        );
    }

    #[test]
    fn test_round_bank() {
        assert_eq!(dec("2.121").round_bank(2), dec("2.12"));
        assert_eq!(dec("2.125").round_bank(2), dec("2.12"));
        assert_eq!(dec("2.135").round_bank(2), dec("2.14"));
        assert_eq!(dec("2.1351").round_bank(2), dec("2.14"));
        assert_eq!(dec("2.127").round_bank(2), dec("2.13"));
        assert_eq!(dec("-2.135").round_bank(2), dec("-2.14"));
    }

    #[test]
    fn test_trunc() {
        assert_eq!(dec("1.12345").trunc(4), dec("1.1234"));
        assert_eq!(dec("1.12335").trunc(4), dec("1.1233"));
        assert_eq!(dec("-9.99").trunc(0), dec("-9"));
    }

    #[test]
    fn test_precision_not_reduced() {
        let x = dec("1.5");
        for prec in [1, 2, 19] {
            let r = x.round_bank(prec);
            assert_eq!(r.coefficient(), 15);
            assert_eq!(r.exponent(), 1);
        }
    }

    #[test]
    fn test_idempotent_at_same_precision() {
        let x = dec("-3.14159");
        let modes = [
            RoundingMode::Floor,
            RoundingMode::Ceiling,
            RoundingMode::TowardZero,
            RoundingMode::AwayFromZero,
            RoundingMode::HalfTowardZero,
            RoundingMode::HalfAwayFromZero,
            RoundingMode::HalfEven,
        ];
        for mode in modes {
            let once = x.round(3, mode);
            let twice = once.round(3, mode);
            assert_eq!(once.coefficient(), twice.coefficient());
            assert_eq!(once.exponent(), twice.exponent());
            assert_eq!(once.state(), twice.state());
        }
    }

    #[test]
    fn test_errors_pass_through() {
        let m = Dec128::from_state(State::DivisionByZero);
        assert_eq!(m.round_up(0).state(), State::DivisionByZero);
        assert_eq!(m.trunc(0).state(), State::DivisionByZero);
    }

    #[test]
    fn test_round_full_precision_split() {
        // factor = 10^19, the largest split
        let x = Dec128::new(15_000_000_000_000_000_000, 19, false);
        assert_eq!(x.round_half_away_from_zero(0), Dec128::from_i64(2));
        assert_eq!(x.round_bank(0), Dec128::from_i64(2));
        assert_eq!(x.trunc(0), Dec128::ONE);
    }

    #[test]
    fn test_round_dispatch() {
        let x = dec("-1.235");
        assert_eq!(x.round(2, RoundingMode::HalfAwayFromZero), dec("-1.24"));
        assert_eq!(x.round(2, RoundingMode::Ceiling), dec("-1.23"));
        assert_eq!(x.round(2, RoundingMode::HalfEven), dec("-1.24"));
    }
}
