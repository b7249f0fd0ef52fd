// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Extended-Range Reals
//!
//! `LogReal` stores a non-negative real number `x` as `ln(x)` in an `f64`.
//! The representable range therefore spans roughly `10^(±10^307)`, which is
//! far beyond anything the M/M/s/K formulas produce even for hundreds of
//! thousands of servers, while relative precision stays that of `f64`.
//!
//! ## Highlights
//!
//! - Multiplication, division and integer powers are exact additions and
//!   scalings in log space.
//! - Addition uses the log-sum-exp identity
//!   `ln(e^a + e^b) = max + ln(1 + e^(min - max))`, so no intermediate ever
//!   overflows.
//! - `checked_sub` returns `None` instead of a negative result.
//! - `factorial(n)` is backed by `statrs::function::factorial::ln_factorial`.
//! - Zero is represented by `ln = -inf` and behaves as an absorbing element
//!   for multiplication and as the identity for addition.
//!
//! ## Usage
//!
//! ```rust
//! use telescope_core::num::log_real::LogReal;
//!
//! // 500^500 / 500! would overflow f64 on its own; the ratio is fine.
//! let a = LogReal::from_f64(500.0);
//! let ratio = a.powu(500) / LogReal::factorial(500);
//! assert!(ratio.ln() > 400.0);
//!
//! let sum = LogReal::from_f64(2.0) + LogReal::from_f64(3.0);
//! assert!((sum.to_f64() - 5.0).abs() < 1e-12);
//! ```

use statrs::function::factorial::ln_factorial;
use std::{
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul, MulAssign},
};

/// A non-negative real number represented by its natural logarithm.
///
/// # Invariants
///
/// The stored logarithm is never `NaN` and never `+inf`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct LogReal {
    ln: f64,
}

impl LogReal {
    /// The value `0`.
    pub const ZERO: LogReal = LogReal {
        ln: f64::NEG_INFINITY,
    };

    /// The value `1`.
    pub const ONE: LogReal = LogReal { ln: 0.0 };

    /// Creates a `LogReal` from a non-negative finite `f64`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `value` is negative, `NaN` or infinite.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        debug_assert!(
            value >= 0.0 && value.is_finite(),
            "called `LogReal::from_f64` with a negative or non-finite value: {}",
            value
        );
        Self { ln: value.ln() }
    }

    /// Creates a `LogReal` directly from its natural logarithm.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `ln` is `NaN` or `+inf`.
    #[inline]
    pub fn from_ln(ln: f64) -> Self {
        debug_assert!(
            !ln.is_nan() && ln != f64::INFINITY,
            "called `LogReal::from_ln` with an invalid logarithm: {}",
            ln
        );
        Self { ln }
    }

    /// Creates a `LogReal` from an unsigned integer.
    #[inline]
    pub fn from_u64(value: u64) -> Self {
        Self {
            ln: (value as f64).ln(),
        }
    }

    /// Returns `n!`.
    #[inline]
    pub fn factorial(n: u64) -> Self {
        Self {
            ln: ln_factorial(n),
        }
    }

    /// Returns the natural logarithm of the value.
    #[inline(always)]
    pub fn ln(self) -> f64 {
        self.ln
    }

    /// Converts the value back into an `f64`.
    ///
    /// Values above `f64::MAX` become `+inf`, values below the smallest
    /// subnormal become `0.0`.
    #[inline(always)]
    pub fn to_f64(self) -> f64 {
        self.ln.exp()
    }

    /// Returns `true` if the value is exactly zero.
    #[inline(always)]
    pub fn is_zero(self) -> bool {
        self.ln == f64::NEG_INFINITY
    }

    /// Returns `self^exp`. By convention `0^0 = 1`.
    #[inline]
    pub fn powu(self, exp: u64) -> Self {
        if exp == 0 {
            return Self::ONE;
        }
        Self {
            ln: self.ln * exp as f64,
        }
    }

    /// Returns `1 / self`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `self` is zero.
    #[inline]
    pub fn recip(self) -> Self {
        debug_assert!(!self.is_zero(), "called `LogReal::recip` on zero");
        Self { ln: -self.ln }
    }

    /// Returns `self - rhs`, or `None` if the result would be negative.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        if rhs.ln > self.ln {
            return None;
        }
        if rhs.is_zero() {
            return Some(self);
        }
        if rhs.ln == self.ln {
            return Some(Self::ZERO);
        }
        // ln(e^a - e^b) = a + ln(1 - e^(b - a)) with b < a.
        Some(Self {
            ln: self.ln + (-(rhs.ln - self.ln).exp()).ln_1p(),
        })
    }

    /// Returns the smaller of two values.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other.ln < self.ln { other } else { self }
    }

    /// Returns the larger of two values.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other.ln > self.ln { other } else { self }
    }

    /// Returns the decimal exponent, e.g. `2567` for `4.02 × 10^2567`.
    ///
    /// Returns `None` for zero.
    pub fn exponent10(self) -> Option<i64> {
        if self.is_zero() {
            return None;
        }
        Some((self.ln / std::f64::consts::LN_10).floor() as i64)
    }

    /// Returns the decimal mantissa in `[1, 10)`, e.g. `4.02` for
    /// `4.02 × 10^2567`. Returns `0.0` for zero.
    pub fn mantissa10(self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let log10 = self.ln / std::f64::consts::LN_10;
        10.0_f64.powf(log10 - log10.floor())
    }
}

impl Default for LogReal {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for LogReal {
    type Output = LogReal;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let (hi, lo) = if self.ln >= rhs.ln {
            (self.ln, rhs.ln)
        } else {
            (rhs.ln, self.ln)
        };
        if lo == f64::NEG_INFINITY {
            return Self { ln: hi };
        }
        Self {
            ln: hi + (lo - hi).exp().ln_1p(),
        }
    }
}

impl AddAssign for LogReal {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul for LogReal {
    type Output = LogReal;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            ln: self.ln + rhs.ln,
        }
    }
}

impl MulAssign for LogReal {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.ln += rhs.ln;
    }
}

impl Div for LogReal {
    type Output = LogReal;

    #[inline]
    fn div(self, rhs: Self) -> Self::Output {
        debug_assert!(!rhs.is_zero(), "attempted to divide a `LogReal` by zero");
        Self {
            ln: self.ln - rhs.ln,
        }
    }
}

impl Sum for LogReal {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a LogReal> for LogReal {
    fn sum<I: Iterator<Item = &'a LogReal>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<u32> for LogReal {
    #[inline]
    fn from(value: u32) -> Self {
        Self::from_u64(value as u64)
    }
}

impl std::fmt::Debug for LogReal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogReal(ln={})", self.ln)
    }
}

impl std::fmt::Display for LogReal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.exponent10() {
            None => write!(f, "0"),
            Some(exponent) => write!(f, "{:.6} × 10^{}", self.mantissa10(), exponent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogReal;

    fn assert_close(actual: f64, expected: f64, rel: f64) {
        let scale = expected.abs().max(f64::MIN_POSITIVE);
        assert!(
            ((actual - expected) / scale).abs() <= rel,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_round_trip_small_values() {
        for v in [0.5, 1.0, 3.25, 1e-200, 1e200] {
            assert_close(LogReal::from_f64(v).to_f64(), v, 1e-14);
        }
        assert!(LogReal::from_f64(0.0).is_zero());
        assert_eq!(LogReal::from_f64(0.0).to_f64(), 0.0);
    }

    #[test]
    fn test_addition_matches_f64() {
        let sum = LogReal::from_f64(1.5) + LogReal::from_f64(2.25);
        assert_close(sum.to_f64(), 3.75, 1e-15);

        let with_zero = LogReal::ZERO + LogReal::from_f64(7.0);
        assert_close(with_zero.to_f64(), 7.0, 1e-15);

        let zero = LogReal::ZERO + LogReal::ZERO;
        assert!(zero.is_zero());
    }

    #[test]
    fn test_addition_of_vastly_different_magnitudes() {
        let big = LogReal::from_ln(10_000.0);
        let tiny = LogReal::from_ln(-10_000.0);
        assert_eq!((big + tiny).ln(), 10_000.0);
    }

    #[test]
    fn test_multiplication_and_division() {
        let a = LogReal::from_f64(6.0);
        let b = LogReal::from_f64(1.5);
        assert_close((a * b).to_f64(), 9.0, 1e-15);
        assert_close((a / b).to_f64(), 4.0, 1e-15);
        assert!((a * LogReal::ZERO).is_zero());
        assert_close(b.recip().to_f64(), 2.0 / 3.0, 1e-15);
    }

    #[test]
    fn test_powu_handles_zero_exponent_and_zero_base() {
        assert_eq!(LogReal::ZERO.powu(0), LogReal::ONE);
        assert!(LogReal::ZERO.powu(3).is_zero());
        assert_close(LogReal::from_f64(2.0).powu(10).to_f64(), 1024.0, 1e-14);
    }

    #[test]
    fn test_factorial_matches_small_values() {
        assert_eq!(LogReal::factorial(0).to_f64(), 1.0);
        assert_close(LogReal::factorial(5).to_f64(), 120.0, 1e-14);
        assert_close(LogReal::factorial(20).to_f64(), 2_432_902_008_176_640_000.0, 1e-13);
    }

    #[test]
    fn test_large_factorial_mantissa_and_exponent() {
        // 1000! = 4.0238726007709377 × 10^2567
        let f = LogReal::factorial(1000);
        assert_eq!(f.exponent10(), Some(2567));
        assert_close(f.mantissa10(), 4.023_872_600_770_937, 1e-9);
        assert_eq!(f.to_f64(), f64::INFINITY);
    }

    #[test]
    fn test_checked_sub() {
        let a = LogReal::from_f64(5.0);
        let b = LogReal::from_f64(3.0);
        assert_close(a.checked_sub(b).unwrap().to_f64(), 2.0, 1e-14);
        assert!(b.checked_sub(a).is_none());
        assert!(a.checked_sub(a).unwrap().is_zero());
        assert_eq!(a.checked_sub(LogReal::ZERO), Some(a));
    }

    #[test]
    fn test_sum_over_iterator() {
        let total: LogReal = (1..=4).map(|v| LogReal::from_u64(v)).sum();
        assert_close(total.to_f64(), 10.0, 1e-14);
        let empty: LogReal = std::iter::empty::<LogReal>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_ordering_and_min_max() {
        let a = LogReal::from_f64(2.0);
        let b = LogReal::from_f64(3.0);
        assert!(a < b);
        assert!(LogReal::ZERO < a);
        assert_eq!(a.min(b), a);
        assert_eq!(a.max(b), b);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", LogReal::ZERO), "0");
        assert_eq!(format!("{}", LogReal::from_f64(1234.5)), "1.234500 × 10^3");
        assert_eq!(format!("{}", LogReal::from_f64(0.05)), "5.000000 × 10^-2");
    }
}
