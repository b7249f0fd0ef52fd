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

//! Finite geometric sums in log space.
//!
//! The M/M/s/K normalization constant contains the tail
//! `g(ρ, n) = 1 + ρ + ... + ρ^(n-1)`, classically written as
//! `(1 - ρ^n) / (1 - ρ)` for `ρ ≠ 1` and `n` for `ρ = 1`. Evaluated naively
//! the quotient loses all precision as `ρ → 1` and overflows for `ρ > 1` and
//! large `n`. Writing `x = ln ρ`, the sum equals `expm1(n·x) / expm1(x)` for
//! every `x ≠ 0`, and both factors can be taken to log space without
//! cancellation.

use crate::num::log_real::LogReal;

/// Returns `ln |e^y - 1|` for `y ≠ 0`.
#[inline]
fn ln_abs_expm1(y: f64) -> f64 {
    debug_assert!(y != 0.0, "called `ln_abs_expm1` with y = 0");
    if y > 0.0 {
        if y > 36.0 {
            // e^y - 1 = e^y (1 - e^-y)
            y + (-(-y).exp()).ln_1p()
        } else {
            y.exp_m1().ln()
        }
    } else {
        (-y.exp_m1()).ln()
    }
}

/// Returns `Σ_{j=0}^{terms-1} ratio^j`.
///
/// # Examples
///
/// ```rust
/// use telescope_core::{math::geometric::geometric_sum, num::log_real::LogReal};
///
/// let g = geometric_sum(LogReal::from_f64(0.5), 3);
/// assert!((g.to_f64() - 1.75).abs() < 1e-12);
///
/// // The ρ = 1 case is just the number of terms.
/// assert_eq!(geometric_sum(LogReal::ONE, 7).to_f64(), 7.0);
/// ```
pub fn geometric_sum(ratio: LogReal, terms: u64) -> LogReal {
    if terms == 0 {
        return LogReal::ZERO;
    }
    if ratio.is_zero() {
        return LogReal::ONE;
    }

    let x = ratio.ln();
    if x == 0.0 {
        return LogReal::from_u64(terms);
    }

    let n = terms as f64;
    LogReal::from_ln(ln_abs_expm1(n * x) - ln_abs_expm1(x))
}
