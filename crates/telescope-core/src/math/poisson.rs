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

//! Cumulative Poisson probabilities in log space.
//!
//! The M/M/s/K waiting-time distribution needs `P(N ≤ m)` for
//! `N ~ Poisson(x)` and every `m = 0, 1, ..., K - s - 1`, with `x = sμt`.
//! `PoissonCumulative` yields these values in order, each in `O(1)`, using
//! the term recurrence `ln p_r = ln p_(r-1) + ln x - ln r`. Because every
//! term is kept as a `LogReal`, `e^-x` never underflows even when `x` is in
//! the tens of thousands.

use crate::num::log_real::LogReal;
use std::iter::FusedIterator;

/// An endless iterator over `P(N ≤ 0), P(N ≤ 1), P(N ≤ 2), ...` for
/// `N ~ Poisson(mean)`.
///
/// Values are clamped to at most one so rounding never produces a
/// probability above one.
///
/// # Examples
///
/// ```rust
/// use telescope_core::math::poisson::PoissonCumulative;
///
/// let cdf: Vec<f64> = PoissonCumulative::new(2.0).take(3).map(|p| p.to_f64()).collect();
/// let e = (-2.0f64).exp();
/// assert!((cdf[0] - e).abs() < 1e-15);
/// assert!((cdf[1] - 3.0 * e).abs() < 1e-15);
/// assert!((cdf[2] - 5.0 * e).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct PoissonCumulative {
    ln_mean: f64,
    ln_term: f64,
    next_index: u64,
    cumulative: LogReal,
}

impl PoissonCumulative {
    /// Creates the sequence for a Poisson distribution with the given mean.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `mean` is negative or not finite.
    #[inline]
    pub fn new(mean: f64) -> Self {
        debug_assert!(
            mean >= 0.0 && mean.is_finite(),
            "called `PoissonCumulative::new` with an invalid mean: {}",
            mean
        );
        Self {
            ln_mean: mean.ln(),
            ln_term: -mean,
            next_index: 0,
            cumulative: LogReal::ZERO,
        }
    }
}

impl Iterator for PoissonCumulative {
    type Item = LogReal;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index > 0 {
            self.ln_term += self.ln_mean - (self.next_index as f64).ln();
        }
        self.next_index += 1;
        self.cumulative = (self.cumulative + LogReal::from_ln(self.ln_term)).min(LogReal::ONE);
        Some(self.cumulative)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl FusedIterator for PoissonCumulative {}
