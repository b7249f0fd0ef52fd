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

//! Closed search brackets.
//!
//! A `Bracket<T>` is the closed interval `[lower, upper]` that a monotone
//! search narrows down. The integer flavor (`T: PrimInt`) computes midpoints
//! without overflow and reports when no interior point remains; the `f64`
//! flavor does the same for floating-point values, where the interval stops
//! shrinking once `lower` and `upper` are adjacent representable numbers.

use num_traits::PrimInt;

/// The closed interval `[lower, upper]`.
///
/// # Invariants
///
/// `lower <= upper`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Bracket<T> {
    lower: T,
    upper: T,
}

impl<T> Bracket<T>
where
    T: Copy + PartialOrd + std::fmt::Debug,
{
    /// Creates a new bracket.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`.
    #[inline]
    pub fn new(lower: T, upper: T) -> Self {
        assert!(
            lower <= upper,
            "called `Bracket::new` with lower bound {:?} greater than upper bound {:?}",
            lower,
            upper
        );
        Self { lower, upper }
    }

    /// Returns the lower bound.
    #[inline(always)]
    pub fn lower(&self) -> T {
        self.lower
    }

    /// Returns the upper bound.
    #[inline(always)]
    pub fn upper(&self) -> T {
        self.upper
    }

    /// Returns `true` if `value` lies in `[lower, upper]`.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Returns a bracket with the lower bound replaced.
    ///
    /// # Panics
    ///
    /// Panics if `lower` exceeds the current upper bound.
    #[inline]
    pub fn with_lower(self, lower: T) -> Self {
        Self::new(lower, self.upper)
    }

    /// Returns a bracket with the upper bound replaced.
    ///
    /// # Panics
    ///
    /// Panics if `upper` falls below the current lower bound.
    #[inline]
    pub fn with_upper(self, upper: T) -> Self {
        Self::new(self.lower, upper)
    }
}

impl<T> Bracket<T>
where
    T: PrimInt + std::fmt::Debug,
{
    /// Returns the number of integers strictly between the bounds.
    #[inline]
    pub fn interior_len(&self) -> T {
        let width = self.upper - self.lower;
        if width <= T::one() {
            T::zero()
        } else {
            width - T::one()
        }
    }

    /// Returns the midpoint rounded down, or `None` if no integer lies
    /// strictly between the bounds.
    #[inline]
    pub fn interior_midpoint(&self) -> Option<T> {
        if self.interior_len() == T::zero() {
            return None;
        }
        let two = T::one() + T::one();
        Some(self.lower + (self.upper - self.lower) / two)
    }
}

impl Bracket<f64> {
    /// Returns `upper - lower`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns the midpoint, or `None` if it is not strictly inside the
    /// bracket (the bounds are adjacent floating-point numbers).
    #[inline]
    pub fn split_point(&self) -> Option<f64> {
        let mid = self.lower + (self.upper - self.lower) / 2.0;
        if mid > self.lower && mid < self.upper {
            Some(mid)
        } else {
            None
        }
    }
}

impl<T> std::fmt::Display for Bracket<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
