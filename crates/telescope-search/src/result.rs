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

use crate::stats::SearchStatistics;
use telescope_core::math::bracket::Bracket;

/// The result of a successful search.
///
/// `value` is the boundary value on the feasible side. `bracket` is the
/// final bracket around the boundary: for a minimization its upper end is
/// `value`, for a maximization its lower end is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome<T> {
    value: T,
    bracket: Bracket<T>,
    statistics: SearchStatistics,
}

impl<T> SearchOutcome<T>
where
    T: Copy,
{
    /// Creates a new outcome.
    #[inline]
    pub fn new(value: T, bracket: Bracket<T>, statistics: SearchStatistics) -> Self {
        Self {
            value,
            bracket,
            statistics,
        }
    }

    /// Returns the boundary value on the feasible side.
    #[inline(always)]
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns the final bracket.
    #[inline(always)]
    pub fn bracket(&self) -> Bracket<T> {
        self.bracket
    }

    /// Returns the search statistics.
    #[inline(always)]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns a mutable reference to the search statistics.
    #[inline(always)]
    pub fn statistics_mut(&mut self) -> &mut SearchStatistics {
        &mut self.statistics
    }
}

impl<T> std::fmt::Display for SearchOutcome<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchOutcome(value={}, bracket={}, probes={})",
            self.value, self.bracket, self.statistics.probes
        )
    }
}
