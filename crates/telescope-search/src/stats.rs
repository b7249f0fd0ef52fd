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

use std::time::Duration;

/// Statistics collected during one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// Number of predicate evaluations.
    pub probes: u64,
    /// Number of times the search window was doubled.
    pub doublings: u32,
    /// Number of bisection steps.
    pub bisections: u32,
    /// Wall-clock duration of the search.
    pub duration: Duration,
}

impl SearchStatistics {
    /// Adds the counters of `other` to `self`.
    ///
    /// Nested searches use this to report the total effort of all inner
    /// searches alongside the outer one.
    #[inline]
    pub fn absorb(&mut self, other: &SearchStatistics) {
        self.probes += other.probes;
        self.doublings += other.doublings;
        self.bisections += other.bisections;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Probes: {}", self.probes)?;
        writeln!(f, "  Doublings: {}", self.doublings)?;
        writeln!(f, "  Bisections: {}", self.bisections)?;
        writeln!(
            f,
            "  Search Duration (secs): {:.3}",
            self.duration.as_secs_f64()
        )
    }
}

/// Builder for `SearchStatistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStatisticsBuilder {
    probes: u64,
    doublings: u32,
    bisections: u32,
    duration: Duration,
}

impl SearchStatisticsBuilder {
    /// Creates a new `SearchStatisticsBuilder` with all counters at zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of probes.
    #[inline]
    pub fn probes(mut self, probes: u64) -> Self {
        self.probes = probes;
        self
    }

    /// Sets the number of doublings.
    #[inline]
    pub fn doublings(mut self, doublings: u32) -> Self {
        self.doublings = doublings;
        self
    }

    /// Sets the number of bisection steps.
    #[inline]
    pub fn bisections(mut self, bisections: u32) -> Self {
        self.bisections = bisections;
        self
    }

    /// Sets the search duration.
    #[inline]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Builds the `SearchStatistics` instance.
    #[inline]
    pub fn build(self) -> SearchStatistics {
        SearchStatistics {
            probes: self.probes,
            doublings: self.doublings,
            bisections: self.bisections,
            duration: self.duration,
        }
    }
}
