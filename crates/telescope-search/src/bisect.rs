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

//! # Bracket-and-Bisect
//!
//! Locates the boundary of a monotone predicate over the positive reals.
//!
//! A search starts from an `anchor`, a value that is assumed to lie on the
//! "low" side of the boundary but is never evaluated (typically `0`, where
//! the model itself is undefined), and an `initial` probe above it. While
//! the probe is still on the low side, its distance from the anchor doubles,
//! at most `max_doublings` times. The resulting bracket is then bisected
//! until its width drops to `tolerance`, no representable midpoint remains,
//! or `max_bisections` steps have been taken.
//!
//! - `minimize`: infeasible below the boundary, feasible above it. Returns
//!   the upper end of the final bracket, which is always a feasible probe.
//! - `maximize`: feasible below the boundary, infeasible above it. Returns
//!   the lower end of the final bracket, which must be a feasible probe;
//!   if none was, the search fails with `SearchError::NoFeasibleValue`.

use crate::{
    error::SearchError, monitor::SearchMonitor, probe::probe, result::SearchOutcome,
    stats::SearchStatistics,
};
use std::time::Instant;
use telescope_core::math::bracket::Bracket;

/// The default bracket width at which bisection stops.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    /// Returns `true` if a probe with the given feasibility lies above the
    /// boundary.
    #[inline]
    fn is_above(self, feasible: bool) -> bool {
        match self {
            Sense::Minimize => feasible,
            Sense::Maximize => !feasible,
        }
    }
}

/// Bracket-and-bisect search over `f64`.
///
/// # Examples
///
/// ```rust
/// use telescope_search::{bisect::Bisection, error::SearchError, monitor::NoOpMonitor};
///
/// let outcome = Bisection::new()
///     .minimize(0.0, 1.0, &mut NoOpMonitor, |x| Ok::<_, SearchError>(x * x >= 2.0))
///     .unwrap();
/// assert!(outcome.value() * outcome.value() >= 2.0);
/// assert!((outcome.value() - 2f64.sqrt()).abs() <= 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisection {
    tolerance: f64,
    max_doublings: u32,
    max_bisections: u32,
}

impl Default for Bisection {
    fn default() -> Self {
        Self::new()
    }
}

impl Bisection {
    /// The default cap on probe doublings.
    pub const DEFAULT_MAX_DOUBLINGS: u32 = 64;
    /// The default cap on bisection steps.
    pub const DEFAULT_MAX_BISECTIONS: u32 = 256;

    /// Creates a search with the default tolerance and caps.
    #[inline]
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_doublings: Self::DEFAULT_MAX_DOUBLINGS,
            max_bisections: Self::DEFAULT_MAX_BISECTIONS,
        }
    }

    /// Sets the bracket width at which bisection stops.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `tolerance` is not positive.
    #[inline]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        debug_assert!(
            tolerance > 0.0,
            "called `Bisection::with_tolerance` with a non-positive tolerance: {}",
            tolerance
        );
        self.tolerance = tolerance;
        self
    }

    /// Sets the cap on probe doublings.
    #[inline]
    pub fn with_max_doublings(mut self, max_doublings: u32) -> Self {
        self.max_doublings = max_doublings;
        self
    }

    /// Sets the cap on bisection steps.
    #[inline]
    pub fn with_max_bisections(mut self, max_bisections: u32) -> Self {
        self.max_bisections = max_bisections;
        self
    }

    /// Returns the tolerance.
    #[inline(always)]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Finds the smallest feasible value above `anchor`.
    ///
    /// # Errors
    ///
    /// - `SearchError::UnboundedSearch` if no feasible probe is found within
    ///   the doubling cap.
    /// - `SearchError::Aborted` if `monitor` requests termination.
    /// - Any error returned by `predicate`, unchanged.
    pub fn minimize<M, F, E>(
        &self,
        anchor: f64,
        initial: f64,
        monitor: &mut M,
        predicate: F,
    ) -> Result<SearchOutcome<f64>, E>
    where
        M: SearchMonitor<f64> + ?Sized,
        F: FnMut(f64) -> Result<bool, E>,
        E: From<SearchError>,
    {
        self.run(Sense::Minimize, anchor, initial, monitor, predicate)
    }

    /// Finds the largest feasible value above `anchor`.
    ///
    /// # Errors
    ///
    /// - `SearchError::UnboundedSearch` if no infeasible probe is found
    ///   within the doubling cap.
    /// - `SearchError::NoFeasibleValue` if no probe was feasible.
    /// - `SearchError::Aborted` if `monitor` requests termination.
    /// - Any error returned by `predicate`, unchanged.
    pub fn maximize<M, F, E>(
        &self,
        anchor: f64,
        initial: f64,
        monitor: &mut M,
        predicate: F,
    ) -> Result<SearchOutcome<f64>, E>
    where
        M: SearchMonitor<f64> + ?Sized,
        F: FnMut(f64) -> Result<bool, E>,
        E: From<SearchError>,
    {
        self.run(Sense::Maximize, anchor, initial, monitor, predicate)
    }

    fn run<M, F, E>(
        &self,
        sense: Sense,
        anchor: f64,
        initial: f64,
        monitor: &mut M,
        mut predicate: F,
    ) -> Result<SearchOutcome<f64>, E>
    where
        M: SearchMonitor<f64> + ?Sized,
        F: FnMut(f64) -> Result<bool, E>,
        E: From<SearchError>,
    {
        debug_assert!(
            anchor.is_finite() && initial.is_finite() && initial > anchor,
            "called `Bisection::run` with initial probe {} not above anchor {}",
            initial,
            anchor
        );

        let start = Instant::now();
        let mut statistics = SearchStatistics::default();
        monitor.on_enter_search(initial);

        let result = self.search(sense, anchor, initial, monitor, &mut predicate, &mut statistics);

        statistics.duration = start.elapsed();
        monitor.on_exit_search(&statistics);
        result.map(|(value, bracket)| SearchOutcome::new(value, bracket, statistics))
    }

    fn search<M, F, E>(
        &self,
        sense: Sense,
        anchor: f64,
        initial: f64,
        monitor: &mut M,
        predicate: &mut F,
        statistics: &mut SearchStatistics,
    ) -> Result<(f64, Bracket<f64>), E>
    where
        M: SearchMonitor<f64> + ?Sized,
        F: FnMut(f64) -> Result<bool, E>,
        E: From<SearchError>,
    {
        let mut below = anchor;
        let mut feasible_seen = false;
        let mut above = initial;

        loop {
            let feasible = probe(monitor, predicate, statistics, above)?;
            feasible_seen |= feasible;
            if sense.is_above(feasible) {
                break;
            }
            let next = anchor + 2.0 * (above - anchor);
            if statistics.doublings >= self.max_doublings || !next.is_finite() {
                return Err(SearchError::UnboundedSearch {
                    lower: below,
                    upper: above,
                    doublings: statistics.doublings,
                }
                .into());
            }
            below = above;
            statistics.doublings += 1;
            above = next;
        }

        let mut bracket = Bracket::new(below, above);
        while bracket.width() > self.tolerance && statistics.bisections < self.max_bisections {
            let Some(mid) = bracket.split_point() else {
                break;
            };
            statistics.bisections += 1;
            let feasible = probe(monitor, predicate, statistics, mid)?;
            feasible_seen |= feasible;
            bracket = if sense.is_above(feasible) {
                bracket.with_upper(mid)
            } else {
                bracket.with_lower(mid)
            };
        }

        match sense {
            Sense::Minimize => Ok((bracket.upper(), bracket)),
            Sense::Maximize if feasible_seen => Ok((bracket.lower(), bracket)),
            Sense::Maximize => Err(SearchError::NoFeasibleValue {
                lower: anchor,
                upper: initial,
                probes: statistics.probes,
            }
            .into()),
        }
    }
}
