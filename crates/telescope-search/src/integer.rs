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

//! # Monotone Integer Search
//!
//! Finds the smallest integer at or above a floor for which a monotone
//! predicate holds: infeasible below some threshold, feasible from the
//! threshold on.
//!
//! ## Strategies
//!
//! - `Linear` probes `floor, floor + 1, floor + 2, ...`. It needs as many
//!   probes as the distance to the threshold, but never probes beyond it,
//!   which matters when probes get more expensive with the value.
//! - `Exponential` probes `floor, floor + 1, floor + 3, floor + 7, ...`,
//!   doubling the window each time, and bisects the last window once a
//!   feasible value has been seen. It needs `O(log d)` probes for a
//!   threshold at distance `d`.
//!
//! Both strategies are capped (`max_linear_steps`, `max_doublings`, and the
//! `ceiling`); hitting a cap fails with `SearchError::UnboundedSearch`.
//!
//! ## Boundary verification
//!
//! When a search ends at `v`, the bracket already proves `v - 1` infeasible
//! (unless `v` is the floor). With verification enabled, `v + 1` is probed as
//! well and must be feasible; otherwise the predicate is not monotone and the
//! search fails with `SearchError::NonMonotonic`.

use crate::{
    error::SearchError, monitor::SearchMonitor, probe::probe, result::SearchOutcome,
    stats::SearchStatistics,
};
use num_traits::PrimInt;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use telescope_core::math::bracket::Bracket;

/// How an integer search advances past infeasible values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntegerStrategy {
    /// Step by one.
    Linear,
    /// Double the window, then bisect.
    #[default]
    Exponential,
}

impl std::fmt::Display for IntegerStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegerStrategy::Linear => write!(f, "linear"),
            IntegerStrategy::Exponential => write!(f, "exponential"),
        }
    }
}

#[inline]
fn as_f64<T: PrimInt>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// A monotone search over integers of type `T`.
///
/// # Examples
///
/// ```rust
/// use telescope_search::{
///     error::SearchError,
///     integer::{IntegerSearch, IntegerStrategy},
///     monitor::NoOpMonitor,
/// };
///
/// let search = IntegerSearch::new(10u64).with_strategy(IntegerStrategy::Linear);
/// let outcome = search
///     .run(&mut NoOpMonitor, |n| Ok::<_, SearchError>(n >= 13))
///     .unwrap();
/// assert_eq!(outcome.value(), 13);
/// // 10, 11, 12, 13 and the verification probe at 14.
/// assert_eq!(outcome.statistics().probes, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerSearch<T> {
    floor: T,
    ceiling: T,
    strategy: IntegerStrategy,
    max_linear_steps: u32,
    max_doublings: u32,
    verify_boundary: bool,
}

impl<T> IntegerSearch<T>
where
    T: PrimInt + std::fmt::Debug,
{
    /// The default cap on linear steps.
    pub const DEFAULT_MAX_LINEAR_STEPS: u32 = 1_000_000;
    /// The default cap on window doublings.
    pub const DEFAULT_MAX_DOUBLINGS: u32 = 48;

    /// Creates an exponential search starting at `floor` with verification
    /// enabled and no ceiling below `T::max_value()`.
    #[inline]
    pub fn new(floor: T) -> Self {
        Self {
            floor,
            ceiling: T::max_value(),
            strategy: IntegerStrategy::default(),
            max_linear_steps: Self::DEFAULT_MAX_LINEAR_STEPS,
            max_doublings: Self::DEFAULT_MAX_DOUBLINGS,
            verify_boundary: true,
        }
    }

    /// Sets the largest value the search may probe.
    #[inline]
    pub fn with_ceiling(mut self, ceiling: T) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Sets the strategy.
    #[inline]
    pub fn with_strategy(mut self, strategy: IntegerStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the cap on linear steps.
    #[inline]
    pub fn with_max_linear_steps(mut self, max_linear_steps: u32) -> Self {
        self.max_linear_steps = max_linear_steps;
        self
    }

    /// Sets the cap on window doublings.
    #[inline]
    pub fn with_max_doublings(mut self, max_doublings: u32) -> Self {
        self.max_doublings = max_doublings;
        self
    }

    /// Enables or disables the probe above the result.
    #[inline]
    pub fn with_boundary_verification(mut self, verify_boundary: bool) -> Self {
        self.verify_boundary = verify_boundary;
        self
    }

    /// Returns the floor.
    #[inline(always)]
    pub fn floor(&self) -> T {
        self.floor
    }

    /// Returns the ceiling.
    #[inline(always)]
    pub fn ceiling(&self) -> T {
        self.ceiling
    }

    /// Returns the strategy.
    #[inline(always)]
    pub fn strategy(&self) -> IntegerStrategy {
        self.strategy
    }

    /// Runs the search and returns the smallest feasible value.
    ///
    /// # Errors
    ///
    /// - `SearchError::UnboundedSearch` if a cap or the ceiling is reached
    ///   before a feasible value is found.
    /// - `SearchError::NonMonotonic` if verification finds `v + 1`
    ///   infeasible.
    /// - `SearchError::Aborted` if `monitor` requests termination.
    /// - Any error returned by `predicate`, unchanged.
    pub fn run<M, F, E>(&self, monitor: &mut M, mut predicate: F) -> Result<SearchOutcome<T>, E>
    where
        M: SearchMonitor<T> + ?Sized,
        F: FnMut(T) -> Result<bool, E>,
        E: From<SearchError>,
    {
        let start = Instant::now();
        let mut statistics = SearchStatistics::default();
        monitor.on_enter_search(self.floor);

        let result = self.search(monitor, &mut predicate, &mut statistics);

        statistics.duration = start.elapsed();
        monitor.on_exit_search(&statistics);
        result.map(|(value, bracket)| SearchOutcome::new(value, bracket, statistics))
    }

    fn search<M, F, E>(
        &self,
        monitor: &mut M,
        predicate: &mut F,
        statistics: &mut SearchStatistics,
    ) -> Result<(T, Bracket<T>), E>
    where
        M: SearchMonitor<T> + ?Sized,
        F: FnMut(T) -> Result<bool, E>,
        E: From<SearchError>,
    {
        if self.floor > self.ceiling {
            return Err(SearchError::UnboundedSearch {
                lower: as_f64(self.floor),
                upper: as_f64(self.ceiling),
                doublings: 0,
            }
            .into());
        }

        let bracket = match self.strategy {
            IntegerStrategy::Linear => self.scan(monitor, predicate, statistics)?,
            IntegerStrategy::Exponential => self.gallop(monitor, predicate, statistics)?,
        };
        let value = bracket.upper();

        if self.verify_boundary && value < self.ceiling {
            let above = value + T::one();
            if !probe(monitor, predicate, statistics, above)? {
                return Err(SearchError::NonMonotonic {
                    value: as_f64(value),
                }
                .into());
            }
        }

        Ok((value, bracket))
    }

    /// Linear scan; returns `[v - 1, v]`, or `[floor, floor]` if the floor
    /// is feasible.
    fn scan<M, F, E>(
        &self,
        monitor: &mut M,
        predicate: &mut F,
        statistics: &mut SearchStatistics,
    ) -> Result<Bracket<T>, E>
    where
        M: SearchMonitor<T> + ?Sized,
        F: FnMut(T) -> Result<bool, E>,
        E: From<SearchError>,
    {
        let mut value = self.floor;
        let mut steps = 0u32;
        loop {
            if probe(monitor, predicate, statistics, value)? {
                let lower = if value > self.floor {
                    value - T::one()
                } else {
                    value
                };
                return Ok(Bracket::new(lower, value));
            }
            if steps >= self.max_linear_steps || value >= self.ceiling {
                let lower = if value > self.floor {
                    value - T::one()
                } else {
                    value
                };
                return Err(SearchError::UnboundedSearch {
                    lower: as_f64(lower),
                    upper: as_f64(value),
                    doublings: 0,
                }
                .into());
            }
            value = value + T::one();
            steps += 1;
        }
    }

    /// Exponential window growth followed by bisection.
    fn gallop<M, F, E>(
        &self,
        monitor: &mut M,
        predicate: &mut F,
        statistics: &mut SearchStatistics,
    ) -> Result<Bracket<T>, E>
    where
        M: SearchMonitor<T> + ?Sized,
        F: FnMut(T) -> Result<bool, E>,
        E: From<SearchError>,
    {
        if probe(monitor, predicate, statistics, self.floor)? {
            return Ok(Bracket::new(self.floor, self.floor));
        }
        if self.floor >= self.ceiling {
            return Err(SearchError::UnboundedSearch {
                lower: as_f64(self.floor),
                upper: as_f64(self.floor),
                doublings: 0,
            }
            .into());
        }

        let mut lower = self.floor;
        let mut offset = T::one();
        let upper = loop {
            let candidate = self
                .floor
                .checked_add(&offset)
                .map_or(self.ceiling, |c| c.min(self.ceiling));
            if probe(monitor, predicate, statistics, candidate)? {
                break candidate;
            }
            if candidate >= self.ceiling || statistics.doublings >= self.max_doublings {
                return Err(SearchError::UnboundedSearch {
                    lower: as_f64(lower),
                    upper: as_f64(candidate),
                    doublings: statistics.doublings,
                }
                .into());
            }
            lower = candidate;
            statistics.doublings += 1;
            offset = offset
                .checked_add(&offset)
                .and_then(|o| o.checked_add(&T::one()))
                .unwrap_or_else(T::max_value);
        };

        let mut bracket = Bracket::new(lower, upper);
        while let Some(mid) = bracket.interior_midpoint() {
            statistics.bisections += 1;
            bracket = if probe(monitor, predicate, statistics, mid)? {
                bracket.with_upper(mid)
            } else {
                bracket.with_lower(mid)
            };
        }
        Ok(bracket)
    }
}
