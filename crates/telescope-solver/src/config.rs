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

//! Solver configuration.
//!
//! `SolverConfig` bundles every knob of the underlying searches. It is built
//! with `with_*` methods or deserialized from TOML; absent keys keep their
//! defaults.
//!
//! ```toml
//! tolerance = 1e-9
//! integer-strategy = "linear"
//! time-limit = 2.5
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use telescope_search::{bisect::Bisection, integer::IntegerStrategy};

/// Limits and strategies used by `StaffingSolver`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SolverConfig {
    tolerance: f64,
    max_doublings: u32,
    max_bisections: u32,
    integer_strategy: IntegerStrategy,
    #[serde(with = "seconds", skip_serializing_if = "Option::is_none")]
    time_limit: Option<Duration>,
    verify_boundary: bool,
    max_servers: u32,
    max_capacity: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverConfig {
    /// The default upper bound on server counts.
    pub const DEFAULT_MAX_SERVERS: u32 = 1_000_000;
    /// The default upper bound on system capacities.
    pub const DEFAULT_MAX_CAPACITY: u32 = 1_000_000;

    /// Creates the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self {
            tolerance: telescope_search::bisect::DEFAULT_TOLERANCE,
            max_doublings: Bisection::DEFAULT_MAX_DOUBLINGS,
            max_bisections: Bisection::DEFAULT_MAX_BISECTIONS,
            integer_strategy: IntegerStrategy::default(),
            time_limit: None,
            verify_boundary: true,
            max_servers: Self::DEFAULT_MAX_SERVERS,
            max_capacity: Self::DEFAULT_MAX_CAPACITY,
        }
    }

    /// Sets the bracket width at which real-valued searches stop.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `tolerance` is not positive.
    #[inline]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        debug_assert!(
            tolerance > 0.0,
            "called `SolverConfig::with_tolerance` with a non-positive tolerance: {}",
            tolerance
        );
        self.tolerance = tolerance;
        self
    }

    /// Sets the cap on window doublings of every search.
    #[inline]
    pub fn with_max_doublings(mut self, max_doublings: u32) -> Self {
        self.max_doublings = max_doublings;
        self
    }

    /// Sets the cap on bisection steps of real-valued searches.
    #[inline]
    pub fn with_max_bisections(mut self, max_bisections: u32) -> Self {
        self.max_bisections = max_bisections;
        self
    }

    /// Sets how integer searches grow their window.
    #[inline]
    pub fn with_integer_strategy(mut self, strategy: IntegerStrategy) -> Self {
        self.integer_strategy = strategy;
        self
    }

    /// Limits the wall-clock time of a single solve.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Enables or disables the monotonicity check at integer results.
    #[inline]
    pub fn with_boundary_verification(mut self, verify_boundary: bool) -> Self {
        self.verify_boundary = verify_boundary;
        self
    }

    /// Sets the largest server count an agent search may probe.
    #[inline]
    pub fn with_max_servers(mut self, max_servers: u32) -> Self {
        self.max_servers = max_servers;
        self
    }

    /// Sets the largest capacity a capacity search may probe.
    #[inline]
    pub fn with_max_capacity(mut self, max_capacity: u32) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    #[inline(always)]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[inline(always)]
    pub fn max_doublings(&self) -> u32 {
        self.max_doublings
    }

    #[inline(always)]
    pub fn max_bisections(&self) -> u32 {
        self.max_bisections
    }

    #[inline(always)]
    pub fn integer_strategy(&self) -> IntegerStrategy {
        self.integer_strategy
    }

    #[inline(always)]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline(always)]
    pub fn verify_boundary(&self) -> bool {
        self.verify_boundary
    }

    #[inline(always)]
    pub fn max_servers(&self) -> u32 {
        self.max_servers
    }

    #[inline(always)]
    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Configuration:")?;
        writeln!(f, "  Tolerance: {:e}", self.tolerance)?;
        writeln!(f, "  Max Doublings: {}", self.max_doublings)?;
        writeln!(f, "  Max Bisections: {}", self.max_bisections)?;
        writeln!(f, "  Integer Strategy: {}", self.integer_strategy)?;
        match self.time_limit {
            Some(limit) => writeln!(f, "  Time Limit: {:.3}s", limit.as_secs_f64())?,
            None => writeln!(f, "  Time Limit: none")?,
        }
        writeln!(f, "  Verify Boundary: {}", self.verify_boundary)?;
        writeln!(f, "  Max Servers: {}", self.max_servers)?;
        writeln!(f, "  Max Capacity: {}", self.max_capacity)
    }
}

/// Time limits are written as fractional seconds.
mod seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
    use std::time::Duration;

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.map(|d| d.as_secs_f64()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<f64>::deserialize(deserializer)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(D::Error::custom))
            .transpose()
    }
}
