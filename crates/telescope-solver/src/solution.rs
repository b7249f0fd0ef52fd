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

use telescope_model::{
    error::DomainError,
    params::{QueueParameters, TrafficParameters},
    target::Objective,
};
use telescope_queue::metrics::QueueMetrics;
use telescope_search::stats::SearchStatistics;

/// The value a solve determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolvedValue {
    /// A server count.
    Agents(u32),
    /// A server count together with the smallest capacity it needs.
    AgentsAndCapacity { agents: u32, capacity: u32 },
    /// A system capacity.
    Capacity(u32),
    /// An arrival rate in customers per second.
    CallVolume(f64),
    /// A per-server service rate in customers per second.
    ServiceRate(f64),
}

impl SolvedValue {
    /// Returns the value as a float, the server count for
    /// `AgentsAndCapacity`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            SolvedValue::Agents(s) | SolvedValue::AgentsAndCapacity { agents: s, .. } => s as f64,
            SolvedValue::Capacity(k) => k as f64,
            SolvedValue::CallVolume(v) | SolvedValue::ServiceRate(v) => v,
        }
    }
}

impl std::fmt::Display for SolvedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolvedValue::Agents(s) => write!(f, "{} agents", s),
            SolvedValue::AgentsAndCapacity { agents, capacity } => {
                write!(f, "{} agents with capacity {}", agents, capacity)
            }
            SolvedValue::Capacity(k) => write!(f, "capacity {}", k),
            SolvedValue::CallVolume(rate) => write!(f, "{} arrivals/s", rate),
            SolvedValue::ServiceRate(rate) => write!(f, "{} services/s", rate),
        }
    }
}

/// The result of a successful solve.
///
/// Besides the solved value, a solution carries the complete system at that
/// value and its measures, so a caller can re-evaluate the constraints
/// without repeating the search.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffingSolution {
    objective: Objective,
    value: SolvedValue,
    traffic: TrafficParameters,
    capacity: Option<u32>,
    metrics: QueueMetrics,
    service_level: Option<f64>,
    statistics: SearchStatistics,
}

impl StaffingSolution {
    pub(crate) fn new(
        objective: Objective,
        value: SolvedValue,
        traffic: TrafficParameters,
        capacity: Option<u32>,
        metrics: QueueMetrics,
        service_level: Option<f64>,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            objective,
            value,
            traffic,
            capacity,
            metrics,
            service_level,
            statistics,
        }
    }

    #[inline(always)]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    #[inline(always)]
    pub fn value(&self) -> SolvedValue {
        self.value
    }

    /// Returns λ, μ and s of the solved system.
    #[inline(always)]
    pub fn traffic(&self) -> &TrafficParameters {
        &self.traffic
    }

    /// Returns the capacity of the solved system, `None` if unbounded.
    #[inline(always)]
    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    /// Returns the solved system as M/M/s/K parameters, or `None` if its
    /// capacity is unbounded.
    pub fn queue_parameters(&self) -> Option<Result<QueueParameters, DomainError>> {
        self.capacity.map(|k| self.traffic.with_capacity(k))
    }

    #[inline(always)]
    pub fn metrics(&self) -> &QueueMetrics {
        &self.metrics
    }

    /// Returns the achieved service level, if the target constrains it.
    #[inline(always)]
    pub fn service_level(&self) -> Option<f64> {
        self.service_level
    }

    /// Returns the statistics of all searches performed by the solve, with
    /// the wall-clock time of the whole solve.
    #[inline(always)]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for StaffingSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Staffing Solution:")?;
        writeln!(f, "  Objective: {}", self.objective)?;
        writeln!(f, "  Value: {}", self.value)?;
        writeln!(f, "  System: {}", self.traffic)?;
        match self.capacity {
            Some(k) => writeln!(f, "  Capacity: {}", k)?,
            None => writeln!(f, "  Capacity: unbounded")?,
        }
        if let Some(sl) = self.service_level {
            writeln!(f, "  Service Level: {:.6}", sl)?;
        }
        writeln!(f, "  Blocking: {:.6e}", self.metrics.blocking_probability)?;
        writeln!(f, "  Average Wait: {:.3}s", self.metrics.expected_waiting_time)?;
        writeln!(f, "  Probes: {}", self.statistics.probes)?;
        writeln!(
            f,
            "  Duration: {:.3}ms",
            self.statistics.duration.as_secs_f64() * 1e3
        )
    }
}
