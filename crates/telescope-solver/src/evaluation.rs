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

//! # Constraint Evaluation
//!
//! Measures one candidate system and checks it against a set of
//! `Constraints`. A candidate is a `TrafficParameters` value plus an optional
//! capacity: `None` selects the Erlang C model with an infinite waiting room,
//! `Some(K)` the M/M/s/K model.
//!
//! A saturated candidate (an unstable Erlang C system, or a finite system
//! that blocks every arrival) is not an error here. It is reported as
//! `Evaluation::Saturated`, which satisfies no constraint, so the searches
//! built on top of it simply treat it as infeasible.

use crate::error::SolverError;
use telescope_model::{params::TrafficParameters, target::Constraints};
use telescope_queue::{
    erlang_c::ErlangC, error::QueueError, metrics::QueueMetrics, mmsk::FiniteQueue,
};

/// The measured state of a candidate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// The system has no meaningful steady state.
    Saturated,
    /// The system reached a steady state.
    Measured {
        metrics: QueueMetrics,
        /// `ln p_K`; negative infinity without a capacity limit.
        ln_blocking: f64,
        /// The fraction answered within the constraint's time bound, if the
        /// constraints include a service level.
        service_level: Option<f64>,
    },
}

impl Evaluation {
    /// Returns `true` if every present constraint holds.
    pub fn satisfies(&self, constraints: &Constraints) -> bool {
        let Evaluation::Measured {
            metrics,
            ln_blocking,
            service_level,
        } = self
        else {
            return false;
        };

        if let Some(target) = constraints.service_level() {
            match service_level {
                Some(achieved) if target.is_met_by(*achieved) => {}
                _ => return false,
            }
        }
        // Compared in log space: a finite queue never meets a zero bound,
        // even where p_K underflows.
        if let Some(bound) = constraints.max_blocking() {
            if *ln_blocking > bound.ln() {
                return false;
            }
        }
        if let Some(bound) = constraints.max_average_wait() {
            if metrics.expected_waiting_time > bound {
                return false;
            }
        }
        true
    }

    /// Returns `true` if the system is saturated.
    #[inline]
    pub fn is_saturated(&self) -> bool {
        matches!(self, Evaluation::Saturated)
    }

    /// Returns the metrics of a measured system.
    #[inline]
    pub fn metrics(&self) -> Option<&QueueMetrics> {
        match self {
            Evaluation::Measured { metrics, .. } => Some(metrics),
            Evaluation::Saturated => None,
        }
    }

    /// Returns the achieved service level of a measured system.
    #[inline]
    pub fn service_level(&self) -> Option<f64> {
        match self {
            Evaluation::Measured { service_level, .. } => *service_level,
            Evaluation::Saturated => None,
        }
    }
}

/// Measures the candidate `traffic` with the given capacity.
///
/// # Errors
///
/// Returns `SolverError::Domain` if `capacity` is below the server count
/// or the service level time bound is invalid.
///
/// # Examples
///
/// ```rust
/// use telescope_model::{params::TrafficParameters, target::{Constraints, ServiceLevel}};
/// use telescope_solver::evaluation::evaluate;
///
/// let constraints = Constraints::new()
///     .with_service_level(ServiceLevel::new(0.8, 20.0).unwrap());
///
/// let traffic = TrafficParameters::new(20.0 / 240.0, 1.0 / 240.0, 25).unwrap();
/// assert!(evaluate(&traffic, None, &constraints).unwrap().satisfies(&constraints));
///
/// // 20 agents cannot keep up with 20 Erlangs.
/// let saturated = traffic.with_servers(20).unwrap();
/// assert!(evaluate(&saturated, None, &constraints).unwrap().is_saturated());
/// ```
pub fn evaluate(
    traffic: &TrafficParameters,
    capacity: Option<u32>,
    constraints: &Constraints,
) -> Result<Evaluation, SolverError> {
    let measured = match capacity {
        None => measure_unbounded(traffic, constraints),
        Some(capacity) => measure_finite(traffic, capacity, constraints),
    };

    match measured {
        Ok(Measurement {
            metrics,
            ln_blocking,
            service_level,
        }) => Ok(Evaluation::Measured {
            metrics,
            ln_blocking,
            service_level,
        }),
        Err(QueueError::Domain(e)) => Err(e.into()),
        Err(e) if e.is_degenerate() => Ok(Evaluation::Saturated),
        Err(e) => Err(e.into()),
    }
}

struct Measurement {
    metrics: QueueMetrics,
    ln_blocking: f64,
    service_level: Option<f64>,
}

fn measure_unbounded(
    traffic: &TrafficParameters,
    constraints: &Constraints,
) -> Result<Measurement, QueueError> {
    let queue = ErlangC::new(*traffic)?;
    let service_level = constraints
        .service_level()
        .map(|target| queue.service_level(target.within()))
        .transpose()?;
    Ok(Measurement {
        metrics: queue.metrics(),
        ln_blocking: f64::NEG_INFINITY,
        service_level,
    })
}

fn measure_finite(
    traffic: &TrafficParameters,
    capacity: u32,
    constraints: &Constraints,
) -> Result<Measurement, QueueError> {
    let queue = FiniteQueue::new(traffic.with_capacity(capacity)?);
    let service_level = constraints
        .service_level()
        .map(|target| queue.waiting_time_cdf(target.within()))
        .transpose()?;
    Ok(Measurement {
        metrics: queue.metrics()?,
        ln_blocking: queue.ln_blocking_probability(),
        service_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use telescope_model::{error::DomainError, target::ServiceLevel};

    fn scenario_two() -> TrafficParameters {
        TrafficParameters::new(254.0 / 3600.0, 1.0 / 300.0, 27).unwrap()
    }

    #[test]
    fn test_finite_measurements() {
        let constraints = Constraints::new()
            .with_service_level(ServiceLevel::new(0.9, 20.0).unwrap())
            .with_max_blocking(0.01)
            .unwrap();
        let evaluation = evaluate(&scenario_two(), Some(33), &constraints).unwrap();

        let metrics = evaluation.metrics().unwrap();
        assert!((metrics.blocking_probability - 0.008375778095685507).abs() < 1e-12);
        assert!((evaluation.service_level().unwrap() - 0.9249128062069523).abs() < 1e-10);
        assert!(evaluation.satisfies(&constraints));

        // One waiting position less pushes blocking above one percent.
        let evaluation = evaluate(&scenario_two(), Some(32), &constraints).unwrap();
        assert!(!evaluation.satisfies(&constraints));
    }

    #[test]
    fn test_each_constraint_is_checked() {
        let traffic = TrafficParameters::new(20.0 / 240.0, 1.0 / 240.0, 25).unwrap();
        let evaluation = evaluate(&traffic, None, &Constraints::new()).unwrap();
        // ASA is about 10.04 seconds.
        assert!(
            evaluation.satisfies(&Constraints::new().with_max_average_wait(10.1).unwrap())
        );
        assert!(
            !evaluation.satisfies(&Constraints::new().with_max_average_wait(10.0).unwrap())
        );
        assert!(evaluation.satisfies(&Constraints::new().with_max_blocking(0.0).unwrap()));

        // A service level constraint cannot be met without a measured service level.
        let sl = Constraints::new().with_service_level(ServiceLevel::new(0.5, 20.0).unwrap());
        assert_eq!(evaluation.service_level(), None);
        assert!(!evaluation.satisfies(&sl));
    }

    #[test]
    fn test_zero_blocking_bound_with_underflowing_blocking() {
        // ρ = 1/2 and K = 1100, so p_K is about e^-763 and reads 0.0 as f64.
        let traffic = TrafficParameters::new(0.5, 1.0, 1).unwrap();
        let evaluation = evaluate(&traffic, Some(1100), &Constraints::new()).unwrap();
        assert_eq!(evaluation.metrics().unwrap().blocking_probability, 0.0);

        let zero = Constraints::new().with_max_blocking(0.0).unwrap();
        assert!(!evaluation.satisfies(&zero));
        assert!(evaluation.satisfies(&Constraints::new().with_max_blocking(1e-300).unwrap()));
    }

    #[test]
    fn test_saturated_systems_fail_every_constraint() {
        let traffic = TrafficParameters::new(20.0 / 240.0, 1.0 / 240.0, 20).unwrap();
        let evaluation = evaluate(&traffic, None, &Constraints::new()).unwrap();
        assert_eq!(evaluation, Evaluation::Saturated);
        assert!(!evaluation.satisfies(&Constraints::new().with_max_blocking(1.0).unwrap()));
        assert_eq!(evaluation.metrics(), None);
    }

    #[test]
    fn test_capacity_below_servers_is_an_error() {
        let err = evaluate(&scenario_two(), Some(26), &Constraints::new()).unwrap_err();
        assert_eq!(
            err,
            SolverError::Domain(DomainError::CapacityBelowServers {
                servers: 27,
                capacity: 26
            })
        );
    }
}
