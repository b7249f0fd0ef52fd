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

//! Solve targets.
//!
//! A `SolveTarget` pairs the unknown being optimized (`Objective`) with the
//! `Constraints` the resulting system must satisfy. Agents, capacity and
//! service rate are minimized; call volume is maximized. When several values
//! satisfy the constraints the solver returns the extremal one, so a system
//! is never provisioned beyond what the target requires.

use crate::error::{DomainError, check_duration, check_probability};
use serde::{Deserialize, Serialize};

/// The unknown a solve determines, together with its optimization sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Objective {
    /// The smallest number of servers.
    MinAgents,
    /// The smallest system capacity `K` for a fixed number of servers.
    MinCapacity,
    /// The largest arrival rate the system can absorb.
    MaxCallVolume,
    /// The smallest per-server service rate.
    MinServiceRate,
}

impl Objective {
    /// Returns `true` if the objective looks for the largest feasible value.
    #[inline]
    pub fn is_maximization(&self) -> bool {
        matches!(self, Objective::MaxCallVolume)
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Objective::MinAgents => write!(f, "minimal agents"),
            Objective::MinCapacity => write!(f, "minimal capacity"),
            Objective::MaxCallVolume => write!(f, "maximal call volume"),
            Objective::MinServiceRate => write!(f, "minimal service rate"),
        }
    }
}

/// "`fraction` of admitted customers wait at most `within` seconds".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceLevel {
    fraction: f64,
    within: f64,
}

impl ServiceLevel {
    /// Creates a validated service level.
    ///
    /// `fraction` must lie in `[0, 1]` and `within` must be a positive
    /// number of seconds.
    ///
    /// ```rust
    /// use telescope_model::target::ServiceLevel;
    ///
    /// let sl = ServiceLevel::new(0.8, 20.0).unwrap();
    /// assert!(sl.is_met_by(0.81));
    /// assert!(!sl.is_met_by(0.79));
    /// assert!(ServiceLevel::new(1.2, 20.0).is_err());
    /// ```
    pub fn new(fraction: f64, within: f64) -> Result<Self, DomainError> {
        check_probability("service level fraction", fraction)?;
        check_duration("service level time", within)?;
        Ok(Self { fraction, within })
    }

    /// Returns the required fraction.
    #[inline(always)]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Returns the waiting-time bound in seconds.
    #[inline(always)]
    pub fn within(&self) -> f64 {
        self.within
    }

    /// Returns `true` if `probability` (of waiting at most `within`) meets
    /// the target.
    #[inline]
    pub fn is_met_by(&self, probability: f64) -> bool {
        probability >= self.fraction
    }
}

impl std::fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}% within {}s", self.fraction * 100.0, self.within)
    }
}

/// The set of constraints a solution must satisfy simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Constraints {
    service_level: Option<ServiceLevel>,
    max_blocking: Option<f64>,
    max_average_wait: Option<f64>,
}

impl Constraints {
    /// Creates an empty constraint set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the given service level.
    #[inline]
    pub fn with_service_level(mut self, service_level: ServiceLevel) -> Self {
        self.service_level = Some(service_level);
        self
    }

    /// Bounds the blocking probability from above.
    pub fn with_max_blocking(mut self, max_blocking: f64) -> Result<Self, DomainError> {
        self.max_blocking = Some(check_probability("blocking bound", max_blocking)?);
        Ok(self)
    }

    /// Bounds the expected waiting time (seconds) from above.
    pub fn with_max_average_wait(mut self, max_average_wait: f64) -> Result<Self, DomainError> {
        self.max_average_wait = Some(check_duration("average wait bound", max_average_wait)?);
        Ok(self)
    }

    /// Returns the service level constraint, if any.
    #[inline(always)]
    pub fn service_level(&self) -> Option<ServiceLevel> {
        self.service_level
    }

    /// Returns the blocking bound, if any.
    #[inline(always)]
    pub fn max_blocking(&self) -> Option<f64> {
        self.max_blocking
    }

    /// Returns the average wait bound, if any.
    #[inline(always)]
    pub fn max_average_wait(&self) -> Option<f64> {
        self.max_average_wait
    }

    /// Returns `true` if no constraint is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.service_level.is_none() && self.max_blocking.is_none() && self.max_average_wait.is_none()
    }
}

impl std::fmt::Display for Constraints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(sl) = self.service_level {
            parts.push(format!("service level {}", sl));
        }
        if let Some(p) = self.max_blocking {
            parts.push(format!("blocking <= {}", p));
        }
        if let Some(w) = self.max_average_wait {
            parts.push(format!("average wait <= {}s", w));
        }
        if parts.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// An objective together with the constraints to satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveTarget {
    objective: Objective,
    constraints: Constraints,
}

impl SolveTarget {
    /// Creates a solve target. Fails if `constraints` is empty.
    pub fn new(objective: Objective, constraints: Constraints) -> Result<Self, DomainError> {
        if constraints.is_empty() {
            return Err(DomainError::NoConstraints);
        }
        Ok(Self {
            objective,
            constraints,
        })
    }

    /// Returns the objective.
    #[inline(always)]
    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Returns the constraints.
    #[inline(always)]
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }
}

impl std::fmt::Display for SolveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} subject to {}", self.objective, self.constraints)
    }
}
