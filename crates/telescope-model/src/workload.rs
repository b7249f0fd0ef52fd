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

//! Workloads handed to the solver.
//!
//! A `Workload` is a partially specified system: exactly the quantity being
//! solved for may be left out, every other one must be present for the
//! chosen objective. `CapacityPolicy` describes how the system capacity `K`
//! follows the number of servers while the solver varies it.

use crate::error::{DomainError, check_rate};
use crate::params::TrafficParameters;
use serde::{Deserialize, Serialize};

/// How the system capacity is derived from the server count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapacityPolicy {
    /// Infinite waiting room (Erlang C).
    #[default]
    Unbounded,
    /// A fixed capacity `K`, independent of the server count.
    Fixed(u32),
    /// `K = multiplier * s`.
    PerServer(u32),
    /// `K = s + headroom` waiting positions.
    Headroom(u32),
    /// The smallest capacity that satisfies the constraints, searched
    /// separately for each candidate server count.
    Minimal,
}

impl CapacityPolicy {
    /// Checks the policy parameters.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            CapacityPolicy::PerServer(0) => Err(DomainError::InvalidCapacityMultiplier),
            // Every system has at least one server.
            CapacityPolicy::Fixed(0) => Err(DomainError::CapacityBelowServers {
                servers: 1,
                capacity: 0,
            }),
            _ => Ok(()),
        }
    }

    /// Returns the finite capacity for `servers` servers.
    ///
    /// `Unbounded` and `Minimal` yield `None`: the former has no capacity
    /// limit, the latter is resolved by a search rather than a formula.
    /// Derived capacities saturate at `u32::MAX`.
    ///
    /// ```rust
    /// use telescope_model::workload::CapacityPolicy;
    ///
    /// assert_eq!(CapacityPolicy::PerServer(2).capacity_for(10), Some(20));
    /// assert_eq!(CapacityPolicy::Headroom(3).capacity_for(10), Some(13));
    /// assert_eq!(CapacityPolicy::Unbounded.capacity_for(10), None);
    /// ```
    pub fn capacity_for(&self, servers: u32) -> Option<u32> {
        match *self {
            CapacityPolicy::Unbounded | CapacityPolicy::Minimal => None,
            CapacityPolicy::Fixed(capacity) => Some(capacity),
            CapacityPolicy::PerServer(multiplier) => Some(servers.saturating_mul(multiplier)),
            CapacityPolicy::Headroom(headroom) => Some(servers.saturating_add(headroom)),
        }
    }

    /// Returns `true` if the capacity is searched rather than derived.
    #[inline]
    pub fn is_minimal(&self) -> bool {
        matches!(self, CapacityPolicy::Minimal)
    }
}

impl std::fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapacityPolicy::Unbounded => write!(f, "unbounded"),
            CapacityPolicy::Fixed(k) => write!(f, "fixed K={}", k),
            CapacityPolicy::PerServer(m) => write!(f, "K={}s", m),
            CapacityPolicy::Headroom(h) => write!(f, "K=s+{}", h),
            CapacityPolicy::Minimal => write!(f, "minimal"),
        }
    }
}

/// A partially specified queueing system.
///
/// # Examples
///
/// ```rust
/// use telescope_model::workload::{CapacityPolicy, Workload};
///
/// let workload = Workload::new()
///     .with_arrival_rate(2.0).unwrap()
///     .with_service_rate(0.1).unwrap()
///     .with_capacity_policy(CapacityPolicy::PerServer(2)).unwrap();
///
/// assert_eq!(workload.servers(), None);
/// assert!(workload.require_servers().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Workload {
    arrival_rate: Option<f64>,
    service_rate: Option<f64>,
    servers: Option<u32>,
    capacity: CapacityPolicy,
}

impl Workload {
    /// Creates an empty workload with unbounded capacity.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fully specified workload.
    pub fn from_traffic(traffic: &TrafficParameters, capacity: CapacityPolicy) -> Result<Self, DomainError> {
        capacity.validate()?;
        Ok(Self {
            arrival_rate: Some(traffic.arrival_rate()),
            service_rate: Some(traffic.service_rate()),
            servers: Some(traffic.servers()),
            capacity,
        })
    }

    /// Sets the arrival rate λ (per second).
    pub fn with_arrival_rate(mut self, arrival_rate: f64) -> Result<Self, DomainError> {
        self.arrival_rate = Some(check_rate("arrival rate", arrival_rate)?);
        Ok(self)
    }

    /// Sets the per-server service rate μ (per second).
    pub fn with_service_rate(mut self, service_rate: f64) -> Result<Self, DomainError> {
        self.service_rate = Some(check_rate("service rate", service_rate)?);
        Ok(self)
    }

    /// Sets the number of servers.
    pub fn with_servers(mut self, servers: u32) -> Result<Self, DomainError> {
        if servers == 0 {
            return Err(DomainError::NoServers);
        }
        self.servers = Some(servers);
        Ok(self)
    }

    /// Sets the capacity policy.
    pub fn with_capacity_policy(mut self, capacity: CapacityPolicy) -> Result<Self, DomainError> {
        capacity.validate()?;
        self.capacity = capacity;
        Ok(self)
    }

    /// Returns the arrival rate, if known.
    #[inline(always)]
    pub fn arrival_rate(&self) -> Option<f64> {
        self.arrival_rate
    }

    /// Returns the service rate, if known.
    #[inline(always)]
    pub fn service_rate(&self) -> Option<f64> {
        self.service_rate
    }

    /// Returns the server count, if known.
    #[inline(always)]
    pub fn servers(&self) -> Option<u32> {
        self.servers
    }

    /// Returns the capacity policy.
    #[inline(always)]
    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.capacity
    }

    /// Returns the arrival rate or `MissingField`.
    #[inline]
    pub fn require_arrival_rate(&self) -> Result<f64, DomainError> {
        self.arrival_rate.ok_or(DomainError::MissingField("arrival rate"))
    }

    /// Returns the service rate or `MissingField`.
    #[inline]
    pub fn require_service_rate(&self) -> Result<f64, DomainError> {
        self.service_rate.ok_or(DomainError::MissingField("service rate"))
    }

    /// Returns the server count or `MissingField`.
    #[inline]
    pub fn require_servers(&self) -> Result<u32, DomainError> {
        self.servers.ok_or(DomainError::MissingField("server count"))
    }

    /// Returns the full traffic parameters, failing on the first missing
    /// value.
    pub fn traffic(&self) -> Result<TrafficParameters, DomainError> {
        TrafficParameters::new(
            self.require_arrival_rate()?,
            self.require_service_rate()?,
            self.require_servers()?,
        )
    }
}

impl std::fmt::Display for Workload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| "?".to_string(), |v| v.to_string())
        }
        write!(
            f,
            "Workload(λ={}, μ={}, s={}, capacity {})",
            opt(self.arrival_rate),
            opt(self.service_rate),
            opt(self.servers),
            self.capacity
        )
    }
}
