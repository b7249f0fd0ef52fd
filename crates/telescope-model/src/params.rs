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

//! Validated queue parameters.
//!
//! `TrafficParameters` describes the traffic side of a multi-server queue:
//! Poisson arrivals at rate λ, exponential service at rate μ per server and
//! `s` identical servers. `QueueParameters` adds the system capacity `K`, the
//! maximum number of customers present (in service plus waiting), which turns
//! the Erlang C delay system into the finite M/M/s/K queue.
//!
//! Both types are plain `Copy` values. The `with_*` methods return fresh,
//! re-validated values, which is how solvers build their trial systems.

use crate::error::{DomainError, check_rate};

/// Arrival rate, service rate and server count of a multi-server queue.
///
/// # Invariants
///
/// * `arrival_rate` and `service_rate` are finite and positive.
/// * `servers >= 1`.
/// * The offered load `arrival_rate / service_rate` is finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficParameters {
    arrival_rate: f64,
    service_rate: f64,
    servers: u32,
}

impl TrafficParameters {
    /// Creates validated traffic parameters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use telescope_model::params::TrafficParameters;
    ///
    /// let traffic = TrafficParameters::new(2.0, 0.5, 5).unwrap();
    /// assert_eq!(traffic.offered_load(), 4.0);
    /// assert_eq!(traffic.utilization(), 0.8);
    /// assert!(TrafficParameters::new(2.0, 0.5, 0).is_err());
    /// ```
    pub fn new(arrival_rate: f64, service_rate: f64, servers: u32) -> Result<Self, DomainError> {
        check_rate("arrival rate", arrival_rate)?;
        check_rate("service rate", service_rate)?;
        if servers == 0 {
            return Err(DomainError::NoServers);
        }
        let offered_load = arrival_rate / service_rate;
        if !offered_load.is_finite() || offered_load <= 0.0 {
            return Err(DomainError::OfferedLoadOutOfRange {
                arrival_rate,
                service_rate,
            });
        }
        Ok(Self {
            arrival_rate,
            service_rate,
            servers,
        })
    }

    /// Returns the arrival rate λ (customers per second).
    #[inline(always)]
    pub fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    /// Returns the per-server service rate μ (customers per second).
    #[inline(always)]
    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    /// Returns the number of servers `s`.
    #[inline(always)]
    pub fn servers(&self) -> u32 {
        self.servers
    }

    /// Returns the offered load `a = λ / μ` in Erlangs.
    #[inline]
    pub fn offered_load(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    /// Returns the utilization `ρ = a / s`.
    #[inline]
    pub fn utilization(&self) -> f64 {
        self.offered_load() / self.servers as f64
    }

    /// Returns `sμ`, the combined service rate when every server is busy.
    #[inline]
    pub fn total_service_rate(&self) -> f64 {
        self.servers as f64 * self.service_rate
    }

    /// Returns `true` if `ρ < 1`, the stability condition of the
    /// infinite-capacity queue.
    #[inline]
    pub fn is_stable(&self) -> bool {
        self.utilization() < 1.0
    }

    /// Returns a copy with a different server count.
    #[inline]
    pub fn with_servers(&self, servers: u32) -> Result<Self, DomainError> {
        Self::new(self.arrival_rate, self.service_rate, servers)
    }

    /// Returns a copy with a different arrival rate.
    #[inline]
    pub fn with_arrival_rate(&self, arrival_rate: f64) -> Result<Self, DomainError> {
        Self::new(arrival_rate, self.service_rate, self.servers)
    }

    /// Returns a copy with a different service rate.
    #[inline]
    pub fn with_service_rate(&self, service_rate: f64) -> Result<Self, DomainError> {
        Self::new(self.arrival_rate, service_rate, self.servers)
    }

    /// Attaches a finite capacity `K`, producing M/M/s/K parameters.
    #[inline]
    pub fn with_capacity(&self, capacity: u32) -> Result<QueueParameters, DomainError> {
        QueueParameters::from_traffic(*self, capacity)
    }
}

impl std::fmt::Display for TrafficParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "M/M/{} (λ={}, μ={}, a={:.4})",
            self.servers,
            self.arrival_rate,
            self.service_rate,
            self.offered_load()
        )
    }
}

/// Parameters of a finite-capacity M/M/s/K queue.
///
/// # Invariants
///
/// All invariants of `TrafficParameters`, plus `capacity >= servers`.
/// Finite capacity tolerates `ρ >= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueParameters {
    traffic: TrafficParameters,
    capacity: u32,
}

impl QueueParameters {
    /// Creates validated M/M/s/K parameters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use telescope_model::{error::DomainError, params::QueueParameters};
    ///
    /// let params = QueueParameters::new(254.0 / 3600.0, 1.0 / 300.0, 27, 33).unwrap();
    /// assert_eq!(params.queue_positions(), 6);
    ///
    /// assert_eq!(
    ///     QueueParameters::new(1.0, 1.0, 4, 3),
    ///     Err(DomainError::CapacityBelowServers { servers: 4, capacity: 3 })
    /// );
    /// ```
    pub fn new(
        arrival_rate: f64,
        service_rate: f64,
        servers: u32,
        capacity: u32,
    ) -> Result<Self, DomainError> {
        let traffic = TrafficParameters::new(arrival_rate, service_rate, servers)?;
        Self::from_traffic(traffic, capacity)
    }

    /// Attaches a capacity to already validated traffic parameters.
    pub fn from_traffic(traffic: TrafficParameters, capacity: u32) -> Result<Self, DomainError> {
        if capacity < traffic.servers() {
            return Err(DomainError::CapacityBelowServers {
                servers: traffic.servers(),
                capacity,
            });
        }
        Ok(Self { traffic, capacity })
    }

    /// Returns the traffic part of the parameters.
    #[inline(always)]
    pub fn traffic(&self) -> &TrafficParameters {
        &self.traffic
    }

    /// Returns the arrival rate λ.
    #[inline(always)]
    pub fn arrival_rate(&self) -> f64 {
        self.traffic.arrival_rate()
    }

    /// Returns the per-server service rate μ.
    #[inline(always)]
    pub fn service_rate(&self) -> f64 {
        self.traffic.service_rate()
    }

    /// Returns the number of servers `s`.
    #[inline(always)]
    pub fn servers(&self) -> u32 {
        self.traffic.servers()
    }

    /// Returns the capacity `K`.
    #[inline(always)]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns `K - s`, the number of waiting positions.
    #[inline]
    pub fn queue_positions(&self) -> u32 {
        self.capacity - self.servers()
    }

    /// Returns the offered load `a = λ / μ`.
    #[inline]
    pub fn offered_load(&self) -> f64 {
        self.traffic.offered_load()
    }

    /// Returns the utilization `ρ = a / s`.
    #[inline]
    pub fn utilization(&self) -> f64 {
        self.traffic.utilization()
    }

    /// Returns a copy with a different capacity.
    #[inline]
    pub fn with_capacity(&self, capacity: u32) -> Result<Self, DomainError> {
        Self::from_traffic(self.traffic, capacity)
    }
}

impl std::fmt::Display for QueueParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "M/M/{}/{} (λ={}, μ={}, a={:.4})",
            self.servers(),
            self.capacity,
            self.arrival_rate(),
            self.service_rate(),
            self.offered_load()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_derived_quantities() {
        let t = TrafficParameters::new(10.0, 2.0, 10).unwrap();
        assert_eq!(t.offered_load(), 5.0);
        assert_eq!(t.utilization(), 0.5);
        assert_eq!(t.total_service_rate(), 20.0);
        assert!(t.is_stable());

        let saturated = t.with_servers(5).unwrap();
        assert!(!saturated.is_stable());
    }

    #[test]
    fn test_traffic_rejects_invalid_inputs() {
        assert!(matches!(
            TrafficParameters::new(0.0, 1.0, 1),
            Err(DomainError::InvalidRate { name: "arrival rate", .. })
        ));
        assert!(matches!(
            TrafficParameters::new(1.0, -1.0, 1),
            Err(DomainError::InvalidRate { name: "service rate", .. })
        ));
        assert_eq!(TrafficParameters::new(1.0, 1.0, 0), Err(DomainError::NoServers));
        assert!(matches!(
            TrafficParameters::new(1e300, 1e-300, 1),
            Err(DomainError::OfferedLoadOutOfRange { .. })
        ));
    }

    #[test]
    fn test_queue_parameters_capacity_rules() {
        let p = QueueParameters::new(1.0, 0.5, 3, 3).unwrap();
        assert_eq!(p.queue_positions(), 0);
        assert!(p.with_capacity(2).is_err());
        assert_eq!(p.with_capacity(10).unwrap().capacity(), 10);
    }

    #[test]
    fn test_with_methods_revalidate() {
        let t = TrafficParameters::new(1.0, 1.0, 2).unwrap();
        assert!(t.with_arrival_rate(-3.0).is_err());
        assert!(t.with_service_rate(f64::NAN).is_err());
        assert_eq!(t.with_arrival_rate(4.0).unwrap().offered_load(), 4.0);
        assert_eq!(t.with_capacity(6).unwrap().capacity(), 6);
    }

    #[test]
    fn test_display() {
        let p = QueueParameters::new(2.0, 1.0, 3, 5).unwrap();
        assert_eq!(format!("{}", p), "M/M/3/5 (λ=2, μ=1, a=2.0000)");
    }
}
