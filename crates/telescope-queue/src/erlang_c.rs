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

//! The Erlang C model.
//!
//! M/M/s with an infinite waiting room: nobody is blocked and every caller
//! who finds all servers busy waits. The model has a steady state only for
//! utilization `ρ = λ / (sμ) < 1`; `ErlangC::new` rejects saturated systems
//! with `QueueError::Degenerate`.
//!
//! The probability of waiting is
//!
//! ```text
//! P_w = (a^s / s!) / (1 - ρ) / [Σ_{n<s} a^n / n! + (a^s / s!) / (1 - ρ)]
//! ```
//!
//! from which the service level `1 - P_w e^{-(sμ - λ) t}`, the average speed
//! of answer `P_w / (sμ - λ)` and the mean queue length `λ · ASA` follow.

use crate::{error::QueueError, metrics::QueueMetrics, mmsk::poisson_weights};
use telescope_core::num::log_real::LogReal;
use telescope_model::{error::check_time, params::TrafficParameters};

/// A stable M/M/s queue with an infinite waiting room.
///
/// # Examples
///
/// ```rust
/// use telescope_model::params::TrafficParameters;
/// use telescope_queue::erlang_c::ErlangC;
///
/// // 20 Erlangs offered to 25 agents with a 4 minute handling time.
/// let traffic = TrafficParameters::new(20.0 / 240.0, 1.0 / 240.0, 25).unwrap();
/// let erlang = ErlangC::new(traffic).unwrap();
///
/// assert!((erlang.probability_of_waiting() - 0.2091028266).abs() < 1e-9);
/// assert!((erlang.service_level(20.0).unwrap() - 0.8621509208).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErlangC {
    traffic: TrafficParameters,
    probability_of_waiting: f64,
    /// `sμ - λ`, the rate at which a waiting queue drains.
    drain_rate: f64,
}

impl ErlangC {
    /// Evaluates the Erlang C formula for `traffic`.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Degenerate` if the utilization is at least one.
    pub fn new(traffic: TrafficParameters) -> Result<Self, QueueError> {
        if !traffic.is_stable() {
            return Err(QueueError::degenerate(
                &traffic,
                "utilization must be below 1 without a capacity limit",
            ));
        }

        let servers = traffic.servers();
        let load = LogReal::from_f64(traffic.offered_load());
        let head: LogReal = poisson_weights(load, servers - 1).sum();
        let peak = load.powu(servers as u64) / LogReal::factorial(servers as u64);

        // 1 - ρ = (s - a) / s, computed without forming ρ.
        let idle = LogReal::from_f64(servers as f64 - traffic.offered_load()) / LogReal::from(servers);
        let queued = peak / idle;
        let probability_of_waiting = (queued / (head + queued)).to_f64().min(1.0);

        let drain_rate = traffic.service_rate() * (servers as f64 - traffic.offered_load());

        Ok(Self {
            traffic,
            probability_of_waiting,
            drain_rate,
        })
    }

    /// Returns the traffic parameters.
    #[inline(always)]
    pub fn traffic(&self) -> &TrafficParameters {
        &self.traffic
    }

    /// Returns `P_w`, the probability that a caller has to wait.
    #[inline(always)]
    pub fn probability_of_waiting(&self) -> f64 {
        self.probability_of_waiting
    }

    /// Returns the probability that a caller waits at most `t` seconds.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Domain` if `t` is negative or not finite.
    pub fn service_level(&self, t: f64) -> Result<f64, QueueError> {
        check_time("waiting time", t)?;
        if self.probability_of_waiting == 0.0 {
            return Ok(1.0);
        }
        let ln_late = self.probability_of_waiting.ln() - self.drain_rate * t;
        Ok((-ln_late.exp_m1()).clamp(0.0, 1.0))
    }

    /// Returns the average speed of answer, `P_w / (sμ - λ)`, in seconds.
    #[inline]
    pub fn average_speed_of_answer(&self) -> f64 {
        self.probability_of_waiting / self.drain_rate
    }

    /// Returns `L_q = λ · ASA`.
    #[inline]
    pub fn mean_queue_length(&self) -> f64 {
        self.traffic.arrival_rate() * self.average_speed_of_answer()
    }

    /// Returns `L = L_q + a`.
    #[inline]
    pub fn mean_number_in_system(&self) -> f64 {
        self.mean_queue_length() + self.traffic.offered_load()
    }

    /// Returns all summary measures at once.
    pub fn metrics(&self) -> QueueMetrics {
        QueueMetrics {
            blocking_probability: 0.0,
            probability_of_waiting: self.probability_of_waiting,
            expected_waiting_time: self.average_speed_of_answer(),
            mean_queue_length: self.mean_queue_length(),
            mean_number_in_system: self.mean_number_in_system(),
            occupancy: occupancy(&self.traffic),
            effective_arrival_rate: self.traffic.arrival_rate(),
        }
    }
}

/// Returns the agent occupancy `λ / (sμ)`.
///
/// Unlike the other Erlang C measures this is defined for any utilization;
/// values of one or more mean the agents cannot keep up.
#[inline]
pub fn occupancy(traffic: &TrafficParameters) -> f64 {
    traffic.utilization()
}
