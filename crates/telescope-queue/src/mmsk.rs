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

//! The M/M/s/K queue.
//!
//! Poisson arrivals at rate `λ`, `s` exponential servers with rate `μ` each,
//! and room for at most `K ≥ s` customers in the system. Arrivals that find
//! the system full are blocked. With offered load `a = λ/μ` and utilization
//! `ρ = a/s` the unnormalized state weights are
//!
//! ```text
//! q_n = a^n / n!              for 0 ≤ n ≤ s
//! q_n = q_s · ρ^(n - s)       for s < n ≤ K
//! ```
//!
//! and `p_n = q_n · p_0` with
//! `1/p_0 = Σ_{r<s} q_r + q_s · (1 - ρ^(K-s+1)) / (1 - ρ)`.
//!
//! `FiniteQueue` evaluates the weights once, as `LogReal`s, and derives every
//! measure from them. The free functions at the bottom of the module are
//! one-shot conveniences that build a `FiniteQueue` per call.
//!
//! Because finite capacity bounds the queue, every measure is defined for any
//! utilization, including `ρ ≥ 1`.

use crate::{
    distribution::SteadyStateDistribution, error::QueueError, metrics::QueueMetrics,
};
use telescope_core::{
    math::{geometric::geometric_sum, poisson::PoissonCumulative},
    num::log_real::LogReal,
};
use telescope_model::{error::check_time, params::QueueParameters};

/// Returns `a^n / n!` for `n = 0, 1, ..., servers`.
pub(crate) fn poisson_weights(load: LogReal, servers: u32) -> impl Iterator<Item = LogReal> {
    (0..=servers as u64).map(move |n| load.powu(n) / LogReal::factorial(n))
}

/// Returns `s · μ`, the total service rate of a fully busy system.
#[inline]
pub(crate) fn total_service_rate(servers: u32, service_rate: f64) -> LogReal {
    LogReal::from(servers) * LogReal::from_f64(service_rate)
}

/// An M/M/s/K queue with its precomputed state weights.
///
/// # Examples
///
/// ```rust
/// use telescope_model::params::QueueParameters;
/// use telescope_queue::mmsk::FiniteQueue;
///
/// // A single server that can hold one waiting customer.
/// let queue = FiniteQueue::new(QueueParameters::new(1.0, 1.0, 1, 2).unwrap());
///
/// // q = (1, 1, 1), so every state is equally likely.
/// assert!((queue.probability_zero() - 1.0 / 3.0).abs() < 1e-15);
/// assert!((queue.blocking_probability() - 1.0 / 3.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct FiniteQueue {
    params: QueueParameters,
    /// `q_0, ..., q_K`.
    weights: Vec<LogReal>,
    /// `1 / p_0`.
    normalizer: LogReal,
    /// `Σ_{n<K} q_n`, the weight of states that admit an arrival.
    admitted: LogReal,
    /// `Σ_{s≤n<K} q_n`, the weight of states in which an admitted arrival
    /// has to wait.
    waiting: LogReal,
}

impl FiniteQueue {
    /// Evaluates the state weights of the queue described by `params`.
    pub fn new(params: QueueParameters) -> Self {
        let servers = params.servers() as usize;
        let capacity = params.capacity() as usize;

        let load = LogReal::from_f64(params.offered_load());
        let ratio = LogReal::from_f64(params.utilization());

        let mut weights = Vec::with_capacity(capacity + 1);
        weights.extend(poisson_weights(load, params.servers()));
        let peak = weights[servers];
        weights.extend((1..=(capacity - servers) as u64).map(|m| peak * ratio.powu(m)));

        let head: LogReal = weights[..servers].iter().sum();
        let tail_terms = params.queue_positions() as u64 + 1;
        let normalizer = head + peak * geometric_sum(ratio, tail_terms);

        let waiting: LogReal = weights[servers..capacity].iter().sum();
        let admitted = head + waiting;

        tracing::trace!(
            servers = params.servers(),
            capacity = params.capacity(),
            offered_load = params.offered_load(),
            normalizer = %normalizer,
            "evaluated M/M/s/K state weights"
        );

        Self {
            params,
            weights,
            normalizer,
            admitted,
            waiting,
        }
    }

    /// Returns the queue parameters.
    #[inline(always)]
    pub fn parameters(&self) -> &QueueParameters {
        &self.params
    }

    /// Returns `p_0`, the probability that the system is empty.
    #[inline]
    pub fn probability_zero(&self) -> f64 {
        self.normalizer.recip().to_f64()
    }

    /// Returns `p_n`, or `0.0` if `n` exceeds the capacity.
    #[inline]
    pub fn probability(&self, n: u32) -> f64 {
        self.weights
            .get(n as usize)
            .map_or(0.0, |&q| (q / self.normalizer).to_f64())
    }

    /// Returns the full steady-state distribution `p_0, ..., p_K`.
    pub fn distribution(&self) -> SteadyStateDistribution {
        SteadyStateDistribution::new(
            self.weights
                .iter()
                .map(|&q| (q / self.normalizer).to_f64().min(1.0))
                .collect(),
        )
    }

    /// Returns `p_K`, the probability that an arrival is blocked.
    ///
    /// This is computed exactly as the last entry of `distribution`.
    #[inline]
    pub fn blocking_probability(&self) -> f64 {
        let full = self.weights[self.weights.len() - 1];
        (full / self.normalizer).to_f64().min(1.0)
    }

    /// Returns `ln p_K`.
    ///
    /// `p_K` is positive for every finite capacity but drops below the
    /// smallest `f64` for deep queues, where `blocking_probability` reads
    /// `0.0`. Its logarithm stays finite.
    #[inline]
    pub fn ln_blocking_probability(&self) -> f64 {
        let full = self.weights[self.weights.len() - 1];
        (full / self.normalizer).ln().min(0.0)
    }

    /// Returns `1 - p_K`, the fraction of arrivals that are admitted.
    #[inline]
    pub fn admitted_fraction(&self) -> f64 {
        (self.admitted / self.normalizer).to_f64().min(1.0)
    }

    /// Returns `λ (1 - p_K)`.
    #[inline]
    pub fn effective_arrival_rate(&self) -> f64 {
        self.params.arrival_rate() * self.admitted_fraction()
    }

    /// Returns the probability that an admitted customer has to wait.
    pub fn probability_of_waiting(&self) -> Result<f64, QueueError> {
        self.ensure_admits()?;
        Ok((self.waiting / self.admitted).to_f64().min(1.0))
    }

    /// Returns `F_W(t)`, the probability that an admitted customer waits at
    /// most `t` seconds.
    ///
    /// An admitted customer who finds `n ≥ s` customers in the system waits
    /// for `n - s + 1` service completions at rate `sμ`, so
    ///
    /// ```text
    /// 1 - F_W(t) = Σ_{n=s}^{K-1} q_n · P(Poisson(sμt) ≤ n - s) / Σ_{n<K} q_n
    /// ```
    ///
    /// The complement is accumulated in log space and converted with
    /// `expm1`, so values close to zero and close to one keep full precision.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Domain` if `t` is negative or not finite, and
    /// `QueueError::Degenerate` if the system blocks every arrival.
    pub fn waiting_time_cdf(&self, t: f64) -> Result<f64, QueueError> {
        check_time("waiting time", t)?;
        self.ensure_admits()?;

        let rate = total_service_rate(self.params.servers(), self.params.service_rate());
        let mean = rate.to_f64() * t;
        if mean.is_infinite() {
            return Ok(1.0);
        }

        let servers = self.params.servers() as usize;
        let capacity = self.params.capacity() as usize;
        let still_waiting: LogReal = self.weights[servers..capacity]
            .iter()
            .zip(PoissonCumulative::new(mean))
            .map(|(&q, served_at_most)| q * served_at_most)
            .sum();
        let complement = still_waiting / self.admitted;

        Ok((-complement.ln().exp_m1()).clamp(0.0, 1.0))
    }

    /// Returns `W_q`, the expected waiting time of an admitted customer in
    /// seconds.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Degenerate` if the system blocks every arrival.
    pub fn expected_waiting_time(&self) -> Result<f64, QueueError> {
        self.ensure_admits()?;
        let servers = self.params.servers() as usize;
        let capacity = self.params.capacity() as usize;
        let completions: LogReal = self.weights[servers..capacity]
            .iter()
            .enumerate()
            .map(|(j, &q)| q * LogReal::from_u64(j as u64 + 1))
            .sum();
        let rate = total_service_rate(self.params.servers(), self.params.service_rate());
        Ok((completions / (rate * self.admitted)).to_f64())
    }

    /// Returns `L_q`, the expected number of waiting customers.
    pub fn mean_queue_length(&self) -> f64 {
        let servers = self.params.servers() as usize;
        let queued: LogReal = self.weights[servers..]
            .iter()
            .enumerate()
            .skip(1)
            .map(|(j, &q)| q * LogReal::from_u64(j as u64))
            .sum();
        (queued / self.normalizer).to_f64()
    }

    /// Returns `L`, the expected number of customers in the system.
    pub fn mean_number_in_system(&self) -> f64 {
        let present: LogReal = self
            .weights
            .iter()
            .enumerate()
            .skip(1)
            .map(|(n, &q)| q * LogReal::from_u64(n as u64))
            .sum();
        (present / self.normalizer).to_f64()
    }

    /// Returns the fraction of time an average server is busy,
    /// `λ (1 - p_K) / (sμ)`.
    #[inline]
    pub fn occupancy(&self) -> f64 {
        (self.params.utilization() * self.admitted_fraction()).min(1.0)
    }

    /// Returns all summary measures at once.
    ///
    /// # Errors
    ///
    /// Returns `QueueError::Degenerate` if the system blocks every arrival.
    pub fn metrics(&self) -> Result<QueueMetrics, QueueError> {
        Ok(QueueMetrics {
            blocking_probability: self.blocking_probability(),
            probability_of_waiting: self.probability_of_waiting()?,
            expected_waiting_time: self.expected_waiting_time()?,
            mean_queue_length: self.mean_queue_length(),
            mean_number_in_system: self.mean_number_in_system(),
            occupancy: self.occupancy(),
            effective_arrival_rate: self.effective_arrival_rate(),
        })
    }

    /// Fails if no arrival is ever admitted, which leaves every conditional
    /// measure undefined.
    ///
    /// Since `p_{K-1} = p_K / ρ`, the admitted fraction is at least about
    /// `1 / ρ`, which stays representable for every finite offered load. The
    /// check only guards against the admitted weight rounding to zero.
    #[inline]
    fn ensure_admits(&self) -> Result<(), QueueError> {
        if self.admitted_fraction() > 0.0 {
            Ok(())
        } else {
            Err(QueueError::degenerate(
                &self.params,
                "the blocking probability is 1",
            ))
        }
    }
}

/// Returns `p_0` for the M/M/s/K queue `params`.
#[inline]
pub fn steady_state_probability_zero(params: &QueueParameters) -> f64 {
    FiniteQueue::new(*params).probability_zero()
}

/// Returns `p_0, ..., p_K` for the M/M/s/K queue `params`.
#[inline]
pub fn steady_state_distribution(params: &QueueParameters) -> SteadyStateDistribution {
    FiniteQueue::new(*params).distribution()
}

/// Returns the blocking probability `p_K` of the M/M/s/K queue `params`.
#[inline]
pub fn blocking_probability(params: &QueueParameters) -> f64 {
    FiniteQueue::new(*params).blocking_probability()
}

/// Returns the probability that an admitted customer of the M/M/s/K queue
/// `params` waits at most `t` seconds.
#[inline]
pub fn waiting_time_cdf(params: &QueueParameters, t: f64) -> Result<f64, QueueError> {
    FiniteQueue::new(*params).waiting_time_cdf(t)
}

/// Returns the expected waiting time of an admitted customer of the M/M/s/K
/// queue `params`.
#[inline]
pub fn expected_waiting_time(params: &QueueParameters) -> Result<f64, QueueError> {
    FiniteQueue::new(*params).expected_waiting_time()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erlang_c::ErlangC;
    use proptest::prelude::*;
    use telescope_model::error::DomainError;

    /// Plain `f64` evaluation, usable for small systems only.
    fn naive_distribution(lambda: f64, mu: f64, s: u32, k: u32) -> Vec<f64> {
        let a = lambda / mu;
        let rho = a / s as f64;
        let mut weights = Vec::new();
        let mut term = 1.0;
        for n in 0..=k {
            if n > 0 {
                term *= if n <= s { a / n as f64 } else { rho };
            }
            weights.push(term);
        }
        let total: f64 = weights.iter().sum();
        weights.into_iter().map(|w| w / total).collect()
    }

    fn naive_cdf(lambda: f64, mu: f64, s: u32, k: u32, t: f64) -> f64 {
        let p = naive_distribution(lambda, mu, s, k);
        let x = s as f64 * mu * t;
        let mut sum = 0.0;
        for n in s..k {
            let mut term = (-x).exp();
            let mut cumulative = term;
            for r in 1..=(n - s) {
                term *= x / r as f64;
                cumulative += term;
            }
            sum += p[n as usize] * cumulative;
        }
        1.0 - sum / (1.0 - p[k as usize])
    }

    fn naive_wait(lambda: f64, mu: f64, s: u32, k: u32) -> f64 {
        let p = naive_distribution(lambda, mu, s, k);
        let sum: f64 = (s..k).map(|n| (n - s + 1) as f64 * p[n as usize]).sum();
        sum / (s as f64 * mu * (1.0 - p[k as usize]))
    }

    fn call_center() -> QueueParameters {
        QueueParameters::new(254.0 / 3600.0, 1.0 / 300.0, 27, 33).unwrap()
    }

    #[test]
    fn test_call_center_matches_direct_summation() {
        let params = call_center();
        let queue = FiniteQueue::new(params);
        let expected = naive_distribution(254.0 / 3600.0, 1.0 / 300.0, 27, 33);
        let actual = queue.distribution();
        assert_eq!(actual.len(), 34);
        for (n, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
            assert!((e - a).abs() < 1e-14, "p[{n}]: expected {e}, got {a}");
        }
        assert!((queue.probability_zero() - expected[0]).abs() < 1e-15);
        assert!((queue.blocking_probability() - expected[33]).abs() < 1e-15);

        for &t in &[0.0, 5.0, 20.0, 60.0, 300.0] {
            let e = naive_cdf(254.0 / 3600.0, 1.0 / 300.0, 27, 33, t);
            let a = queue.waiting_time_cdf(t).unwrap();
            assert!((e - a).abs() < 1e-12, "F({t}): expected {e}, got {a}");
        }

        let e = naive_wait(254.0 / 3600.0, 1.0 / 300.0, 27, 33);
        let a = queue.expected_waiting_time().unwrap();
        assert!(((e - a) / e).abs() < 1e-12, "W_q: expected {e}, got {a}");
    }

    #[test]
    fn test_free_functions_agree_with_queue() {
        let params = call_center();
        let queue = FiniteQueue::new(params);
        assert_eq!(steady_state_probability_zero(&params), queue.probability_zero());
        assert_eq!(steady_state_distribution(&params), queue.distribution());
        assert_eq!(blocking_probability(&params), queue.blocking_probability());
        assert_eq!(
            waiting_time_cdf(&params, 20.0).unwrap(),
            queue.waiting_time_cdf(20.0).unwrap()
        );
        assert_eq!(
            expected_waiting_time(&params).unwrap(),
            queue.expected_waiting_time().unwrap()
        );
    }

    #[test]
    fn test_pure_loss_system() {
        // K = s: nobody ever waits.
        let queue = FiniteQueue::new(QueueParameters::new(3.0, 1.0, 4, 4).unwrap());
        assert_eq!(queue.expected_waiting_time().unwrap(), 0.0);
        assert_eq!(queue.waiting_time_cdf(0.0).unwrap(), 1.0);
        assert_eq!(queue.probability_of_waiting().unwrap(), 0.0);
        assert_eq!(queue.mean_queue_length(), 0.0);

        // Erlang B for a = 3, s = 4: (81/24) / (1 + 3 + 4.5 + 4.5 + 3.375).
        let expected = 3.375 / 16.375;
        assert!((queue.blocking_probability() - expected).abs() < 1e-15);
    }

    #[test]
    fn test_unit_utilization_uses_linear_tail() {
        // a = 2, s = 2, ρ = 1: q = (1, 2, 2, 2, 2, 2).
        let queue = FiniteQueue::new(QueueParameters::new(2.0, 1.0, 2, 5).unwrap());
        assert!((queue.probability_zero() - 1.0 / 11.0).abs() < 1e-15);
        for n in 1..=5 {
            assert!((queue.probability(n) - 2.0 / 11.0).abs() < 1e-15);
        }
        assert_eq!(queue.probability(6), 0.0);
    }

    #[test]
    fn test_overloaded_system_is_well_defined() {
        // ρ = 2: blocking is bounded below by 1 - 1/ρ.
        let queue = FiniteQueue::new(QueueParameters::new(20.0, 1.0, 10, 40).unwrap());
        let blocking = queue.blocking_probability();
        assert!(blocking >= 0.5 && blocking < 1.0);
        assert!((queue.distribution().total() - 1.0).abs() < 1e-9);
        let wait = queue.expected_waiting_time().unwrap();
        assert!(wait.is_finite() && wait > 0.0);
    }

    #[test]
    fn test_ln_blocking_survives_underflow() {
        // ρ = 1/2, s = 1: p_K = (1/2)^(K+1) / (1 - (1/2)^(K+1)).
        let queue = FiniteQueue::new(QueueParameters::new(0.5, 1.0, 1, 1100).unwrap());
        assert_eq!(queue.blocking_probability(), 0.0);
        let expected = 1101.0 * 0.5f64.ln();
        assert!((queue.ln_blocking_probability() - expected).abs() < 1e-9);

        let queue = FiniteQueue::new(call_center());
        assert!(
            (queue.ln_blocking_probability().exp() - queue.blocking_probability()).abs() < 1e-15
        );
    }

    #[test]
    fn test_zero_admitted_mass_is_degenerate() {
        let queue = FiniteQueue {
            admitted: LogReal::ZERO,
            ..FiniteQueue::new(call_center())
        };
        assert_eq!(queue.admitted_fraction(), 0.0);
        assert!(queue.waiting_time_cdf(20.0).unwrap_err().is_degenerate());
        assert!(queue.expected_waiting_time().unwrap_err().is_degenerate());
        assert!(queue.probability_of_waiting().unwrap_err().is_degenerate());
        assert!(queue.metrics().unwrap_err().is_degenerate());
    }

    #[test]
    fn test_large_system_stays_finite() {
        // 900^1000 / 1000! is far outside f64.
        let params = QueueParameters::new(900.0, 1.0, 1000, 1500).unwrap();
        let queue = FiniteQueue::new(params);
        let d = queue.distribution();
        assert!((d.total() - 1.0).abs() < 1e-9);
        assert!(queue.probability_zero() >= 0.0);
        let f = queue.waiting_time_cdf(0.01).unwrap();
        assert!((0.0..=1.0).contains(&f));
    }

    #[test]
    fn test_approaches_erlang_c_for_large_capacity() {
        let traffic = telescope_model::params::TrafficParameters::new(10.0 / 180.0, 1.0 / 180.0, 11)
            .unwrap();
        let queue = FiniteQueue::new(traffic.with_capacity(11 + 2000).unwrap());
        let erlang = ErlangC::new(traffic).unwrap();

        assert!(queue.blocking_probability() < 1e-60);
        assert!(
            (queue.probability_of_waiting().unwrap() - erlang.probability_of_waiting()).abs()
                < 1e-10
        );
        assert!(
            (queue.waiting_time_cdf(20.0).unwrap() - erlang.service_level(20.0).unwrap()).abs()
                < 1e-10
        );
        let wq = queue.expected_waiting_time().unwrap();
        assert!((wq - erlang.average_speed_of_answer()).abs() / wq < 1e-9);
    }

    #[test]
    fn test_littles_law() {
        let queue = FiniteQueue::new(call_center());
        let m = queue.metrics().unwrap();
        let lambda_eff = m.effective_arrival_rate;
        assert!((m.mean_queue_length - lambda_eff * m.expected_waiting_time).abs() < 1e-12);
        let busy = lambda_eff / (1.0 / 300.0);
        assert!((m.mean_number_in_system - (m.mean_queue_length + busy)).abs() < 1e-10);
        assert!((m.occupancy - busy / 27.0).abs() < 1e-12);
        assert!((m.mean_number_in_system - queue.distribution().mean()).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_invalid_time() {
        let queue = FiniteQueue::new(call_center());
        assert!(matches!(
            queue.waiting_time_cdf(-1.0),
            Err(QueueError::Domain(DomainError::InvalidTime { .. }))
        ));
        assert!(queue.waiting_time_cdf(f64::NAN).is_err());
        assert_eq!(queue.waiting_time_cdf(1e308).unwrap(), 1.0);
    }

    fn queue_parameters() -> impl Strategy<Value = QueueParameters> {
        (0.01f64..50.0, 0.01f64..5.0, 1u32..60, 0u32..80).prop_map(|(lambda, mu, s, extra)| {
            QueueParameters::new(lambda, mu, s, s + extra).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_distribution_sums_to_one(params in queue_parameters()) {
            let total = steady_state_distribution(&params).total();
            prop_assert!((total - 1.0).abs() < 1e-9, "total = {}", total);
        }

        #[test]
        fn prop_blocking_is_last_state(params in queue_parameters()) {
            let queue = FiniteQueue::new(params);
            prop_assert_eq!(queue.blocking_probability(), queue.distribution().last());
        }

        #[test]
        fn prop_cdf_is_a_distribution_function(
            params in queue_parameters(),
            t1 in 0.0f64..100.0,
            dt in 0.0f64..100.0,
        ) {
            let queue = FiniteQueue::new(params);
            let f0 = queue.waiting_time_cdf(0.0).unwrap();
            let f1 = queue.waiting_time_cdf(t1).unwrap();
            let f2 = queue.waiting_time_cdf(t1 + dt).unwrap();
            prop_assert!(f0 >= 0.0);
            prop_assert!(f0 <= f1 + 1e-12);
            prop_assert!(f1 <= f2 + 1e-12);
            prop_assert!(f2 <= 1.0);
            prop_assert!(queue.waiting_time_cdf(1e7).unwrap() > 1.0 - 1e-9);
        }

        #[test]
        fn prop_more_servers_never_block_more(
            lambda in 0.01f64..50.0,
            mu in 0.01f64..5.0,
            s in 1u32..40,
            extra in 1u32..40,
        ) {
            let capacity = s + extra;
            let fewer = blocking_probability(&QueueParameters::new(lambda, mu, s, capacity).unwrap());
            let more = blocking_probability(&QueueParameters::new(lambda, mu, s + 1, capacity).unwrap());
            prop_assert!(more <= fewer + 1e-12, "s={}: {} -> {}", s, fewer, more);
        }
    }
}
