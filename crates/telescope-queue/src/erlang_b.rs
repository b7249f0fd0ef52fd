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

//! The Erlang B loss formula.
//!
//! M/M/s/s: no waiting room, every arrival that finds all servers busy is
//! lost. The blocking probability `B(s, a) = (a^s / s!) / Σ_{n≤s} a^n / n!`
//! is the `K = s` special case of the M/M/s/K model; `erlang_b` evaluates it
//! from the same log-space weights. `erlang_b_recursive` uses the classical
//! recursion instead and serves as an independent check.

use crate::mmsk::poisson_weights;
use telescope_core::num::log_real::LogReal;
use telescope_model::params::TrafficParameters;

/// Returns the Erlang B blocking probability of `traffic`.
///
/// # Examples
///
/// ```rust
/// use telescope_model::params::TrafficParameters;
/// use telescope_queue::erlang_b::erlang_b;
///
/// let traffic = TrafficParameters::new(8.0, 1.0, 10).unwrap();
/// assert!((erlang_b(&traffic) - 0.121661064).abs() < 1e-9);
/// ```
pub fn erlang_b(traffic: &TrafficParameters) -> f64 {
    let load = LogReal::from_f64(traffic.offered_load());
    let weights: Vec<LogReal> = poisson_weights(load, traffic.servers()).collect();
    let total: LogReal = weights.iter().sum();
    let full = weights[weights.len() - 1];
    (full / total).to_f64().min(1.0)
}

/// Returns `B(servers, offered_load)` by the recursion
/// `B(0) = 1`, `B(k) = a B(k-1) / (k + a B(k-1))`.
///
/// Every step stays within `[0, 1]`, so plain `f64` is stable here for any
/// server count. Runs in `O(servers)`.
///
/// # Panics
///
/// In debug builds, panics if `offered_load` is negative or not finite.
pub fn erlang_b_recursive(offered_load: f64, servers: u32) -> f64 {
    debug_assert!(
        offered_load >= 0.0 && offered_load.is_finite(),
        "called `erlang_b_recursive` with an invalid offered load: {}",
        offered_load
    );
    (1..=servers).fold(1.0, |b, k| {
        let carried = offered_load * b;
        carried / (k as f64 + carried)
    })
}
