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

//! Cross-checks the M/M/s/K analytics against a seeded discrete-event
//! simulation of the same queue.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use telescope_model::params::QueueParameters;
use telescope_queue::mmsk::FiniteQueue;

/// Empirical measures of one simulation run.
struct Observed {
    blocking: f64,
    answered_within: f64,
    mean_wait: f64,
    answered_immediately: f64,
}

/// Simulates the continuous-time Markov chain event by event with FCFS
/// service, until `arrivals` customers have arrived.
fn simulate(params: &QueueParameters, seed: u64, arrivals: u64, within: f64) -> Observed {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let lambda = params.arrival_rate();
    let mu = params.service_rate();
    let servers = params.servers();
    let capacity = params.capacity();

    let mut now = 0.0f64;
    let mut in_system = 0u32;
    let mut queue: VecDeque<f64> = VecDeque::new();
    let mut seen = 0u64;
    let mut blocked = 0u64;
    let mut waits: Vec<f64> = Vec::with_capacity(arrivals as usize);

    while seen < arrivals {
        let busy = in_system.min(servers) as f64;
        let rate = lambda + busy * mu;
        let u: f64 = rng.random();
        now += -(1.0 - u).ln() / rate;

        let v: f64 = rng.random();
        if v * rate < lambda {
            seen += 1;
            if in_system == capacity {
                blocked += 1;
                continue;
            }
            if in_system < servers {
                waits.push(0.0);
            } else {
                queue.push_back(now);
            }
            in_system += 1;
        } else {
            in_system -= 1;
            if let Some(arrived) = queue.pop_front() {
                waits.push(now - arrived);
            }
        }
    }

    let answered = waits.len() as f64;
    Observed {
        blocking: blocked as f64 / seen as f64,
        answered_within: waits.iter().filter(|&&w| w <= within).count() as f64 / answered,
        mean_wait: waits.iter().sum::<f64>() / answered,
        answered_immediately: waits.iter().filter(|&&w| w == 0.0).count() as f64 / answered,
    }
}

#[test]
fn test_call_center_agrees_with_simulation() {
    let params = QueueParameters::new(254.0 / 3600.0, 1.0 / 300.0, 27, 33).unwrap();
    let queue = FiniteQueue::new(params);

    let blocking = queue.blocking_probability();
    let within_20s = queue.waiting_time_cdf(20.0).unwrap();
    let immediately = queue.waiting_time_cdf(0.0).unwrap();
    let mean_wait = queue.expected_waiting_time().unwrap();

    assert!((blocking - 0.008_375_778).abs() < 1e-8);
    assert!((within_20s - 0.924_912_806).abs() < 1e-8);
    assert!((mean_wait - 4.044_608_536).abs() < 1e-8);

    for seed in [7u64, 42] {
        let observed = simulate(&params, seed, 400_000, 20.0);
        assert!(
            (observed.blocking - blocking).abs() < 0.002,
            "seed {seed}: blocking {} vs {}",
            observed.blocking,
            blocking
        );
        assert!(
            (observed.answered_within - within_20s).abs() < 0.015,
            "seed {seed}: F(20) {} vs {}",
            observed.answered_within,
            within_20s
        );
        assert!(
            (observed.answered_immediately - immediately).abs() < 0.015,
            "seed {seed}: F(0) {} vs {}",
            observed.answered_immediately,
            immediately
        );
        assert!(
            ((observed.mean_wait - mean_wait) / mean_wait).abs() < 0.15,
            "seed {seed}: W_q {} vs {}",
            observed.mean_wait,
            mean_wait
        );
    }
}

#[test]
fn test_pure_loss_system_agrees_with_simulation() {
    let params = QueueParameters::new(0.5, 0.1, 5, 5).unwrap();
    let queue = FiniteQueue::new(params);
    let observed = simulate(&params, 11, 200_000, 0.0);

    assert!((observed.blocking - queue.blocking_probability()).abs() < 0.005);
    assert_eq!(observed.mean_wait, 0.0);
    assert_eq!(queue.expected_waiting_time().unwrap(), 0.0);
}
