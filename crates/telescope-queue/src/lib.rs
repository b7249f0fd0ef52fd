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

//! # Telescope Queue
//!
//! **Exact steady-state analytics for multi-server Markovian queues.**
//!
//! This crate evaluates the classical call-center models on top of the
//! extended-range numerics of `telescope-core`:
//!
//! * **M/M/s/K** (`mmsk`): `s` servers, room for `K ≥ s` customers in the
//!   system, arrivals beyond that are blocked. Steady-state distribution,
//!   blocking probability, the waiting-time distribution of admitted
//!   customers and the expected wait.
//! * **Erlang C** (`erlang_c`): the same system with an infinite waiting room,
//!   defined for utilization below one.
//! * **Erlang B** (`erlang_b`): the pure loss system `K = s`.
//!
//! ## Motivation
//!
//! Textbook formulas for these models multiply `a^n` by `1/n!`. With a few
//! hundred servers either factor leaves the range of `f64` long before their
//! product does, and the geometric tail `(1 - ρ^m) / (1 - ρ)` cancels
//! catastrophically near `ρ = 1`. Every formula here is evaluated on
//! unnormalized weights stored as `LogReal`, so server counts and
//! capacities in the hundreds of thousands stay exact to double precision.
//!
//! ## Usage
//!
//! ```rust
//! use telescope_model::params::QueueParameters;
//! use telescope_queue::mmsk::FiniteQueue;
//!
//! let params = QueueParameters::new(254.0 / 3600.0, 1.0 / 300.0, 27, 33).unwrap();
//! let queue = FiniteQueue::new(params);
//!
//! let distribution = queue.distribution();
//! assert!((distribution.total() - 1.0).abs() < 1e-9);
//! assert_eq!(distribution.last(), queue.blocking_probability());
//!
//! let answered_in_20s = queue.waiting_time_cdf(20.0).unwrap();
//! assert!(answered_in_20s > 0.0 && answered_in_20s <= 1.0);
//! ```
//!
//! All computations are pure and deterministic; values can be shared freely
//! across threads.

pub mod distribution;
pub mod erlang_b;
pub mod erlang_c;
pub mod error;
pub mod metrics;
pub mod mmsk;
