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

//! # Telescope Search
//!
//! **Monotone searches that invert a feasibility predicate.**
//!
//! Staffing questions have the form "what is the smallest (or largest) value
//! of one parameter for which the system meets its targets?". As long as the
//! answer is monotone in the parameter, the question reduces to locating the
//! boundary between infeasible and feasible values. This crate provides that
//! machinery independently of any queueing model:
//!
//! * **`integer`**: `IntegerSearch` over any `PrimInt`, scanning linearly or
//!   growing the window exponentially and bisecting the last window.
//! * **`bisect`**: `Bisection` over `f64`, doubling a probe away from an
//!   anchor until the predicate flips and bisecting down to a tolerance.
//! * **`monitor`**: Lifecycle hooks (`SearchMonitor`) for logging, time
//!   budgets and termination, composable with `CompositeMonitor`.
//! * **`stats`** and **`result`**: `SearchStatistics` and `SearchOutcome`.
//! * **`error`**: `SearchError`.
//!
//! ## Predicates
//!
//! Predicates are `FnMut(T) -> Result<bool, E>` where `E: From<SearchError>`.
//! Evaluating a predicate may itself fail (for instance on invalid
//! parameters); such errors abort the search and are returned unchanged,
//! while the search's own failures are converted into `E`.
//!
//! ## Usage
//!
//! ```rust
//! use telescope_search::{error::SearchError, integer::IntegerSearch, monitor::NoOpMonitor};
//!
//! let outcome = IntegerSearch::new(1u32)
//!     .run(&mut NoOpMonitor, |n| Ok::<_, SearchError>(n * n >= 200))
//!     .unwrap();
//! assert_eq!(outcome.value(), 15);
//! ```

pub mod bisect;
pub mod error;
pub mod integer;
pub mod monitor;
mod probe;
pub mod result;
pub mod stats;
