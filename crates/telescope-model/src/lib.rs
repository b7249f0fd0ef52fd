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

//! # Telescope Model
//!
//! **The value types shared by the queue analytics and the staffing solver.**
//!
//! Every entity in this crate is an immutable value validated at
//! construction. Constructors return `Result<_, DomainError>`, so analytics
//! and solvers never see a negative rate, a zero server count or a capacity
//! below the number of servers.
//!
//! ## Architecture
//!
//! * **`params`**: `TrafficParameters` (λ, μ, s) and `QueueParameters`
//!   (λ, μ, s, K) with derived offered load and utilization.
//! * **`target`**: What a solve optimizes (`Objective`) and what it must
//!   satisfy (`Constraints`, `ServiceLevel`), combined into `SolveTarget`.
//! * **`workload`**: The partially known system handed to a solver
//!   (`Workload`) and how its capacity follows the server count
//!   (`CapacityPolicy`).
//! * **`units`**: Conversions between calls per hour, handling times and
//!   per-second rates.
//! * **`scenario`**: TOML scenario files describing a workload and a target.
//! * **`error`**: `DomainError`, raised for any out-of-range input.

pub mod error;
pub mod params;
pub mod scenario;
pub mod target;
pub mod units;
pub mod workload;
