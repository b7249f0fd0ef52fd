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

//! # Parallel Sweeps
//!
//! Capacity planning rarely asks a single question: a day is split into
//! intervals with their own forecast, and each interval is solved against
//! the same target. `sweep` fans such independent solves out over scoped
//! threads. Each thread owns a contiguous chunk of the input, nothing is
//! shared but the immutable solver and target, and the results come back in
//! input order.
//!
//! ```rust
//! use telescope_model::{
//!     target::{Constraints, Objective, ServiceLevel, SolveTarget},
//!     workload::Workload,
//! };
//! use telescope_solver::{solver::StaffingSolver, sweep::sweep};
//!
//! let constraints = Constraints::new()
//!     .with_service_level(ServiceLevel::new(0.8, 20.0).unwrap());
//! let target = SolveTarget::new(Objective::MinAgents, constraints).unwrap();
//! let workloads: Vec<Workload> = [10.0, 20.0, 30.0]
//!     .iter()
//!     .map(|&load| {
//!         Workload::new()
//!             .with_arrival_rate(load / 240.0).unwrap()
//!             .with_service_rate(1.0 / 240.0).unwrap()
//!     })
//!     .collect();
//!
//! let results = sweep(&StaffingSolver::new(), &workloads, &target);
//! assert_eq!(results.len(), 3);
//! assert!(results.iter().all(|r| r.is_ok()));
//! ```

use crate::{error::SolverError, solution::StaffingSolution, solver::StaffingSolver};
use std::num::NonZeroUsize;
use telescope_model::{target::SolveTarget, workload::Workload};

/// Solves every workload against `target`, in parallel.
///
/// The i-th result belongs to the i-th workload. A failed solve does not
/// affect the others.
pub fn sweep(
    solver: &StaffingSolver,
    workloads: &[Workload],
    target: &SolveTarget,
) -> Vec<Result<StaffingSolution, SolverError>> {
    if workloads.is_empty() {
        return Vec::new();
    }

    let threads = std::thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(workloads.len());
    let chunk_size = workloads.len().div_ceil(threads);

    tracing::debug!(
        workloads = workloads.len(),
        threads,
        chunk_size,
        "sweep started"
    );

    std::thread::scope(|scope| {
        let handles: Vec<_> = workloads
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|workload| solver.solve(workload, target))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    })
}
