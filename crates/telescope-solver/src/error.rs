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

use telescope_model::{error::DomainError, target::Objective, workload::CapacityPolicy};
use telescope_queue::error::QueueError;
use telescope_search::error::SearchError;
use thiserror::Error;

/// The error type for staffing solves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The workload or target is invalid.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// The queue analytics failed outside of a saturated system.
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// The search could not locate the boundary.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// The capacity policy cannot be used while solving for `objective`.
    #[error("{objective} cannot be solved with capacity policy {capacity}")]
    UnsupportedCapacityPolicy {
        objective: Objective,
        capacity: CapacityPolicy,
    },
}

impl SolverError {
    /// Returns `true` if the solve failed because no value satisfies the
    /// constraints within the search limits.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolverError::Search(e) if e.is_infeasible())
    }
}
