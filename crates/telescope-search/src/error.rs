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

use thiserror::Error;

/// The error type for monotone searches.
///
/// Bounds are reported as `f64` so integer and real searches share one
/// error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The probe never reached the feasible side within the doubling cap.
    /// Either the target is infeasible or the predicate is not monotone.
    #[error(
        "no bound on the feasible side between {lower} and {upper} after {doublings} doublings"
    )]
    UnboundedSearch {
        /// The bound tried before `upper`, or the start of the search.
        lower: f64,
        /// The last bound tried.
        upper: f64,
        /// Number of doublings performed.
        doublings: u32,
    },
    /// Every probe of a bracket was infeasible.
    #[error("no feasible value in [{lower}, {upper}] after {probes} probes")]
    NoFeasibleValue { lower: f64, upper: f64, probes: u64 },
    /// The predicate is infeasible just above the reported boundary.
    #[error("the predicate is not monotone around {value}")]
    NonMonotonic { value: f64 },
    /// A monitor terminated the search.
    #[error("search aborted: {0}")]
    Aborted(String),
}

impl SearchError {
    /// Returns `true` if the search ended because no feasible value exists
    /// within its limits.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            SearchError::UnboundedSearch { .. } | SearchError::NoFeasibleValue { .. }
        )
    }
}
