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

use telescope_model::error::DomainError;
use thiserror::Error;

/// The error type for queue analytics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueueError {
    /// An input lies outside the model domain.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// The system is saturated: every arrival is blocked, or an infinite
    /// waiting room grows without bound.
    #[error("degenerate system {parameters}: {reason}")]
    Degenerate {
        /// The offending parameters, formatted for diagnostics.
        parameters: String,
        /// What makes the system degenerate.
        reason: &'static str,
    },
}

impl QueueError {
    /// Creates a `Degenerate` error for the given parameters.
    #[inline]
    pub fn degenerate<P: std::fmt::Display>(parameters: &P, reason: &'static str) -> Self {
        QueueError::Degenerate {
            parameters: parameters.to_string(),
            reason,
        }
    }

    /// Returns `true` if the error reports a saturated system.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, QueueError::Degenerate { .. })
    }
}
