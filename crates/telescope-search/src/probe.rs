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

use crate::{
    error::SearchError,
    monitor::{SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};

/// Evaluates `predicate` at `value`, reports the probe to `monitor` and
/// honors a termination request.
#[inline]
pub(crate) fn probe<V, M, F, E>(
    monitor: &mut M,
    predicate: &mut F,
    statistics: &mut SearchStatistics,
    value: V,
) -> Result<bool, E>
where
    V: Copy,
    M: SearchMonitor<V> + ?Sized,
    F: FnMut(V) -> Result<bool, E>,
    E: From<SearchError>,
{
    let feasible = predicate(value)?;
    statistics.probes += 1;
    monitor.on_probe(value, feasible);
    if let SearchCommand::Terminate(reason) = monitor.search_command() {
        return Err(SearchError::Aborted(reason).into());
    }
    Ok(feasible)
}
