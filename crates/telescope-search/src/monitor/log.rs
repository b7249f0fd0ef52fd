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

//! # Log Monitor
//!
//! Reports search progress as structured `tracing` events: one `debug`
//! event when a search starts and finishes, one `trace` event per probe.
//! Every event carries the monitor's `label`, so the outer and inner
//! searches of a nested solve can be told apart.

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct LogMonitor<V> {
    label: &'static str,
    start_time: Instant,
    probes: u64,
    last_feasible: Option<V>,
}

impl<V> LogMonitor<V> {
    /// Creates a log monitor whose events carry `label`.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start_time: Instant::now(),
            probes: 0,
            last_feasible: None,
        }
    }

    /// Returns the label.
    #[inline(always)]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Returns the number of probes observed in the current search.
    #[inline(always)]
    pub fn probes(&self) -> u64 {
        self.probes
    }
}

impl<V> LogMonitor<V>
where
    V: Copy,
{
    /// Returns the most recent feasible probe of the current search.
    #[inline(always)]
    pub fn last_feasible(&self) -> Option<V> {
        self.last_feasible
    }
}

impl<V> std::fmt::Display for LogMonitor<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor(label: {})", self.label)
    }
}

impl<V> SearchMonitor<V> for LogMonitor<V>
where
    V: Copy + std::fmt::Display,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, start: V) {
        self.start_time = Instant::now();
        self.probes = 0;
        self.last_feasible = None;
        tracing::debug!(search = self.label, start = %start, "search started");
    }

    fn on_probe(&mut self, value: V, feasible: bool) {
        self.probes += 1;
        if feasible {
            self.last_feasible = Some(value);
        }
        tracing::trace!(
            search = self.label,
            probe = self.probes,
            value = %value,
            feasible,
            "probe evaluated"
        );
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        tracing::debug!(
            search = self.label,
            probes = statistics.probes,
            doublings = statistics.doublings,
            bisections = statistics.bisections,
            elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1e3,
            "search finished"
        );
    }

    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
