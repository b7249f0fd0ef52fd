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

//! # Time Limit Monitor
//!
//! Enforces a wall-clock budget on a search. Queueing probes are expensive
//! compared to a clock read, so the elapsed time is checked after every
//! probe.
//!
//! ## Highlights
//!
//! - `TimeLimitMonitor::new(limit)` starts its clock when the search starts.
//! - `TimeLimitMonitor::starting_at(limit, start)` measures from a fixed
//!   instant instead, so that nested searches share one budget.
//! - `search_command()` returns `Terminate("time limit reached")` once the
//!   limit has elapsed.
//!
//! ## Usage
//!
//! ```rust
//! use telescope_search::monitor::time_limit::TimeLimitMonitor;
//! use telescope_search::monitor::search_monitor::{SearchCommand, SearchMonitor};
//! use std::time::Duration;
//!
//! let mut monitor = TimeLimitMonitor::<u32>::new(Duration::from_secs(5));
//! monitor.on_enter_search(1);
//! assert_eq!(monitor.search_command(), SearchCommand::Continue);
//! ```

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor<V> {
    time_limit: Duration,
    start_time: Instant,
    restart_on_enter: bool,
    _phantom: std::marker::PhantomData<V>,
}

impl<V> TimeLimitMonitor<V> {
    /// Creates a monitor whose clock restarts with every search.
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            start_time: Instant::now(),
            restart_on_enter: true,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Creates a monitor that measures from `start_time` regardless of when
    /// the search starts.
    #[inline]
    pub fn starting_at(time_limit: Duration, start_time: Instant) -> Self {
        Self {
            time_limit,
            start_time,
            restart_on_enter: false,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the configured limit.
    #[inline(always)]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<V> SearchMonitor<V> for TimeLimitMonitor<V> {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _start: V) {
        if self.restart_on_enter {
            self.start_time = Instant::now();
        }
    }

    fn on_probe(&mut self, _value: V, _feasible: bool) {}

    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {}

    #[inline]
    fn search_command(&self) -> SearchCommand {
        if self.start_time.elapsed() >= self.time_limit {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}
