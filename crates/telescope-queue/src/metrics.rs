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

//! Summary performance measures of a queue.

/// The standard performance measures of a queueing system in steady state.
///
/// All times are in seconds, all rates per second. For systems without a
/// capacity limit the blocking probability is zero and the effective
/// arrival rate equals the offered arrival rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueMetrics {
    /// Probability that an arrival is rejected, `p_K`.
    pub blocking_probability: f64,
    /// Probability that an admitted customer has to wait.
    pub probability_of_waiting: f64,
    /// Expected waiting time of an admitted customer, `W_q`.
    pub expected_waiting_time: f64,
    /// Expected number of waiting customers, `L_q = λ_eff · W_q`.
    pub mean_queue_length: f64,
    /// Expected number of customers in the system, `L`.
    pub mean_number_in_system: f64,
    /// Fraction of time an average server is busy, `λ_eff / (sμ)`.
    pub occupancy: f64,
    /// Rate of admitted customers, `λ (1 - p_K)`.
    pub effective_arrival_rate: f64,
}

impl QueueMetrics {
    /// Returns the expected time in the system, `W = L / λ_eff`.
    #[inline]
    pub fn expected_time_in_system(&self) -> f64 {
        if self.effective_arrival_rate > 0.0 {
            self.mean_number_in_system / self.effective_arrival_rate
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for QueueMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Queue Metrics:")?;
        writeln!(f, "  Blocking Probability: {:.6}", self.blocking_probability)?;
        writeln!(
            f,
            "  Probability of Waiting: {:.6}",
            self.probability_of_waiting
        )?;
        writeln!(
            f,
            "  Expected Wait (secs): {:.3}",
            self.expected_waiting_time
        )?;
        writeln!(f, "  Mean Queue Length: {:.4}", self.mean_queue_length)?;
        writeln!(
            f,
            "  Mean Number in System: {:.4}",
            self.mean_number_in_system
        )?;
        writeln!(f, "  Occupancy: {:.4}", self.occupancy)?;
        writeln!(
            f,
            "  Effective Arrival Rate (per sec): {:.6}",
            self.effective_arrival_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::QueueMetrics;

    fn metrics() -> QueueMetrics {
        QueueMetrics {
            blocking_probability: 0.01,
            probability_of_waiting: 0.4,
            expected_waiting_time: 12.0,
            mean_queue_length: 1.98,
            mean_number_in_system: 21.78,
            occupancy: 0.66,
            effective_arrival_rate: 0.165,
        }
    }

    #[test]
    fn test_time_in_system_follows_littles_law() {
        let m = metrics();
        assert!((m.expected_time_in_system() - 132.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_lists_every_measure() {
        let text = metrics().to_string();
        assert!(text.starts_with("Queue Metrics:\n"));
        assert!(text.contains("Blocking Probability: 0.010000"));
        assert!(text.contains("Expected Wait (secs): 12.000"));
        assert!(text.contains("Occupancy: 0.6600"));
        assert_eq!(text.lines().count(), 8);
    }
}
