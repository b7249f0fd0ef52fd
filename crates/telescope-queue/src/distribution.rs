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

//! The steady-state distribution of a finite queue.

/// The probabilities `p_0, ..., p_K` of finding `n` customers in the system.
///
/// The distribution of a system with capacity `K` always holds `K + 1`
/// entries. It is produced by `FiniteQueue::distribution` and sums to one
/// within `1e-9`.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateDistribution {
    probabilities: Vec<f64>,
}

impl SteadyStateDistribution {
    /// Wraps a probability vector.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `probabilities` is empty or contains a
    /// value outside `[0, 1]`.
    #[inline]
    pub fn new(probabilities: Vec<f64>) -> Self {
        debug_assert!(
            !probabilities.is_empty(),
            "called `SteadyStateDistribution::new` with no states"
        );
        debug_assert!(
            probabilities.iter().all(|p| (0.0..=1.0).contains(p)),
            "called `SteadyStateDistribution::new` with a value outside [0, 1]"
        );
        Self { probabilities }
    }

    /// Returns the number of states, `K + 1`.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Always `false`; a distribution holds at least the empty state.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Returns `p_n`, or `None` if `n` exceeds the capacity.
    #[inline]
    pub fn get(&self, n: usize) -> Option<f64> {
        self.probabilities.get(n).copied()
    }

    /// Returns `p_K`, the probability that the system is full.
    #[inline]
    pub fn last(&self) -> f64 {
        self.probabilities.last().copied().unwrap_or(0.0)
    }

    /// Returns the sum of all entries.
    #[inline]
    pub fn total(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Returns the mean number of customers in the system.
    pub fn mean(&self) -> f64 {
        self.probabilities
            .iter()
            .enumerate()
            .map(|(n, p)| n as f64 * p)
            .sum()
    }

    /// Returns `P(N ≥ n)`.
    pub fn tail(&self, n: usize) -> f64 {
        self.probabilities.iter().skip(n).sum()
    }

    /// Returns an iterator over `p_0, ..., p_K`.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.probabilities.iter()
    }

    /// Returns the probabilities as a slice.
    #[inline(always)]
    pub fn as_slice(&self) -> &[f64] {
        &self.probabilities
    }

    /// Consumes the distribution and returns the probability vector.
    #[inline]
    pub fn into_vec(self) -> Vec<f64> {
        self.probabilities
    }
}

impl std::ops::Index<usize> for SteadyStateDistribution {
    type Output = f64;

    #[inline]
    fn index(&self, n: usize) -> &Self::Output {
        &self.probabilities[n]
    }
}

impl<'a> IntoIterator for &'a SteadyStateDistribution {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.probabilities.iter()
    }
}

impl std::fmt::Display for SteadyStateDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Steady-State Distribution:")?;
        for (n, p) in self.probabilities.iter().enumerate() {
            writeln!(f, "  p[{}] = {:.6e}", n, p)?;
        }
        Ok(())
    }
}
