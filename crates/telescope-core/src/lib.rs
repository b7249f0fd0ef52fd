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

//! # Telescope Core
//!
//! Foundational numerics for the Telescope queueing ecosystem. Queueing
//! formulas multiply powers of the offered load by inverse factorials; for a
//! few hundred servers these terms leave the range of `f64` long before the
//! probabilities they produce become small. This crate provides the primitives
//! that keep such computations exact to double precision.
//!
//! ## Modules
//!
//! - `num`: `LogReal`, a non-negative real stored as its natural logarithm,
//!   with log-sum-exp addition, exact multiplication and division, powers and
//!   factorials.
//! - `math`: Finite geometric sums and cumulative Poisson sums evaluated in
//!   log space, and the closed `Bracket` used by monotone searches.
//!
//! Refer to each module for detailed APIs and examples.

pub mod math;
pub mod num;
