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

//! # Telescope Solver
//!
//! Staffing and dimensioning on top of the Telescope queue analytics. The
//! solver answers questions of the form "how many agents", "how much
//! waiting room", "how many calls" or "how fast must service be" for a
//! target expressed as a service level, a blocking bound and/or a bound on
//! the average wait.
//!
//! ## Modules
//!
//! - `solver`: `StaffingSolver`, one entry point per unknown plus the
//!   unified `solve`, and the nested agents-and-capacity search.
//! - `evaluation`: Measures a candidate system and checks constraints,
//!   treating saturated systems as infeasible.
//! - `solution`: `StaffingSolution` and `SolvedValue`.
//! - `config`: `SolverConfig`, built in code or read from TOML.
//! - `sweep`: Solves many workloads in parallel on scoped threads.
//! - `error`: `SolverError`.
//!
//! See `solver` for detailed APIs and examples.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod solution;
pub mod solver;
pub mod sweep;
