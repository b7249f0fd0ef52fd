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

//! Scenario files.
//!
//! A scenario describes a workload and a solve target in TOML:
//!
//! ```toml
//! [workload]
//! calls_per_hour = 10500
//! average_handle_time = 250
//! capacity = { per-server = 2 }
//!
//! [target]
//! objective = "min-agents"
//! service_level = 0.8
//! answer_within = 20
//! max_blocking = 0.05
//! ```
//!
//! Rates may be given either per second (`arrival_rate`, `service_rate`) or in
//! the units call centers usually quote (`calls_per_hour`,
//! `average_handle_time` in seconds), but not both. `capacity` is one of
//! `"unbounded"`, `"minimal"`, `{ fixed = K }`, `{ per-server = m }` or
//! `{ headroom = h }`.
//!
//! The `ScenarioLoader` accepts a file path, any reader or a string slice.
//! Decoding goes through plain serde structs first and only then into the
//! validated model types, so every range check of the model applies to
//! scenario files as well.

use crate::{
    error::DomainError,
    target::{Constraints, Objective, ServiceLevel, SolveTarget},
    units,
    workload::{CapacityPolicy, Workload},
};
use serde::Deserialize;
use std::{io::Read, path::Path};
use thiserror::Error;

/// The error type for scenario loading.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// An I/O error occurred while reading the input.
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    /// The input is not valid TOML or does not match the scenario layout.
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),
    /// Two keys describe the same quantity.
    #[error("`{first}` and `{second}` cannot both be given")]
    Conflict {
        first: &'static str,
        second: &'static str,
    },
    /// A key requires a companion key that is missing.
    #[error("`{present}` requires `{missing}`")]
    Incomplete {
        present: &'static str,
        missing: &'static str,
    },
    /// A value is outside the model domain.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A workload together with its solve target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    workload: Workload,
    target: SolveTarget,
}

impl Scenario {
    /// Creates a scenario.
    #[inline]
    pub fn new(workload: Workload, target: SolveTarget) -> Self {
        Self { workload, target }
    }

    /// Returns the workload.
    #[inline(always)]
    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    /// Returns the solve target.
    #[inline(always)]
    pub fn target(&self) -> &SolveTarget {
        &self.target
    }
}

impl std::str::FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioLoader::new().from_str(s)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScenario {
    workload: RawWorkload,
    target: RawTarget,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWorkload {
    arrival_rate: Option<f64>,
    calls_per_hour: Option<f64>,
    service_rate: Option<f64>,
    average_handle_time: Option<f64>,
    servers: Option<u32>,
    #[serde(default)]
    capacity: CapacityPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTarget {
    objective: Objective,
    service_level: Option<f64>,
    answer_within: Option<f64>,
    max_blocking: Option<f64>,
    max_average_wait: Option<f64>,
}

/// Picks whichever of two alternative keys is present.
fn either(
    first: (&'static str, Option<f64>),
    second: (&'static str, Option<f64>),
    convert: fn(f64) -> f64,
) -> Result<Option<f64>, ScenarioError> {
    match (first.1, second.1) {
        (Some(_), Some(_)) => Err(ScenarioError::Conflict {
            first: first.0,
            second: second.0,
        }),
        (Some(v), None) => Ok(Some(v)),
        (None, Some(v)) => Ok(Some(convert(v))),
        (None, None) => Ok(None),
    }
}

impl RawWorkload {
    fn into_workload(self) -> Result<Workload, ScenarioError> {
        let mut workload = Workload::new().with_capacity_policy(self.capacity)?;

        let arrival_rate = either(
            ("arrival_rate", self.arrival_rate),
            ("calls_per_hour", self.calls_per_hour),
            units::per_hour,
        )?;
        if let Some(rate) = arrival_rate {
            workload = workload.with_arrival_rate(rate)?;
        }

        let service_rate = either(
            ("service_rate", self.service_rate),
            ("average_handle_time", self.average_handle_time),
            units::rate_from_handle_time,
        )?;
        if let Some(rate) = service_rate {
            workload = workload.with_service_rate(rate)?;
        }

        if let Some(servers) = self.servers {
            workload = workload.with_servers(servers)?;
        }
        Ok(workload)
    }
}

impl RawTarget {
    fn into_target(self) -> Result<SolveTarget, ScenarioError> {
        let mut constraints = Constraints::new();
        match (self.service_level, self.answer_within) {
            (Some(fraction), Some(within)) => {
                constraints = constraints.with_service_level(ServiceLevel::new(fraction, within)?);
            }
            (Some(_), None) => {
                return Err(ScenarioError::Incomplete {
                    present: "service_level",
                    missing: "answer_within",
                });
            }
            (None, Some(_)) => {
                return Err(ScenarioError::Incomplete {
                    present: "answer_within",
                    missing: "service_level",
                });
            }
            (None, None) => {}
        }
        if let Some(p) = self.max_blocking {
            constraints = constraints.with_max_blocking(p)?;
        }
        if let Some(w) = self.max_average_wait {
            constraints = constraints.with_max_average_wait(w)?;
        }
        Ok(SolveTarget::new(self.objective, constraints)?)
    }
}

/// Loads scenarios from TOML.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Creates a new `ScenarioLoader`.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Loads a scenario from a string slice.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, s: &str) -> Result<Scenario, ScenarioError> {
        let raw: RawScenario = toml::from_str(s)?;
        Ok(Scenario {
            workload: raw.workload.into_workload()?,
            target: raw.target.into_target()?,
        })
    }

    /// Loads a scenario from a generic reader.
    pub fn from_reader<R: Read>(&self, mut r: R) -> Result<Scenario, ScenarioError> {
        let mut buf = String::new();
        r.read_to_string(&mut buf)?;
        self.from_str(&buf)
    }

    /// Loads a scenario from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Scenario, ScenarioError> {
        let file = std::fs::File::open(path)?;
        self.from_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALL_CENTER: &str = r#"
        # Inbound sales line.
        [workload]
        calls_per_hour = 10500
        average_handle_time = 250
        capacity = { per-server = 2 }

        [target]
        objective = "min-agents"
        service_level = 0.8
        answer_within = 20
        max_blocking = 0.05
    "#;

    #[test]
    fn test_loads_call_center_scenario() {
        let scenario = ScenarioLoader::new().from_str(CALL_CENTER).unwrap();
        let w = scenario.workload();
        assert!((w.arrival_rate().unwrap() - 10_500.0 / 3600.0).abs() < 1e-12);
        assert!((w.service_rate().unwrap() - 0.004).abs() < 1e-15);
        assert_eq!(w.servers(), None);
        assert_eq!(w.capacity_policy(), CapacityPolicy::PerServer(2));

        let t = scenario.target();
        assert_eq!(t.objective(), Objective::MinAgents);
        let sl = t.constraints().service_level().unwrap();
        assert_eq!(sl.fraction(), 0.8);
        assert_eq!(sl.within(), 20.0);
        assert_eq!(t.constraints().max_blocking(), Some(0.05));
    }

    #[test]
    fn test_capacity_variants() {
        for (text, expected) in [
            ("\"unbounded\"", CapacityPolicy::Unbounded),
            ("\"minimal\"", CapacityPolicy::Minimal),
            ("{ fixed = 40 }", CapacityPolicy::Fixed(40)),
            ("{ headroom = 6 }", CapacityPolicy::Headroom(6)),
        ] {
            let input = format!(
                "[workload]\narrival_rate = 1.0\nservers = 4\ncapacity = {}\n\n\
                 [target]\nobjective = \"min-service-rate\"\nmax_average_wait = 30\n",
                text
            );
            let scenario: Scenario = input.parse().unwrap();
            assert_eq!(scenario.workload().capacity_policy(), expected);
        }
    }

    #[test]
    fn test_conflicting_keys() {
        let input = "[workload]\narrival_rate = 1.0\ncalls_per_hour = 3600\n\n\
                     [target]\nobjective = \"min-agents\"\nmax_blocking = 0.1\n";
        assert!(matches!(
            ScenarioLoader::new().from_str(input),
            Err(ScenarioError::Conflict {
                first: "arrival_rate",
                second: "calls_per_hour"
            })
        ));
    }

    #[test]
    fn test_service_level_needs_time() {
        let input = "[workload]\narrival_rate = 1.0\n\n\
                     [target]\nobjective = \"min-agents\"\nservice_level = 0.8\n";
        assert!(matches!(
            ScenarioLoader::new().from_str(input),
            Err(ScenarioError::Incomplete {
                present: "service_level",
                ..
            })
        ));
    }

    #[test]
    fn test_domain_errors_surface() {
        let input = "[workload]\narrival_rate = -1.0\n\n\
                     [target]\nobjective = \"min-agents\"\nmax_blocking = 0.1\n";
        assert!(matches!(
            ScenarioLoader::new().from_str(input),
            Err(ScenarioError::Domain(DomainError::InvalidRate { .. }))
        ));

        let input = "[workload]\narrival_rate = 1.0\n\n[target]\nobjective = \"min-agents\"\n";
        assert!(matches!(
            ScenarioLoader::new().from_str(input),
            Err(ScenarioError::Domain(DomainError::NoConstraints))
        ));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let input = "[workload]\narrival_rate = 1.0\nagents = 3\n\n\
                     [target]\nobjective = \"min-agents\"\nmax_blocking = 0.1\n";
        assert!(matches!(
            ScenarioLoader::new().from_str(input),
            Err(ScenarioError::Parse(_))
        ));
    }

    #[test]
    fn test_from_reader() {
        let scenario = ScenarioLoader::new()
            .from_reader(CALL_CENTER.as_bytes())
            .unwrap();
        assert_eq!(scenario.target().objective(), Objective::MinAgents);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            ScenarioLoader::new().from_path("/nonexistent/telescope/scenario.toml"),
            Err(ScenarioError::Io(_))
        ));
    }
}
