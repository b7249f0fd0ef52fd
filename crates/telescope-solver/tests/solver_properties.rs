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

use proptest::prelude::*;
use std::str::FromStr;
use telescope_model::{
    scenario::Scenario,
    target::{Constraints, Objective, ServiceLevel},
    workload::{CapacityPolicy, Workload},
};
use telescope_solver::{
    config::SolverConfig, evaluation::evaluate, solution::SolvedValue, solver::StaffingSolver,
};

const LARGE_CALL_CENTER: &str = r#"
    [workload]
    calls_per_hour = 10500
    average_handle_time = 3000

    [target]
    objective = "min-agents"
    service_level = 0.8
    answer_within = 30
"#;

const HELP_DESK: &str = r#"
    # 254 calls per hour, five minutes each, 27 agents and 6 waiting lines.
    [workload]
    calls_per_hour = 254
    average_handle_time = 300
    servers = 27
    capacity = { fixed = 33 }

    [target]
    objective = "max-call-volume"
    max_blocking = 0.05
"#;

#[test]
fn test_solve_scenario_from_toml() {
    let scenario = Scenario::from_str(LARGE_CALL_CENTER).unwrap();
    let solution = StaffingSolver::new().solve_scenario(&scenario).unwrap();
    assert_eq!(solution.objective(), Objective::MinAgents);
    assert_eq!(solution.value(), SolvedValue::Agents(8815));
}

#[test]
fn test_scenario_ignores_the_unknown_value() {
    // The scenario lists the arrival rate, but it is the unknown here.
    let scenario = Scenario::from_str(HELP_DESK).unwrap();
    let solution = StaffingSolver::new().solve_scenario(&scenario).unwrap();
    let SolvedValue::CallVolume(rate) = solution.value() else {
        panic!("expected a call volume, got {}", solution.value());
    };
    assert!((rate - 0.08484441895196127).abs() < 1e-9);
    assert_eq!(solution.capacity(), Some(33));
}

#[test]
fn test_solver_config_from_toml() {
    let config: SolverConfig = toml::from_str(
        r#"
        integer-strategy = "linear"
        verify-boundary = false
        "#,
    )
    .unwrap();
    let scenario = Scenario::from_str(LARGE_CALL_CENTER).unwrap();
    let solution = StaffingSolver::with_config(config)
        .solve_scenario(&scenario)
        .unwrap();
    assert_eq!(solution.value(), SolvedValue::Agents(8815));
    // 8751, ..., 8815 without the verification probe.
    assert_eq!(solution.statistics().probes, 65);
}

#[test]
fn test_pure_loss_dimensioning() {
    // With K = s every admitted customer is served at once.
    let workload = Workload::new()
        .with_arrival_rate(8.0)
        .unwrap()
        .with_service_rate(1.0)
        .unwrap()
        .with_capacity_policy(CapacityPolicy::Headroom(0))
        .unwrap();
    let constraints = Constraints::new().with_max_blocking(0.01).unwrap();
    let solution = StaffingSolver::new()
        .find_minimal_agents(&workload, &constraints)
        .unwrap();
    let metrics = solution.metrics();
    assert!(metrics.blocking_probability <= 0.01);
    assert_eq!(metrics.expected_waiting_time, 0.0);
    assert_eq!(metrics.probability_of_waiting, 0.0);
}

#[test]
fn test_infeasible_target_is_reported() {
    // A finite waiting room always blocks some arrivals.
    let workload = Workload::new()
        .with_arrival_rate(1.0)
        .unwrap()
        .with_service_rate(0.5)
        .unwrap()
        .with_capacity_policy(CapacityPolicy::Fixed(40))
        .unwrap();
    let constraints = Constraints::new().with_max_blocking(0.0).unwrap();
    let err = StaffingSolver::new()
        .find_minimal_agents(&workload, &constraints)
        .unwrap_err();
    assert!(err.is_infeasible());
}

fn erlang_c_workload(load: f64) -> Workload {
    Workload::new()
        .with_arrival_rate(load / 180.0)
        .unwrap()
        .with_service_rate(1.0 / 180.0)
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_minimal_agents_is_minimal(
        load in 0.5f64..400.0,
        fraction in 0.5f64..0.99,
        within in 5.0f64..60.0,
    ) {
        let constraints =
            Constraints::new().with_service_level(ServiceLevel::new(fraction, within).unwrap());
        let solution = StaffingSolver::new()
            .find_minimal_agents(&erlang_c_workload(load), &constraints)
            .unwrap();

        let servers = solution.traffic().servers();
        prop_assert!(solution.service_level().unwrap() >= fraction);
        if servers > 1 {
            let fewer = solution.traffic().with_servers(servers - 1).unwrap();
            prop_assert!(!evaluate(&fewer, None, &constraints).unwrap().satisfies(&constraints));
        }
    }

    #[test]
    fn prop_more_traffic_needs_no_fewer_agents(
        load in 0.5f64..400.0,
        extra in 0.0f64..50.0,
    ) {
        let constraints =
            Constraints::new().with_service_level(ServiceLevel::new(0.8, 20.0).unwrap());
        let solver = StaffingSolver::new();
        let base = solver.find_minimal_agents(&erlang_c_workload(load), &constraints).unwrap();
        let busier = solver
            .find_minimal_agents(&erlang_c_workload(load + extra), &constraints)
            .unwrap();
        prop_assert!(base.traffic().servers() <= busier.traffic().servers());
    }
}
