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

//! # Staffing Solver
//!
//! Inverts the queue analytics: given a partially specified system and a set
//! of constraints, find the extremal value of the one unknown parameter for
//! which every constraint holds.
//!
//! ## Motivation
//!
//! Service levels, blocking and waiting times all move monotonically with
//! the number of agents, the arrival rate and the service rate. Each
//! staffing question is therefore the search for a boundary between
//! feasible and infeasible values, and one solver covers all of them by
//! pairing a feasibility predicate built from `evaluate` with the matching
//! search from `telescope-search`.
//!
//! ## Highlights
//!
//! - Unified entry point `solve`, dispatching on the `Objective`:
//!   - `MinAgents`: integer search over `s`, starting at `⌊a⌋ + 1` for an
//!     unbounded waiting room and at `1` for finite capacities.
//!   - `MinCapacity`: integer search over `K ≥ s`, with an immediate
//!     infeasibility proof when the blocking bound is not above
//!     `max(0, 1 - 1/ρ)`, which every finite capacity exceeds.
//!   - `MaxCallVolume`: bracket-and-bisect over `λ` from `0`, first probe `sμ`.
//!   - `MinServiceRate`: bracket-and-bisect over `μ` from `0`, first probe
//!     `2λ/s`.
//!   - `CapacityPolicy::Minimal` turns `MinAgents` into a nested search that
//!     solves `MinCapacity` for every candidate server count.
//! - Saturated candidates are infeasible rather than errors.
//! - Every search runs under a `CompositeMonitor` of a `LogMonitor` and, if
//!   configured, a `TimeLimitMonitor` measuring the whole solve.
//!
//! ## Usage
//!
//! ```rust
//! use telescope_model::{
//!     target::{Constraints, Objective, ServiceLevel, SolveTarget},
//!     units::{per_hour, rate_from_handle_time},
//!     workload::Workload,
//! };
//! use telescope_solver::{solution::SolvedValue, solver::StaffingSolver};
//!
//! let workload = Workload::new()
//!     .with_arrival_rate(per_hour(300.0)).unwrap()
//!     .with_service_rate(rate_from_handle_time(240.0)).unwrap();
//! let constraints = Constraints::new()
//!     .with_service_level(ServiceLevel::new(0.8, 20.0).unwrap());
//! let target = SolveTarget::new(Objective::MinAgents, constraints).unwrap();
//!
//! let solution = StaffingSolver::new().solve(&workload, &target).unwrap();
//! let SolvedValue::Agents(agents) = solution.value() else { unreachable!() };
//! assert!(solution.service_level().unwrap() >= 0.8);
//! assert!(agents > 20);
//! ```

use crate::{
    config::SolverConfig,
    error::SolverError,
    evaluation::{Evaluation, evaluate},
    solution::{SolvedValue, StaffingSolution},
};
use std::time::Instant;
use telescope_model::{
    error::DomainError,
    params::TrafficParameters,
    scenario::Scenario,
    target::{Constraints, Objective, SolveTarget},
    workload::{CapacityPolicy, Workload},
};
use telescope_queue::error::QueueError;
use telescope_search::{
    bisect::Bisection,
    error::SearchError,
    integer::IntegerSearch,
    monitor::{composite::CompositeMonitor, log::LogMonitor, time_limit::TimeLimitMonitor},
    result::SearchOutcome,
    stats::SearchStatistics,
};

/// The bookkeeping of one solve.
struct Session {
    objective: Objective,
    started: Instant,
}

impl Session {
    fn begin(
        objective: Objective,
        constraints: &Constraints,
        system: &dyn std::fmt::Display,
    ) -> Result<Self, SolverError> {
        if constraints.is_empty() {
            return Err(DomainError::NoConstraints.into());
        }
        tracing::debug!(
            objective = %objective,
            system = %system,
            constraints = %constraints,
            "solve started"
        );
        Ok(Self {
            objective,
            started: Instant::now(),
        })
    }
}

/// Solves staffing questions against a `SolverConfig`.
#[derive(Debug, Clone, Default)]
pub struct StaffingSolver {
    config: SolverConfig,
}

impl StaffingSolver {
    /// Creates a solver with the default configuration.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with the given configuration.
    #[inline]
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline(always)]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves for the unknown named by `target.objective()`.
    ///
    /// # Errors
    ///
    /// - `SolverError::Domain` if the workload lacks a value the objective
    ///   needs, or holds an invalid combination of values.
    /// - `SolverError::Search` if no value satisfies the constraints within
    ///   the search limits, or a monitor aborted the search.
    /// - `SolverError::UnsupportedCapacityPolicy` for `CapacityPolicy::Minimal`
    ///   with any objective other than `MinAgents`.
    pub fn solve(
        &self,
        workload: &Workload,
        target: &SolveTarget,
    ) -> Result<StaffingSolution, SolverError> {
        let constraints = target.constraints();
        match target.objective() {
            Objective::MinAgents => self.find_minimal_agents(workload, constraints),
            Objective::MinCapacity => self.find_minimal_capacity(&workload.traffic()?, constraints),
            Objective::MaxCallVolume => self.find_maximal_call_volume(
                workload.require_service_rate()?,
                workload.require_servers()?,
                workload.capacity_policy(),
                constraints,
            ),
            Objective::MinServiceRate => self.find_minimal_service_rate(
                workload.require_arrival_rate()?,
                workload.require_servers()?,
                workload.capacity_policy(),
                constraints,
            ),
        }
    }

    /// Solves the workload and target of a loaded scenario.
    #[inline]
    pub fn solve_scenario(&self, scenario: &Scenario) -> Result<StaffingSolution, SolverError> {
        self.solve(scenario.workload(), scenario.target())
    }

    /// Finds the smallest number of agents for the workload's arrival and
    /// service rates.
    ///
    /// The capacity follows the workload's `CapacityPolicy`. With
    /// `CapacityPolicy::Minimal` this is `find_agents_and_capacity`.
    pub fn find_minimal_agents(
        &self,
        workload: &Workload,
        constraints: &Constraints,
    ) -> Result<StaffingSolution, SolverError> {
        let session = Session::begin(Objective::MinAgents, constraints, workload)?;
        let reference = TrafficParameters::new(
            workload.require_arrival_rate()?,
            workload.require_service_rate()?,
            1,
        )?;

        let policy = workload.capacity_policy();
        let max_servers = self.config.max_servers();
        let (floor, ceiling) = match policy {
            CapacityPolicy::Minimal => {
                return self.agents_and_capacity(session, &reference, constraints);
            }
            CapacityPolicy::Unbounded => (stable_server_floor(&reference), max_servers),
            CapacityPolicy::Fixed(capacity) => (1, capacity.min(max_servers)),
            CapacityPolicy::PerServer(_) | CapacityPolicy::Headroom(_) => (1, max_servers),
        };
        if demands_zero_blocking(constraints) && !matches!(policy, CapacityPolicy::Unbounded) {
            return Err(SearchError::NoFeasibleValue {
                lower: f64::from(floor),
                upper: f64::from(ceiling),
                probes: 0,
            }
            .into());
        }

        let mut monitor = self.monitor("agents", &session);
        let outcome = self.integer_search(floor, ceiling).run(
            &mut monitor,
            |servers| -> Result<bool, SolverError> {
                let traffic = reference.with_servers(servers)?;
                Ok(evaluate(&traffic, policy.capacity_for(servers), constraints)?
                    .satisfies(constraints))
            },
        )?;

        let servers = outcome.value();
        self.finish(
            session,
            SolvedValue::Agents(servers),
            reference.with_servers(servers)?,
            policy.capacity_for(servers),
            constraints,
            *outcome.statistics(),
        )
    }

    /// Finds the smallest capacity `K ≥ s` for a fully specified traffic.
    pub fn find_minimal_capacity(
        &self,
        traffic: &TrafficParameters,
        constraints: &Constraints,
    ) -> Result<StaffingSolution, SolverError> {
        let session = Session::begin(Objective::MinCapacity, constraints, traffic)?;
        let outcome = self.minimal_capacity(&session, traffic, constraints)?;
        let capacity = outcome.value();
        self.finish(
            session,
            SolvedValue::Capacity(capacity),
            *traffic,
            Some(capacity),
            constraints,
            *outcome.statistics(),
        )
    }

    /// Finds the largest arrival rate that `servers` agents with the given
    /// service rate and capacity policy can absorb.
    pub fn find_maximal_call_volume(
        &self,
        service_rate: f64,
        servers: u32,
        capacity: CapacityPolicy,
        constraints: &Constraints,
    ) -> Result<StaffingSolution, SolverError> {
        let workload = Workload::new()
            .with_service_rate(service_rate)?
            .with_servers(servers)?
            .with_capacity_policy(capacity)?;
        let session = Session::begin(Objective::MaxCallVolume, constraints, &workload)?;
        let capacity = fixed_capacity(Objective::MaxCallVolume, capacity, servers)?;

        let initial = f64::from(servers) * service_rate;
        let reference = TrafficParameters::new(initial, service_rate, servers)?;
        if let Some(capacity) = capacity {
            reference.with_capacity(capacity)?;
        }

        let mut monitor = self.monitor("call volume", &session);
        let outcome = self.bisection().maximize(
            0.0,
            initial,
            &mut monitor,
            |rate| -> Result<bool, SolverError> {
                let traffic = reference.with_arrival_rate(rate)?;
                Ok(evaluate(&traffic, capacity, constraints)?.satisfies(constraints))
            },
        )?;

        let rate = outcome.value();
        self.finish(
            session,
            SolvedValue::CallVolume(rate),
            reference.with_arrival_rate(rate)?,
            capacity,
            constraints,
            *outcome.statistics(),
        )
    }

    /// Finds the smallest per-agent service rate with which `servers` agents
    /// handle the given arrival rate.
    pub fn find_minimal_service_rate(
        &self,
        arrival_rate: f64,
        servers: u32,
        capacity: CapacityPolicy,
        constraints: &Constraints,
    ) -> Result<StaffingSolution, SolverError> {
        let workload = Workload::new()
            .with_arrival_rate(arrival_rate)?
            .with_servers(servers)?
            .with_capacity_policy(capacity)?;
        let session = Session::begin(Objective::MinServiceRate, constraints, &workload)?;
        let capacity = fixed_capacity(Objective::MinServiceRate, capacity, servers)?;

        let initial = 2.0 * arrival_rate / f64::from(servers);
        let reference = TrafficParameters::new(arrival_rate, initial, servers)?;
        if let Some(capacity) = capacity {
            reference.with_capacity(capacity)?;
        }

        let mut monitor = self.monitor("service rate", &session);
        let outcome = self.bisection().minimize(
            0.0,
            initial,
            &mut monitor,
            |rate| -> Result<bool, SolverError> {
                let traffic = reference.with_service_rate(rate)?;
                Ok(evaluate(&traffic, capacity, constraints)?.satisfies(constraints))
            },
        )?;

        let rate = outcome.value();
        self.finish(
            session,
            SolvedValue::ServiceRate(rate),
            reference.with_service_rate(rate)?,
            capacity,
            constraints,
            *outcome.statistics(),
        )
    }

    /// Finds the smallest number of agents for which a finite capacity
    /// satisfies the constraints, together with that capacity.
    ///
    /// For each candidate server count the capacity is the smallest one that
    /// meets the blocking bound (`K = s` without one). The remaining
    /// constraints are then checked at that capacity. A server count for
    /// which no capacity meets the blocking bound is infeasible.
    pub fn find_agents_and_capacity(
        &self,
        arrival_rate: f64,
        service_rate: f64,
        constraints: &Constraints,
    ) -> Result<StaffingSolution, SolverError> {
        let workload = Workload::new()
            .with_arrival_rate(arrival_rate)?
            .with_service_rate(service_rate)?
            .with_capacity_policy(CapacityPolicy::Minimal)?;
        let session = Session::begin(Objective::MinAgents, constraints, &workload)?;
        let reference = TrafficParameters::new(arrival_rate, service_rate, 1)?;
        self.agents_and_capacity(session, &reference, constraints)
    }

    fn agents_and_capacity(
        &self,
        session: Session,
        reference: &TrafficParameters,
        constraints: &Constraints,
    ) -> Result<StaffingSolution, SolverError> {
        // The capacity only has to keep blocking in bound; every other
        // constraint gets worse as K grows, so it is checked at the minimal K.
        let capacity_constraints = match constraints.max_blocking() {
            Some(bound) => Constraints::new().with_max_blocking(bound)?,
            None => Constraints::new(),
        };

        let mut inner_statistics = SearchStatistics::default();
        let mut capacities: Vec<(u32, u32)> = Vec::new();

        let mut monitor = self.monitor("agents", &session);
        let outcome = self.integer_search(1, self.config.max_servers()).run(
            &mut monitor,
            |servers| -> Result<bool, SolverError> {
                let traffic = reference.with_servers(servers)?;
                let capacity =
                    match self.minimal_capacity(&session, &traffic, &capacity_constraints) {
                        Ok(inner) => {
                            inner_statistics.absorb(inner.statistics());
                            inner.value()
                        }
                        Err(e) if e.is_infeasible() => return Ok(false),
                        Err(e) => return Err(e),
                    };
                capacities.push((servers, capacity));
                Ok(evaluate(&traffic, Some(capacity), constraints)?.satisfies(constraints))
            },
        )?;

        let servers = outcome.value();
        let traffic = reference.with_servers(servers)?;
        let capacity = match capacities.iter().rev().find(|(s, _)| *s == servers) {
            Some(&(_, capacity)) => capacity,
            None => self
                .minimal_capacity(&session, &traffic, &capacity_constraints)?
                .value(),
        };

        let mut statistics = *outcome.statistics();
        statistics.absorb(&inner_statistics);
        self.finish(
            session,
            SolvedValue::AgentsAndCapacity {
                agents: servers,
                capacity,
            },
            traffic,
            Some(capacity),
            constraints,
            statistics,
        )
    }

    fn minimal_capacity(
        &self,
        session: &Session,
        traffic: &TrafficParameters,
        constraints: &Constraints,
    ) -> Result<SearchOutcome<u32>, SolverError> {
        let servers = traffic.servers();

        // Throughput stays below sμ, so p_K > max(0, 1 - 1/ρ) for every K.
        if let Some(bound) = constraints.max_blocking() {
            let utilization = traffic.utilization();
            if bound <= (1.0 - utilization.recip()).max(0.0) {
                tracing::debug!(
                    servers,
                    utilization,
                    max_blocking = bound,
                    "blocking bound is not above the blocking limit"
                );
                return Err(SearchError::NoFeasibleValue {
                    lower: f64::from(servers),
                    upper: f64::INFINITY,
                    probes: 0,
                }
                .into());
            }
        }

        let ceiling = self.config.max_capacity().max(servers);
        let mut monitor = self.monitor("capacity", session);
        self.integer_search(servers, ceiling).run(
            &mut monitor,
            |capacity| -> Result<bool, SolverError> {
                Ok(evaluate(traffic, Some(capacity), constraints)?.satisfies(constraints))
            },
        )
    }

    fn finish(
        &self,
        session: Session,
        value: SolvedValue,
        traffic: TrafficParameters,
        capacity: Option<u32>,
        constraints: &Constraints,
        mut statistics: SearchStatistics,
    ) -> Result<StaffingSolution, SolverError> {
        let Evaluation::Measured {
            metrics,
            service_level,
            ..
        } = evaluate(&traffic, capacity, constraints)?
        else {
            return Err(QueueError::degenerate(&traffic, "the solved system is saturated").into());
        };

        statistics.duration = session.started.elapsed();
        tracing::debug!(
            objective = %session.objective,
            value = %value,
            probes = statistics.probes,
            elapsed_ms = statistics.duration.as_secs_f64() * 1e3,
            "solve finished"
        );

        Ok(StaffingSolution::new(
            session.objective,
            value,
            traffic,
            capacity,
            metrics,
            service_level,
            statistics,
        ))
    }

    fn monitor<V>(&self, label: &'static str, session: &Session) -> CompositeMonitor<'static, V>
    where
        V: Copy + std::fmt::Display + 'static,
    {
        let mut monitor = CompositeMonitor::with_capacity(2);
        monitor.add_monitor(LogMonitor::new(label));
        if let Some(limit) = self.config.time_limit() {
            monitor.add_monitor(TimeLimitMonitor::starting_at(limit, session.started));
        }
        monitor
    }

    #[inline]
    fn integer_search(&self, floor: u32, ceiling: u32) -> IntegerSearch<u32> {
        IntegerSearch::new(floor)
            .with_ceiling(ceiling)
            .with_strategy(self.config.integer_strategy())
            .with_max_doublings(self.config.max_doublings())
            .with_boundary_verification(self.config.verify_boundary())
    }

    #[inline]
    fn bisection(&self) -> Bisection {
        Bisection::new()
            .with_tolerance(self.config.tolerance())
            .with_max_doublings(self.config.max_doublings())
            .with_max_bisections(self.config.max_bisections())
    }
}

/// Returns `⌊a⌋ + 1`, the fewest servers that keep an infinite waiting room
/// stable.
#[inline]
fn stable_server_floor(traffic: &TrafficParameters) -> u32 {
    let load = traffic.offered_load();
    if load >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        (load.floor() as u32).saturating_add(1)
    }
}

/// Returns `true` if the constraints allow no blocking at all, which no
/// finite capacity achieves.
#[inline]
fn demands_zero_blocking(constraints: &Constraints) -> bool {
    constraints.max_blocking().is_some_and(|bound| bound <= 0.0)
}

/// Resolves the capacity of a system whose server count is fixed.
#[inline]
fn fixed_capacity(
    objective: Objective,
    capacity: CapacityPolicy,
    servers: u32,
) -> Result<Option<u32>, SolverError> {
    if capacity.is_minimal() {
        return Err(SolverError::UnsupportedCapacityPolicy {
            objective,
            capacity,
        });
    }
    Ok(capacity.capacity_for(servers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use telescope_model::{
        target::ServiceLevel,
        units::{per_hour, rate_from_handle_time},
    };
    use telescope_search::integer::IntegerStrategy;

    fn service_level(fraction: f64, within: f64) -> Constraints {
        Constraints::new().with_service_level(ServiceLevel::new(fraction, within).unwrap())
    }

    fn blocking(bound: f64) -> Constraints {
        Constraints::new().with_max_blocking(bound).unwrap()
    }

    /// 10500 calls per hour, 50 minutes handling time.
    fn large_call_center() -> Workload {
        Workload::new()
            .with_arrival_rate(per_hour(10500.0))
            .unwrap()
            .with_service_rate(rate_from_handle_time(3000.0))
            .unwrap()
    }

    /// 254 calls per hour, 5 minutes handling time.
    fn scenario_two() -> TrafficParameters {
        TrafficParameters::new(254.0 / 3600.0, 1.0 / 300.0, 27).unwrap()
    }

    #[test]
    fn test_minimal_agents_large_call_center() {
        let constraints = service_level(0.8, 30.0);
        let solver = StaffingSolver::new();
        let solution = solver
            .find_minimal_agents(&large_call_center(), &constraints)
            .unwrap();

        assert_eq!(solution.value(), SolvedValue::Agents(8815));
        assert_eq!(solution.capacity(), None);
        assert!((solution.service_level().unwrap() - 0.804265466763324).abs() < 1e-9);

        // One agent less misses the target.
        let fewer = solution.traffic().with_servers(8814).unwrap();
        assert!(!evaluate(&fewer, None, &constraints).unwrap().satisfies(&constraints));
    }

    #[test]
    fn test_strategies_agree() {
        let constraints = service_level(0.8, 30.0);
        let linear = StaffingSolver::with_config(
            SolverConfig::new().with_integer_strategy(IntegerStrategy::Linear),
        )
        .find_minimal_agents(&large_call_center(), &constraints)
        .unwrap();
        assert_eq!(linear.value(), SolvedValue::Agents(8815));
        // 8751, ..., 8815 plus the verification probe at 8816.
        assert_eq!(linear.statistics().probes, 66);
    }

    #[test]
    fn test_solve_is_idempotent() {
        let target = SolveTarget::new(Objective::MinAgents, service_level(0.8, 20.0)).unwrap();
        let workload = Workload::new()
            .with_arrival_rate(20.0 / 240.0)
            .unwrap()
            .with_service_rate(1.0 / 240.0)
            .unwrap();
        let solver = StaffingSolver::new();
        let first = solver.solve(&workload, &target).unwrap();
        let second = solver.solve(&workload, &target).unwrap();
        assert_eq!(first.value(), second.value());
        assert_eq!(first.metrics(), second.metrics());
        assert_eq!(first.value(), SolvedValue::Agents(25));
    }

    #[test]
    fn test_minimal_agents_with_fixed_capacity() {
        let workload =
            Workload::from_traffic(&scenario_two(), CapacityPolicy::Fixed(33)).unwrap();
        let constraints = service_level(0.9, 20.0);
        let solution = StaffingSolver::new()
            .find_minimal_agents(&workload, &constraints)
            .unwrap();

        assert_eq!(solution.value(), SolvedValue::Agents(27));
        assert_eq!(solution.capacity(), Some(33));
        assert!((solution.service_level().unwrap() - 0.9249128062069523).abs() < 1e-10);
        assert!(
            (solution.metrics().blocking_probability - 0.008375778095685507).abs() < 1e-12
        );
    }

    #[test]
    fn test_minimal_agents_with_derived_capacity() {
        let workload = Workload::new()
            .with_arrival_rate(2.0)
            .unwrap()
            .with_service_rate(0.25)
            .unwrap()
            .with_capacity_policy(CapacityPolicy::Headroom(4))
            .unwrap();
        let constraints = blocking(0.01);
        let solution = StaffingSolver::new()
            .find_minimal_agents(&workload, &constraints)
            .unwrap();

        let SolvedValue::Agents(servers) = solution.value() else {
            panic!("expected an agent count, got {}", solution.value());
        };
        assert_eq!(servers, 12);
        assert_eq!(solution.capacity(), Some(16));
        assert!(solution.metrics().blocking_probability <= 0.01);

        let fewer = solution.traffic().with_servers(servers - 1).unwrap();
        let evaluation = evaluate(&fewer, Some(servers + 3), &constraints).unwrap();
        assert!(!evaluation.satisfies(&constraints));
    }

    #[test]
    fn test_minimal_capacity() {
        let solution = StaffingSolver::new()
            .find_minimal_capacity(&scenario_two(), &blocking(0.01))
            .unwrap();
        assert_eq!(solution.value(), SolvedValue::Capacity(33));
        let params = solution.queue_parameters().unwrap().unwrap();
        assert_eq!(params.capacity(), 33);
    }

    #[test]
    fn test_minimal_capacity_overload_limit() {
        // ρ = 2, so at least half of all arrivals are blocked.
        let traffic = TrafficParameters::new(2.0, 0.5, 2).unwrap();
        let err = StaffingSolver::new()
            .find_minimal_capacity(&traffic, &blocking(0.5))
            .unwrap_err();
        assert!(err.is_infeasible());

        let solution = StaffingSolver::new()
            .find_minimal_capacity(&traffic, &blocking(0.51))
            .unwrap();
        assert!(solution.metrics().blocking_probability <= 0.51);
    }

    #[test]
    fn test_zero_blocking_bound_is_infeasible_with_finite_capacity() {
        let solver = StaffingSolver::new();
        let zero = blocking(0.0);

        // p_K underflows to 0.0 from K = 1075 on, but is never zero.
        let traffic = TrafficParameters::new(0.5, 1.0, 1).unwrap();
        let err = solver.find_minimal_capacity(&traffic, &zero).unwrap_err();
        assert_eq!(
            err,
            SolverError::Search(SearchError::NoFeasibleValue {
                lower: 1.0,
                upper: f64::INFINITY,
                probes: 0
            })
        );

        let err = solver
            .find_maximal_call_volume(1.0 / 300.0, 27, CapacityPolicy::Fixed(33), &zero)
            .unwrap_err();
        assert!(err.is_infeasible());

        let workload = large_call_center()
            .with_capacity_policy(CapacityPolicy::Headroom(4))
            .unwrap();
        assert!(solver.find_minimal_agents(&workload, &zero).unwrap_err().is_infeasible());

        // Without a capacity limit nothing is ever blocked.
        let solution = solver
            .find_minimal_agents(&large_call_center(), &zero)
            .unwrap();
        assert_eq!(solution.value(), SolvedValue::Agents(8751));
        assert_eq!(solution.metrics().blocking_probability, 0.0);
    }

    #[test]
    fn test_agents_and_capacity() {
        let constraints = blocking(0.05);
        let solution = StaffingSolver::new()
            .find_agents_and_capacity(2.0, 0.25, &constraints)
            .unwrap();

        assert_eq!(
            solution.value(),
            SolvedValue::AgentsAndCapacity {
                agents: 8,
                capacity: 24
            }
        );
        assert!((solution.metrics().blocking_probability - 0.04939486839353245).abs() < 1e-12);

        // Seven agents are overloaded beyond what any capacity can fix.
        let traffic = TrafficParameters::new(2.0, 0.25, 7).unwrap();
        let err = StaffingSolver::new()
            .find_minimal_capacity(&traffic, &constraints)
            .unwrap_err();
        assert!(err.is_infeasible());

        let workload = Workload::new()
            .with_arrival_rate(2.0)
            .unwrap()
            .with_service_rate(0.25)
            .unwrap()
            .with_capacity_policy(CapacityPolicy::Minimal)
            .unwrap();
        let nested = StaffingSolver::new()
            .find_minimal_agents(&workload, &constraints)
            .unwrap();
        assert_eq!(nested.value(), solution.value());
        assert_eq!(nested.statistics().probes, solution.statistics().probes);
    }

    #[test]
    fn test_agents_and_capacity_with_service_level() {
        let capacity_constraints = blocking(0.05);
        let constraints = capacity_constraints
            .with_service_level(ServiceLevel::new(0.8, 1.0).unwrap());
        let solver = StaffingSolver::new();
        let solution = solver
            .find_agents_and_capacity(2.0, 0.25, &constraints)
            .unwrap();

        let SolvedValue::AgentsAndCapacity { agents, capacity } = solution.value() else {
            panic!("expected agents and capacity, got {}", solution.value());
        };
        // Eight agents need K = 24 and answer only 27% within a second.
        assert_eq!((agents, capacity), (10, 14));
        assert!(solution.service_level().unwrap() >= 0.8);
        assert!(solution.metrics().blocking_probability <= 0.05);

        // The capacity is the smallest that meets the blocking bound.
        let traffic = TrafficParameters::new(2.0, 0.25, agents).unwrap();
        let minimal = solver
            .find_minimal_capacity(&traffic, &capacity_constraints)
            .unwrap();
        assert_eq!(minimal.value(), SolvedValue::Capacity(capacity));

        // One agent less either cannot meet the blocking bound or misses the
        // service level at its smallest capacity.
        let fewer = traffic.with_servers(agents - 1).unwrap();
        if let Ok(inner) = solver.find_minimal_capacity(&fewer, &capacity_constraints) {
            let evaluation = evaluate(&fewer, inner.capacity(), &constraints).unwrap();
            assert!(!evaluation.satisfies(&constraints));
        }
    }

    #[test]
    fn test_maximal_call_volume() {
        let constraints = blocking(0.05);
        let solution = StaffingSolver::new()
            .find_maximal_call_volume(1.0 / 300.0, 27, CapacityPolicy::Fixed(33), &constraints)
            .unwrap();

        let SolvedValue::CallVolume(rate) = solution.value() else {
            panic!("expected a call volume, got {}", solution.value());
        };
        assert!((rate - 0.08484441895196127).abs() < 1e-9);
        assert!(solution.metrics().blocking_probability <= 0.05);

        let more = solution.traffic().with_arrival_rate(rate + 1e-9).unwrap();
        assert!(!evaluate(&more, Some(33), &constraints).unwrap().satisfies(&constraints));
    }

    #[test]
    fn test_maximal_call_volume_stays_below_saturation() {
        let solution = StaffingSolver::new()
            .find_maximal_call_volume(0.25, 10, CapacityPolicy::Unbounded, &service_level(0.8, 20.0))
            .unwrap();
        assert!(solution.value().as_f64() < 2.5);
        assert!(solution.service_level().unwrap() >= 0.8);
    }

    #[test]
    fn test_minimal_service_rate() {
        let constraints = service_level(0.8, 20.0);
        let solution = StaffingSolver::new()
            .find_minimal_service_rate(20.0 / 240.0, 25, CapacityPolicy::Unbounded, &constraints)
            .unwrap();

        let SolvedValue::ServiceRate(rate) = solution.value() else {
            panic!("expected a service rate, got {}", solution.value());
        };
        // 25 agents at 240 seconds per call exceed the target.
        assert!(rate < 1.0 / 240.0);
        assert!(solution.service_level().unwrap() >= 0.8);

        let slower = solution.traffic().with_service_rate(rate - 1e-9).unwrap();
        assert!(!evaluate(&slower, None, &constraints).unwrap().satisfies(&constraints));
    }

    #[test]
    fn test_solve_round_trip() {
        let constraints = service_level(0.8, 20.0);
        let solver = StaffingSolver::new();
        let workload = Workload::new()
            .with_arrival_rate(per_hour(500.0))
            .unwrap()
            .with_service_rate(rate_from_handle_time(180.0))
            .unwrap();
        let agents = solver
            .solve(
                &workload,
                &SolveTarget::new(Objective::MinAgents, constraints).unwrap(),
            )
            .unwrap();
        let servers = agents.traffic().servers();

        // The largest call volume for those agents is at least the original one.
        let volume = solver
            .find_maximal_call_volume(
                rate_from_handle_time(180.0),
                servers,
                CapacityPolicy::Unbounded,
                &constraints,
            )
            .unwrap();
        assert!(volume.value().as_f64() >= per_hour(500.0));
    }

    #[test]
    fn test_invalid_requests() {
        let solver = StaffingSolver::new();
        let target = SolveTarget::new(Objective::MaxCallVolume, blocking(0.1)).unwrap();

        let workload = Workload::new().with_service_rate(0.1).unwrap();
        assert_eq!(
            solver.solve(&workload, &target).unwrap_err(),
            SolverError::Domain(DomainError::MissingField("server count"))
        );

        let workload = workload
            .with_servers(3)
            .unwrap()
            .with_capacity_policy(CapacityPolicy::Minimal)
            .unwrap();
        assert!(matches!(
            solver.solve(&workload, &target).unwrap_err(),
            SolverError::UnsupportedCapacityPolicy { .. }
        ));

        assert_eq!(
            solver
                .find_maximal_call_volume(0.1, 5, CapacityPolicy::Fixed(4), &blocking(0.1))
                .unwrap_err(),
            SolverError::Domain(DomainError::CapacityBelowServers {
                servers: 5,
                capacity: 4
            })
        );

        // A zero capacity is rejected before any search starts.
        let workload = large_call_center().with_capacity_policy(CapacityPolicy::Fixed(0));
        assert_eq!(
            workload.unwrap_err(),
            DomainError::CapacityBelowServers {
                servers: 1,
                capacity: 0
            }
        );
        assert_eq!(
            solver
                .find_maximal_call_volume(0.1, 5, CapacityPolicy::Fixed(0), &blocking(0.1))
                .unwrap_err(),
            SolverError::Domain(DomainError::CapacityBelowServers {
                servers: 1,
                capacity: 0
            })
        );

        assert_eq!(
            solver
                .find_minimal_capacity(&scenario_two(), &Constraints::new())
                .unwrap_err(),
            SolverError::Domain(DomainError::NoConstraints)
        );
    }

    #[test]
    fn test_server_limit() {
        let solver = StaffingSolver::with_config(SolverConfig::new().with_max_servers(100));
        let err = solver
            .find_minimal_agents(&large_call_center(), &service_level(0.8, 30.0))
            .unwrap_err();
        assert!(err.is_infeasible());
    }

    #[test]
    fn test_time_limit_aborts_solve() {
        let solver =
            StaffingSolver::with_config(SolverConfig::new().with_time_limit(Duration::ZERO));
        let err = solver
            .find_minimal_agents(&large_call_center(), &service_level(0.8, 30.0))
            .unwrap_err();
        assert!(matches!(err, SolverError::Search(SearchError::Aborted(_))));
    }
}
