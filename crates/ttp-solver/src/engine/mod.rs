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

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::budget::Budget;
use crate::columns::{Column, ColumnPool};
use crate::config::SolverConfig;
use crate::err::{CostOverflowError, SolveError};
use crate::master::{MasterProblem, MasterSolve};
use crate::pricing::{PricingOutcome, PricingStrategy};
use crate::seeding::FullScheduleSeeder;
use ttp_model::common::DistanceScalar;
use ttp_model::prelude::{Instance, Pattern, Schedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// The loop converged: no pattern of negative reduced cost exists, so
    /// the last fractional objective is a valid lower bound.
    Optimal,
    TimeLimit,
    /// No feasible pattern set exists for this instance.
    Infeasible,
}

/// Final result of a solve, fractional bound and integer schedule included.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub status: SolveStatus,
    pub schedule: Option<Schedule>,
    pub best_fractional_objective: Option<f64>,
    pub best_integer_objective: Option<f64>,
    pub iterations: usize,
    pub columns_generated: usize,
    pub elapsed: Duration,
}

/// How the column-generation loop ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopOutcome {
    Converged { objective: f64 },
    TimedOut,
    Infeasible,
}

/// The column-generation loop: solve the restricted master, price every
/// team under its duals, admit improving columns, repeat until no team
/// improves or the budget runs out. An infeasible master triggers a
/// recovery round that grows every team's pool with fresh feasibility
/// patterns; recovery rounds that cannot grow the pool count as stalls.
pub struct ColumnGeneration<'i, T> {
    instance: &'i Instance<T>,
    config: SolverConfig,
    pricing: Box<dyn PricingStrategy>,
    seeder: Option<&'i dyn FullScheduleSeeder>,
    pool: ColumnPool,
    master: MasterProblem,
    iterations: usize,
    best_fractional: Option<f64>,
    incumbent: Option<(f64, Vec<usize>)>,
}

impl<'i, T: DistanceScalar> ColumnGeneration<'i, T> {
    pub fn new(
        instance: &'i Instance<T>,
        config: SolverConfig,
        pricing: Box<dyn PricingStrategy>,
    ) -> Self {
        let master = MasterProblem::new(instance.n_teams(), instance.n_slots());
        Self {
            instance,
            config,
            pricing,
            seeder: None,
            pool: ColumnPool::new(),
            master,
            iterations: 0,
            best_fractional: None,
            incumbent: None,
        }
    }

    /// Primes the pool with a full template schedule before the per-team
    /// seeds, when one fits the instance's bounds.
    pub fn with_seeder(mut self, seeder: &'i dyn FullScheduleSeeder) -> Self {
        self.seeder = Some(seeder);
        self
    }

    #[inline]
    pub fn pool(&self) -> &ColumnPool {
        &self.pool
    }

    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    #[inline]
    pub fn best_fractional(&self) -> Option<f64> {
        self.best_fractional
    }

    /// Best schedule found through an integral master solution, if any
    /// iteration produced one. The integer restriction usually beats this,
    /// but it survives a restriction that runs out of time.
    pub fn incumbent_schedule(&self) -> Option<(f64, Schedule)> {
        let (objective, ref chosen) = *self.incumbent.as_ref()?;
        let patterns = chosen
            .iter()
            .map(|&index| self.pool.get(index).pattern().clone())
            .collect();
        Some((objective, Schedule::from_patterns(patterns)))
    }

    /// Records an integral master solution as the loop incumbent. Strict
    /// improvement only.
    fn note_integral(&mut self, objective: f64, primal: &[f64]) {
        let tolerance = self.config.integrality_tolerance;
        let mut chosen = Vec::with_capacity(self.instance.n_teams());
        for (index, &value) in primal.iter().enumerate() {
            if value > 1.0 - tolerance {
                chosen.push(index);
            } else if value > tolerance {
                return;
            }
        }
        if chosen.len() != self.instance.n_teams() {
            return;
        }
        if self.incumbent.as_ref().is_none_or(|(best, _)| objective < *best) {
            debug!(objective, "integral master solution");
            self.incumbent = Some((objective, chosen));
        }
    }

    /// Adds a pattern to the pool and the master. Returns `Ok(false)` on a
    /// duplicate; a cost that overflows the distance type is an error, not
    /// a column.
    fn admit(&mut self, pattern: Pattern) -> Result<bool, SolveError> {
        let Some(cost) = pattern.cost_f64(self.instance.matrix()) else {
            return Err(CostOverflowError::new(pattern.owner()).into());
        };
        let column = Column::new(pattern, cost);
        Ok(match self.pool.push(column) {
            Some(index) => {
                self.master.add_column(self.pool.get(index));
                true
            }
            None => false,
        })
    }

    /// One feasibility pattern per team so the master has something to
    /// chew on. `Ok(None)` carries the early outcome when seeding fails.
    fn seed_initial(&mut self, budget: &Budget) -> Result<Option<LoopOutcome>, SolveError> {
        if let Some(seeder) = self.seeder {
            match seeder.build(self.instance.n_teams(), self.instance.bounds()) {
                Some(patterns) => {
                    info!(seeder = seeder.name(), "seeding a full template schedule");
                    for pattern in patterns {
                        let team = pattern.owner();
                        let hash = pattern.canonical_hash();
                        if self.admit(pattern)? {
                            self.pricing.exclude(team, hash);
                        }
                    }
                }
                None => {
                    debug!(seeder = seeder.name(), "no template fits these bounds");
                }
            }
        }
        for team in self.instance.teams() {
            match self.pricing.seed(team, budget)? {
                Some(pattern) => {
                    self.admit(pattern)?;
                }
                None => {
                    if budget.is_exhausted() {
                        return Ok(Some(LoopOutcome::TimedOut));
                    }
                    // A template column may already cover this team, in
                    // which case the oracle has merely run out of unseen
                    // patterns rather than proven the space empty.
                    if self.pool.count_for(team) == 0 {
                        info!(team = team.value(), "no feasible pattern exists");
                        return Ok(Some(LoopOutcome::Infeasible));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Grows every team's pool after an infeasible master. Returns whether
    /// any new column entered the pool.
    fn recover(&mut self, budget: &Budget) -> Result<bool, SolveError> {
        let before = self.pool.len();
        for team in self.instance.teams() {
            for _ in 0..self.config.recovery_pool_size {
                if budget.is_exhausted() {
                    break;
                }
                match self.pricing.seed(team, budget)? {
                    Some(pattern) => {
                        self.admit(pattern)?;
                    }
                    None => break,
                }
            }
        }
        debug!(
            added = self.pool.len() - before,
            total = self.pool.len(),
            "recovery round"
        );
        Ok(self.pool.len() > before)
    }

    pub fn run(&mut self, budget: &Budget) -> Result<LoopOutcome, SolveError> {
        if let Some(outcome) = self.seed_initial(budget)? {
            return Ok(outcome);
        }
        info!(columns = self.pool.len(), "seeded initial columns");

        let mut stalls = 0;
        loop {
            if budget.is_exhausted() {
                return Ok(LoopOutcome::TimedOut);
            }
            match self.master.solve(budget)? {
                MasterSolve::Interrupted => return Ok(LoopOutcome::TimedOut),
                MasterSolve::Infeasible => {
                    if self.recover(budget)? {
                        stalls = 0;
                    } else {
                        stalls += 1;
                        if stalls >= self.config.stall_limit {
                            warn!(stalls, "master stayed infeasible, pool cannot grow");
                            return Ok(LoopOutcome::TimedOut);
                        }
                    }
                }
                MasterSolve::Optimal {
                    objective,
                    primal,
                    duals,
                } => {
                    self.iterations += 1;
                    self.best_fractional = Some(objective);
                    self.note_integral(objective, &primal);
                    let mut admitted = 0usize;
                    for team in self.instance.teams() {
                        match self.pricing.price(team, &duals, budget)? {
                            PricingOutcome::Feasible {
                                pattern,
                                reduced_cost,
                            } => {
                                if reduced_cost < -self.config.pricing_tolerance {
                                    let hash = pattern.canonical_hash();
                                    self.pricing.exclude(team, hash);
                                    if self.admit(pattern)? {
                                        admitted += 1;
                                    }
                                }
                            }
                            PricingOutcome::Exhausted => {}
                            PricingOutcome::Infeasible => return Ok(LoopOutcome::Infeasible),
                            PricingOutcome::Interrupted => return Ok(LoopOutcome::TimedOut),
                        }
                    }
                    debug!(
                        iteration = self.iterations,
                        objective,
                        admitted,
                        pool = self.pool.len(),
                        "column generation iteration"
                    );
                    if admitted == 0 {
                        info!(
                            iterations = self.iterations,
                            objective, "column generation converged"
                        );
                        return Ok(LoopOutcome::Converged { objective });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::search::SearchPricing;
    use ttp_model::prelude::{DistanceMatrix, RunLengthBounds};

    fn instance4() -> Instance<i64> {
        let matrix = DistanceMatrix::new(vec![
            vec![0, 1, 2, 3],
            vec![1, 0, 1, 2],
            vec![2, 1, 0, 1],
            vec![3, 2, 1, 0],
        ])
        .unwrap();
        Instance::new(matrix, RunLengthBounds::new(1, 3)).unwrap()
    }

    #[test]
    fn loop_converges_on_a_small_instance() {
        let instance = instance4();
        let config = SolverConfig::default();
        let pricing = Box::new(SearchPricing::new(&instance, 17));
        let mut engine = ColumnGeneration::new(&instance, config, pricing);
        let budget = Budget::new(Duration::from_secs(60));

        match engine.run(&budget).unwrap() {
            LoopOutcome::Converged { objective } => {
                assert!(objective > 0.0);
                assert_eq!(engine.best_fractional(), Some(objective));
                assert!(engine.iterations() >= 1);
                assert!(engine.pool().len() >= 4);
            }
            other => panic!("expected convergence, got {:?}", other),
        }
    }

    #[test]
    fn converged_objective_is_a_fixpoint() {
        let instance = instance4();
        let config = SolverConfig::default();
        let pricing = Box::new(SearchPricing::new(&instance, 17));
        let mut engine = ColumnGeneration::new(&instance, config, pricing);
        let budget = Budget::new(Duration::from_secs(60));

        let first = match engine.run(&budget).unwrap() {
            LoopOutcome::Converged { objective } => objective,
            other => panic!("expected convergence, got {:?}", other),
        };
        // A second full pass re-seeds, re-solves and re-prices every team;
        // with no improving pattern left, the bound must not move.
        let second = match engine.run(&budget).unwrap() {
            LoopOutcome::Converged { objective } => objective,
            other => panic!("expected convergence, got {:?}", other),
        };
        assert!(
            (first - second).abs() < 1e-4,
            "bound moved: {} vs {}",
            first,
            second
        );
    }

    #[test]
    fn overflowing_pattern_costs_surface_as_an_error() {
        let huge = i64::MAX / 2;
        let matrix = DistanceMatrix::new(vec![
            vec![0, huge, huge, huge],
            vec![huge, 0, huge, huge],
            vec![huge, huge, 0, huge],
            vec![huge, huge, huge, 0],
        ])
        .unwrap();
        let instance = Instance::new(matrix, RunLengthBounds::new(1, 3)).unwrap();
        let config = SolverConfig::default();
        let pricing = Box::new(SearchPricing::new(&instance, 17));
        let mut engine = ColumnGeneration::new(&instance, config, pricing);
        let budget = Budget::new(Duration::from_secs(60));

        match engine.run(&budget) {
            Err(SolveError::CostOverflow(e)) => {
                assert_eq!(e.owner().index(), 0);
            }
            other => panic!("expected a cost overflow, got {:?}", other),
        }
    }

    #[test]
    fn template_seeding_feeds_every_team() {
        let instance = instance4();
        let config = SolverConfig::default();
        let pricing = Box::new(SearchPricing::new(&instance, 17));
        let seeder = crate::seeding::MirroredRoundRobinSeeder::new();
        let mut engine =
            ColumnGeneration::new(&instance, config, pricing).with_seeder(&seeder);
        let budget = Budget::new(Duration::from_secs(60));

        match engine.run(&budget).unwrap() {
            LoopOutcome::Converged { .. } => {
                for team in instance.teams() {
                    assert!(engine.pool().count_for(team) >= 1);
                }
            }
            other => panic!("expected convergence, got {:?}", other),
        }
    }

    #[test]
    fn exhausted_budget_times_out_cleanly() {
        let instance = instance4();
        let config = SolverConfig::default();
        let pricing = Box::new(SearchPricing::new(&instance, 17));
        let mut engine = ColumnGeneration::new(&instance, config, pricing);
        let budget = Budget::new(Duration::ZERO);

        assert_eq!(engine.run(&budget).unwrap(), LoopOutcome::TimedOut);
    }
}
