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

use tracing::info;

use crate::budget::Budget;
use crate::config::{PricingKind, SolverConfig};
use crate::engine::{ColumnGeneration, LoopOutcome, SolveReport, SolveStatus};
use crate::err::SolveError;
use crate::pricing::PricingStrategy;
use crate::pricing::milp::MilpPricing;
use crate::pricing::search::SearchPricing;
use crate::restriction::IntegerRestriction;
use crate::seeding::FullScheduleSeeder;
use ttp_model::common::DistanceScalar;
use ttp_model::prelude::Instance;

/// Facade over the whole pipeline: seeding, column generation, integer
/// restriction. One call, one report.
#[derive(Debug)]
pub struct TtpSolver {
    config: SolverConfig,
    seeder: Option<Box<dyn FullScheduleSeeder>>,
}

impl TtpSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            seeder: None,
        }
    }

    /// Primes every solve with a full template schedule when one fits the
    /// instance's bounds.
    pub fn with_seeder(mut self, seeder: Box<dyn FullScheduleSeeder>) -> Self {
        self.seeder = Some(seeder);
        self
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solve<T: DistanceScalar>(
        &self,
        instance: &Instance<T>,
    ) -> Result<SolveReport, SolveError> {
        let budget = Budget::new(self.config.time_limit);
        let pricing: Box<dyn PricingStrategy> = match self.config.pricing {
            PricingKind::ConstraintSearch => {
                Box::new(SearchPricing::new(instance, self.config.rng_seed))
            }
            PricingKind::Milp => Box::new(MilpPricing::new(instance)),
        };
        info!(
            teams = instance.n_teams(),
            slots = instance.n_slots(),
            pricing = pricing.name(),
            "starting solve"
        );

        let mut engine = ColumnGeneration::new(instance, self.config, pricing);
        if let Some(seeder) = &self.seeder {
            engine = engine.with_seeder(seeder.as_ref());
        }
        let outcome = engine.run(&budget)?;

        let status = match outcome {
            LoopOutcome::Converged { .. } => SolveStatus::Optimal,
            LoopOutcome::TimedOut => SolveStatus::TimeLimit,
            LoopOutcome::Infeasible => SolveStatus::Infeasible,
        };

        // The restriction runs even after a timeout so that the columns
        // generated so far still produce a schedule. Only a proven-empty
        // pattern space skips it.
        let (schedule, best_integer) = if status == SolveStatus::Infeasible {
            (None, None)
        } else {
            let restriction = IntegerRestriction::new(
                instance.n_teams(),
                instance.n_slots(),
                self.config.integrality_tolerance,
            );
            let time = budget
                .remaining()
                .max(self.config.restriction_floor)
                .as_secs_f64();
            match restriction.solve(engine.pool(), time)? {
                Some(solved) => (Some(solved.schedule), Some(solved.objective)),
                // Fall back to an integral master solution seen during the
                // loop, if the restriction could not round the pool in time.
                None => match engine.incumbent_schedule() {
                    Some((objective, schedule)) => (Some(schedule), Some(objective)),
                    None => (None, None),
                },
            }
        };

        let report = SolveReport {
            status,
            schedule,
            best_fractional_objective: engine.best_fractional(),
            best_integer_objective: best_integer,
            iterations: engine.iterations(),
            columns_generated: engine.pool().len(),
            elapsed: budget.elapsed(),
        };
        info!(
            status = ?report.status,
            fractional = ?report.best_fractional_objective,
            integer = ?report.best_integer_objective,
            iterations = report.iterations,
            columns = report.columns_generated,
            "solve finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use ttp_model::prelude::{
        DistanceMatrix, Pattern, RunLengthBounds, Schedule, TeamIdentifier,
    };
    use ttp_model::validation::ScheduleValidator;

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

    /// Exact optimum by enumerating oriented matchings slot by slot. Every
    /// ordered pair plays exactly once; window feasibility is checked at
    /// the leaves through `Pattern::new`.
    fn brute_force_optimum(instance: &Instance<i64>) -> i64 {
        let n = instance.n_teams();
        let slots = instance.n_slots();
        let mut used = vec![vec![false; n]; n];
        let mut venues = vec![vec![0u32; slots]; n];
        let mut best = i64::MAX;

        fn fill_slot(
            slot: usize,
            paired: &mut Vec<bool>,
            used: &mut Vec<Vec<bool>>,
            venues: &mut Vec<Vec<u32>>,
            instance: &Instance<i64>,
            best: &mut i64,
        ) {
            let n = paired.len();
            let Some(first) = (0..n).find(|&t| !paired[t]) else {
                next_slot(slot + 1, used, venues, instance, best);
                return;
            };
            paired[first] = true;
            for other in 0..n {
                if paired[other] {
                    continue;
                }
                paired[other] = true;
                for (home, away) in [(first, other), (other, first)] {
                    if used[home][away] {
                        continue;
                    }
                    used[home][away] = true;
                    venues[home][slot] = home as u32;
                    venues[away][slot] = home as u32;
                    fill_slot(slot, paired, used, venues, instance, best);
                    used[home][away] = false;
                }
                paired[other] = false;
            }
            paired[first] = false;
        }

        fn next_slot(
            slot: usize,
            used: &mut Vec<Vec<bool>>,
            venues: &mut Vec<Vec<u32>>,
            instance: &Instance<i64>,
            best: &mut i64,
        ) {
            let n = instance.n_teams();
            if slot == instance.n_slots() {
                let mut patterns = Vec::with_capacity(n);
                for t in 0..n {
                    let venue_ids = venues[t].iter().copied().map(TeamIdentifier::new).collect();
                    match Pattern::new(
                        TeamIdentifier::from_index(t),
                        venue_ids,
                        n,
                        instance.bounds(),
                    ) {
                        Ok(p) => patterns.push(p),
                        Err(_) => return,
                    }
                }
                let schedule = Schedule::from_patterns(patterns);
                if let Some(cost) = schedule.objective(instance.matrix()) {
                    *best = (*best).min(cost);
                }
                return;
            }
            let mut paired = vec![false; n];
            fill_slot(slot, &mut paired, used, venues, instance, best);
        }

        next_slot(0, &mut used, &mut venues, instance, &mut best);
        assert_ne!(best, i64::MAX, "no feasible tournament found");
        best
    }

    #[test]
    fn search_pricing_solves_four_teams_to_optimality() {
        let instance = instance4();
        let config = SolverConfig::default()
            .with_time_limit(Duration::from_secs(120))
            .with_rng_seed(42);
        let report = TtpSolver::new(config).solve(&instance).unwrap();

        assert_eq!(report.status, SolveStatus::Optimal);
        let optimum = brute_force_optimum(&instance) as f64;
        let fractional = report.best_fractional_objective.unwrap();
        let integer = report.best_integer_objective.unwrap();
        // The converged LP bounds the optimum from below; any integer
        // schedule bounds it from above.
        assert!(fractional <= optimum + 1e-6, "{} > {}", fractional, optimum);
        assert!(integer >= optimum - 1e-6, "{} < {}", integer, optimum);

        let schedule = report.schedule.unwrap();
        ScheduleValidator::validate(&schedule, 4, 6).unwrap();
        let total = schedule.objective(instance.matrix()).unwrap() as f64;
        assert!((total - integer).abs() < 1e-6);
    }

    #[test]
    fn milp_pricing_reaches_the_same_fractional_bound() {
        let instance = instance4();
        let base = SolverConfig::default()
            .with_time_limit(Duration::from_secs(120))
            .with_rng_seed(42);
        let a = TtpSolver::new(base).solve(&instance).unwrap();
        let b = TtpSolver::new(base.with_pricing(PricingKind::Milp))
            .solve(&instance)
            .unwrap();
        assert_eq!(a.status, SolveStatus::Optimal);
        assert_eq!(b.status, SolveStatus::Optimal);
        let fa = a.best_fractional_objective.unwrap();
        let fb = b.best_fractional_objective.unwrap();
        assert!((fa - fb).abs() < 1e-4, "{} vs {}", fa, fb);
    }

    #[test]
    fn template_seeded_solve_stays_optimal() {
        use crate::seeding::MirroredRoundRobinSeeder;

        let instance = instance4();
        let config = SolverConfig::default()
            .with_time_limit(Duration::from_secs(120))
            .with_rng_seed(42);
        let report = TtpSolver::new(config)
            .with_seeder(Box::new(MirroredRoundRobinSeeder::new()))
            .solve(&instance)
            .unwrap();

        assert_eq!(report.status, SolveStatus::Optimal);
        let schedule = report.schedule.unwrap();
        ScheduleValidator::validate(&schedule, 4, 6).unwrap();
    }

    #[test]
    fn zero_budget_reports_a_time_limit() {
        let instance = instance4();
        let config = SolverConfig::default().with_time_limit(Duration::ZERO);
        let report = TtpSolver::new(config).solve(&instance).unwrap();
        assert_eq!(report.status, SolveStatus::TimeLimit);
        // The restriction floor still applies, so a schedule may or may
        // not exist; the report stays consistent either way.
        if let Some(schedule) = &report.schedule {
            ScheduleValidator::validate(schedule, 4, 6).unwrap();
        }
    }
}
