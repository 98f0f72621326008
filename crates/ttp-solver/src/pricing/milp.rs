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

use good_lp::solvers::highs::highs;
use good_lp::*;
use tracing::trace;

use crate::budget::Budget;
use crate::duals::DualPrices;
use crate::err::PricingError;
use crate::pricing::{PatternMemo, PricingOutcome, PricingStrategy};
use ttp_model::common::DistanceScalar;
use ttp_model::prelude::{Instance, Pattern, PatternHash, RunLengthBounds, TeamIdentifier};

/// Mixed-integer pricing oracle.
///
/// Binary `h[s]` marks a home slot, binary `a[j][s]` an away game at `j` in
/// slot `s`. Travel between consecutive slots is linearized with continuous
/// leg variables bounded below by the adjacent venue indicators; the first
/// and last legs touch the owner's venue and stay linear. Excluded patterns
/// are cut off one by one with no-good constraints over their away entries.
#[derive(Debug)]
pub struct MilpPricing {
    n_teams: usize,
    n_slots: usize,
    bounds: RunLengthBounds,
    dist: Vec<Vec<f64>>,
    memo: PatternMemo,
}

impl MilpPricing {
    pub fn new<T: DistanceScalar>(instance: &Instance<T>) -> Self {
        let n = instance.n_teams();
        let dist = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        instance
                            .matrix()
                            .distance_f64(
                                TeamIdentifier::from_index(i),
                                TeamIdentifier::from_index(j),
                            )
                            .unwrap_or(f64::MAX)
                    })
                    .collect()
            })
            .collect();
        Self {
            n_teams: n,
            n_slots: instance.n_slots(),
            bounds: instance.bounds(),
            dist,
            memo: PatternMemo::new(n),
        }
    }

    fn travel(&self, owner: TeamIdentifier, venues: &[TeamIdentifier]) -> f64 {
        let mut at = owner.index();
        let mut total = 0.0;
        for v in venues {
            total += self.dist[at][v.index()];
            at = v.index();
        }
        total + self.dist[at][owner.index()]
    }

    /// Builds and solves the pricing MIP. `duals == None` turns it into a
    /// pure feasibility search used for seeding.
    fn solve_model(
        &self,
        team: TeamIdentifier,
        duals: Option<&DualPrices>,
        budget: &Budget,
    ) -> Result<PricingOutcome, PricingError> {
        let n = self.n_teams;
        let slots = self.n_slots;
        let owner = team.index();

        let mut vars = variables!();
        let home: Vec<Variable> = (0..slots)
            .map(|s| vars.add(variable().binary().name(format!("h_{s}"))))
            .collect();
        let away: Vec<Vec<Variable>> = (0..n)
            .map(|j| {
                if j == owner {
                    Vec::new()
                } else {
                    (0..slots)
                        .map(|s| vars.add(variable().binary().name(format!("a_{j}_{s}"))))
                        .collect()
                }
            })
            .collect();

        // Leg variables between consecutive slots, only where travel costs
        // anything. The venue indicator of the owner is the home marker.
        let mut legs: Vec<(usize, usize, usize, Variable)> = Vec::new();
        for s in 0..slots.saturating_sub(1) {
            for i in 0..n {
                for j in 0..n {
                    if self.dist[i][j] > 0.0 {
                        let y = vars.add(variable().min(0.0).max(1.0).name(format!("y_{i}_{j}_{s}")));
                        legs.push((i, j, s, y));
                    }
                }
            }
        }

        let mut objective = Expression::from(0.0);
        for j in 0..n {
            if j != owner {
                objective = objective + self.dist[owner][j] * away[j][0];
                objective = objective + self.dist[j][owner] * away[j][slots - 1];
            }
        }
        for &(i, j, _, y) in &legs {
            objective = objective + self.dist[i][j] * y;
        }
        if let Some(duals) = duals {
            for j in 0..n {
                if j == owner {
                    continue;
                }
                let host = TeamIdentifier::from_index(j);
                for s in 0..slots {
                    let gain = duals.coverage(team, s) + duals.coverage(host, s);
                    objective = objective - gain * away[j][s];
                }
            }
        }

        let mut prob = vars
            .minimise(objective)
            .using(highs)
            .with_time_limit(budget.remaining_secs());

        // One venue per slot.
        for s in 0..slots {
            let sum = (0..n)
                .filter(|&j| j != owner)
                .fold(Expression::from(0.0) + home[s], |acc, j| acc + away[j][s]);
            prob.add_constraint(sum.eq(1.0));
        }
        // Each opponent is visited exactly once.
        for j in 0..n {
            if j == owner {
                continue;
            }
            let sum = (0..slots).fold(Expression::from(0.0), |acc, s| acc + away[j][s]);
            prob.add_constraint(sum.eq(1.0));
        }
        // Home and away counts of every complete window stay within bounds.
        let window = self.bounds.window();
        let (lower, upper) = (self.bounds.lower() as f64, self.bounds.upper() as f64);
        for start in 0..=slots.saturating_sub(window) {
            let homes = (start..start + window)
                .fold(Expression::from(0.0), |acc, s| acc + home[s]);
            prob.add_constraint(homes.clone().geq(lower));
            prob.add_constraint(homes.clone().leq(upper));
            prob.add_constraint(homes.clone().geq(window as f64 - upper));
            prob.add_constraint(homes.leq(window as f64 - lower));
        }
        // Legs are forced up wherever both adjacent venue indicators hold.
        for &(i, j, s, y) in &legs {
            let vi = if i == owner { home[s] } else { away[i][s] };
            let vj = if j == owner { home[s + 1] } else { away[j][s + 1] };
            prob.add_constraint((vi + vj - y).leq(1.0));
        }
        // No-good cuts for every pattern already handed out.
        for hash in self.memo.excluded(team) {
            let placement = hash.decode(self.n_teams, slots);
            let mut sum = Expression::from(0.0);
            let mut entries = 0;
            for (s, host) in placement.iter().enumerate() {
                if let Some(host) = host {
                    sum = sum + away[host.index()][s];
                    entries += 1;
                }
            }
            if entries > 0 {
                prob.add_constraint(sum.leq(entries as f64 - 1.0));
            }
        }

        let sol = match prob.solve() {
            Ok(sol) => sol,
            // A time limit without an incumbent.
            Err(ResolutionError::Other("NoSolutionFound")) => {
                return Ok(PricingOutcome::Interrupted);
            }
            Err(ResolutionError::Infeasible) => {
                return Ok(if self.memo.len(team) > 0 {
                    PricingOutcome::Exhausted
                } else {
                    PricingOutcome::Infeasible
                });
            }
            Err(_) if budget.is_exhausted() => return Ok(PricingOutcome::Interrupted),
            Err(err) => return Err(err.into()),
        };

        let venues: Vec<TeamIdentifier> = (0..slots)
            .map(|s| {
                (0..n)
                    .filter(|&j| j != owner && sol.value(away[j][s]) > 0.5)
                    .map(TeamIdentifier::from_index)
                    .next()
                    .unwrap_or(team)
            })
            .collect();
        let pattern = Pattern::new(team, venues, n, self.bounds)?;
        let cost = self.travel(team, pattern.venues());
        let reduced_cost = match duals {
            Some(duals) => duals.reduced_cost(&pattern, cost),
            None => cost,
        };
        if !incumbent_is_useful(sol.status(), duals.is_some(), reduced_cost) {
            return Ok(PricingOutcome::Interrupted);
        }
        trace!(team = team.value(), reduced_cost, "milp priced team");
        Ok(PricingOutcome::Feasible {
            pattern,
            reduced_cost,
        })
    }
}

/// Whether a solve's incumbent answers the caller's question. A time-limited
/// solve proves nothing about the minimum reduced cost, so when pricing it
/// only counts if it already prices negative; seeding needs any feasible
/// pattern.
fn incumbent_is_useful(status: SolutionStatus, pricing: bool, reduced_cost: f64) -> bool {
    match status {
        SolutionStatus::TimeLimit => !pricing || reduced_cost < 0.0,
        _ => true,
    }
}

impl PricingStrategy for MilpPricing {
    fn name(&self) -> &'static str {
        "milp"
    }

    fn price(
        &mut self,
        team: TeamIdentifier,
        duals: &DualPrices,
        budget: &Budget,
    ) -> Result<PricingOutcome, PricingError> {
        self.solve_model(team, Some(duals), budget)
    }

    fn seed(
        &mut self,
        team: TeamIdentifier,
        budget: &Budget,
    ) -> Result<Option<Pattern>, PricingError> {
        match self.solve_model(team, None, budget)? {
            PricingOutcome::Feasible { pattern, .. } => {
                self.memo.insert(team, pattern.canonical_hash());
                Ok(Some(pattern))
            }
            _ => Ok(None),
        }
    }

    fn exclude(&mut self, team: TeamIdentifier, hash: PatternHash) {
        self.memo.insert(team, hash);
    }
}
