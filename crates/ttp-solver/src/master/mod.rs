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

use highs::{ColProblem, HighsModelStatus, Row, Sense};
use tracing::trace;

use crate::budget::Budget;
use crate::columns::Column;
use crate::duals::DualPrices;
use crate::err::{MasterError, UnexpectedStatusError};

/// Result of one master LP solve.
#[derive(Debug, Clone, PartialEq)]
pub enum MasterSolve {
    Optimal {
        objective: f64,
        primal: Vec<f64>,
        duals: DualPrices,
    },
    /// The pooled columns cannot partition the schedule yet.
    Infeasible,
    /// HiGHS hit the remaining time budget.
    Interrupted,
}

/// Restricted master: a set-partitioning LP over the pooled patterns.
///
/// Rows are created once, in a fixed order the dual extraction relies on:
/// `N` assignment rows first, then the `N * S` coverage rows laid out as
/// `team * S + slot`. Columns are appended as pricing admits them; each
/// solve clones the problem and hands it to HiGHS.
#[derive(Debug, Clone)]
pub struct MasterProblem {
    problem: ColProblem,
    assignment_rows: Vec<Row>,
    coverage_rows: Vec<Row>,
    costs: Vec<f64>,
    n_teams: usize,
    n_slots: usize,
}

impl MasterProblem {
    pub fn new(n_teams: usize, n_slots: usize) -> Self {
        let mut problem = ColProblem::default();
        let assignment_rows = (0..n_teams).map(|_| problem.add_row(1.0..=1.0)).collect();
        let coverage_rows = (0..n_teams * n_slots)
            .map(|_| problem.add_row(1.0..=1.0))
            .collect();
        Self {
            problem,
            assignment_rows,
            coverage_rows,
            costs: Vec::new(),
            n_teams,
            n_slots,
        }
    }

    #[inline]
    pub fn n_columns(&self) -> usize {
        self.costs.len()
    }

    /// Appends a pattern column. The column enters its owner's assignment
    /// row and, for every away game, the coverage rows of both the owner
    /// and the visited host.
    pub fn add_column(&mut self, column: &Column) {
        let owner = column.owner();
        let mut factors = Vec::with_capacity(1 + 2 * self.n_teams);
        factors.push((self.assignment_rows[owner.index()], 1.0));
        for (slot, host) in column.pattern().away_games() {
            factors.push((self.coverage_rows[owner.index() * self.n_slots + slot], 1.0));
            factors.push((self.coverage_rows[host.index() * self.n_slots + slot], 1.0));
        }
        self.problem.add_column(column.cost(), 0.0.., factors);
        self.costs.push(column.cost());
    }

    pub fn solve(&self, budget: &Budget) -> Result<MasterSolve, MasterError> {
        let mut model = self.problem.clone().optimise(Sense::Minimise);
        model.set_option("output_flag", false);
        model.set_option("time_limit", budget.remaining_secs());
        let solved = model.solve();
        match solved.status() {
            HighsModelStatus::Optimal => {
                let solution = solved.get_solution();
                let primal = solution.columns().to_vec();
                let objective: f64 = primal
                    .iter()
                    .zip(&self.costs)
                    .map(|(x, c)| x * c)
                    .sum();
                let dual_rows = solution.dual_rows();
                let duals = DualPrices::new(
                    dual_rows[..self.n_teams].to_vec(),
                    dual_rows[self.n_teams..].to_vec(),
                    self.n_slots,
                );
                trace!(objective, columns = self.costs.len(), "master optimal");
                Ok(MasterSolve::Optimal {
                    objective,
                    primal,
                    duals,
                })
            }
            HighsModelStatus::Infeasible => Ok(MasterSolve::Infeasible),
            HighsModelStatus::ReachedTimeLimit => Ok(MasterSolve::Interrupted),
            status => Err(UnexpectedStatusError::new(status).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use ttp_model::prelude::{Pattern, RunLengthBounds, TeamIdentifier};

    fn column(owner: u32, vs: &[u32], cost: f64) -> Column {
        let pattern = Pattern::new(
            TeamIdentifier::new(owner),
            vs.iter().copied().map(TeamIdentifier::new).collect(),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap();
        Column::new(pattern, cost)
    }

    // Patterns of a consistent N = 4 double round robin; together they
    // satisfy every assignment and coverage row exactly once.
    fn partition_columns() -> Vec<Column> {
        vec![
            column(0, &[0, 1, 0, 3, 0, 2], 10.0),
            column(1, &[0, 1, 2, 1, 1, 3], 11.0),
            column(2, &[2, 3, 2, 1, 0, 2], 12.0),
            column(3, &[2, 3, 0, 3, 1, 3], 13.0),
        ]
    }

    #[test]
    fn empty_master_is_infeasible() {
        let master = MasterProblem::new(4, 6);
        let budget = Budget::new(Duration::from_secs(10));
        assert_eq!(master.solve(&budget).unwrap(), MasterSolve::Infeasible);
    }

    #[test]
    fn partition_of_columns_is_optimal_with_full_duals() {
        let mut master = MasterProblem::new(4, 6);
        for c in partition_columns() {
            master.add_column(&c);
        }
        let budget = Budget::new(Duration::from_secs(10));
        match master.solve(&budget).unwrap() {
            MasterSolve::Optimal {
                objective,
                primal,
                duals,
            } => {
                assert!((objective - 46.0).abs() < 1e-6);
                assert_eq!(primal.len(), 4);
                for x in &primal {
                    assert!((x - 1.0).abs() < 1e-6);
                }
                // Duals must price the selected columns to zero reduced cost.
                for c in partition_columns() {
                    let rc = duals.reduced_cost(c.pattern(), c.cost());
                    assert!(rc.abs() < 1e-6, "reduced cost {} for {}", rc, c.pattern());
                }
            }
            other => panic!("expected optimal, got {:?}", other),
        }
    }
}
