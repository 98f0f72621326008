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

use ttp_model::prelude::{Pattern, TeamIdentifier};

/// Dual prices of the restricted master: one per assignment row, one per
/// `(team, slot)` coverage row.
#[derive(Debug, Clone, PartialEq)]
pub struct DualPrices {
    assignment: Vec<f64>,
    coverage: Vec<f64>,
    n_slots: usize,
}

impl DualPrices {
    pub fn new(assignment: Vec<f64>, coverage: Vec<f64>, n_slots: usize) -> Self {
        debug_assert_eq!(coverage.len(), assignment.len() * n_slots);
        Self {
            assignment,
            coverage,
            n_slots,
        }
    }

    /// All-zero prices, under which the reduced cost of a pattern is its
    /// plain travel cost.
    pub fn zero(n_teams: usize, n_slots: usize) -> Self {
        Self::new(vec![0.0; n_teams], vec![0.0; n_teams * n_slots], n_slots)
    }

    #[inline]
    pub fn assignment(&self, team: TeamIdentifier) -> f64 {
        self.assignment[team.index()]
    }

    #[inline]
    pub fn coverage(&self, team: TeamIdentifier, slot: usize) -> f64 {
        self.coverage[team.index() * self.n_slots + slot]
    }

    /// Reduced cost of a pattern with the given travel cost. An away game
    /// in slot `s` covers the slot for the owner and for the visited host,
    /// so it earns both coverage duals; home slots earn nothing because the
    /// visitor's column covers them.
    pub fn reduced_cost(&self, pattern: &Pattern, cost: f64) -> f64 {
        let mut rc = cost - self.assignment(pattern.owner());
        for (slot, host) in pattern.away_games() {
            rc -= self.coverage(pattern.owner(), slot);
            rc -= self.coverage(host, slot);
        }
        rc
    }
}
