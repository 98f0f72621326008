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

pub mod milp;
pub mod search;

use std::collections::HashSet;

use crate::budget::Budget;
use crate::duals::DualPrices;
use crate::err::PricingError;
use ttp_model::prelude::{Pattern, PatternHash, TeamIdentifier};

/// Result of pricing one team under the current duals.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingOutcome {
    /// The cheapest pattern not yet excluded, whether or not its reduced
    /// cost clears the admission tolerance. The caller decides.
    Feasible {
        pattern: Pattern,
        reduced_cost: f64,
    },
    /// Every feasible pattern of the team has already been excluded.
    Exhausted,
    /// The team has no feasible pattern at all.
    Infeasible,
    /// The budget ran out mid-search; the answer is unknown.
    Interrupted,
}

/// A pricing oracle for the column-generation loop.
///
/// The oracle keeps a per-team exclusion memo of canonical hashes. Seeds it
/// hands out are excluded immediately; priced columns are excluded by the
/// caller once admitted to the pool, so that a non-improving answer can be
/// re-found when the duals move.
pub trait PricingStrategy {
    fn name(&self) -> &'static str;

    /// Minimum-reduced-cost pattern for `team` under `duals`, skipping the
    /// excluded ones.
    fn price(
        &mut self,
        team: TeamIdentifier,
        duals: &DualPrices,
        budget: &Budget,
    ) -> Result<PricingOutcome, PricingError>;

    /// Any feasible, not-yet-excluded pattern for `team`, independent of
    /// duals. `None` once the team's pattern space is exhausted.
    fn seed(
        &mut self,
        team: TeamIdentifier,
        budget: &Budget,
    ) -> Result<Option<Pattern>, PricingError>;

    fn exclude(&mut self, team: TeamIdentifier, hash: PatternHash);
}

/// Per-team sets of canonical hashes already handed to the master.
#[derive(Debug, Clone)]
pub struct PatternMemo {
    sets: Vec<HashSet<PatternHash>>,
}

impl PatternMemo {
    pub fn new(n_teams: usize) -> Self {
        Self {
            sets: vec![HashSet::new(); n_teams],
        }
    }

    /// Returns `false` if the hash was already present.
    #[inline]
    pub fn insert(&mut self, team: TeamIdentifier, hash: PatternHash) -> bool {
        self.sets[team.index()].insert(hash)
    }

    #[inline]
    pub fn contains(&self, team: TeamIdentifier, hash: PatternHash) -> bool {
        self.sets[team.index()].contains(&hash)
    }

    #[inline]
    pub fn excluded(&self, team: TeamIdentifier) -> &HashSet<PatternHash> {
        &self.sets[team.index()]
    }

    #[inline]
    pub fn len(&self, team: TeamIdentifier) -> usize {
        self.sets[team.index()].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttp_model::prelude::RunLengthBounds;

    #[test]
    fn memo_tracks_hashes_per_team() {
        let mut memo = PatternMemo::new(4);
        let t0 = TeamIdentifier::new(0);
        let t1 = TeamIdentifier::new(1);
        let p = Pattern::new(
            t0,
            [1, 0, 2, 0, 3, 0]
                .iter()
                .map(|&v| TeamIdentifier::new(v))
                .collect(),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap();
        let h = p.canonical_hash();
        assert!(memo.insert(t0, h));
        assert!(!memo.insert(t0, h));
        assert!(memo.contains(t0, h));
        assert!(!memo.contains(t1, h));
        assert_eq!(memo.len(t0), 1);
    }
}
