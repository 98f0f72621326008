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

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use tracing::trace;

use crate::budget::Budget;
use crate::duals::DualPrices;
use crate::err::PricingError;
use crate::pricing::{PatternMemo, PricingOutcome, PricingStrategy};
use ttp_model::common::DistanceScalar;
use ttp_model::prelude::{Instance, Pattern, PatternHash, RunLengthBounds, TeamIdentifier};

const NODE_CHECK_MASK: u64 = 0xFFF;

/// Depth-first branch and bound over one team's venue sequences.
///
/// Slots are assigned left to right; each node either stays home or visits
/// an opponent not yet visited. Completed run-length windows are checked
/// incrementally, and nodes are pruned against the incumbent with an
/// optimistic bound that assumes free future travel and the best possible
/// dual earnings per remaining slot.
#[derive(Debug)]
pub struct SearchPricing {
    n_teams: usize,
    n_slots: usize,
    bounds: RunLengthBounds,
    dist: Vec<Vec<f64>>,
    memo: PatternMemo,
    rng: ChaCha8Rng,
}

impl SearchPricing {
    pub fn new<T: DistanceScalar>(instance: &Instance<T>, rng_seed: u64) -> Self {
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
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
        }
    }

    fn build_pattern(&self, owner: TeamIdentifier, venues: &[TeamIdentifier]) -> Result<Pattern, PricingError> {
        Ok(Pattern::new(
            owner,
            venues.to_vec(),
            self.n_teams,
            self.bounds,
        )?)
    }
}

impl PricingStrategy for SearchPricing {
    fn name(&self) -> &'static str {
        "constraint-search"
    }

    fn price(
        &mut self,
        team: TeamIdentifier,
        duals: &DualPrices,
        budget: &Budget,
    ) -> Result<PricingOutcome, PricingError> {
        let mut dfs = Dfs::new(
            team,
            self.n_teams,
            self.n_slots,
            self.bounds,
            &self.dist,
            Some(duals),
            self.memo.excluded(team),
            budget,
            None,
        );
        dfs.value = -duals.assignment(team);
        dfs.run();
        trace!(
            team = team.value(),
            nodes = dfs.nodes,
            found = dfs.best.is_some(),
            "priced team"
        );
        if let Some((reduced_cost, venues)) = dfs.best {
            let pattern = self.build_pattern(team, &venues)?;
            return Ok(PricingOutcome::Feasible {
                pattern,
                reduced_cost,
            });
        }
        if dfs.interrupted {
            Ok(PricingOutcome::Interrupted)
        } else if dfs.saw_excluded {
            Ok(PricingOutcome::Exhausted)
        } else {
            Ok(PricingOutcome::Infeasible)
        }
    }

    fn seed(
        &mut self,
        team: TeamIdentifier,
        budget: &Budget,
    ) -> Result<Option<Pattern>, PricingError> {
        let mut dfs = Dfs::new(
            team,
            self.n_teams,
            self.n_slots,
            self.bounds,
            &self.dist,
            None,
            self.memo.excluded(team),
            budget,
            Some(&mut self.rng),
        );
        dfs.run();
        match dfs.best {
            Some((_, venues)) => {
                let pattern = self.build_pattern(team, &venues)?;
                self.memo.insert(team, pattern.canonical_hash());
                Ok(Some(pattern))
            }
            None => Ok(None),
        }
    }

    fn exclude(&mut self, team: TeamIdentifier, hash: PatternHash) {
        self.memo.insert(team, hash);
    }
}

struct Dfs<'a> {
    owner: TeamIdentifier,
    n_teams: usize,
    n_slots: usize,
    lower: usize,
    upper: usize,
    window: usize,
    dist: &'a [Vec<f64>],
    duals: Option<&'a DualPrices>,
    excluded: &'a HashSet<PatternHash>,
    budget: &'a Budget,
    rng: Option<&'a mut ChaCha8Rng>,

    venues: Vec<TeamIdentifier>,
    unvisited: Vec<bool>,
    homes_left: usize,
    value: f64,
    best: Option<(f64, Vec<TeamIdentifier>)>,
    first_only: bool,
    saw_excluded: bool,
    interrupted: bool,
    nodes: u64,
}

impl<'a> Dfs<'a> {
    #[allow(clippy::too_many_arguments)]
    fn new(
        owner: TeamIdentifier,
        n_teams: usize,
        n_slots: usize,
        bounds: RunLengthBounds,
        dist: &'a [Vec<f64>],
        duals: Option<&'a DualPrices>,
        excluded: &'a HashSet<PatternHash>,
        budget: &'a Budget,
        rng: Option<&'a mut ChaCha8Rng>,
    ) -> Self {
        let mut unvisited = vec![true; n_teams];
        unvisited[owner.index()] = false;
        let first_only = duals.is_none();
        Self {
            owner,
            n_teams,
            n_slots,
            lower: bounds.lower(),
            upper: bounds.upper(),
            window: bounds.window(),
            dist,
            duals,
            excluded,
            budget,
            rng,
            venues: Vec::with_capacity(n_slots),
            unvisited,
            homes_left: n_teams - 1,
            value: 0.0,
            best: None,
            first_only,
            saw_excluded: false,
            interrupted: false,
            nodes: 0,
        }
    }

    fn run(&mut self) {
        self.descend();
    }

    #[inline]
    fn gain(&self, slot: usize, host: TeamIdentifier) -> f64 {
        match self.duals {
            Some(d) => d.coverage(self.owner, slot) + d.coverage(host, slot),
            None => 0.0,
        }
    }

    /// Optimistic completion bound from `slot` on: travel is free and every
    /// remaining slot earns the best dual gain any unvisited host offers.
    fn completion_bound(&self, slot: usize) -> f64 {
        let Some(duals) = self.duals else {
            return self.value;
        };
        let mut bound = self.value;
        for s in slot..self.n_slots {
            let mut best_gain: f64 = 0.0;
            for (i, &open) in self.unvisited.iter().enumerate() {
                if open {
                    let host = TeamIdentifier::from_index(i);
                    let g = duals.coverage(self.owner, s) + duals.coverage(host, s);
                    best_gain = best_gain.max(g);
                }
            }
            bound -= best_gain;
        }
        bound
    }

    fn window_ok(&self, last_slot: usize) -> bool {
        if last_slot + 1 < self.window {
            return true;
        }
        let start = last_slot + 1 - self.window;
        let homes = self.venues[start..=last_slot]
            .iter()
            .filter(|&&v| v == self.owner)
            .count();
        let aways = self.window - homes;
        homes >= self.lower && homes <= self.upper && aways >= self.lower && aways <= self.upper
    }

    fn descend(&mut self) {
        self.nodes += 1;
        if self.nodes & NODE_CHECK_MASK == 0 && self.budget.is_exhausted() {
            self.interrupted = true;
        }
        if self.interrupted || (self.first_only && self.best.is_some()) {
            return;
        }

        let slot = self.venues.len();
        if slot == self.n_slots {
            self.close_leaf();
            return;
        }

        if let Some((incumbent, _)) = &self.best {
            if self.completion_bound(slot) >= *incumbent {
                return;
            }
        }

        let mut candidates: Vec<TeamIdentifier> = Vec::with_capacity(self.n_teams);
        if self.homes_left > 0 {
            candidates.push(self.owner);
        }
        for (i, &open) in self.unvisited.iter().enumerate() {
            if open {
                candidates.push(TeamIdentifier::from_index(i));
            }
        }
        if let Some(rng) = self.rng.as_deref_mut() {
            candidates.shuffle(rng);
        }

        let previous = if slot == 0 {
            self.owner
        } else {
            self.venues[slot - 1]
        };
        for venue in candidates {
            let at_home = venue == self.owner;
            let step = self.dist[previous.index()][venue.index()]
                - if at_home { 0.0 } else { self.gain(slot, venue) };

            self.venues.push(venue);
            if at_home {
                self.homes_left -= 1;
            } else {
                self.unvisited[venue.index()] = false;
            }
            self.value += step;

            if self.window_ok(slot) {
                self.descend();
            }

            self.value -= step;
            if at_home {
                self.homes_left += 1;
            } else {
                self.unvisited[venue.index()] = true;
            }
            self.venues.pop();

            if self.interrupted || (self.first_only && self.best.is_some()) {
                return;
            }
        }
    }

    fn close_leaf(&mut self) {
        let Some(hash) = PatternHash::encode(self.owner, &self.venues, self.n_teams) else {
            return;
        };
        if self.excluded.contains(&hash) {
            self.saw_excluded = true;
            return;
        }
        let last = self.venues[self.n_slots - 1];
        let total = self.value + self.dist[last.index()][self.owner.index()];
        let improves = match &self.best {
            Some((incumbent, _)) => total < *incumbent,
            None => true,
        };
        if improves {
            self.best = Some((total, self.venues.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use ttp_model::prelude::DistanceMatrix;

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

    /// All feasible patterns of a team, by brute force over venue sequences.
    fn all_patterns(instance: &Instance<i64>, owner: TeamIdentifier) -> Vec<Pattern> {
        let n = instance.n_teams();
        let slots = instance.n_slots();
        let mut out = Vec::new();
        let mut current = vec![0u32; slots];
        fn rec(
            current: &mut Vec<u32>,
            slot: usize,
            n: usize,
            instance: &Instance<i64>,
            owner: TeamIdentifier,
            out: &mut Vec<Pattern>,
        ) {
            if slot == current.len() {
                if let Ok(p) = Pattern::new(
                    owner,
                    current.iter().copied().map(TeamIdentifier::new).collect(),
                    n,
                    instance.bounds(),
                ) {
                    out.push(p);
                }
                return;
            }
            for v in 0..n as u32 {
                current[slot] = v;
                rec(current, slot + 1, n, instance, owner, out);
            }
        }
        rec(&mut current, 0, n, instance, owner, &mut out);
        out
    }

    #[test]
    fn price_matches_exhaustive_minimum_under_zero_duals() {
        let instance = instance4();
        let team = TeamIdentifier::new(0);
        let duals = DualPrices::zero(4, 6);
        let budget = Budget::new(Duration::from_secs(30));
        let mut pricing = SearchPricing::new(&instance, 7);

        let best_cost = all_patterns(&instance, team)
            .iter()
            .map(|p| p.cost_f64(instance.matrix()).unwrap())
            .fold(f64::INFINITY, f64::min);

        match pricing.price(team, &duals, &budget).unwrap() {
            PricingOutcome::Feasible {
                pattern,
                reduced_cost,
            } => {
                assert!((reduced_cost - best_cost).abs() < 1e-9);
                assert!(
                    (pattern.cost_f64(instance.matrix()).unwrap() - best_cost).abs() < 1e-9
                );
            }
            other => panic!("expected a pattern, got {:?}", other),
        }
    }

    #[test]
    fn price_honors_coverage_duals() {
        let instance = instance4();
        let team = TeamIdentifier::new(0);
        let budget = Budget::new(Duration::from_secs(30));
        let mut pricing = SearchPricing::new(&instance, 7);

        let mut assignment = vec![0.0; 4];
        assignment[0] = 2.5;
        let mut coverage = vec![0.0; 24];
        coverage[1 * 6 + 2] = 4.0; // visiting team 1 in slot 2 is rewarded
        let duals = DualPrices::new(assignment, coverage, 6);

        let expected = all_patterns(&instance, team)
            .iter()
            .map(|p| duals.reduced_cost(p, p.cost_f64(instance.matrix()).unwrap()))
            .fold(f64::INFINITY, f64::min);

        match pricing.price(team, &duals, &budget).unwrap() {
            PricingOutcome::Feasible { reduced_cost, .. } => {
                assert!((reduced_cost - expected).abs() < 1e-9);
            }
            other => panic!("expected a pattern, got {:?}", other),
        }
    }

    #[test]
    fn seeds_are_distinct_until_the_space_is_exhausted() {
        let instance = instance4();
        let team = TeamIdentifier::new(1);
        let budget = Budget::new(Duration::from_secs(30));
        let mut pricing = SearchPricing::new(&instance, 11);

        let universe = all_patterns(&instance, team).len();
        let mut seen = std::collections::HashSet::new();
        while let Some(p) = pricing.seed(team, &budget).unwrap() {
            assert!(seen.insert(p.canonical_hash()), "seed repeated: {}", p);
        }
        assert_eq!(seen.len(), universe);
        // Once exhausted, pricing reports it rather than inventing columns.
        let duals = DualPrices::zero(4, 6);
        assert_eq!(
            pricing.price(team, &duals, &budget).unwrap(),
            PricingOutcome::Exhausted
        );
    }

    #[test]
    fn excluded_patterns_are_skipped() {
        let instance = instance4();
        let team = TeamIdentifier::new(0);
        let duals = DualPrices::zero(4, 6);
        let budget = Budget::new(Duration::from_secs(30));
        let mut pricing = SearchPricing::new(&instance, 3);

        let (first, rc_first) = match pricing.price(team, &duals, &budget).unwrap() {
            PricingOutcome::Feasible {
                pattern,
                reduced_cost,
            } => (pattern, reduced_cost),
            other => panic!("expected a pattern, got {:?}", other),
        };
        pricing.exclude(team, first.canonical_hash());
        match pricing.price(team, &duals, &budget).unwrap() {
            PricingOutcome::Feasible {
                pattern,
                reduced_cost,
            } => {
                assert_ne!(pattern.canonical_hash(), first.canonical_hash());
                assert!(reduced_cost >= rc_first - 1e-9);
            }
            other => panic!("expected a pattern, got {:?}", other),
        }
    }
}
