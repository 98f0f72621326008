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

use ttp_model::prelude::{Pattern, RunLengthBounds, TeamIdentifier};

/// Produces a complete, mutually consistent set of patterns to prime the
/// column pool. A seeded master is feasible from the first solve, which
/// spares the loop its infeasibility recovery rounds.
pub trait FullScheduleSeeder: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// One pattern per team, or `None` when no template fits the bounds.
    fn build(&self, n_teams: usize, bounds: RunLengthBounds) -> Option<Vec<Pattern>>;
}

/// Circle-method single round robin, mirrored with flipped venues for the
/// second half. The template only fits relaxed bounds (it produces short
/// venue runs); when a pattern fails validation the seeder steps aside and
/// the per-team oracles take over.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirroredRoundRobinSeeder;

impl MirroredRoundRobinSeeder {
    pub fn new() -> Self {
        Self
    }
}

impl FullScheduleSeeder for MirroredRoundRobinSeeder {
    fn name(&self) -> &'static str {
        "mirrored-round-robin"
    }

    fn build(&self, n_teams: usize, bounds: RunLengthBounds) -> Option<Vec<Pattern>> {
        if n_teams < 2 || n_teams % 2 != 0 {
            return None;
        }
        let half = n_teams - 1;
        let n_slots = 2 * half;
        let mut venues = vec![vec![0u32; n_slots]; n_teams];

        // First half: fix the last team, rotate the rest. Hosts alternate
        // with the round index so that runs stay short.
        for r in 0..half {
            let mut pairs = vec![(n_teams - 1, r)];
            for i in 1..n_teams / 2 {
                pairs.push(((r + i) % half, (r + half - i) % half));
            }
            for (k, &(a, b)) in pairs.iter().enumerate() {
                // The fixed pair alternates with the round, the rotating
                // pairs with their rotation offset; both keep venue runs
                // short enough for the classic bounds.
                let flip = if k == 0 { r % 2 != 0 } else { k % 2 != 0 };
                let (home, away) = if flip { (b, a) } else { (a, b) };
                venues[home][r] = home as u32;
                venues[away][r] = home as u32;
                // Mirrored return game with venues swapped.
                venues[home][half + r] = away as u32;
                venues[away][half + r] = away as u32;
            }
        }

        let mut patterns = Vec::with_capacity(n_teams);
        for (t, vs) in venues.into_iter().enumerate() {
            let pattern = Pattern::new(
                TeamIdentifier::from_index(t),
                vs.into_iter().map(TeamIdentifier::new).collect(),
                n_teams,
                bounds,
            )
            .ok()?;
            patterns.push(pattern);
        }
        Some(patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttp_model::prelude::Schedule;
    use ttp_model::validation::ScheduleValidator;

    #[test]
    fn mirrored_template_is_a_valid_schedule() {
        for n in [4usize, 6, 8] {
            let bounds = RunLengthBounds::new(1, 3);
            let patterns = MirroredRoundRobinSeeder::new()
                .build(n, bounds)
                .unwrap_or_else(|| panic!("no template for {} teams", n));
            let schedule = Schedule::from_patterns(patterns);
            ScheduleValidator::validate(&schedule, n, 2 * n - 2).unwrap();
        }
    }

    #[test]
    fn template_steps_aside_when_bounds_are_tight() {
        // The mirror seam produces windows with a single away game, which
        // L = 2 forbids.
        assert!(
            MirroredRoundRobinSeeder::new()
                .build(6, RunLengthBounds::new(2, 3))
                .is_none()
        );
    }

    #[test]
    fn odd_team_counts_have_no_template() {
        assert!(
            MirroredRoundRobinSeeder::new()
                .build(5, RunLengthBounds::new(1, 3))
                .is_none()
        );
    }
}
