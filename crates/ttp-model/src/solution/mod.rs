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

use crate::common::{DistanceScalar, TeamIdentifier};
use crate::pattern::Pattern;
use crate::problem::matrix::DistanceMatrix;

/// A complete schedule: one pattern per team, indexed by owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    patterns: Vec<Pattern>,
}

impl Schedule {
    /// Builds a schedule from patterns in arbitrary order. The caller is
    /// expected to run [`crate::validation::ScheduleValidator`] for the
    /// cross-pattern invariants; this only sorts by owner.
    pub fn from_patterns(mut patterns: Vec<Pattern>) -> Self {
        patterns.sort_by_key(|p| p.owner());
        Self { patterns }
    }

    #[inline]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[inline]
    pub fn pattern_of(&self, team: TeamIdentifier) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.owner() == team)
    }

    /// Total travel distance over all teams. `None` on overflow.
    pub fn objective<T: DistanceScalar>(&self, matrix: &DistanceMatrix<T>) -> Option<T> {
        let mut total = T::zero();
        for p in &self.patterns {
            total = total.checked_add(&p.cost(matrix)?)?;
        }
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::bounds::RunLengthBounds;

    fn grid4() -> DistanceMatrix<i64> {
        DistanceMatrix::new(vec![
            vec![0, 1, 2, 3],
            vec![1, 0, 1, 2],
            vec![2, 1, 0, 1],
            vec![3, 2, 1, 0],
        ])
        .unwrap()
    }

    fn pat(owner: u32, vs: &[u32]) -> Pattern {
        Pattern::new(
            TeamIdentifier::new(owner),
            vs.iter().copied().map(TeamIdentifier::new).collect(),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap()
    }

    #[test]
    fn objective_sums_pattern_costs() {
        let m = grid4();
        let a = pat(0, &[1, 0, 2, 0, 3, 0]);
        let b = pat(1, &[0, 1, 3, 1, 2, 1]);
        let expected = a.cost(&m).unwrap() + b.cost(&m).unwrap();
        let s = Schedule::from_patterns(vec![b, a]);
        assert_eq!(s.objective(&m), Some(expected));
        assert_eq!(s.patterns()[0].owner(), TeamIdentifier::new(0));
    }
}
