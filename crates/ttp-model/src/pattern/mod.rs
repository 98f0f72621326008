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

pub mod err;

use crate::common::{DistanceScalar, TeamIdentifier};
use crate::pattern::err::PatternError;
use crate::problem::bounds::RunLengthBounds;
use crate::problem::matrix::DistanceMatrix;

/// Injective canonical encoding of a pattern's venue sequence: the away
/// entry of slot `s` contributes `(opponent + 1) * (N + 1)^s`, home slots
/// contribute nothing. Collision-free for the `N + 1` symbol alphabet and
/// decodable back into the away placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternHash(u128);

impl PatternHash {
    pub fn encode(
        owner: TeamIdentifier,
        venues: &[TeamIdentifier],
        n_teams: usize,
    ) -> Option<Self> {
        let radix = n_teams as u128 + 1;
        let mut hash: u128 = 0;
        let mut place: u128 = 1;
        for (slot, &venue) in venues.iter().enumerate() {
            if venue != owner {
                let digit = venue.value() as u128 + 1;
                hash = hash.checked_add(digit.checked_mul(place)?)?;
            }
            if slot + 1 < venues.len() {
                place = place.checked_mul(radix)?;
            }
        }
        Some(Self(hash))
    }

    /// Away placement per slot: `Some(opponent)` for an away slot, `None`
    /// for a home slot. Inverse of [`PatternHash::encode`].
    pub fn decode(self, n_teams: usize, n_slots: usize) -> Vec<Option<TeamIdentifier>> {
        let radix = n_teams as u128 + 1;
        let mut rest = self.0;
        let mut slots = Vec::with_capacity(n_slots);
        for _ in 0..n_slots {
            let digit = rest % radix;
            rest /= radix;
            slots.push(if digit == 0 {
                None
            } else {
                Some(TeamIdentifier::new(digit as u32 - 1))
            });
        }
        slots
    }

    #[inline]
    pub const fn value(self) -> u128 {
        self.0
    }
}

/// One team's side of the double round robin: a venue per slot, the owner's
/// own identifier marking a home game. Validated on construction, immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    owner: TeamIdentifier,
    venues: Vec<TeamIdentifier>,
    hash: PatternHash,
}

impl Pattern {
    pub fn new(
        owner: TeamIdentifier,
        venues: Vec<TeamIdentifier>,
        n_teams: usize,
        bounds: RunLengthBounds,
    ) -> Result<Self, PatternError> {
        let n_slots = 2 * n_teams - 2;
        if venues.len() != n_slots {
            return Err(PatternError::WrongLength {
                expected: n_slots,
                found: venues.len(),
            });
        }

        let mut counts = vec![0usize; n_teams];
        for (slot, &venue) in venues.iter().enumerate() {
            if venue.index() >= n_teams {
                return Err(PatternError::VenueOutOfRange { slot, venue });
            }
            counts[venue.index()] += 1;
        }
        if counts[owner.index()] != n_teams - 1 {
            return Err(PatternError::OwnerCountMismatch {
                expected: n_teams - 1,
                found: counts[owner.index()],
            });
        }
        for (i, &count) in counts.iter().enumerate() {
            if i != owner.index() && count != 1 {
                return Err(PatternError::OpponentMultiplicity {
                    opponent: TeamIdentifier::from_index(i),
                    count,
                });
            }
        }

        check_windows(owner, &venues, bounds)?;

        let hash =
            PatternHash::encode(owner, &venues, n_teams).ok_or(PatternError::Unencodable)?;
        Ok(Self {
            owner,
            venues,
            hash,
        })
    }

    #[inline]
    pub fn owner(&self) -> TeamIdentifier {
        self.owner
    }

    #[inline]
    pub fn venues(&self) -> &[TeamIdentifier] {
        &self.venues
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    #[inline]
    pub fn is_home(&self, slot: usize) -> bool {
        self.venues[slot] == self.owner
    }

    /// `(slot, opponent)` for every away game, in slot order.
    #[inline]
    pub fn away_games(&self) -> impl Iterator<Item = (usize, TeamIdentifier)> + '_ {
        self.venues
            .iter()
            .enumerate()
            .filter(move |&(_, &v)| v != self.owner)
            .map(|(s, &v)| (s, v))
    }

    #[inline]
    pub fn canonical_hash(&self) -> PatternHash {
        self.hash
    }

    /// Travel cost of the round trip: from the owner's venue through the
    /// venue sequence and back home. Home slots sit at the owner's venue,
    /// so consecutive home games cost nothing.
    pub fn cost<T: DistanceScalar>(&self, matrix: &DistanceMatrix<T>) -> Option<T> {
        let first = *self.venues.first()?;
        let mut total = matrix.distance(self.owner, first);
        for pair in self.venues.windows(2) {
            total = total.checked_add(&matrix.distance(pair[0], pair[1]))?;
        }
        let last = *self.venues.last()?;
        total.checked_add(&matrix.distance(last, self.owner))
    }

    #[inline]
    pub fn cost_f64<T: DistanceScalar>(&self, matrix: &DistanceMatrix<T>) -> Option<f64> {
        self.cost(matrix)?.to_f64()
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: [", self.owner)?;
        for (i, v) in self.venues.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if *v == self.owner {
                write!(f, "H")?;
            } else {
                write!(f, "@{}", v.value())?;
            }
        }
        write!(f, "]")
    }
}

/// Both home and away counts of every window of `U + 1` consecutive slots
/// must lie in `[L, U]`.
fn check_windows(
    owner: TeamIdentifier,
    venues: &[TeamIdentifier],
    bounds: RunLengthBounds,
) -> Result<(), PatternError> {
    let window = bounds.window();
    if venues.len() < window {
        return Ok(());
    }
    let mut homes = venues[..window].iter().filter(|&&v| v == owner).count();
    let mut start = 0;
    loop {
        let aways = window - homes;
        if homes < bounds.lower()
            || homes > bounds.upper()
            || aways < bounds.lower()
            || aways > bounds.upper()
        {
            return Err(PatternError::WindowViolation { start, homes });
        }
        if start + window == venues.len() {
            return Ok(());
        }
        if venues[start] == owner {
            homes -= 1;
        }
        if venues[start + window] == owner {
            homes += 1;
        }
        start += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(i: u32) -> TeamIdentifier {
        TeamIdentifier::new(i)
    }

    fn venues(ids: &[u32]) -> Vec<TeamIdentifier> {
        ids.iter().copied().map(TeamIdentifier::new).collect()
    }

    fn grid4() -> DistanceMatrix<i64> {
        DistanceMatrix::new(vec![
            vec![0, 1, 2, 3],
            vec![1, 0, 1, 2],
            vec![2, 1, 0, 1],
            vec![3, 2, 1, 0],
        ])
        .unwrap()
    }

    #[test]
    fn accepts_alternating_pattern_and_counts_opponents_once() {
        let p = Pattern::new(
            team(0),
            venues(&[1, 0, 2, 0, 3, 0]),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap();
        assert_eq!(p.len(), 6);
        assert_eq!(p.away_games().count(), 3);
        let opponents: Vec<u32> = p.away_games().map(|(_, o)| o.value()).collect();
        assert_eq!(opponents, vec![1, 2, 3]);
        assert!(p.is_home(1) && p.is_home(3) && p.is_home(5));
    }

    #[test]
    fn rejects_repeated_opponent() {
        let err = Pattern::new(
            team(0),
            venues(&[1, 0, 1, 0, 3, 0]),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap_err();
        assert!(matches!(err, PatternError::OpponentMultiplicity { .. }));
    }

    #[test]
    fn rejects_wrong_home_count() {
        let err = Pattern::new(
            team(0),
            venues(&[1, 2, 3, 1, 2, 3]),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap_err();
        // Six away venues, zero home slots.
        assert!(matches!(err, PatternError::OwnerCountMismatch { .. }));
    }

    #[test]
    fn rejects_run_longer_than_upper_bound() {
        // Four consecutive away games with U = 3.
        let err = Pattern::new(
            team(0),
            venues(&[1, 2, 3, 0, 0, 0]),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PatternError::WindowViolation { start: 0, homes: 0 }
        ));
    }

    #[test]
    fn window_lower_bound_above_one_is_enforced() {
        // With L = 2, U = 3 every window of four slots needs at least two
        // homes and two aways. N = 6 gives ten slots; the final window
        // [0, 0, 5, 0] holds three homes and only one away game.
        let err = Pattern::new(
            team(0),
            venues(&[1, 2, 0, 0, 3, 4, 0, 0, 5, 0]),
            6,
            RunLengthBounds::new(2, 3),
        )
        .unwrap_err();
        assert!(matches!(err, PatternError::WindowViolation { .. }));

        // Paired home/away blocks satisfy L = 2 in every window.
        Pattern::new(
            team(0),
            venues(&[1, 2, 0, 0, 3, 4, 0, 0, 5, 6, 0, 0]),
            7,
            RunLengthBounds::new(2, 3),
        )
        .unwrap();
    }

    #[test]
    fn cost_is_the_full_round_trip() {
        let m = grid4();
        let p = Pattern::new(
            team(0),
            venues(&[1, 0, 2, 0, 3, 0]),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap();
        // 0->1, 1->0, 0->2, 2->0, 0->3, 3->0, 0->0
        assert_eq!(p.cost(&m), Some(1 + 1 + 2 + 2 + 3 + 3));
    }

    #[test]
    fn trip_chaining_avoids_return_legs() {
        let m = grid4();
        let p = Pattern::new(
            team(0),
            venues(&[0, 1, 2, 3, 0, 0]),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap();
        // 0->0, 0->1, 1->2, 2->3, 3->0, 0->0, 0->0
        assert_eq!(p.cost(&m), Some(1 + 1 + 1 + 3));
    }

    #[test]
    fn hash_round_trips_to_away_placement() {
        let p = Pattern::new(
            team(2),
            venues(&[0, 2, 1, 2, 3, 2]),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap();
        let decoded = p.canonical_hash().decode(4, 6);
        for (slot, placement) in decoded.iter().enumerate() {
            match placement {
                Some(opp) => assert_eq!(*opp, p.venues()[slot]),
                None => assert!(p.is_home(slot)),
            }
        }
    }

    #[test]
    fn hashes_are_distinct_for_distinct_patterns() {
        let a = Pattern::new(
            team(0),
            venues(&[1, 0, 2, 0, 3, 0]),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap();
        let b = Pattern::new(
            team(0),
            venues(&[1, 0, 3, 0, 2, 0]),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap();
        let c = Pattern::new(
            team(0),
            venues(&[0, 1, 2, 3, 0, 0]),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap();
        assert_ne!(a.canonical_hash(), b.canonical_hash());
        assert_ne!(a.canonical_hash(), c.canonical_hash());
        assert_ne!(b.canonical_hash(), c.canonical_hash());
    }
}
