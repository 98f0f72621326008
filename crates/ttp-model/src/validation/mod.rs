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

use crate::common::TeamIdentifier;
use crate::solution::Schedule;
use crate::validation::err::{
    DuplicateOwnerError, MirrorViolationError, MissingPatternError, ScheduleValidationError,
    VisitorCountError,
};

/// Cross-pattern invariants of a full schedule. Per-pattern invariants are
/// already guaranteed by `Pattern::new`; this checks that the patterns fit
/// together into one tournament.
#[derive(Debug, Clone)]
pub struct ScheduleValidator;

impl ScheduleValidator {
    /// Exactly one pattern per team `0..N`.
    pub fn validate_ownership(
        schedule: &Schedule,
        n_teams: usize,
    ) -> Result<(), ScheduleValidationError> {
        let mut seen = vec![false; n_teams];
        for p in schedule.patterns() {
            let i = p.owner().index();
            if i >= n_teams || seen[i] {
                return Err(DuplicateOwnerError::new(p.owner()).into());
            }
            seen[i] = true;
        }
        for (i, &s) in seen.iter().enumerate() {
            if !s {
                return Err(MissingPatternError::new(TeamIdentifier::from_index(i)).into());
            }
        }
        Ok(())
    }

    /// Every away game must be mirrored by its host being at home, and
    /// every home slot must be filled by exactly one visitor.
    pub fn validate_mirroring(
        schedule: &Schedule,
        n_teams: usize,
        n_slots: usize,
    ) -> Result<(), ScheduleValidationError> {
        let mut visitors = vec![0usize; n_teams * n_slots];
        for p in schedule.patterns() {
            for (slot, host) in p.away_games() {
                let host_pattern = schedule
                    .pattern_of(host)
                    .ok_or(MissingPatternError::new(host))?;
                if !host_pattern.is_home(slot) {
                    return Err(MirrorViolationError::new(p.owner(), host, slot).into());
                }
                visitors[host.index() * n_slots + slot] += 1;
            }
        }
        for p in schedule.patterns() {
            for slot in 0..n_slots {
                let count = visitors[p.owner().index() * n_slots + slot];
                let expected = if p.is_home(slot) { 1 } else { 0 };
                if count != expected {
                    return Err(VisitorCountError::new(p.owner(), slot, count).into());
                }
            }
        }
        Ok(())
    }

    pub fn validate(
        schedule: &Schedule,
        n_teams: usize,
        n_slots: usize,
    ) -> Result<(), ScheduleValidationError> {
        Self::validate_ownership(schedule, n_teams)?;
        Self::validate_mirroring(schedule, n_teams, n_slots)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;
    use crate::problem::bounds::RunLengthBounds;

    fn pat(owner: u32, vs: &[u32]) -> Pattern {
        Pattern::new(
            TeamIdentifier::new(owner),
            vs.iter().copied().map(TeamIdentifier::new).collect(),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap()
    }

    // A valid N = 4 double round robin, built from per-slot pairings so
    // that mirroring is exact:
    //  slot 0: 1@0, 3@2 ; slot 1: 0@1, 2@3 ; slot 2: 3@0, 1@2
    //  slot 3: 0@3, 2@1 ; slot 4: 2@0, 3@1 ; slot 5: 0@2, 1@3
    fn valid_schedule() -> Schedule {
        Schedule::from_patterns(vec![
            pat(0, &[0, 1, 0, 3, 0, 2]),
            pat(1, &[0, 1, 2, 1, 1, 3]),
            pat(2, &[2, 3, 2, 1, 0, 2]),
            pat(3, &[2, 3, 0, 3, 1, 3]),
        ])
    }

    #[test]
    fn accepts_consistent_round_robin() {
        ScheduleValidator::validate(&valid_schedule(), 4, 6).unwrap();
    }

    #[test]
    fn rejects_missing_team() {
        let s = Schedule::from_patterns(vec![
            pat(0, &[0, 1, 0, 3, 0, 2]),
            pat(1, &[0, 1, 2, 1, 1, 3]),
            pat(2, &[2, 3, 2, 1, 0, 2]),
        ]);
        assert!(matches!(
            ScheduleValidator::validate(&s, 4, 6),
            Err(ScheduleValidationError::MissingPattern(_))
        ));
    }

    #[test]
    fn rejects_unmirrored_visit() {
        // Team 1's pattern is valid on its own but visits team 2 in slot 1,
        // where team 2 is itself on the road.
        let s = Schedule::from_patterns(vec![
            pat(0, &[0, 1, 0, 3, 0, 2]),
            pat(1, &[0, 2, 1, 3, 1, 1]),
            pat(2, &[2, 3, 2, 1, 0, 2]),
            pat(3, &[2, 3, 0, 3, 1, 3]),
        ]);
        assert!(matches!(
            ScheduleValidator::validate(&s, 4, 6),
            Err(ScheduleValidationError::MirrorViolation(_))
                | Err(ScheduleValidationError::VisitorCount(_))
        ));
    }
}
