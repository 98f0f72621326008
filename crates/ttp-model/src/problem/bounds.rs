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

use crate::problem::err::StructuralInfeasibilityError;

/// Largest instance whose patterns stay encodable in the injective
/// base-`(N + 1)` `u128` hash. `17^30 < 2^128`, `18^32` is not.
pub const MAX_TEAMS: usize = 16;

/// Bounds `[L, U]` on the number of home (and away) games in every window
/// of `U + 1` consecutive slots. `L = 1, U = 3` is the classic setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunLengthBounds {
    lower: usize,
    upper: usize,
}

impl RunLengthBounds {
    #[inline]
    pub const fn new(lower: usize, upper: usize) -> Self {
        Self { lower, upper }
    }

    #[inline]
    pub const fn lower(&self) -> usize {
        self.lower
    }

    #[inline]
    pub const fn upper(&self) -> usize {
        self.upper
    }

    /// Window length over which both home and away counts are bounded.
    #[inline]
    pub const fn window(&self) -> usize {
        self.upper + 1
    }

    /// Checks the bounds against an instance size. Every violation here is
    /// fatal and must surface before any solver call.
    pub fn validate(&self, n_teams: usize) -> Result<(), StructuralInfeasibilityError> {
        let slots = 2 * n_teams.saturating_sub(1);
        let fail = |reason| StructuralInfeasibilityError::new(self.lower, self.upper, n_teams, reason);

        if n_teams < 2 {
            return Err(fail("an instance needs at least two teams"));
        }
        if n_teams > MAX_TEAMS {
            return Err(fail("instance exceeds the supported team count"));
        }
        if self.lower == 0 {
            return Err(fail("lower bound must be at least 1"));
        }
        if self.lower > self.upper {
            return Err(fail("lower bound exceeds upper bound"));
        }
        if self.upper >= slots {
            return Err(fail("upper bound must be below the slot count"));
        }
        // Every window of U+1 slots must fit L homes and L aways.
        if 2 * self.lower > self.window() {
            return Err(fail("window cannot hold the lower bound for both venues"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_bounds_are_valid() {
        RunLengthBounds::new(1, 3).validate(4).unwrap();
        RunLengthBounds::new(1, 3).validate(6).unwrap();
        RunLengthBounds::new(2, 3).validate(6).unwrap();
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = RunLengthBounds::new(3, 1).validate(4).unwrap_err();
        assert_eq!(err.reason(), "lower bound exceeds upper bound");
    }

    #[test]
    fn rejects_upper_at_or_beyond_slot_count() {
        // 2N - 2 = 6 slots for N = 4.
        assert!(RunLengthBounds::new(1, 6).validate(4).is_err());
        assert!(RunLengthBounds::new(1, 7).validate(4).is_err());
        assert!(RunLengthBounds::new(1, 5).validate(4).is_ok());
    }

    #[test]
    fn rejects_zero_lower_bound() {
        assert!(RunLengthBounds::new(0, 3).validate(4).is_err());
    }

    #[test]
    fn rejects_window_too_tight_for_both_venues() {
        // L = 2 with U = 2 gives a window of 3, which cannot hold two homes
        // and two aways.
        assert!(RunLengthBounds::new(2, 2).validate(6).is_err());
        assert!(RunLengthBounds::new(2, 3).validate(6).is_ok());
    }

    #[test]
    fn rejects_oversized_instances() {
        assert!(RunLengthBounds::new(1, 3).validate(MAX_TEAMS).is_ok());
        assert!(RunLengthBounds::new(1, 3).validate(MAX_TEAMS + 1).is_err());
    }
}
