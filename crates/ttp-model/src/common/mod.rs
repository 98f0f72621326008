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

use num_traits::{CheckedAdd, ToPrimitive, Zero};

pub trait IdentifierMarkerName: Copy {
    const NAME: &'static str;
}

/// Typed identifier wrapper. The phantom marker keeps identifiers of
/// different entities from being mixed up at compile time.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier<I, U>(I, core::marker::PhantomData<U>);

impl<I, U> Identifier<I, U> {
    #[inline]
    pub const fn new(id: I) -> Self {
        Self(id, core::marker::PhantomData)
    }

    #[inline]
    pub fn value(&self) -> I
    where
        I: Copy,
    {
        self.0
    }
}

impl<I, U> std::fmt::Display for Identifier<I, U>
where
    I: std::fmt::Display,
    U: IdentifierMarkerName,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME, self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamMarker;

impl IdentifierMarkerName for TeamMarker {
    const NAME: &'static str = "Team";
}

/// Identifier of a team, `0..N` for an `N`-team instance.
pub type TeamIdentifier = Identifier<u32, TeamMarker>;

impl Identifier<u32, TeamMarker> {
    /// Index into team-addressed arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::new(index as u32)
    }
}

/// Numeric requirements on the distance scalar. Distances stay in `T`
/// inside the model; solvers convert to `f64` via [`ToPrimitive`] at the
/// LP boundary.
pub trait DistanceScalar:
    Copy
    + Ord
    + Zero
    + CheckedAdd
    + ToPrimitive
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + 'static
{
}

impl<T> DistanceScalar for T where
    T: Copy
        + Ord
        + Zero
        + CheckedAdd
        + ToPrimitive
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + 'static
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_identifier_display_includes_marker_name() {
        let id = TeamIdentifier::new(3);
        assert_eq!(format!("{}", id), "Team(3)");
    }

    #[test]
    fn team_identifier_round_trips_through_index() {
        for i in 0..8 {
            assert_eq!(TeamIdentifier::from_index(i).index(), i);
        }
    }
}
