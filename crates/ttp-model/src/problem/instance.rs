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
use crate::problem::bounds::RunLengthBounds;
use crate::problem::err::InstanceError;
use crate::problem::matrix::DistanceMatrix;

/// A traveling tournament instance: an immutable distance matrix plus the
/// run-length bounds. Structural validation happens here, once, before any
/// solver is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance<T> {
    matrix: DistanceMatrix<T>,
    bounds: RunLengthBounds,
}

impl<T: DistanceScalar> Instance<T> {
    pub fn new(matrix: DistanceMatrix<T>, bounds: RunLengthBounds) -> Result<Self, InstanceError> {
        bounds.validate(matrix.len())?;
        Ok(Self { matrix, bounds })
    }

    #[inline]
    pub fn matrix(&self) -> &DistanceMatrix<T> {
        &self.matrix
    }

    #[inline]
    pub fn bounds(&self) -> RunLengthBounds {
        self.bounds
    }

    #[inline]
    pub fn n_teams(&self) -> usize {
        self.matrix.len()
    }

    /// Slots of the double round robin, `2N - 2`.
    #[inline]
    pub fn n_slots(&self) -> usize {
        2 * self.n_teams() - 2
    }

    #[inline]
    pub fn teams(&self) -> impl Iterator<Item = TeamIdentifier> + use<T> {
        (0..self.n_teams()).map(TeamIdentifier::from_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn slot_count_is_twice_teams_minus_two() {
        let inst = Instance::new(grid4(), RunLengthBounds::new(1, 3)).unwrap();
        assert_eq!(inst.n_teams(), 4);
        assert_eq!(inst.n_slots(), 6);
        assert_eq!(inst.teams().count(), 4);
    }

    #[test]
    fn malformed_bounds_are_rejected_at_construction() {
        assert!(matches!(
            Instance::new(grid4(), RunLengthBounds::new(3, 1)),
            Err(InstanceError::StructuralInfeasibility(_))
        ));
        assert!(matches!(
            Instance::new(grid4(), RunLengthBounds::new(1, 6)),
            Err(InstanceError::StructuralInfeasibility(_))
        ));
    }
}
