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
use crate::problem::err::{
    MatrixError, NegativeDistanceError, NonSquareMatrixError, NonzeroDiagonalError,
};

/// Immutable `N x N` travel distance matrix. Validated at construction:
/// square, zero diagonal, no negative entries. Asymmetry is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix<T> {
    rows: Vec<Vec<T>>,
}

impl<T: DistanceScalar> DistanceMatrix<T> {
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(NonSquareMatrixError::new(n, i, row.len()).into());
            }
            for (j, &d) in row.iter().enumerate() {
                if d < T::zero() {
                    return Err(NegativeDistanceError::new(i, j).into());
                }
            }
            if !rows[i][i].is_zero() {
                return Err(NonzeroDiagonalError::new(i).into());
            }
        }
        Ok(Self { rows })
    }

    /// Number of teams.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn distance(&self, from: TeamIdentifier, to: TeamIdentifier) -> T {
        self.rows[from.index()][to.index()]
    }

    /// Distance as `f64` for the LP boundary. `None` if the scalar does not
    /// fit (practically unreachable for the integer types used here).
    #[inline]
    pub fn distance_f64(&self, from: TeamIdentifier, to: TeamIdentifier) -> Option<f64> {
        self.distance(from, to).to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_asymmetric_matrix() {
        let m = DistanceMatrix::new(vec![vec![0, 3], vec![5, 0]]).unwrap();
        assert_eq!(m.len(), 2);
        let a = TeamIdentifier::new(0);
        let b = TeamIdentifier::new(1);
        assert_eq!(m.distance(a, b), 3);
        assert_eq!(m.distance(b, a), 5);
    }

    #[test]
    fn rejects_nonzero_diagonal() {
        let err = DistanceMatrix::new(vec![vec![1, 3], vec![5, 0]]).unwrap_err();
        assert!(matches!(err, MatrixError::NonzeroDiagonal(_)));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = DistanceMatrix::new(vec![vec![0, 3], vec![5]]).unwrap_err();
        assert!(matches!(err, MatrixError::NonSquare(_)));
    }

    #[test]
    fn rejects_negative_distances() {
        let err = DistanceMatrix::new(vec![vec![0, -3], vec![5, 0]]).unwrap_err();
        assert!(matches!(err, MatrixError::NegativeDistance(_)));
    }
}
