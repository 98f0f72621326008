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

use crate::problem::err::MatrixError;
use crate::problem::matrix::DistanceMatrix;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generates distance matrices from seeded random points on an integer
/// grid, with rounded Euclidean distances. Used by tests and the CLI when
/// no instance files are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridInstanceGenerator {
    seed: u64,
    grid_size: u32,
}

impl Default for GridInstanceGenerator {
    fn default() -> Self {
        Self {
            seed: 0,
            grid_size: 100,
        }
    }
}

impl GridInstanceGenerator {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn grid_size(mut self, grid_size: u32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn generate(&self, n_teams: usize) -> Result<DistanceMatrix<i64>, MatrixError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let points: Vec<(i64, i64)> = (0..n_teams)
            .map(|_| {
                (
                    rng.random_range(0..=self.grid_size) as i64,
                    rng.random_range(0..=self.grid_size) as i64,
                )
            })
            .collect();

        let rows = points
            .iter()
            .map(|&(xi, yi)| {
                points
                    .iter()
                    .map(|&(xj, yj)| {
                        let dx = (xi - xj) as f64;
                        let dy = (yi - yj) as f64;
                        (dx * dx + dy * dy).sqrt().round() as i64
                    })
                    .collect()
            })
            .collect();

        DistanceMatrix::new(rows)
    }
}
