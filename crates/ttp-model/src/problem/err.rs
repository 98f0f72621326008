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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonSquareMatrixError {
    rows: usize,
    row: usize,
    width: usize,
}

impl NonSquareMatrixError {
    pub fn new(rows: usize, row: usize, width: usize) -> Self {
        Self { rows, row, width }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl std::fmt::Display for NonSquareMatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Distance matrix with {} rows has {} entries in row {}",
            self.rows, self.width, self.row
        )
    }
}

impl std::error::Error for NonSquareMatrixError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonzeroDiagonalError {
    index: usize,
}

impl NonzeroDiagonalError {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl std::fmt::Display for NonzeroDiagonalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Distance matrix diagonal entry {} is nonzero", self.index)
    }
}

impl std::error::Error for NonzeroDiagonalError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NegativeDistanceError {
    from: usize,
    to: usize,
}

impl NegativeDistanceError {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for NegativeDistanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Distance from {} to {} is negative", self.from, self.to)
    }
}

impl std::error::Error for NegativeDistanceError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixError {
    NonSquare(NonSquareMatrixError),
    NonzeroDiagonal(NonzeroDiagonalError),
    NegativeDistance(NegativeDistanceError),
}

impl std::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::NonSquare(e) => write!(f, "{}", e),
            MatrixError::NonzeroDiagonal(e) => write!(f, "{}", e),
            MatrixError::NegativeDistance(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MatrixError {}

impl From<NonSquareMatrixError> for MatrixError {
    fn from(err: NonSquareMatrixError) -> Self {
        MatrixError::NonSquare(err)
    }
}

impl From<NonzeroDiagonalError> for MatrixError {
    fn from(err: NonzeroDiagonalError) -> Self {
        MatrixError::NonzeroDiagonal(err)
    }
}

impl From<NegativeDistanceError> for MatrixError {
    fn from(err: NegativeDistanceError) -> Self {
        MatrixError::NegativeDistance(err)
    }
}

/// Run-length bounds that no pattern of the given slot count can satisfy,
/// or that are inconsistent in themselves. Raised before any solver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructuralInfeasibilityError {
    lower: usize,
    upper: usize,
    n_teams: usize,
    reason: &'static str,
}

impl StructuralInfeasibilityError {
    pub fn new(lower: usize, upper: usize, n_teams: usize, reason: &'static str) -> Self {
        Self {
            lower,
            upper,
            n_teams,
            reason,
        }
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

impl std::fmt::Display for StructuralInfeasibilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Structurally infeasible bounds L={} U={} for {} teams: {}",
            self.lower, self.upper, self.n_teams, self.reason
        )
    }
}

impl std::error::Error for StructuralInfeasibilityError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    Matrix(MatrixError),
    StructuralInfeasibility(StructuralInfeasibilityError),
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceError::Matrix(e) => write!(f, "{}", e),
            InstanceError::StructuralInfeasibility(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InstanceError {}

impl From<MatrixError> for InstanceError {
    fn from(err: MatrixError) -> Self {
        InstanceError::Matrix(err)
    }
}

impl From<StructuralInfeasibilityError> for InstanceError {
    fn from(err: StructuralInfeasibilityError) -> Self {
        InstanceError::StructuralInfeasibility(err)
    }
}

#[derive(Debug)]
pub enum InstanceLoaderError {
    Io(std::io::Error),
    Parse { line: usize, token: String },
    MissingRow { expected: usize, found: usize },
    Matrix(MatrixError),
}

impl std::fmt::Display for InstanceLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceLoaderError::Io(e) => write!(f, "I/O error: {}", e),
            InstanceLoaderError::Parse { line, token } => {
                write!(f, "Cannot parse '{}' on line {}", token, line)
            }
            InstanceLoaderError::MissingRow { expected, found } => {
                write!(f, "Expected {} matrix rows, found {}", expected, found)
            }
            InstanceLoaderError::Matrix(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InstanceLoaderError {}

impl From<std::io::Error> for InstanceLoaderError {
    fn from(err: std::io::Error) -> Self {
        InstanceLoaderError::Io(err)
    }
}

impl From<MatrixError> for InstanceLoaderError {
    fn from(err: MatrixError) -> Self {
        InstanceLoaderError::Matrix(err)
    }
}
