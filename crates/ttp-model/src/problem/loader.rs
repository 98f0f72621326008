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

use crate::problem::err::InstanceLoaderError;
use crate::problem::matrix::DistanceMatrix;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// Reads the plain-text instance format: first line the team count `N`,
/// followed by `N` separator-delimited rows of the distance matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceLoader {
    separator: char,
}

impl Default for InstanceLoader {
    fn default() -> Self {
        Self { separator: ',' }
    }
}

impl InstanceLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn separator(mut self, sep: char) -> Self {
        self.separator = sep;
        self
    }

    pub fn from_bufread<R: BufRead>(
        &self,
        br: R,
    ) -> Result<DistanceMatrix<i64>, InstanceLoaderError> {
        let mut lines = br.lines().enumerate();

        let n = loop {
            match lines.next() {
                Some((idx, line)) => {
                    let line = line?;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    break trimmed.parse::<usize>().map_err(|_| {
                        InstanceLoaderError::Parse {
                            line: idx + 1,
                            token: trimmed.to_string(),
                        }
                    })?;
                }
                None => {
                    return Err(InstanceLoaderError::MissingRow {
                        expected: 1,
                        found: 0,
                    });
                }
            }
        };

        let mut rows: Vec<Vec<i64>> = Vec::with_capacity(n);
        for (idx, line) in lines {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut row = Vec::with_capacity(n);
            for token in trimmed.split(self.separator) {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                row.push(token.parse::<i64>().map_err(|_| {
                    InstanceLoaderError::Parse {
                        line: idx + 1,
                        token: token.to_string(),
                    }
                })?);
            }
            rows.push(row);
            if rows.len() == n {
                break;
            }
        }

        if rows.len() != n {
            return Err(InstanceLoaderError::MissingRow {
                expected: n,
                found: rows.len(),
            });
        }

        Ok(DistanceMatrix::new(rows)?)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<DistanceMatrix<i64>, InstanceLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<DistanceMatrix<i64>, InstanceLoaderError> {
        self.from_bufread(BufReader::new(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TeamIdentifier;

    #[test]
    fn parses_comma_separated_instance() {
        let text = "3\n0,7,2\n7,0,4\n2,4,0\n";
        let m = InstanceLoader::new().from_reader(text.as_bytes()).unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(
            m.distance(TeamIdentifier::new(0), TeamIdentifier::new(1)),
            7
        );
    }

    #[test]
    fn parses_whitespace_separated_instance() {
        let text = "2\n0 5\n5 0\n";
        let m = InstanceLoader::new()
            .separator(' ')
            .from_reader(text.as_bytes())
            .unwrap();
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn reports_missing_rows() {
        let text = "3\n0,7,2\n7,0,4\n";
        let err = InstanceLoader::new()
            .from_reader(text.as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            InstanceLoaderError::MissingRow {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn reports_bad_tokens_with_line_numbers() {
        let text = "2\n0,x\n5,0\n";
        let err = InstanceLoader::new()
            .from_reader(text.as_bytes())
            .unwrap_err();
        assert!(matches!(err, InstanceLoaderError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_loaded_matrix_with_nonzero_diagonal() {
        let text = "2\n1,5\n5,0\n";
        let err = InstanceLoader::new()
            .from_reader(text.as_bytes())
            .unwrap_err();
        assert!(matches!(err, InstanceLoaderError::Matrix(_)));
    }
}
