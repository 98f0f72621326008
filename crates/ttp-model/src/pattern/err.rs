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

use crate::common::TeamIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternError {
    WrongLength {
        expected: usize,
        found: usize,
    },
    VenueOutOfRange {
        slot: usize,
        venue: TeamIdentifier,
    },
    OwnerCountMismatch {
        expected: usize,
        found: usize,
    },
    OpponentMultiplicity {
        opponent: TeamIdentifier,
        count: usize,
    },
    WindowViolation {
        start: usize,
        homes: usize,
    },
    Unencodable,
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternError::WrongLength { expected, found } => {
                write!(f, "Pattern has {} slots, expected {}", found, expected)
            }
            PatternError::VenueOutOfRange { slot, venue } => {
                write!(f, "Venue {} in slot {} is out of range", venue, slot)
            }
            PatternError::OwnerCountMismatch { expected, found } => {
                write!(f, "Pattern has {} home slots, expected {}", found, expected)
            }
            PatternError::OpponentMultiplicity { opponent, count } => {
                write!(
                    f,
                    "Opponent {} is visited {} times, expected exactly once",
                    opponent, count
                )
            }
            PatternError::WindowViolation { start, homes } => {
                write!(
                    f,
                    "Window starting at slot {} has {} home games, outside the run-length bounds",
                    start, homes
                )
            }
            PatternError::Unencodable => {
                write!(f, "Pattern cannot be encoded in the canonical 128-bit hash")
            }
        }
    }
}

impl std::error::Error for PatternError {}
