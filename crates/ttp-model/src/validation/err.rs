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
pub struct MissingPatternError {
    team: TeamIdentifier,
}

impl MissingPatternError {
    pub fn new(team: TeamIdentifier) -> Self {
        Self { team }
    }

    pub fn team(&self) -> TeamIdentifier {
        self.team
    }
}

impl std::fmt::Display for MissingPatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No pattern for {}", self.team)
    }
}

impl std::error::Error for MissingPatternError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateOwnerError {
    team: TeamIdentifier,
}

impl DuplicateOwnerError {
    pub fn new(team: TeamIdentifier) -> Self {
        Self { team }
    }

    pub fn team(&self) -> TeamIdentifier {
        self.team
    }
}

impl std::fmt::Display for DuplicateOwnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "More than one pattern owned by {}", self.team)
    }
}

impl std::error::Error for DuplicateOwnerError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MirrorViolationError {
    visitor: TeamIdentifier,
    host: TeamIdentifier,
    slot: usize,
}

impl MirrorViolationError {
    pub fn new(visitor: TeamIdentifier, host: TeamIdentifier, slot: usize) -> Self {
        Self {
            visitor,
            host,
            slot,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl std::fmt::Display for MirrorViolationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} visits {} in slot {}, but the host is not at home",
            self.visitor, self.host, self.slot
        )
    }
}

impl std::error::Error for MirrorViolationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisitorCountError {
    host: TeamIdentifier,
    slot: usize,
    visitors: usize,
}

impl VisitorCountError {
    pub fn new(host: TeamIdentifier, slot: usize, visitors: usize) -> Self {
        Self {
            host,
            slot,
            visitors,
        }
    }
}

impl std::fmt::Display for VisitorCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} hosts {} visitors in slot {}, expected exactly one",
            self.host, self.visitors, self.slot
        )
    }
}

impl std::error::Error for VisitorCountError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleValidationError {
    MissingPattern(MissingPatternError),
    DuplicateOwner(DuplicateOwnerError),
    MirrorViolation(MirrorViolationError),
    VisitorCount(VisitorCountError),
}

impl std::fmt::Display for ScheduleValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleValidationError::MissingPattern(e) => write!(f, "{}", e),
            ScheduleValidationError::DuplicateOwner(e) => write!(f, "{}", e),
            ScheduleValidationError::MirrorViolation(e) => write!(f, "{}", e),
            ScheduleValidationError::VisitorCount(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ScheduleValidationError {}

impl From<MissingPatternError> for ScheduleValidationError {
    fn from(err: MissingPatternError) -> Self {
        ScheduleValidationError::MissingPattern(err)
    }
}

impl From<DuplicateOwnerError> for ScheduleValidationError {
    fn from(err: DuplicateOwnerError) -> Self {
        ScheduleValidationError::DuplicateOwner(err)
    }
}

impl From<MirrorViolationError> for ScheduleValidationError {
    fn from(err: MirrorViolationError) -> Self {
        ScheduleValidationError::MirrorViolation(err)
    }
}

impl From<VisitorCountError> for ScheduleValidationError {
    fn from(err: VisitorCountError) -> Self {
        ScheduleValidationError::VisitorCount(err)
    }
}
