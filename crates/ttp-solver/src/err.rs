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

use highs::HighsModelStatus;
use ttp_model::common::TeamIdentifier;
use ttp_model::pattern::err::PatternError;
use ttp_model::validation::err::ScheduleValidationError;

/// The LP relaxation came back in a state the loop has no answer for
/// (numerical trouble, solver error). Infeasibility and time limits are
/// handled, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnexpectedStatusError {
    status: HighsModelStatus,
}

impl UnexpectedStatusError {
    pub fn new(status: HighsModelStatus) -> Self {
        Self { status }
    }

    pub fn status(&self) -> HighsModelStatus {
        self.status
    }
}

impl std::fmt::Display for UnexpectedStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Master LP finished with status {:?}", self.status)
    }
}

impl std::error::Error for UnexpectedStatusError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasterError {
    UnexpectedStatus(UnexpectedStatusError),
}

impl std::fmt::Display for MasterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MasterError::UnexpectedStatus(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for MasterError {}

impl From<UnexpectedStatusError> for MasterError {
    fn from(err: UnexpectedStatusError) -> Self {
        MasterError::UnexpectedStatus(err)
    }
}

#[derive(Debug)]
pub enum PricingError {
    /// The pricing MIP failed for a reason other than infeasibility.
    Solver(good_lp::ResolutionError),
    /// A priced venue sequence failed pattern validation. Indicates a bug
    /// in the pricing model rather than bad input.
    InvalidPattern(PatternError),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::Solver(e) => write!(f, "Pricing solver failed: {}", e),
            PricingError::InvalidPattern(e) => write!(f, "Pricing produced an invalid pattern: {}", e),
        }
    }
}

impl std::error::Error for PricingError {}

impl From<good_lp::ResolutionError> for PricingError {
    fn from(err: good_lp::ResolutionError) -> Self {
        PricingError::Solver(err)
    }
}

impl From<PatternError> for PricingError {
    fn from(err: PatternError) -> Self {
        PricingError::InvalidPattern(err)
    }
}

#[derive(Debug)]
pub enum RestrictionError {
    Solver(good_lp::ResolutionError),
    /// The restriction picked a column set that does not assemble into a
    /// consistent schedule.
    InvalidSchedule(ScheduleValidationError),
}

impl std::fmt::Display for RestrictionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestrictionError::Solver(e) => write!(f, "Integer restriction failed: {}", e),
            RestrictionError::InvalidSchedule(e) => {
                write!(f, "Integer restriction produced an invalid schedule: {}", e)
            }
        }
    }
}

impl std::error::Error for RestrictionError {}

impl From<good_lp::ResolutionError> for RestrictionError {
    fn from(err: good_lp::ResolutionError) -> Self {
        RestrictionError::Solver(err)
    }
}

impl From<ScheduleValidationError> for RestrictionError {
    fn from(err: ScheduleValidationError) -> Self {
        RestrictionError::InvalidSchedule(err)
    }
}

/// A pattern's travel cost does not fit the distance scalar. The checked
/// sum in `Pattern::cost` caught an overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostOverflowError {
    owner: TeamIdentifier,
}

impl CostOverflowError {
    pub fn new(owner: TeamIdentifier) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> TeamIdentifier {
        self.owner
    }
}

impl std::fmt::Display for CostOverflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Travel cost of a pattern owned by {} overflows the distance type",
            self.owner
        )
    }
}

impl std::error::Error for CostOverflowError {}

#[derive(Debug)]
pub enum SolveError {
    Master(MasterError),
    Pricing(PricingError),
    Restriction(RestrictionError),
    CostOverflow(CostOverflowError),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Master(e) => write!(f, "{}", e),
            SolveError::Pricing(e) => write!(f, "{}", e),
            SolveError::Restriction(e) => write!(f, "{}", e),
            SolveError::CostOverflow(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<MasterError> for SolveError {
    fn from(err: MasterError) -> Self {
        SolveError::Master(err)
    }
}

impl From<PricingError> for SolveError {
    fn from(err: PricingError) -> Self {
        SolveError::Pricing(err)
    }
}

impl From<RestrictionError> for SolveError {
    fn from(err: RestrictionError) -> Self {
        SolveError::Restriction(err)
    }
}

impl From<CostOverflowError> for SolveError {
    fn from(err: CostOverflowError) -> Self {
        SolveError::CostOverflow(err)
    }
}
