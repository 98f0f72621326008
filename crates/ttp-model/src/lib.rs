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

//! Data model for the traveling tournament problem.
//!
//! A double round-robin tournament over `N` teams spans `2N - 2` slots. Each
//! team's side of the schedule is a [`pattern::Pattern`]: a venue sequence in
//! which the owner's own identifier marks a home slot and any other
//! identifier marks an away game at that team's venue. Instances couple an
//! immutable distance matrix with run-length bounds on consecutive home or
//! away games.

pub mod common;
pub mod pattern;
pub mod problem;
pub mod solution;
pub mod validation;

pub mod prelude {
    pub use crate::common::{DistanceScalar, TeamIdentifier};
    pub use crate::pattern::{Pattern, PatternHash};
    pub use crate::problem::bounds::RunLengthBounds;
    pub use crate::problem::instance::Instance;
    pub use crate::problem::matrix::DistanceMatrix;
    pub use crate::solution::Schedule;
}
