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

//! Column-generation solver for the traveling tournament problem.
//!
//! The restricted master is a set-partitioning LP over per-team venue
//! patterns: one assignment row per team and one coverage row per
//! `(team, slot)` pair, where a pattern covers a slot for its owner and for
//! the visited host on every away game. Pricing searches for patterns of
//! negative reduced cost under the master's duals, either by depth-first
//! branch and bound or by a mixed-integer program. Once the loop converges
//! or runs out of time, an integer restriction over the generated column
//! pool produces the final schedule.

pub mod budget;
pub mod columns;
pub mod config;
pub mod duals;
pub mod engine;
pub mod err;
pub mod master;
pub mod pricing;
pub mod restriction;
pub mod seeding;
pub mod solver;

pub mod prelude {
    pub use crate::budget::Budget;
    pub use crate::config::{PricingKind, SolverConfig};
    pub use crate::engine::{SolveReport, SolveStatus};
    pub use crate::err::SolveError;
    pub use crate::seeding::{FullScheduleSeeder, MirroredRoundRobinSeeder};
    pub use crate::solver::TtpSolver;
}
