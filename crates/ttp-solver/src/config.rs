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

use std::time::Duration;

/// Which pricing oracle the column-generation loop uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PricingKind {
    /// Depth-first branch and bound over venue sequences.
    #[default]
    ConstraintSearch,
    /// Mixed-integer program with leg linearization.
    Milp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Wall-clock limit for the whole solve, restriction included.
    pub time_limit: Duration,
    /// A priced column is admitted when its reduced cost is below the
    /// negated tolerance.
    pub pricing_tolerance: f64,
    /// Threshold above which a restriction variable counts as selected.
    pub integrality_tolerance: f64,
    /// Feasibility patterns generated per team when the master comes back
    /// infeasible.
    pub recovery_pool_size: usize,
    /// Consecutive recovery rounds without pool growth before giving up.
    pub stall_limit: usize,
    /// Minimum time reserved for the integer restriction, even when the
    /// loop has consumed the budget.
    pub restriction_floor: Duration,
    /// Seed for the randomized value ordering in pattern search.
    pub rng_seed: u64,
    pub pricing: PricingKind,
}

impl SolverConfig {
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingKind) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(600),
            pricing_tolerance: 1e-6,
            integrality_tolerance: 1e-4,
            recovery_pool_size: 10,
            stall_limit: 3,
            restriction_floor: Duration::from_secs(5),
            rng_seed: 0,
            pricing: PricingKind::ConstraintSearch,
        }
    }
}
