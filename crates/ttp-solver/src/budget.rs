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

use std::time::{Duration, Instant};

/// Wall-clock budget shared by every stage of a solve. Cooperative: stages
/// check it between external calls and hand the remaining time to the
/// underlying solvers as their own limit.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    start: Instant,
    limit: Duration,
}

impl Budget {
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    #[inline]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.start.elapsed())
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Remaining time in seconds, clamped away from zero so that external
    /// solvers still get a strictly positive limit.
    #[inline]
    pub fn remaining_secs(&self) -> f64 {
        self.remaining().as_secs_f64().max(1e-3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_budget_is_not_exhausted() {
        let b = Budget::new(Duration::from_secs(60));
        assert!(!b.is_exhausted());
        assert!(b.remaining() <= Duration::from_secs(60));
    }

    #[test]
    fn zero_budget_is_exhausted_immediately() {
        let b = Budget::new(Duration::ZERO);
        assert!(b.is_exhausted());
        assert!(b.remaining_secs() > 0.0);
    }
}
