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

use std::collections::HashSet;
use ttp_model::prelude::{Pattern, PatternHash, TeamIdentifier};

/// A master column: a pattern plus its travel cost at the LP boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pattern: Pattern,
    cost: f64,
}

impl Column {
    pub fn new(pattern: Pattern, cost: f64) -> Self {
        Self { pattern, cost }
    }

    #[inline]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[inline]
    pub fn owner(&self) -> TeamIdentifier {
        self.pattern.owner()
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }
}

/// Append-only pool of generated columns, deduplicated by owner and
/// canonical hash. Column indices are stable and shared with the master.
#[derive(Debug, Clone, Default)]
pub struct ColumnPool {
    columns: Vec<Column>,
    seen: HashSet<(TeamIdentifier, PatternHash)>,
}

impl ColumnPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column unless an identical one is already pooled. Returns
    /// the index of the new column, `None` on a duplicate.
    pub fn push(&mut self, column: Column) -> Option<usize> {
        let key = (column.owner(), column.pattern().canonical_hash());
        if !self.seen.insert(key) {
            return None;
        }
        self.columns.push(column);
        Some(self.columns.len() - 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    #[inline]
    pub fn count_for(&self, team: TeamIdentifier) -> usize {
        self.columns.iter().filter(|c| c.owner() == team).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttp_model::prelude::RunLengthBounds;

    fn pattern(owner: u32, vs: &[u32]) -> Pattern {
        Pattern::new(
            TeamIdentifier::new(owner),
            vs.iter().copied().map(TeamIdentifier::new).collect(),
            4,
            RunLengthBounds::new(1, 3),
        )
        .unwrap()
    }

    #[test]
    fn pool_rejects_duplicates_by_owner_and_hash() {
        let mut pool = ColumnPool::new();
        let p = pattern(0, &[1, 0, 2, 0, 3, 0]);
        assert_eq!(pool.push(Column::new(p.clone(), 12.0)), Some(0));
        assert_eq!(pool.push(Column::new(p, 12.0)), None);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.count_for(TeamIdentifier::new(0)), 1);

        let q = pattern(0, &[0, 1, 2, 3, 0, 0]);
        assert_eq!(pool.push(Column::new(q, 6.0)), Some(1));
        assert_eq!(pool.count_for(TeamIdentifier::new(0)), 2);
    }
}
