//! Two-dimensional sparse storage keyed by `(row, col)`.
//!
//! Used by subsequence array matching to remember every trial, keyed by
//! pattern index and actual index.

use std::collections::BTreeMap;

/// Sparse 2-D matrix. Rows and columns iterate in ascending index order.
#[derive(Debug, Clone)]
pub struct SparseMatrix<A> {
    rows: BTreeMap<usize, BTreeMap<usize, A>>,
}

impl<A> SparseMatrix<A> {
    /// Create an empty matrix
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// Store a value at `(row, col)`, replacing any previous value
    pub fn set(&mut self, row: usize, col: usize, value: A) {
        self.rows.entry(row).or_default().insert(col, value);
    }

    /// All `(col, value)` pairs in `row`, ordered by column
    pub fn row(&self, row: usize) -> Vec<(usize, &A)> {
        self.rows
            .get(&row)
            .map(|r| r.iter().map(|(col, value)| (*col, value)).collect())
            .unwrap_or_default()
    }

    /// Take the value at `(row, col)` out of the matrix
    pub fn remove(&mut self, row: usize, col: usize) -> Option<A> {
        let cells = self.rows.get_mut(&row)?;
        let value = cells.remove(&col);
        if cells.is_empty() {
            self.rows.remove(&row);
        }
        value
    }

    /// True if nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<A> Default for SparseMatrix<A> {
    fn default() -> Self {
        Self::new()
    }
}
