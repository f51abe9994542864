//! Assignment (solution) model.
//!
//! An assignment is a perfect matching on a square matrix: each row is
//! paired with exactly one column and every column is used once.

use serde::{Deserialize, Serialize};

use super::ScoreMatrix;

/// One (row, column) pair of a matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignedPair {
    /// Row (specialist) index.
    pub row: usize,
    /// Column (workplace) index.
    pub col: usize,
}

impl AssignedPair {
    /// Creates a pair.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A one-to-one assignment of rows to columns, ordered by row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pairs: Vec<AssignedPair>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an assignment from `columns[row] = col`.
    pub fn from_columns(columns: &[usize]) -> Self {
        Self {
            pairs: columns
                .iter()
                .enumerate()
                .map(|(row, &col)| AssignedPair::new(row, col))
                .collect(),
        }
    }

    /// Builds an assignment from arbitrary pairs, sorting them by row.
    pub fn from_pairs(mut pairs: Vec<AssignedPair>) -> Self {
        pairs.sort_by_key(|p| p.row);
        Self { pairs }
    }

    /// The pairs, ordered by row.
    pub fn pairs(&self) -> &[AssignedPair] {
        &self.pairs
    }

    /// Iterates over the pairs.
    pub fn iter(&self) -> std::slice::Iter<'_, AssignedPair> {
        self.pairs.iter()
    }

    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs exist.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Column assigned to `row`, if any.
    pub fn column_of(&self, row: usize) -> Option<usize> {
        self.pairs.iter().find(|p| p.row == row).map(|p| p.col)
    }

    /// Sum of `matrix[row][col]` over all pairs.
    ///
    /// Pairs outside the matrix contribute nothing.
    pub fn total_score(&self, matrix: &ScoreMatrix) -> f64 {
        self.pairs
            .iter()
            .filter_map(|p| matrix.get(p.row, p.col))
            .sum()
    }

    /// Whether this is a perfect matching on an `n × n` matrix.
    pub fn is_perfect_matching(&self, n: usize) -> bool {
        if self.pairs.len() != n {
            return false;
        }
        let mut row_seen = vec![false; n];
        let mut col_seen = vec![false; n];
        for p in &self.pairs {
            if p.row >= n || p.col >= n || row_seen[p.row] || col_seen[p.col] {
                return false;
            }
            row_seen[p.row] = true;
            col_seen[p.col] = true;
        }
        true
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a AssignedPair;
    type IntoIter = std::slice::Iter<'a, AssignedPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
