//! Group × work-type performance table.

use serde::{Deserialize, Serialize};

use super::ScoreMatrix;
use crate::error::AssignError;

/// Performance score of every (group, work type) pair.
///
/// Scores are finite. By convention they are non-negative so that the
/// normalized report total stays on a comparable scale, but the solver
/// accepts any finite value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    matrix: ScoreMatrix,
}

impl ScoreTable {
    /// Builds a table from `groups` rows of `work types` scores.
    ///
    /// # Errors
    /// `MalformedScoreTable` for ragged rows, `NonFiniteScore` for NaN/∞.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AssignError> {
        ScoreMatrix::from_rows(rows).map(|matrix| Self { matrix })
    }

    /// Number of groups (rows).
    #[inline]
    pub fn groups(&self) -> usize {
        self.matrix.rows()
    }

    /// Number of work types (columns).
    #[inline]
    pub fn work_types(&self) -> usize {
        self.matrix.cols()
    }

    /// Score of a (group, work type) pair.
    pub fn get(&self, group: usize, work_type: usize) -> Option<f64> {
        self.matrix.get(group, work_type)
    }

    /// Scores of one group across all work types.
    pub fn group_scores(&self, group: usize) -> &[f64] {
        self.matrix.row(group)
    }

    /// Cells with a negative score, as `(group, work_type, score)`.
    pub fn negative_cells(&self) -> Vec<(usize, usize, f64)> {
        let mut cells = Vec::new();
        for (g, row) in self.matrix.iter_rows().enumerate() {
            for (w, &score) in row.iter().enumerate() {
                if score < 0.0 {
                    cells.push((g, w, score));
                }
            }
        }
        cells
    }

    /// The underlying matrix.
    pub fn as_matrix(&self) -> &ScoreMatrix {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_access() {
        let table =
            ScoreTable::from_rows(vec![vec![0.3, 0.9], vec![0.2, 0.8], vec![0.5, 0.3]]).unwrap();
        assert_eq!(table.groups(), 3);
        assert_eq!(table.work_types(), 2);
        assert_eq!(table.get(2, 0), Some(0.5));
        assert_eq!(table.get(3, 0), None);
        assert_eq!(table.group_scores(1), &[0.2, 0.8]);
        assert!(table.negative_cells().is_empty());
    }

    #[test]
    fn test_negative_cells() {
        let table = ScoreTable::from_rows(vec![vec![1.0, -0.5], vec![-2.0, 0.0]]).unwrap();
        assert_eq!(table.negative_cells(), vec![(0, 1, -0.5), (1, 0, -2.0)]);
    }
}
