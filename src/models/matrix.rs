//! Dense score matrix.
//!
//! Row-major storage, allocated once at full size. Used both for the
//! expanded specialist × workplace matrix and, wrapped in
//! [`super::ScoreTable`], for the group × work-type table.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::AssignError;

/// A dense `rows × cols` matrix of finite scores.
///
/// Deserialization goes through the same checks as [`ScoreMatrix::from_rows`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoreMatrix")]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Unchecked wire form of [`ScoreMatrix`].
#[derive(Deserialize)]
struct RawScoreMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl TryFrom<RawScoreMatrix> for ScoreMatrix {
    type Error = AssignError;

    fn try_from(raw: RawScoreMatrix) -> Result<Self, Self::Error> {
        let expected = raw.rows.checked_mul(raw.cols);
        if expected != Some(raw.data.len()) {
            return Err(AssignError::malformed(format!(
                "{}x{} matrix carries {} values",
                raw.rows,
                raw.cols,
                raw.data.len()
            )));
        }
        if let Some(i) = raw.data.iter().position(|v| !v.is_finite()) {
            return Err(AssignError::NonFiniteScore {
                row: i / raw.cols,
                col: i % raw.cols,
                value: raw.data[i],
            });
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            data: raw.data,
        })
    }
}

impl ScoreMatrix {
    /// Creates a matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Creates an empty 0×0 matrix.
    pub fn empty() -> Self {
        Self::filled(0, 0, 0.0)
    }

    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    /// - `MalformedScoreTable` if rows have differing lengths.
    /// - `NonFiniteScore` if any value is NaN or infinite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AssignError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);

        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(AssignError::malformed(format!(
                    "row {r} has {} values, expected {n_cols}",
                    row.len()
                )));
            }
            for (c, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(AssignError::NonFiniteScore { row: r, col: c, value });
                }
            }
            data.extend(row);
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether rows == cols.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Whether the matrix has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cell value, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// One row as a slice.
    ///
    /// # Panics
    /// If `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterates over rows. A zero-width matrix still yields `rows` empty
    /// slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        let cols = self.cols;
        (0..self.rows).map(move |r| &self.data[r * cols..(r + 1) * cols])
    }

    /// Largest value, or `None` for an empty matrix.
    pub fn max_value(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }

    /// Smallest value, or `None` for an empty matrix.
    pub fn min_value(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }

    /// Copies the matrix into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    /// Fills the `[row_start, row_end) × [col_start, col_end)` block.
    pub(crate) fn fill_block(
        &mut self,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        value: f64,
    ) {
        for r in rows {
            let base = r * self.cols;
            self.data[base + cols.start..base + cols.end].fill(value);
        }
    }
}

impl Index<(usize, usize)> for ScoreMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        &self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let m = ScoreMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]])
            .unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 2);
        assert!(!m.is_square());
        assert_eq!(m[(2, 1)], 6.0);
        assert_eq!(m.get(1, 0), Some(3.0));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.max_value(), Some(6.0));
        assert_eq!(m.min_value(), Some(1.0));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = ScoreMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, AssignError::MalformedScoreTable { .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = ScoreMatrix::from_rows(vec![vec![1.0, f64::NAN]]).unwrap_err();
        assert!(matches!(
            err,
            AssignError::NonFiniteScore { row: 0, col: 1, .. }
        ));
    }

    #[test]
    fn test_empty() {
        let m = ScoreMatrix::from_rows(vec![]).unwrap();
        assert!(m.is_empty());
        assert!(m.is_square());
        assert_eq!(m.max_value(), None);
        assert_eq!(m.iter_rows().count(), 0);
        assert_eq!(m, ScoreMatrix::empty());
    }

    #[test]
    fn test_zero_width_keeps_rows() {
        let m = ScoreMatrix::filled(3, 0, 0.0);
        assert!(m.is_empty());
        assert_eq!(m.iter_rows().count(), 3);
        assert_eq!(m.to_rows(), vec![Vec::<f64>::new(); 3]);
    }

    #[test]
    fn test_deserialize_checks_length() {
        let err = serde_json::from_str::<ScoreMatrix>(r#"{"rows":1,"cols":1,"data":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("1x1 matrix carries 0 values"));

        let overflow = format!(r#"{{"rows":{},"cols":2,"data":[]}}"#, usize::MAX);
        assert!(serde_json::from_str::<ScoreMatrix>(&overflow).is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let m = ScoreMatrix::from_rows(vec![vec![1.5, -2.0], vec![0.0, 4.0]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(serde_json::from_str::<ScoreMatrix>(&json).unwrap(), m);
    }

    #[test]
    fn test_fill_block() {
        let mut m = ScoreMatrix::filled(3, 3, 0.0);
        m.fill_block(1..3, 0..2, 7.0);
        assert_eq!(
            m.to_rows(),
            vec![
                vec![0.0, 0.0, 0.0],
                vec![7.0, 7.0, 0.0],
                vec![7.0, 7.0, 0.0],
            ]
        );
    }
}
