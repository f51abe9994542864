//! Assignment report aggregation.
//!
//! Maps every (specialist row, workplace column) pair of an optimal
//! assignment back to its (group, work type) and accumulates the totals.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total score | Σ score over all pairs |
//! | Mean performance | Σ score / N (the reported "total max performance") |
//! | Allocation | Specialists of group g placed on work type w |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AssignError;
use crate::models::{Assignment, BlockIndex, ScoreMatrix};

/// One assigned specialist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Specialist (row) index in the expanded matrix.
    pub row: usize,
    /// Workplace (column) index in the expanded matrix.
    pub col: usize,
    /// Owning group.
    pub group: usize,
    /// Owning work type.
    pub work_type: usize,
    /// Raw score of the pair.
    pub score: f64,
}

/// Outcome of an assignment, expressed in group / work-type terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// One line per assigned pair, ordered by row.
    pub lines: Vec<ReportLine>,
    /// Number of groups (m).
    pub groups: usize,
    /// Number of work types (n).
    pub work_types: usize,
    /// Σ score.
    pub total_score: f64,
    /// Σ score / N; 0 for an empty assignment.
    pub mean_performance: f64,
}

impl Report {
    /// Number of assigned specialists (N).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing was assigned.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `allocation[g][w]` = specialists of group `g` placed on work type `w`.
    ///
    /// Lines naming a group or work type outside the report are skipped.
    pub fn allocation(&self) -> Vec<Vec<usize>> {
        let mut table = vec![vec![0; self.work_types]; self.groups];
        for line in &self.lines {
            if let Some(cell) = table
                .get_mut(line.group)
                .and_then(|row| row.get_mut(line.work_type))
            {
                *cell += 1;
            }
        }
        table
    }

    /// Lines belonging to one group.
    pub fn lines_for_group(&self, group: usize) -> impl Iterator<Item = &ReportLine> {
        self.lines.iter().filter(move |line| line.group == group)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(
                f,
                "(group: {}, work type: {}) -> performance: {:.6}",
                line.group, line.work_type, line.score
            )?;
        }
        write!(f, "total max performance = {:.6}", self.mean_performance)
    }
}

/// Builds a report from an assignment on an expanded matrix.
///
/// Group and work type of each pair are found through boundary tables
/// built once from the cumulative counts; a row exactly at a boundary
/// belongs to the block starting there.
///
/// # Errors
/// `InconsistentAssignment` if the quotas do not cover the matrix, or the
/// assignment is not a perfect matching on it (a pair outside the matrix,
/// a repeated row or column, or a missing row).
///
/// # Example
/// ```
/// use u_assign::models::{Assignment, ScoreMatrix};
/// use u_assign::report::aggregate;
///
/// let matrix = ScoreMatrix::from_rows(vec![vec![1.0, 3.0], vec![1.0, 3.0]]).unwrap();
/// let assignment = Assignment::from_columns(&[0, 1]);
/// let report = aggregate(&matrix, &assignment, &[2], &[1, 1]).unwrap();
/// assert_eq!(report.total_score, 4.0);
/// assert_eq!(report.mean_performance, 2.0);
/// ```
pub fn aggregate(
    matrix: &ScoreMatrix,
    assignment: &Assignment,
    group_counts: &[usize],
    work_counts: &[usize],
) -> Result<Report, AssignError> {
    let groups = BlockIndex::new(group_counts);
    let works = BlockIndex::new(work_counts);

    if groups.total() != matrix.rows() || works.total() != matrix.cols() {
        return Err(AssignError::InconsistentAssignment {
            message: format!(
                "quotas cover {}x{} units but the matrix is {}x{}",
                groups.total(),
                works.total(),
                matrix.rows(),
                matrix.cols()
            ),
        });
    }

    let n = matrix.rows();
    if !matrix.is_square() || !assignment.is_perfect_matching(n) {
        return Err(AssignError::InconsistentAssignment {
            message: format!(
                "{} pairs do not form a perfect matching on the {}x{} matrix",
                assignment.len(),
                matrix.rows(),
                matrix.cols()
            ),
        });
    }

    let mut lines = Vec::with_capacity(n);
    let mut total_score = 0.0;

    for pair in assignment {
        let (Some(group), Some(work_type), Some(score)) = (
            groups.block_of(pair.row),
            works.block_of(pair.col),
            matrix.get(pair.row, pair.col),
        ) else {
            return Err(AssignError::InconsistentAssignment {
                message: format!("pair ({}, {}) lies outside the matrix", pair.row, pair.col),
            });
        };

        total_score += score;
        lines.push(ReportLine {
            row: pair.row,
            col: pair.col,
            group,
            work_type,
            score,
        });
    }

    let mean_performance = if n == 0 {
        0.0
    } else {
        total_score / n as f64
    };

    Ok(Report {
        lines,
        groups: group_counts.len(),
        work_types: work_counts.len(),
        total_score,
        mean_performance,
    })
}
