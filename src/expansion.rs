//! Quota expansion into an individual-level matrix.
//!
//! Turns a group × work-type score table into a specialist × workplace
//! matrix by repeating each group row `a[i]` times and each work-type
//! column `b[j]` times. The result is block-constant and square.
//!
//! ```text
//! groups [1, 2, 3], work types [2, 4]
//!
//! [0.3 0.9]      [0.3 0.3 0.9 0.9 0.9 0.9]
//! [0.2 0.8]  →   [0.2 0.2 0.8 0.8 0.8 0.8]
//! [0.5 0.3]      [0.2 0.2 0.8 0.8 0.8 0.8]
//!                [0.5 0.5 0.3 0.3 0.3 0.3]
//!                [0.5 0.5 0.3 0.3 0.3 0.3]
//!                [0.5 0.5 0.3 0.3 0.3 0.3]
//! ```
//!
//! # Complexity
//! O(N²) for an N × N result.

use log::debug;

use crate::error::AssignError;
use crate::models::{AssignmentProblem, ScoreMatrix, ScoreTable};
use crate::validation;

/// Largest matrix side whose cell count fits in a `usize`.
pub const MAX_SIDE: usize = (1 << (usize::BITS / 2)) - 1;

/// Expands quotas and a score table into a square N × N matrix.
///
/// Cell `(i, j)` equals `scores[group_of(i)][work_type_of(j)]`, with
/// groups laid out over rows and work types over columns in index order.
///
/// # Errors
/// - `InvalidQuota` if a sequence is empty, holds a zero count, or sums
///   past `usize::MAX`.
/// - `ShapeMismatch` if total specialists ≠ total workplaces.
/// - `MalformedScoreTable` if the table is not `m × n`.
/// - `ProblemTooLarge` if `N × N` cells cannot be addressed.
///
/// All checks run before the matrix is allocated.
///
/// # Example
/// ```
/// use u_assign::expansion::expand;
/// use u_assign::models::ScoreTable;
///
/// let table = ScoreTable::from_rows(vec![vec![1.0, 2.0]]).unwrap();
/// let matrix = expand(&[2], &[1, 1], &table).unwrap();
/// assert_eq!(matrix.to_rows(), vec![vec![1.0, 2.0], vec![1.0, 2.0]]);
/// ```
pub fn expand(
    group_counts: &[usize],
    work_counts: &[usize],
    scores: &ScoreTable,
) -> Result<ScoreMatrix, AssignError> {
    validation::check_problem(group_counts, work_counts, scores)?;

    let size: usize = group_counts.iter().sum();
    if size > MAX_SIDE {
        return Err(AssignError::ProblemTooLarge {
            size,
            limit: MAX_SIDE,
        });
    }
    let mut matrix = ScoreMatrix::filled(size, size, 0.0);

    let mut row_offset = 0;
    for (group, &specialists) in group_counts.iter().enumerate() {
        let rows = row_offset..row_offset + specialists;
        let mut col_offset = 0;
        for (&workplaces, &score) in work_counts.iter().zip(scores.group_scores(group)) {
            matrix.fill_block(rows.clone(), col_offset..col_offset + workplaces, score);
            col_offset += workplaces;
        }
        row_offset += specialists;
    }

    debug!(
        "expanded {}x{} score table into {size}x{size} matrix",
        scores.groups(),
        scores.work_types()
    );
    Ok(matrix)
}

/// Expands a validated problem.
pub fn expand_problem(problem: &AssignmentProblem) -> Result<ScoreMatrix, AssignError> {
    expand(
        problem.group_counts().counts(),
        problem.work_counts().counts(),
        problem.scores(),
    )
}
