//! Structural validation for assignment problems.
//!
//! Checks the quota sequences and score table before any matrix is
//! built. Detects:
//! - Missing quota sequences
//! - Zero counts
//! - Counts whose total does not fit in a `usize`
//! - Unbalanced totals (specialists ≠ workplaces)
//! - Score tables whose shape does not match the quotas
//!
//! Negative scores are accepted but logged, since the normalized report
//! total assumes non-negative performance.

use log::warn;

use crate::error::{AssignError, QuotaAxis, QuotaIssue};
use crate::models::ScoreTable;

/// Validation result carrying every detected issue.
pub type ValidationResult = Result<(), Vec<AssignError>>;

/// Validates a problem, collecting all structural issues.
///
/// Checks, in order:
/// 1. Group counts present, positive, and summable
/// 2. Work-type counts present, positive, and summable
/// 3. Total specialists equal total workplaces
/// 4. Score table has one row per group and one column per work type
///
/// The balance check is skipped when a quota sequence is already invalid,
/// since its total is meaningless then.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(
    group_counts: &[usize],
    work_counts: &[usize],
    scores: &ScoreTable,
) -> ValidationResult {
    let mut errors = Vec::new();

    let specialists = check_quotas(QuotaAxis::Groups, group_counts, &mut errors);
    let workplaces = check_quotas(QuotaAxis::WorkTypes, work_counts, &mut errors);

    if let (Some(specialists), Some(workplaces)) = (specialists, workplaces) {
        if specialists != workplaces {
            errors.push(AssignError::ShapeMismatch {
                specialists,
                workplaces,
            });
        }
    }

    if scores.groups() != group_counts.len() || scores.work_types() != work_counts.len() {
        errors.push(AssignError::malformed(format!(
            "expected {}x{} scores, got {}x{}",
            group_counts.len(),
            work_counts.len(),
            scores.groups(),
            scores.work_types()
        )));
    }

    for (group, work_type, score) in scores.negative_cells() {
        warn!("negative score {score} for group {group}, work type {work_type}");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Fail-fast variant of [`validate_problem`]: returns the first issue.
pub fn check_problem(
    group_counts: &[usize],
    work_counts: &[usize],
    scores: &ScoreTable,
) -> Result<(), AssignError> {
    validate_problem(group_counts, work_counts, scores)
        .map_err(|errors| errors.into_iter().next().unwrap_or_else(missing_details))
}

// `validate_problem` never returns an empty error list; this keeps the
// conversion total without panicking.
fn missing_details() -> AssignError {
    AssignError::malformed("validation failed without details")
}

/// Returns the quota total when the sequence is valid.
fn check_quotas(
    axis: QuotaAxis,
    counts: &[usize],
    errors: &mut Vec<AssignError>,
) -> Option<usize> {
    if counts.is_empty() {
        errors.push(AssignError::InvalidQuota {
            axis,
            issue: QuotaIssue::Missing,
        });
        return None;
    }

    let mut ok = true;
    for (index, &count) in counts.iter().enumerate() {
        if count == 0 {
            errors.push(AssignError::InvalidQuota {
                axis,
                issue: QuotaIssue::NonPositive { index, count: 0 },
            });
            ok = false;
        }
    }

    let total = counts
        .iter()
        .try_fold(0usize, |total, &count| total.checked_add(count));
    if total.is_none() {
        errors.push(AssignError::InvalidQuota {
            axis,
            issue: QuotaIssue::TotalOverflow,
        });
    }
    total.filter(|_| ok)
}
