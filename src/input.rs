//! Text input format.
//!
//! ```text
//! m n                      group count, work-type count
//! a0 a1 ... a(m-1)         specialists per group
//! b0 b1 ... b(n-1)         workplaces per work type
//! s00 s01 ... s0(n-1)      m rows of n scores
//! ...
//! ```
//!
//! Blank lines are ignored. Line numbers in errors refer to the original
//! text (1-based).

use std::str::FromStr;

use crate::error::{AssignError, QuotaAxis, QuotaIssue};
use crate::models::AssignmentProblem;

/// Parses a problem from text.
///
/// # Errors
/// - `Parse` for missing lines, wrong token counts, or bad numbers.
/// - `InvalidQuota` for zero or negative counts, or counts whose total
///   overflows.
/// - Any structural error of [`AssignmentProblem::new`].
///
/// # Example
/// ```
/// use u_assign::input::parse_problem;
///
/// let problem = parse_problem("3 2\n1 2 3\n2 4\n0.3 0.9\n0.2 0.8\n0.5 0.3\n").unwrap();
/// assert_eq!(problem.size(), 6);
/// ```
pub fn parse_problem(text: &str) -> Result<AssignmentProblem, AssignError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mut next_line = |what: &str| {
        lines.next().ok_or_else(|| {
            AssignError::parse(text.lines().count() + 1, format!("missing {what}"))
        })
    };

    let (line_no, header) = next_line("header line")?;
    let dims: Vec<usize> = parse_tokens(line_no, header)?;
    let &[m, n] = dims.as_slice() else {
        return Err(AssignError::parse(
            line_no,
            format!("expected 2 values (m n), found {}", dims.len()),
        ));
    };

    let (line_no, line) = next_line("group counts")?;
    let group_counts = parse_counts(line_no, line, m, QuotaAxis::Groups)?;

    let (line_no, line) = next_line("work-type counts")?;
    let work_counts = parse_counts(line_no, line, n, QuotaAxis::WorkTypes)?;

    let mut scores = Vec::with_capacity(m);
    for group in 0..m {
        let (line_no, line) = next_line(&format!("scores for group {group}"))?;
        let row: Vec<f64> = parse_tokens(line_no, line)?;
        if row.len() != n {
            return Err(AssignError::parse(
                line_no,
                format!("expected {n} scores, found {}", row.len()),
            ));
        }
        scores.push(row);
    }

    if let Some((line_no, _)) = lines.next() {
        return Err(AssignError::parse(line_no, "unexpected trailing content"));
    }

    AssignmentProblem::new(group_counts, work_counts, scores)
}

impl FromStr for AssignmentProblem {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_problem(s)
    }
}

fn parse_tokens<T: FromStr>(line_no: usize, line: &str) -> Result<Vec<T>, AssignError>
where
    T::Err: std::fmt::Display,
{
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<T>()
                .map_err(|e| AssignError::parse(line_no, format!("invalid value '{token}': {e}")))
        })
        .collect()
}

fn parse_counts(
    line_no: usize,
    line: &str,
    expected: usize,
    axis: QuotaAxis,
) -> Result<Vec<usize>, AssignError> {
    let raw: Vec<i64> = parse_tokens(line_no, line)?;
    if raw.len() != expected {
        return Err(AssignError::parse(
            line_no,
            format!("expected {expected} {axis} counts, found {}", raw.len()),
        ));
    }
    raw.into_iter()
        .enumerate()
        .map(|(index, count)| match usize::try_from(count) {
            Ok(count) if count > 0 => Ok(count),
            _ => Err(AssignError::InvalidQuota {
                axis,
                issue: QuotaIssue::NonPositive { index, count },
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "3 2\n1 2 3\n2 4\n0.3 0.9\n0.2 0.8\n0.5 0.3\n";

    #[test]
    fn test_parse_example() {
        let problem = parse_problem(EXAMPLE).unwrap();
        assert_eq!(problem.group_counts().counts(), &[1, 2, 3]);
        assert_eq!(problem.work_counts().counts(), &[2, 4]);
        assert_eq!(problem.scores().get(2, 1), Some(0.3));
    }

    #[test]
    fn test_from_str_with_blank_lines() {
        let text = "\n3 2\n\n1 2 3\n2 4\n  0.3 0.9 \n0.2 0.8\n0.5 0.3\n\n";
        let problem: AssignmentProblem = text.parse().unwrap();
        assert_eq!(problem, parse_problem(EXAMPLE).unwrap());
    }

    #[test]
    fn test_bad_header() {
        let err = parse_problem("3\n").unwrap_err();
        assert!(matches!(err, AssignError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_bad_number() {
        let err = parse_problem("1 1\n1\n1\nabc\n").unwrap_err();
        assert!(matches!(err, AssignError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_wrong_count_length() {
        let err = parse_problem("2 1\n1\n1\n0.5\n0.5\n").unwrap_err();
        assert!(matches!(err, AssignError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_score_rows() {
        let err = parse_problem("2 1\n1 1\n2\n0.5\n").unwrap_err();
        match err {
            AssignError::Parse { message, .. } => assert!(message.contains("group 1")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_score_row() {
        let err = parse_problem("1 2\n2\n1 1\n0.5\n").unwrap_err();
        assert!(matches!(err, AssignError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_negative_count() {
        let err = parse_problem("1 1\n-2\n2\n0.5\n").unwrap_err();
        assert_eq!(
            err,
            AssignError::InvalidQuota {
                axis: QuotaAxis::Groups,
                issue: QuotaIssue::NonPositive { index: 0, count: -2 },
            }
        );
    }

    #[test]
    fn test_huge_counts_rejected() {
        let text = "3 1\n\
                    9223372036854775807 9223372036854775807 9223372036854775807\n\
                    1\n0.1\n0.2\n0.3\n";
        let err = parse_problem(text).unwrap_err();
        assert!(matches!(
            err,
            AssignError::InvalidQuota {
                axis: QuotaAxis::Groups,
                ..
            }
        ));
    }

    #[test]
    fn test_unbalanced() {
        let err = parse_problem("2 2\n1 2\n2 4\n0.1 0.2\n0.3 0.4\n").unwrap_err();
        assert_eq!(
            err,
            AssignError::ShapeMismatch {
                specialists: 3,
                workplaces: 6
            }
        );
    }

    #[test]
    fn test_trailing_content() {
        let err = parse_problem("1 1\n1\n1\n0.5\n9 9\n").unwrap_err();
        assert!(matches!(err, AssignError::Parse { line: 5, .. }));
    }
}
