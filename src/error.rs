//! Error kinds for assignment problems.
//!
//! Every structural problem is reported as a distinct [`AssignError`]
//! variant so callers can match on the kind and render their own
//! diagnostics. The library itself never prints.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which side of the problem a quota sequence describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotaAxis {
    /// Specialist counts per group (matrix rows).
    Groups,
    /// Workplace counts per work type (matrix columns).
    WorkTypes,
}

impl fmt::Display for QuotaAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaAxis::Groups => f.write_str("group"),
            QuotaAxis::WorkTypes => f.write_str("work type"),
        }
    }
}

/// What is wrong with a quota sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotaIssue {
    /// The sequence is empty.
    Missing,
    /// A count is zero or negative.
    NonPositive {
        /// Position in the sequence.
        index: usize,
        /// The offending count.
        count: i64,
    },
    /// The counts add up to more than `usize::MAX`.
    TotalOverflow,
}

impl fmt::Display for QuotaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaIssue::Missing => f.write_str("no counts given"),
            QuotaIssue::NonPositive { index, count } => {
                write!(f, "count at index {index} must be positive, got {count}")
            }
            QuotaIssue::TotalOverflow => f.write_str("counts overflow when summed"),
        }
    }
}

/// Errors raised while building or solving an assignment problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignError {
    /// Total specialists differ from total workplaces.
    #[error("total specialists ({specialists}) does not match total workplaces ({workplaces})")]
    ShapeMismatch {
        /// Sum of group counts.
        specialists: usize,
        /// Sum of work-type counts.
        workplaces: usize,
    },

    /// A group or work-type quota is absent or non-positive.
    #[error("invalid {axis} quota: {issue}")]
    InvalidQuota {
        /// Which quota sequence is affected.
        axis: QuotaAxis,
        /// The problem found.
        issue: QuotaIssue,
    },

    /// The score table does not have the expected m×n shape.
    #[error("malformed score table: {message}")]
    MalformedScoreTable {
        /// Human-readable description.
        message: String,
    },

    /// A score is NaN or infinite.
    #[error("score at ({row}, {col}) is not finite: {value}")]
    NonFiniteScore {
        /// Row (group or specialist) index.
        row: usize,
        /// Column (work type or workplace) index.
        col: usize,
        /// The offending value.
        value: f64,
    },

    /// The solver received a matrix with rows ≠ columns.
    #[error("assignment matrix must be square, got {rows}x{cols}")]
    NonSquareMatrix {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// An assignment does not fit the matrix or quotas it is reported against.
    #[error("inconsistent assignment: {message}")]
    InconsistentAssignment {
        /// Human-readable description.
        message: String,
    },

    /// An exhaustive solver was asked to enumerate too many permutations.
    #[error("problem of size {size} exceeds the exhaustive search limit of {limit}")]
    ProblemTooLarge {
        /// Matrix dimension.
        size: usize,
        /// Largest accepted dimension.
        limit: usize,
    },

    /// The textual input could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number in the input.
        line: usize,
        /// Human-readable description.
        message: String,
    },
}

impl AssignError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedScoreTable {
            message: message.into(),
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Whether this error describes the problem structure (as opposed to
    /// input syntax or solver limits).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. }
                | Self::InvalidQuota { .. }
                | Self::MalformedScoreTable { .. }
                | Self::NonFiniteScore { .. }
                | Self::NonSquareMatrix { .. }
        )
    }
}
