//! Assignment problem input.

use serde::{Deserialize, Serialize};

use super::{Quotas, ScoreTable};
use crate::error::AssignError;
use crate::validation;

/// A validated quota-based assignment problem.
///
/// Holds the specialist count per group, the workplace count per work
/// type, and the group × work-type score table. Construction checks the
/// structure, deserialization included, so a value of this type is always
/// expandable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAssignmentProblem")]
pub struct AssignmentProblem {
    group_counts: Quotas,
    work_counts: Quotas,
    scores: ScoreTable,
}

/// Unchecked wire form of [`AssignmentProblem`].
#[derive(Deserialize)]
struct RawAssignmentProblem {
    group_counts: Quotas,
    work_counts: Quotas,
    scores: ScoreTable,
}

impl TryFrom<RawAssignmentProblem> for AssignmentProblem {
    type Error = AssignError;

    fn try_from(raw: RawAssignmentProblem) -> Result<Self, Self::Error> {
        Self::from_table(
            raw.group_counts.into_counts(),
            raw.work_counts.into_counts(),
            raw.scores,
        )
    }
}

impl AssignmentProblem {
    /// Creates a problem from raw parts.
    ///
    /// # Errors
    /// Any structural error reported by [`validation::check_problem`], or
    /// the score-table errors of [`ScoreTable::from_rows`].
    ///
    /// # Example
    /// ```
    /// use u_assign::models::AssignmentProblem;
    ///
    /// let problem = AssignmentProblem::new(
    ///     vec![1, 2, 3],
    ///     vec![2, 4],
    ///     vec![vec![0.3, 0.9], vec![0.2, 0.8], vec![0.5, 0.3]],
    /// )
    /// .unwrap();
    /// assert_eq!(problem.size(), 6);
    /// ```
    pub fn new(
        group_counts: Vec<usize>,
        work_counts: Vec<usize>,
        scores: Vec<Vec<f64>>,
    ) -> Result<Self, AssignError> {
        let scores = ScoreTable::from_rows(scores)?;
        Self::from_table(group_counts, work_counts, scores)
    }

    /// Creates a problem from an already-built score table.
    pub fn from_table(
        group_counts: Vec<usize>,
        work_counts: Vec<usize>,
        scores: ScoreTable,
    ) -> Result<Self, AssignError> {
        validation::check_problem(&group_counts, &work_counts, &scores)?;
        Ok(Self {
            group_counts: Quotas::new(group_counts),
            work_counts: Quotas::new(work_counts),
            scores,
        })
    }

    /// Specialist counts per group.
    pub fn group_counts(&self) -> &Quotas {
        &self.group_counts
    }

    /// Workplace counts per work type.
    pub fn work_counts(&self) -> &Quotas {
        &self.work_counts
    }

    /// Group × work-type scores.
    pub fn scores(&self) -> &ScoreTable {
        &self.scores
    }

    /// Number of groups (m).
    pub fn group_count(&self) -> usize {
        self.group_counts.len()
    }

    /// Number of work types (n).
    pub fn work_type_count(&self) -> usize {
        self.work_counts.len()
    }

    /// Side of the expanded matrix (N = total specialists).
    pub fn size(&self) -> usize {
        self.group_counts.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let p = AssignmentProblem::new(vec![2, 1], vec![3], vec![vec![1.0], vec![2.0]]).unwrap();
        assert_eq!(p.group_count(), 2);
        assert_eq!(p.work_type_count(), 1);
        assert_eq!(p.size(), 3);
        assert_eq!(p.work_counts().counts(), &[3]);
        assert_eq!(p.scores().get(1, 0), Some(2.0));
    }

    #[test]
    fn test_new_unbalanced() {
        let err = AssignmentProblem::new(
            vec![1, 2],
            vec![2, 4],
            vec![vec![0.1, 0.2], vec![0.3, 0.4]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            AssignError::ShapeMismatch {
                specialists: 3,
                workplaces: 6
            }
        );
    }

    #[test]
    fn test_new_bad_scores() {
        let err = AssignmentProblem::new(vec![1], vec![1], vec![vec![f64::INFINITY]]).unwrap_err();
        assert!(matches!(err, AssignError::NonFiniteScore { .. }));
    }

    #[test]
    fn test_serde_roundtrip() {
        let p = AssignmentProblem::new(vec![1], vec![1], vec![vec![0.5]]).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: AssignmentProblem = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn test_deserialize_rejects_short_scores() {
        let json = r#"{
            "group_counts": {"counts": [1]},
            "work_counts": {"counts": [1]},
            "scores": {"matrix": {"rows": 1, "cols": 1, "data": []}}
        }"#;
        assert!(serde_json::from_str::<AssignmentProblem>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unbalanced() {
        let json = r#"{
            "group_counts": {"counts": [1, 2]},
            "work_counts": {"counts": [4]},
            "scores": {"matrix": {"rows": 2, "cols": 1, "data": [0.1, 0.2]}}
        }"#;
        let err = serde_json::from_str::<AssignmentProblem>(json).unwrap_err();
        assert!(err.to_string().contains("total specialists (3)"));
    }
}
