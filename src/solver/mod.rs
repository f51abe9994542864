//! Assignment solvers.
//!
//! Computes a perfect matching on a square score matrix that maximizes
//! (or, when configured, minimizes) the total score.
//!
//! # Solvers
//!
//! - [`HungarianSolver`]: exact Kuhn–Munkres, O(n³). The default.
//! - [`BruteForceSolver`]: exhaustive permutation search for tiny
//!   matrices. Used as a reference when checking optimality.
//!
//! # Cost Transformation
//!
//! The Hungarian method minimizes cost. To maximize score, scores are
//! mapped to costs with a [`CostTransform`]: either `max - score`
//! (complement) or `-score` (negation). Both preserve the optimal matching.
//!
//! # Usage
//!
//! ```
//! use u_assign::models::ScoreMatrix;
//! use u_assign::solver::{AssignmentSolver, HungarianSolver};
//!
//! let matrix = ScoreMatrix::from_rows(vec![vec![1.0, 5.0], vec![4.0, 1.0]]).unwrap();
//! let assignment = HungarianSolver::new().solve(&matrix).unwrap();
//! assert_eq!(assignment.total_score(&matrix), 9.0);
//! ```
//!
//! # References
//!
//! - Kuhn (1955), "The Hungarian Method for the Assignment Problem"
//! - Munkres (1957), "Algorithms for the Assignment and Transportation Problems"

mod brute_force;
mod hungarian;

pub use brute_force::{BruteForceSolver, BRUTE_FORCE_LIMIT};
pub use hungarian::HungarianSolver;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::AssignError;
use crate::models::{Assignment, ScoreMatrix};

/// Default tolerance below which a reduced cost counts as zero, relative
/// to the largest reduced cost of the matrix.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Largest score spread solved without rescaling. Reduced costs and
/// potentials stay within twice the spread, which must remain finite.
const MAX_SPREAD: f64 = f64::MAX / 4.0;

/// An algorithm producing a perfect matching on a square matrix.
pub trait AssignmentSolver: Send + Sync + Debug {
    /// Solver name (e.g., "Hungarian").
    fn name(&self) -> &'static str;

    /// Computes an optimal assignment.
    ///
    /// # Errors
    /// `NonSquareMatrix` when rows ≠ columns. An empty 0×0 matrix yields
    /// an empty assignment.
    fn solve(&self, matrix: &ScoreMatrix) -> Result<Assignment, AssignError>;
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Objective {
    /// Maximize total score.
    #[default]
    Maximize,
    /// Minimize total score (score is already a cost).
    Minimize,
}

impl Objective {
    /// Whether total `a` is strictly better than total `b`.
    #[inline]
    pub fn prefers(self, a: f64, b: f64) -> bool {
        match self {
            Objective::Maximize => a > b,
            Objective::Minimize => a < b,
        }
    }
}

/// How scores are turned into costs for maximization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CostTransform {
    /// `cost = max(matrix) - score`. Keeps costs non-negative.
    #[default]
    Complement,
    /// `cost = -score`.
    Negate,
}

/// Solver configuration.
///
/// # Example
///
/// ```
/// use u_assign::solver::{CostTransform, Objective, SolverConfig};
///
/// let config = SolverConfig::default()
///     .with_objective(Objective::Minimize)
///     .with_epsilon(1e-12);
/// assert_eq!(config.transform, CostTransform::Complement);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Optimization direction.
    pub objective: Objective,
    /// Score-to-cost mapping used when maximizing.
    pub transform: CostTransform,
    /// Zero tolerance for reduced costs, as a fraction of the largest
    /// reduced cost after the initial row/column reduction.
    pub epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            objective: Objective::Maximize,
            transform: CostTransform::Complement,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl SolverConfig {
    /// Sets the optimization direction.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the score-to-cost mapping.
    pub fn with_transform(mut self, transform: CostTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the zero tolerance. Negative values are clamped to zero.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.max(0.0);
        self
    }

    /// Row-major cost matrix to be minimized.
    ///
    /// Scores whose spread exceeds [`MAX_SPREAD`] are first scaled by a
    /// power of two, which keeps every cost finite without changing the
    /// optimal matching.
    pub(crate) fn cost_matrix(&self, matrix: &ScoreMatrix) -> Vec<f64> {
        let scale = cost_scale(matrix);
        let scores = matrix.iter_rows().flatten().map(|&s| s * scale);
        match (self.objective, self.transform) {
            (Objective::Minimize, _) => scores.collect(),
            (Objective::Maximize, CostTransform::Negate) => scores.map(|s| -s).collect(),
            (Objective::Maximize, CostTransform::Complement) => {
                let max = matrix.max_value().unwrap_or(0.0) * scale;
                scores.map(|s| max - s).collect()
            }
        }
    }
}

/// Factor applied to scores before the cost transform.
///
/// Finite scores differ by at most `2 * f64::MAX`, so one eighth always
/// brings the spread back under [`MAX_SPREAD`].
fn cost_scale(matrix: &ScoreMatrix) -> f64 {
    let (Some(min), Some(max)) = (matrix.min_value(), matrix.max_value()) else {
        return 1.0;
    };
    let spread = max - min;
    if spread.is_finite() && spread <= MAX_SPREAD {
        1.0
    } else {
        0.125
    }
}

/// Solves with the default Hungarian solver (maximization).
///
/// # Errors
/// `NonSquareMatrix` when rows ≠ columns.
pub fn solve(matrix: &ScoreMatrix) -> Result<Assignment, AssignError> {
    HungarianSolver::new().solve(matrix)
}

pub(crate) fn ensure_square(matrix: &ScoreMatrix) -> Result<usize, AssignError> {
    if matrix.is_square() {
        Ok(matrix.rows())
    } else {
        Err(AssignError::NonSquareMatrix {
            rows: matrix.rows(),
            cols: matrix.cols(),
        })
    }
}
