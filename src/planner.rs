//! End-to-end assignment pipeline.
//!
//! # Algorithm
//!
//! 1. Expand quotas and scores into an N × N matrix.
//! 2. Solve the matrix with the configured solver.
//! 3. Aggregate the matching back into group / work-type terms.
//!
//! # Complexity
//! O(N³), dominated by the Hungarian solve.

use log::{debug, info};

use crate::error::AssignError;
use crate::expansion::expand_problem;
use crate::models::{Assignment, AssignmentProblem, ScoreMatrix};
use crate::report::{aggregate, Report};
use crate::solver::{AssignmentSolver, HungarianSolver, SolverConfig};

/// Intermediate and final products of one run.
#[derive(Debug, Clone)]
pub struct Plan {
    /// The expanded specialist × workplace matrix.
    pub matrix: ScoreMatrix,
    /// The optimal matching on `matrix`.
    pub assignment: Assignment,
    /// The aggregated result.
    pub report: Report,
}

/// Runs expand → solve → aggregate.
///
/// # Example
///
/// ```
/// use u_assign::models::AssignmentProblem;
/// use u_assign::planner::Planner;
///
/// let problem = AssignmentProblem::new(
///     vec![1, 2, 3],
///     vec![2, 4],
///     vec![vec![0.3, 0.9], vec![0.2, 0.8], vec![0.5, 0.3]],
/// )
/// .unwrap();
/// let report = Planner::new().plan(&problem).unwrap();
/// assert!((report.total_score - 3.8).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct Planner {
    solver: Box<dyn AssignmentSolver>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner {
    /// Creates a planner using the Hungarian solver.
    pub fn new() -> Self {
        Self {
            solver: Box::new(HungarianSolver::new()),
        }
    }

    /// Uses a Hungarian solver with the given configuration.
    pub fn with_config(self, config: SolverConfig) -> Self {
        self.with_solver(HungarianSolver::new().with_config(config))
    }

    /// Uses a custom solver.
    pub fn with_solver<S: AssignmentSolver + 'static>(mut self, solver: S) -> Self {
        self.solver = Box::new(solver);
        self
    }

    /// Solves a problem and returns the report.
    pub fn plan(&self, problem: &AssignmentProblem) -> Result<Report, AssignError> {
        self.plan_detailed(problem).map(|plan| plan.report)
    }

    /// Solves a problem and keeps the expanded matrix and matching.
    pub fn plan_detailed(&self, problem: &AssignmentProblem) -> Result<Plan, AssignError> {
        let matrix = expand_problem(problem)?;
        debug!(
            "solving {} groups x {} work types as a {}x{} matrix with {}",
            problem.group_count(),
            problem.work_type_count(),
            matrix.rows(),
            matrix.cols(),
            self.solver.name()
        );

        let assignment = self.solver.solve(&matrix)?;
        let report = aggregate(
            &matrix,
            &assignment,
            problem.group_counts().counts(),
            problem.work_counts().counts(),
        )?;

        info!(
            "assigned {} specialists, mean performance {:.6}",
            report.len(),
            report.mean_performance
        );
        Ok(Plan {
            matrix,
            assignment,
            report,
        })
    }
}

/// Solves a problem with the default planner.
pub fn plan(problem: &AssignmentProblem) -> Result<Report, AssignError> {
    Planner::new().plan(problem)
}
