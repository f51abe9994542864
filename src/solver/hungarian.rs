//! Hungarian (Kuhn–Munkres) solver.
//!
//! # Algorithm
//!
//! 1. Map scores to costs (see [`super::CostTransform`]).
//! 2. Subtract each row minimum, then each column minimum.
//! 3. Star a maximal set of independent zeros (greedy, row-major).
//! 4. Cover every column holding a star. If all n columns are covered the
//!    stars form an optimal matching.
//! 5. Find an uncovered zero and prime it. If its row holds a star, cover
//!    the row and uncover the star's column. Otherwise follow the
//!    alternating prime/star path from it, swap stars and primes along the
//!    path (one more star), and return to step 4.
//! 6. With no uncovered zero left, take the smallest uncovered value,
//!    add it to every covered row and subtract it from every uncovered
//!    column, then return to step 5.
//!
//! # Zero Tolerance
//!
//! A reduced cost counts as zero when it is at most `epsilon` times the
//! largest reduced cost after step 2, so the test follows the scale of
//! the scores.
//!
//! # Complexity
//!
//! Step 6 is applied through row/column potentials instead of rewriting
//! the matrix, and each uncovered row keeps its smallest uncovered
//! reduced cost (slack). Finding a zero, covering a row, and adjusting
//! are then O(n), so each augmenting phase is O(n²) and the whole solve
//! is O(n³).
//!
//! # Reference
//! Munkres (1957), "Algorithms for the Assignment and Transportation
//! Problems", J. SIAM 5(1)

use log::{debug, trace};

use super::{ensure_square, AssignmentSolver, SolverConfig};
use crate::error::AssignError;
use crate::models::{Assignment, ScoreMatrix};

/// Exact O(n³) assignment solver.
///
/// Ties between equally good matchings are broken by search order; only
/// the optimal total is guaranteed.
///
/// # Example
/// ```
/// use u_assign::models::ScoreMatrix;
/// use u_assign::solver::{AssignmentSolver, HungarianSolver};
///
/// let matrix = ScoreMatrix::from_rows(vec![
///     vec![7.0, 5.0, 1.0],
///     vec![2.0, 8.0, 3.0],
///     vec![4.0, 6.0, 9.0],
/// ])
/// .unwrap();
/// let assignment = HungarianSolver::new().solve(&matrix).unwrap();
/// assert_eq!(assignment.total_score(&matrix), 24.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HungarianSolver {
    config: SolverConfig,
}

impl HungarianSolver {
    /// Creates a maximizing solver with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl AssignmentSolver for HungarianSolver {
    fn name(&self) -> &'static str {
        "Hungarian"
    }

    fn solve(&self, matrix: &ScoreMatrix) -> Result<Assignment, AssignError> {
        let n = ensure_square(matrix)?;
        if n == 0 {
            return Ok(Assignment::new());
        }

        let costs = self.config.cost_matrix(matrix);
        let columns = Munkres::new(costs, n).run(self.config.epsilon);
        let assignment = Assignment::from_columns(&columns);

        debug!(
            "{} solved {n}x{n} matrix, total score {}",
            self.name(),
            assignment.total_score(matrix)
        );
        Ok(assignment)
    }
}

/// Working state of one solve. Never shared between calls.
struct Munkres {
    n: usize,
    /// Absolute zero threshold, fixed once the matrix is reduced.
    tolerance: f64,
    /// Row-major costs after the initial row/column reduction.
    cost: Vec<f64>,
    /// Accumulated additions to covered rows.
    row_potential: Vec<f64>,
    /// Accumulated subtractions from uncovered columns.
    col_potential: Vec<f64>,
    star_in_row: Vec<Option<usize>>,
    star_in_col: Vec<Option<usize>>,
    prime_in_row: Vec<Option<usize>>,
    row_covered: Vec<bool>,
    col_covered: Vec<bool>,
    /// Smallest reduced cost over uncovered columns, per uncovered row.
    slack: Vec<f64>,
    slack_col: Vec<usize>,
}

impl Munkres {
    fn new(cost: Vec<f64>, n: usize) -> Self {
        Self {
            n,
            tolerance: 0.0,
            cost,
            row_potential: vec![0.0; n],
            col_potential: vec![0.0; n],
            star_in_row: vec![None; n],
            star_in_col: vec![None; n],
            prime_in_row: vec![None; n],
            row_covered: vec![false; n],
            col_covered: vec![false; n],
            slack: vec![f64::INFINITY; n],
            slack_col: vec![0; n],
        }
    }

    /// Runs to completion and returns `columns[row]`.
    fn run(mut self, epsilon: f64) -> Vec<usize> {
        self.reduce_rows();
        self.reduce_columns();
        let largest = self.cost.iter().copied().fold(0.0, f64::max);
        self.tolerance = epsilon * largest;
        self.star_independent_zeros();

        let mut phase = 0;
        loop {
            let covered = self.cover_starred_columns();
            trace!("phase {phase}: {covered}/{} columns covered", self.n);
            if covered == self.n {
                break;
            }
            self.init_slack();
            self.augment_once();
            phase += 1;
        }

        self.star_in_row
            .into_iter()
            .map(|col| match col {
                Some(col) => col,
                None => unreachable!("every row is starred once all columns are covered"),
            })
            .collect()
    }

    #[inline]
    fn reduced(&self, row: usize, col: usize) -> f64 {
        self.cost[row * self.n + col] + self.row_potential[row] - self.col_potential[col]
    }

    #[inline]
    fn is_zero(&self, value: f64) -> bool {
        value <= self.tolerance
    }

    fn reduce_rows(&mut self) {
        for row in self.cost.chunks_exact_mut(self.n) {
            let min = row.iter().copied().fold(f64::INFINITY, f64::min);
            for value in row.iter_mut() {
                *value -= min;
            }
        }
    }

    fn reduce_columns(&mut self) {
        let n = self.n;
        for col in 0..n {
            let min = (0..n)
                .map(|row| self.cost[row * n + col])
                .fold(f64::INFINITY, f64::min);
            for row in 0..n {
                self.cost[row * n + col] -= min;
            }
        }
    }

    fn star_independent_zeros(&mut self) {
        for row in 0..self.n {
            for col in 0..self.n {
                if self.star_in_col[col].is_none() && self.is_zero(self.reduced(row, col)) {
                    self.star_in_row[row] = Some(col);
                    self.star_in_col[col] = Some(row);
                    break;
                }
            }
        }
    }

    /// Resets covers and primes, covers starred columns, returns the count.
    fn cover_starred_columns(&mut self) -> usize {
        self.row_covered.fill(false);
        self.prime_in_row.fill(None);
        let mut covered = 0;
        for col in 0..self.n {
            self.col_covered[col] = self.star_in_col[col].is_some();
            if self.col_covered[col] {
                covered += 1;
            }
        }
        covered
    }

    fn init_slack(&mut self) {
        for row in 0..self.n {
            let mut best = f64::INFINITY;
            let mut best_col = 0;
            for col in 0..self.n {
                if !self.col_covered[col] {
                    let value = self.reduced(row, col);
                    if value < best {
                        best = value;
                        best_col = col;
                    }
                }
            }
            self.slack[row] = best;
            self.slack_col[row] = best_col;
        }
    }

    /// Primes and adjusts until one augmenting path is found and applied.
    fn augment_once(&mut self) {
        loop {
            let Some((row, col)) = self.find_uncovered_zero() else {
                self.adjust_potentials();
                continue;
            };

            self.prime_in_row[row] = Some(col);
            match self.star_in_row[row] {
                Some(star_col) => self.cover_row(row, star_col),
                None => {
                    self.flip_path(row, col);
                    return;
                }
            }
        }
    }

    fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        (0..self.n)
            .find(|&row| !self.row_covered[row] && self.is_zero(self.slack[row]))
            .map(|row| (row, self.slack_col[row]))
    }

    /// Covers `row` and uncovers the column of its star, which becomes
    /// reachable from the remaining uncovered rows.
    fn cover_row(&mut self, row: usize, star_col: usize) {
        self.row_covered[row] = true;
        self.col_covered[star_col] = false;
        for other in 0..self.n {
            if !self.row_covered[other] {
                let value = self.reduced(other, star_col);
                if value < self.slack[other] {
                    self.slack[other] = value;
                    self.slack_col[other] = star_col;
                }
            }
        }
    }

    /// Subtracts the smallest uncovered value from uncovered cells and
    /// adds it to doubly covered ones.
    fn adjust_potentials(&mut self) {
        let delta = (0..self.n)
            .filter(|&row| !self.row_covered[row])
            .map(|row| self.slack[row])
            .fold(f64::INFINITY, f64::min);
        trace!("adjusting by {delta}");

        for row in 0..self.n {
            if self.row_covered[row] {
                self.row_potential[row] += delta;
            } else {
                self.slack[row] -= delta;
            }
        }
        for col in 0..self.n {
            if !self.col_covered[col] {
                self.col_potential[col] += delta;
            }
        }
    }

    /// Walks the alternating path prime → star in column → prime in row …
    /// starting at the unmatched prime `(row, col)`, starring every prime
    /// and dropping every star on the way.
    fn flip_path(&mut self, mut row: usize, mut col: usize) {
        loop {
            let displaced = self.star_in_col[col];
            self.star_in_row[row] = Some(col);
            self.star_in_col[col] = Some(row);

            let Some(star_row) = displaced else {
                break;
            };
            col = match self.prime_in_row[star_row] {
                Some(prime_col) => prime_col,
                None => unreachable!("a row whose star column is uncovered was primed"),
            };
            row = star_row;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{BruteForceSolver, CostTransform, Objective};
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn matrix(rows: Vec<Vec<f64>>) -> ScoreMatrix {
        ScoreMatrix::from_rows(rows).unwrap()
    }

    fn random_matrix(n: usize, rng: &mut SmallRng) -> ScoreMatrix {
        matrix(
            (0..n)
                .map(|_| (0..n).map(|_| rng.random_range(0.0..10.0)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_single_cell() {
        let m = matrix(vec![vec![3.5]]);
        let a = HungarianSolver::new().solve(&m).unwrap();
        assert_eq!(a, Assignment::from_columns(&[0]));
    }

    #[test]
    fn test_maximizes_not_minimizes() {
        let m = matrix(vec![vec![1.0, 2.0], vec![3.0, 1.0]]);
        let a = HungarianSolver::new().solve(&m).unwrap();
        assert_eq!(a, Assignment::from_columns(&[1, 0]));
        assert_eq!(a.total_score(&m), 5.0);
    }

    #[test]
    fn test_minimize_objective() {
        let m = matrix(vec![vec![4.0, 1.0, 3.0], vec![2.0, 0.0, 5.0], vec![3.0, 2.0, 2.0]]);
        let solver = HungarianSolver::new()
            .with_config(SolverConfig::default().with_objective(Objective::Minimize));
        let a = solver.solve(&m).unwrap();
        assert!(a.is_perfect_matching(3));
        assert_eq!(a.total_score(&m), 5.0);
    }

    #[test]
    fn test_transforms_agree() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let m = random_matrix(7, &mut rng);
            let complement = HungarianSolver::new().solve(&m).unwrap();
            let negate = HungarianSolver::new()
                .with_config(SolverConfig::default().with_transform(CostTransform::Negate))
                .solve(&m)
                .unwrap();
            assert!((complement.total_score(&m) - negate.total_score(&m)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rank_one_matrix() {
        let m = matrix(vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![2.0, 4.0, 6.0, 8.0],
            vec![3.0, 6.0, 9.0, 12.0],
            vec![4.0, 8.0, 12.0, 16.0],
        ]);
        let a = HungarianSolver::new().solve(&m).unwrap();
        assert!(a.is_perfect_matching(4));
        // Diagonal pairing: 1 + 4 + 9 + 16.
        assert_eq!(a.total_score(&m), 30.0);
    }

    #[test]
    fn test_all_equal() {
        let m = ScoreMatrix::filled(5, 5, 2.0);
        let a = HungarianSolver::new().solve(&m).unwrap();
        assert!(a.is_perfect_matching(5));
        assert_eq!(a.total_score(&m), 10.0);
    }

    #[test]
    fn test_negative_scores() {
        let m = matrix(vec![vec![-5.0, -1.0], vec![-2.0, -8.0]]);
        let a = HungarianSolver::new().solve(&m).unwrap();
        assert_eq!(a.total_score(&m), -3.0);
    }

    #[test]
    fn test_tiny_scores_not_rounded_to_zero() {
        let m = matrix(vec![vec![0.0, 1e-10], vec![1e-10, 0.0]]);
        let a = HungarianSolver::new().solve(&m).unwrap();
        assert_eq!(a, Assignment::from_columns(&[1, 0]));
        assert_eq!(a.total_score(&m), 2e-10);
    }

    #[test]
    fn test_extreme_spread_terminates() {
        let m = matrix(vec![vec![f64::MAX, -f64::MAX], vec![-f64::MAX, f64::MAX]]);
        let maximize = [CostTransform::Complement, CostTransform::Negate]
            .map(|t| SolverConfig::default().with_transform(t));
        for config in maximize {
            let a = HungarianSolver::new().with_config(config).solve(&m).unwrap();
            assert_eq!(a, Assignment::from_columns(&[0, 1]), "{config:?}");
        }

        let minimize = SolverConfig::default().with_objective(Objective::Minimize);
        let a = HungarianSolver::new().with_config(minimize).solve(&m).unwrap();
        assert_eq!(a, Assignment::from_columns(&[1, 0]));
    }

    #[test]
    fn test_extreme_spread_with_equal_columns() {
        let m = matrix(vec![vec![1e308, -1e308], vec![1e308, -1e308]]);
        for transform in [CostTransform::Complement, CostTransform::Negate] {
            let a = HungarianSolver::new()
                .with_config(SolverConfig::default().with_transform(transform))
                .solve(&m)
                .unwrap();
            assert!(a.is_perfect_matching(2));
        }
    }

    #[test]
    fn test_non_square() {
        let m = matrix(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(
            HungarianSolver::new().solve(&m).unwrap_err(),
            AssignError::NonSquareMatrix { rows: 2, cols: 3 }
        );
    }

    #[test]
    fn test_empty() {
        let a = HungarianSolver::new().solve(&ScoreMatrix::empty()).unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn test_matches_brute_force_seeded() {
        let mut rng = SmallRng::seed_from_u64(42);
        let brute = BruteForceSolver::new();
        for n in 1..=6 {
            for _ in 0..25 {
                let m = random_matrix(n, &mut rng);
                let fast = HungarianSolver::new().solve(&m).unwrap();
                let exact = brute.solve(&m).unwrap();
                assert!(fast.is_perfect_matching(n));
                assert!(
                    (fast.total_score(&m) - exact.total_score(&m)).abs() < 1e-7,
                    "n={n}: {} vs {}",
                    fast.total_score(&m),
                    exact.total_score(&m)
                );
            }
        }
    }

    #[test]
    fn test_large_matrix_is_perfect() {
        let mut rng = SmallRng::seed_from_u64(3);
        let m = random_matrix(60, &mut rng);
        let a = HungarianSolver::new().solve(&m).unwrap();
        assert!(a.is_perfect_matching(60));
    }

    #[test]
    fn test_deterministic_total() {
        let mut rng = SmallRng::seed_from_u64(11);
        let m = random_matrix(12, &mut rng);
        let first = HungarianSolver::new().solve(&m).unwrap();
        let second = HungarianSolver::new().solve(&m).unwrap();
        assert_eq!(first.total_score(&m), second.total_score(&m));
    }

    fn small_square() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1usize..=6).prop_flat_map(|n| {
            proptest::collection::vec(proptest::collection::vec(-50.0f64..50.0, n), n)
        })
    }

    // Few distinct values, so many optimal matchings tie.
    fn tied_square() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (1usize..=6).prop_flat_map(|n| {
            proptest::collection::vec(
                proptest::collection::vec((0u8..3).prop_map(f64::from), n),
                n,
            )
        })
    }

    proptest! {
        #[test]
        fn prop_optimal_at_small_scale(rows in small_square()) {
            let m = matrix(
                rows.into_iter()
                    .map(|row| row.into_iter().map(|s| s * 1e-12).collect())
                    .collect(),
            );
            let fast = HungarianSolver::new().solve(&m).unwrap();
            let exact = BruteForceSolver::new().solve(&m).unwrap();
            prop_assert!(fast.is_perfect_matching(m.rows()));
            prop_assert!(fast.total_score(&m) >= exact.total_score(&m) - 1e-17);
        }

        #[test]
        fn prop_perfect_and_optimal(rows in small_square()) {
            let m = matrix(rows);
            let n = m.rows();
            let fast = HungarianSolver::new().solve(&m).unwrap();
            let exact = BruteForceSolver::new().solve(&m).unwrap();
            prop_assert!(fast.is_perfect_matching(n));
            prop_assert!(fast.total_score(&m) >= exact.total_score(&m) - 1e-7);
        }

        #[test]
        fn prop_optimal_with_ties(rows in tied_square()) {
            let m = matrix(rows);
            let fast = HungarianSolver::new().solve(&m).unwrap();
            let exact = BruteForceSolver::new().solve(&m).unwrap();
            prop_assert!(fast.is_perfect_matching(m.rows()));
            prop_assert_eq!(fast.total_score(&m), exact.total_score(&m));
        }
    }
}
