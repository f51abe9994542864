//! Exhaustive reference solver.
//!
//! Enumerates every permutation with Heap's algorithm and keeps the best.
//! O(n · n!), so only usable for tiny matrices; its purpose is to check
//! the Hungarian solver.
//!
//! # Reference
//! Heap (1963), "Permutations by Interchanges", The Computer Journal 6(3)

use super::{ensure_square, AssignmentSolver, SolverConfig};
use crate::error::AssignError;
use crate::models::{Assignment, ScoreMatrix};

/// Largest matrix side the exhaustive solver accepts by default.
pub const BRUTE_FORCE_LIMIT: usize = 10;

/// Exhaustive permutation search.
///
/// Returns the first best permutation in Heap's enumeration order.
#[derive(Debug, Clone)]
pub struct BruteForceSolver {
    config: SolverConfig,
    limit: usize,
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self {
            config: SolverConfig::default(),
            limit: BRUTE_FORCE_LIMIT,
        }
    }
}

impl BruteForceSolver {
    /// Creates a maximizing solver with the default size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration. Only the objective is used.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the largest accepted matrix side.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl AssignmentSolver for BruteForceSolver {
    fn name(&self) -> &'static str {
        "BruteForce"
    }

    fn solve(&self, matrix: &ScoreMatrix) -> Result<Assignment, AssignError> {
        let n = ensure_square(matrix)?;
        if n > self.limit {
            return Err(AssignError::ProblemTooLarge {
                size: n,
                limit: self.limit,
            });
        }
        if n == 0 {
            return Ok(Assignment::new());
        }

        let total = |perm: &[usize]| -> f64 {
            perm.iter()
                .enumerate()
                .map(|(row, &col)| matrix[(row, col)])
                .sum()
        };

        let mut perm: Vec<usize> = (0..n).collect();
        let mut best = perm.clone();
        let mut best_total = total(&perm);

        // Iterative Heap's algorithm.
        let mut counters = vec![0usize; n];
        let mut i = 1;
        while i < n {
            if counters[i] < i {
                if i % 2 == 0 {
                    perm.swap(0, i);
                } else {
                    perm.swap(counters[i], i);
                }
                let candidate = total(&perm);
                if self.config.objective.prefers(candidate, best_total) {
                    best_total = candidate;
                    best.copy_from_slice(&perm);
                }
                counters[i] += 1;
                i = 1;
            } else {
                counters[i] = 0;
                i += 1;
            }
        }

        Ok(Assignment::from_columns(&best))
    }
}
