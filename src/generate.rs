//! Random problem instances.
//!
//! Produces balanced quota problems for testing and benchmarking: group
//! sizes are drawn first, then their total is split across work types so
//! that specialists and workplaces always match.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use u_assign::generate::{generate_problem, GeneratorConfig};
//!
//! let mut rng = SmallRng::seed_from_u64(1);
//! let config = GeneratorConfig::default().with_groups(4).with_work_types(3);
//! let problem = generate_problem(&config, &mut rng).unwrap();
//! assert_eq!(problem.group_count(), 4);
//! assert_eq!(problem.group_counts().total(), problem.work_counts().total());
//! ```

use rand::Rng;

use crate::error::AssignError;
use crate::models::AssignmentProblem;

/// Shape of generated problems.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of groups (m).
    pub groups: usize,
    /// Requested number of work types (n). Clamped to the specialist total.
    pub work_types: usize,
    /// Largest specialist count per group (at least 1).
    pub max_group_size: usize,
    /// Scores are drawn uniformly from `[min, max)`.
    pub score_range: (f64, f64),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            groups: 3,
            work_types: 2,
            max_group_size: 4,
            score_range: (0.0, 1.0),
        }
    }
}

impl GeneratorConfig {
    /// Sets the number of groups.
    pub fn with_groups(mut self, groups: usize) -> Self {
        self.groups = groups;
        self
    }

    /// Sets the requested number of work types.
    pub fn with_work_types(mut self, work_types: usize) -> Self {
        self.work_types = work_types;
        self
    }

    /// Sets the largest group size.
    pub fn with_max_group_size(mut self, max_group_size: usize) -> Self {
        self.max_group_size = max_group_size;
        self
    }

    /// Sets the score range.
    pub fn with_score_range(mut self, min: f64, max: f64) -> Self {
        self.score_range = (min, max);
        self
    }
}

/// Generates a random balanced problem.
///
/// # Errors
/// Structural errors when the configuration asks for zero groups or zero
/// work types; `NonFiniteScore` if the score range is not finite.
pub fn generate_problem<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<AssignmentProblem, AssignError> {
    let max_size = config.max_group_size.max(1);
    let group_counts: Vec<usize> = (0..config.groups)
        .map(|_| rng.random_range(1..=max_size))
        .collect();
    let total: usize = group_counts.iter().sum();

    let work_types = config.work_types.min(total);
    let work_counts = split_total(total, work_types, rng);

    let (low, high) = config.score_range;
    let scores: Vec<Vec<f64>> = (0..config.groups)
        .map(|_| {
            (0..work_types)
                .map(|_| draw_score(low, high, rng))
                .collect()
        })
        .collect();

    AssignmentProblem::new(group_counts, work_counts, scores)
}

/// Splits `total` into `parts` positive counts.
fn split_total<R: Rng>(total: usize, parts: usize, rng: &mut R) -> Vec<usize> {
    if parts == 0 {
        return Vec::new();
    }
    let mut counts = vec![1; parts];
    for _ in parts..total {
        counts[rng.random_range(0..parts)] += 1;
    }
    counts
}

fn draw_score<R: Rng>(low: f64, high: f64, rng: &mut R) -> f64 {
    if high > low {
        low + (high - low) * rng.random::<f64>()
    } else {
        low
    }
}
