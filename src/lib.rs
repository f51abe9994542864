//! Quota-based optimal assignment.
//!
//! Assigns every specialist of several interchangeable groups to one
//! workplace of several work types so that total performance is maximal.
//! Group and work-type quotas are expanded into an individual-level square
//! matrix, which is then solved exactly with the Hungarian method.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Quotas`, `BlockIndex`, `ScoreTable`,
//!   `ScoreMatrix`, `Assignment`, `AssignmentProblem`
//! - **`validation`**: Structural checks (quotas, balance, table shape)
//! - **`expansion`**: Quota expansion into a block-constant N × N matrix
//! - **`solver`**: Hungarian (Kuhn–Munkres) and exhaustive reference solvers
//! - **`report`**: Mapping the matching back to groups and work types
//! - **`planner`**: The expand → solve → aggregate pipeline
//! - **`input`**: Plain-text problem format
//! - **`generate`**: Random balanced instances
//!
//! # Example
//!
//! ```
//! use u_assign::input::parse_problem;
//! use u_assign::planner::plan;
//!
//! let problem = parse_problem("3 2\n1 2 3\n2 4\n0.3 0.9\n0.2 0.8\n0.5 0.3\n").unwrap();
//! let report = plan(&problem).unwrap();
//! assert_eq!(report.allocation(), vec![vec![0, 1], vec![0, 2], vec![2, 1]]);
//! ```
//!
//! # References
//!
//! - Kuhn (1955), "The Hungarian Method for the Assignment Problem"
//! - Munkres (1957), "Algorithms for the Assignment and Transportation Problems"
//! - Burkard, Dell'Amico & Martello (2012), "Assignment Problems", Ch. 4

pub mod error;
pub mod expansion;
pub mod generate;
pub mod input;
pub mod models;
pub mod planner;
pub mod report;
pub mod solver;
pub mod validation;

pub use error::AssignError;
