//! Assignment domain models.
//!
//! Provides the data types shared by the expander, the solver, and the
//! report aggregator.
//!
//! # Domain Mappings
//!
//! | u-assign | Staffing | Dispatch | Manufacturing |
//! |----------|----------|----------|---------------|
//! | Group | Specialist pool | Driver class | Operator crew |
//! | Work type | Job category | Route type | Station type |
//! | Score | Performance | Revenue | Throughput |

mod assignment;
mod matrix;
mod problem;
mod quota;
mod score_table;

pub use assignment::{AssignedPair, Assignment};
pub use matrix::ScoreMatrix;
pub use problem::AssignmentProblem;
pub use quota::{BlockIndex, Quotas};
pub use score_table::ScoreTable;
