//! Result aggregation.
//!
//! Translates a solved assignment on the expanded matrix back into group
//! and work-type terms, with the mean performance per specialist.
//!
//! Rendering is left to the caller; [`Report`] implements `Display` in the
//! classic one-line-per-specialist format for convenience.

mod aggregate;

pub use aggregate::{aggregate, Report, ReportLine};
