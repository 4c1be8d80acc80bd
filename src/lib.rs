//! Descriptive statistics for free-form lists of numbers.
//!
//! Text is parsed into a [`NumberList`], summarized by [`calculate`] and
//! rendered through a [`Report`].

pub mod calculate;
pub mod parser;
pub mod report;
pub mod stats;

pub use calculate::{calculate, calculate_with_precision, Outcome, Precision};
pub use parser::{parse, NumberList};
pub use report::{Field, OutputFormat, Report};
pub use stats::{Mode, StatisticsResult, VarianceMode};
