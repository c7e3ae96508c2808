//! Cantonal tax estimation based on piecewise-linear bracket tables

mod bracket;
mod estimator;
pub mod tables;

pub use bracket::{Bracket, BracketTable, TableError};
pub use estimator::{TaxEstimator, DEFAULT_WEALTH_EXEMPTION};
