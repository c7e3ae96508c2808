//! Piecewise-linear bracket tables
//!
//! A bracket table is an ordered list of (threshold, cumulative tax) pairs
//! defining a continuous, monotonically non-decreasing tax curve:
//! - Below the first threshold the curve runs linearly through the origin.
//! - Between two rows the tax is interpolated linearly.
//! - Above the last threshold the curve extends at the slope of the final
//!   bracket (no cap).
//!
//! Tables are validated once at construction so that lookups are total: a
//! well-formed table can never produce NaN or infinity for finite input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Table validation failure, raised at construction time
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("bracket table needs at least 2 rows, got {0}")]
    TooFewRows(usize),

    #[error("bracket values must be finite (row {row})")]
    NonFinite { row: usize },

    #[error("bracket threshold must be positive (row {row}: {threshold})")]
    NonPositiveThreshold { row: usize, threshold: f64 },

    #[error("bracket thresholds must be strictly increasing (row {row}: {prev} then {next})")]
    NonIncreasingThreshold { row: usize, prev: f64, next: f64 },

    #[error("cumulative tax must be non-decreasing (row {row}: {prev} then {next})")]
    DecreasingTax { row: usize, prev: f64, next: f64 },
}

/// One table row: cumulative tax due at a taxable-base threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    /// Taxable base in CHF
    pub threshold: f64,
    /// Cumulative tax due at the threshold, in CHF
    pub tax: f64,
}

/// Validated bracket table for one jurisdiction and year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketTable {
    rows: Vec<Bracket>,
}

impl BracketTable {
    /// Build a table from rows, sorting by threshold and validating
    ///
    /// Rows are sorted defensively before validation, so callers may supply
    /// them in any order. Duplicate thresholds (zero-width intervals) are a
    /// configuration defect and rejected here.
    pub fn new(mut rows: Vec<Bracket>) -> Result<Self, TableError> {
        rows.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));

        if rows.len() < 2 {
            return Err(TableError::TooFewRows(rows.len()));
        }
        for (row, bracket) in rows.iter().enumerate() {
            if !bracket.threshold.is_finite() || !bracket.tax.is_finite() {
                return Err(TableError::NonFinite { row });
            }
            if bracket.threshold <= 0.0 {
                return Err(TableError::NonPositiveThreshold {
                    row,
                    threshold: bracket.threshold,
                });
            }
        }
        for row in 1..rows.len() {
            let (prev, next) = (rows[row - 1], rows[row]);
            if next.threshold <= prev.threshold {
                return Err(TableError::NonIncreasingThreshold {
                    row,
                    prev: prev.threshold,
                    next: next.threshold,
                });
            }
            if next.tax < prev.tax {
                return Err(TableError::DecreasingTax {
                    row,
                    prev: prev.tax,
                    next: next.tax,
                });
            }
        }

        Ok(Self { rows })
    }

    /// Build a table from (threshold, tax) pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, TableError> {
        Self::new(
            pairs
                .iter()
                .map(|&(threshold, tax)| Bracket { threshold, tax })
                .collect(),
        )
    }

    /// The validated rows, sorted by threshold
    pub fn rows(&self) -> &[Bracket] {
        &self.rows
    }

    /// Cumulative tax at a given taxable base
    ///
    /// Pure and deterministic; returns a finite value for any finite input.
    /// Non-positive bases owe nothing.
    pub fn interpolate(&self, value: f64) -> f64 {
        if value <= 0.0 {
            return 0.0;
        }

        let first = self.rows[0];
        if value <= first.threshold {
            // Curve passes through (0, 0) at the first bracket's implied rate
            return value * first.tax / first.threshold;
        }

        let last = self.rows[self.rows.len() - 1];
        if value >= last.threshold {
            // Extend at the final bracket's marginal rate, unbounded above
            let prev = self.rows[self.rows.len() - 2];
            let slope = (last.tax - prev.tax) / (last.threshold - prev.threshold);
            return last.tax + (value - last.threshold) * slope;
        }

        // First row whose threshold reaches the value; at least row 1 exists
        let idx = self.rows.partition_point(|b| b.threshold < value);
        let lo = self.rows[idx - 1];
        let hi = self.rows[idx];
        let ratio = (value - lo.threshold) / (hi.threshold - lo.threshold);
        lo.tax + ratio * (hi.tax - lo.tax)
    }
}
