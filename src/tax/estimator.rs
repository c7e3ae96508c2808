//! Tax estimator: policy wrapper over the bracket interpolation
//!
//! Holds one income table and one wealth table for a jurisdiction/year plus
//! the wealth exemption floor. Switching canton or year means substituting
//! tables, never touching the algorithm.

use super::bracket::BracketTable;
use super::tables;
use std::error::Error;
use std::path::Path;

/// Net wealth below this owes no wealth tax (CHF)
pub const DEFAULT_WEALTH_EXEMPTION: f64 = 50_000.0;

/// Cantonal tax estimator for one jurisdiction and year
#[derive(Debug, Clone)]
pub struct TaxEstimator {
    income_table: BracketTable,
    wealth_table: BracketTable,
    wealth_exemption: f64,
}

impl TaxEstimator {
    /// Create an estimator from injected tables with the default exemption
    pub fn new(income_table: BracketTable, wealth_table: BracketTable) -> Self {
        Self {
            income_table,
            wealth_table,
            wealth_exemption: DEFAULT_WEALTH_EXEMPTION,
        }
    }

    /// Create an estimator with a custom wealth exemption floor
    pub fn with_exemption(
        income_table: BracketTable,
        wealth_table: BracketTable,
        wealth_exemption: f64,
    ) -> Self {
        Self {
            income_table,
            wealth_table,
            wealth_exemption,
        }
    }

    /// Estimator for the embedded Vaud 2024 tables
    pub fn vaud_2024() -> Self {
        Self::new(tables::vaud_2024_income(), tables::vaud_2024_wealth())
    }

    /// Load estimator tables from a directory containing income.csv and wealth.csv
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let income_table = tables::load_table(path.join("income.csv"))?;
        let wealth_table = tables::load_table(path.join("wealth.csv"))?;
        Ok(Self::new(income_table, wealth_table))
    }

    /// Estimated annual income tax in CHF
    pub fn income_tax(&self, income: f64) -> f64 {
        self.income_table.interpolate(income)
    }

    /// Estimated annual wealth tax in CHF
    pub fn wealth_tax(&self, wealth: f64) -> f64 {
        if wealth < self.wealth_exemption {
            return 0.0;
        }
        self.wealth_table.interpolate(wealth)
    }

    pub fn income_table(&self) -> &BracketTable {
        &self.income_table
    }

    pub fn wealth_table(&self) -> &BracketTable {
        &self.wealth_table
    }

    pub fn wealth_exemption(&self) -> f64 {
        self.wealth_exemption
    }
}
