//! Combined tax estimate for a profile snapshot

use crate::record::Profile;
use crate::tax::TaxEstimator;
use serde::{Deserialize, Serialize};

/// Estimated cantonal taxes for one profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxAnalysis {
    /// Taxable income used for the estimate, CHF
    pub taxable_income: f64,

    /// Taxable net wealth used for the estimate, CHF
    pub taxable_wealth: f64,

    /// Estimated annual income tax, CHF
    pub income_tax: f64,

    /// Estimated annual wealth tax, CHF
    pub wealth_tax: f64,

    /// Income plus wealth tax, CHF
    pub total_tax: f64,
}

/// Estimate income and wealth tax for a profile
pub fn estimate_taxes(estimator: &TaxEstimator, profile: &Profile) -> TaxAnalysis {
    let income_tax = estimator.income_tax(profile.annual_income);
    let wealth_tax = estimator.wealth_tax(profile.taxable_wealth);

    TaxAnalysis {
        taxable_income: profile.annual_income,
        taxable_wealth: profile.taxable_wealth,
        income_tax,
        wealth_tax,
        total_tax: income_tax + wealth_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn profile(income: f64, wealth: f64) -> Profile {
        Profile {
            birth_date: NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
            annual_income: income,
            taxable_wealth: wealth,
        }
    }

    #[test]
    fn test_combined_estimate() {
        let est = TaxEstimator::vaud_2024();
        let analysis = estimate_taxes(&est, &profile(10_000.0, 50_000.0));

        assert_eq!(analysis.income_tax, 313.0);
        assert_eq!(analysis.wealth_tax, 40.0);
        assert_eq!(analysis.total_tax, 353.0);
    }

    #[test]
    fn test_wealth_below_exemption() {
        let est = TaxEstimator::vaud_2024();
        let analysis = estimate_taxes(&est, &profile(10_000.0, 30_000.0));

        assert_eq!(analysis.wealth_tax, 0.0);
        assert_eq!(analysis.total_tax, analysis.income_tax);
    }
}
