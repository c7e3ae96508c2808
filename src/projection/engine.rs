//! Compound growth projection to retirement
//!
//! Models an ordinary annuity: each projected year the balance compounds at
//! the account's assumed return rate, then the annual contribution is added
//! at year end. The projected lump sum is converted to an annual rent by
//! dividing over a fixed payout horizon.

use crate::record::PillarAccount;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default retirement age (Swiss reference age)
pub const DEFAULT_RETIREMENT_AGE: u8 = 65;

/// Fixed payout horizon for rent conversion, in years
///
/// A portal display convention, not an actuarial annuity factor.
pub const DEFAULT_RENT_YEARS: u32 = 20;

/// Configuration for a projection run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Age at which contributions stop and payout begins
    pub retirement_age: u8,

    /// Years over which the projected amount is spread into a rent
    ///
    /// Must be at least 1; the engine normalizes 0 to 1 so the rent
    /// conversion can never divide by zero.
    pub rent_years: u32,

    /// Whether to record per-year detail rows
    pub detailed_output: bool,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            retirement_age: DEFAULT_RETIREMENT_AGE,
            rent_years: DEFAULT_RENT_YEARS,
            detailed_output: false,
        }
    }
}

/// One projected year of an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRow {
    /// Projection year, 1-indexed
    pub year: u32,

    /// Balance at the start of the year
    pub start_amount: f64,

    /// Compound growth credited during the year
    pub growth: f64,

    /// Contribution added at year end
    pub contribution: f64,

    /// Balance at the end of the year
    pub end_amount: f64,
}

/// Projection result for a single account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProjection {
    /// Account this projection belongs to
    pub account_id: u32,

    /// Whole years projected (0 when already at or past retirement)
    pub years_to_retirement: u32,

    /// Balance at retirement
    pub projected_amount: f64,

    /// Projected amount spread over the rent horizon
    pub projected_annual_rent: f64,

    /// Per-year detail, empty unless detailed output was requested
    pub rows: Vec<YearRow>,
}

/// Projection engine for third-pillar accounts
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create an engine with the given config
    ///
    /// A zero rent horizon is normalized to 1 year.
    pub fn new(mut config: ProjectionConfig) -> Self {
        config.rent_years = config.rent_years.max(1);
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Whole years from current age to retirement, clamped at zero
    pub fn years_to_retirement(&self, current_age: u8) -> u32 {
        u32::from(self.config.retirement_age.saturating_sub(current_age))
    }

    /// Project a single account from the holder's current age to retirement
    pub fn project_account(&self, account: &PillarAccount, current_age: u8) -> AccountProjection {
        let years = self.years_to_retirement(current_age);
        let rate = account.return_rate_percent / 100.0;

        let mut amount = account.current_amount;
        let mut rows = Vec::new();

        for year in 1..=years {
            let start_amount = amount;
            let growth = amount * rate;
            amount = amount + growth + account.annual_contribution;

            if self.config.detailed_output {
                rows.push(YearRow {
                    year,
                    start_amount,
                    growth,
                    contribution: account.annual_contribution,
                    end_amount: amount,
                });
            }
        }

        AccountProjection {
            account_id: account.id,
            years_to_retirement: years,
            projected_amount: amount,
            projected_annual_rent: amount / self.config.rent_years as f64,
            rows,
        }
    }

    /// Project many accounts in parallel
    ///
    /// Each projection is independent and side-effect free, so the batch
    /// preserves input order while computing on the rayon pool.
    pub fn project_batch(
        &self,
        accounts: &[PillarAccount],
        current_age: u8,
    ) -> Vec<AccountProjection> {
        accounts
            .par_iter()
            .map(|account| self.project_account(account, current_age))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PillarKind;
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert, proptest};

    fn account(current_amount: f64, annual_contribution: f64, rate: f64) -> PillarAccount {
        PillarAccount {
            id: 1,
            institution: "BCV".to_string(),
            kind: PillarKind::Pillar3aBank,
            current_amount,
            annual_contribution,
            return_rate_percent: rate,
            is_active: true,
        }
    }

    #[test]
    fn test_zero_years_is_identity() {
        let engine = ProjectionEngine::default();
        let acc = account(12_345.67, 7_056.0, 2.5);

        let projection = engine.project_account(&acc, 65);
        assert_eq!(projection.years_to_retirement, 0);
        assert_eq!(projection.projected_amount, 12_345.67);

        // Past retirement clamps to zero years, never negative
        let projection = engine.project_account(&acc, 70);
        assert_eq!(projection.years_to_retirement, 0);
        assert_eq!(projection.projected_amount, 12_345.67);
    }

    #[test]
    fn test_two_year_hand_computed() {
        let engine = ProjectionEngine::default();
        let acc = account(1_000.0, 500.0, 2.0);

        // Year 1: 1000 * 1.02 + 500 = 1520
        // Year 2: 1520 * 1.02 + 500 = 2050.40
        let projection = engine.project_account(&acc, 63);
        assert_eq!(projection.years_to_retirement, 2);
        assert_relative_eq!(projection.projected_amount, 2_050.40, max_relative = 1e-12);
        assert_relative_eq!(
            projection.projected_annual_rent,
            2_050.40 / 20.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_contribution_at_end_of_year() {
        // One year, zero balance: the contribution earns nothing
        let engine = ProjectionEngine::default();
        let acc = account(0.0, 1_000.0, 5.0);

        let projection = engine.project_account(&acc, 64);
        assert_eq!(projection.projected_amount, 1_000.0);
    }

    #[test]
    fn test_detailed_rows() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            detailed_output: true,
            ..ProjectionConfig::default()
        });
        let acc = account(1_000.0, 500.0, 2.0);

        let projection = engine.project_account(&acc, 63);
        assert_eq!(projection.rows.len(), 2);
        assert_eq!(projection.rows[0].start_amount, 1_000.0);
        assert_relative_eq!(projection.rows[0].growth, 20.0, max_relative = 1e-12);
        assert_relative_eq!(projection.rows[1].end_amount, 2_050.40, max_relative = 1e-12);
        assert_eq!(projection.rows[1].end_amount, projection.projected_amount);
    }

    #[test]
    fn test_zero_rent_years_is_normalized() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            rent_years: 0,
            ..ProjectionConfig::default()
        });
        assert_eq!(engine.config().rent_years, 1);

        let projection = engine.project_account(&account(1_000.0, 500.0, 2.0), 63);
        assert!(projection.projected_annual_rent.is_finite());
        assert_eq!(projection.projected_annual_rent, projection.projected_amount);
    }

    #[test]
    fn test_batch_matches_single() {
        let engine = ProjectionEngine::default();
        let accounts = vec![
            account(1_000.0, 500.0, 2.0),
            account(2_000.0, 0.0, 2.0),
            account(0.0, 1_000.0, 2.0),
        ];

        let batch = engine.project_batch(&accounts, 63);
        assert_eq!(batch.len(), 3);
        for (acc, projection) in accounts.iter().zip(&batch) {
            let single = engine.project_account(acc, 63);
            assert_eq!(projection.projected_amount, single.projected_amount);
        }
    }

    proptest! {
        #[test]
        fn prop_projection_grows_with_horizon(
            current_amount in 1.0f64..1_000_000.0,
            contribution in 0.0f64..10_000.0,
            rate in 0.1f64..10.0,
            age in 30u8..65,
        ) {
            let engine = ProjectionEngine::default();
            let acc = account(current_amount, contribution, rate);

            // One more year to retirement strictly increases the projection
            let shorter = engine.project_account(&acc, age + 1);
            let longer = engine.project_account(&acc, age);
            prop_assert!(longer.projected_amount > shorter.projected_amount);
        }

        #[test]
        fn prop_projection_is_finite(
            current_amount in 0.0f64..10_000_000.0,
            contribution in 0.0f64..100_000.0,
            rate in -10.0f64..15.0,
            age in 0u8..100,
        ) {
            let engine = ProjectionEngine::default();
            let acc = account(current_amount, contribution, rate);
            let projection = engine.project_account(&acc, age);
            prop_assert!(projection.projected_amount.is_finite());
            prop_assert!(projection.projected_annual_rent.is_finite());
        }
    }
}
