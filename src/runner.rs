//! Analysis runner for full household snapshots
//!
//! Bundles a pre-built tax estimator and projection engine so request
//! handlers can run many analyses without rebuilding tables each time.

use crate::analysis::{
    analyze_accounts, analyze_contracts, estimate_taxes, InsuranceAnalysis, TaxAnalysis,
    ThirdPillarAnalysis,
};
use crate::projection::{ProjectionConfig, ProjectionEngine};
use crate::record::{InsuranceContract, PillarAccount, Profile};
use crate::tax::TaxEstimator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Complete per-request analysis of a household's records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdAnalysis {
    /// Age used for the projections, whole years
    pub age: u8,
    pub tax: TaxAnalysis,
    pub insurance: InsuranceAnalysis,
    pub third_pillar: ThirdPillarAnalysis,
}

/// Pre-loaded runner combining estimator and projection engine
#[derive(Debug, Clone)]
pub struct AnalysisRunner {
    estimator: TaxEstimator,
    engine: ProjectionEngine,
}

impl AnalysisRunner {
    /// Runner with the embedded Vaud 2024 tables and default projection config
    pub fn new() -> Self {
        Self {
            estimator: TaxEstimator::vaud_2024(),
            engine: ProjectionEngine::default(),
        }
    }

    /// Runner with custom estimator and projection config
    pub fn with_parts(estimator: TaxEstimator, config: ProjectionConfig) -> Self {
        Self {
            estimator,
            engine: ProjectionEngine::new(config),
        }
    }

    /// Analyze one household snapshot as of a reference date
    pub fn analyze(
        &self,
        profile: &Profile,
        contracts: &[InsuranceContract],
        accounts: &[PillarAccount],
        on: NaiveDate,
    ) -> HouseholdAnalysis {
        let age = profile.age_at(on);
        log::debug!(
            "analyzing household: age {}, {} contracts, {} accounts",
            age,
            contracts.len(),
            accounts.len()
        );

        HouseholdAnalysis {
            age,
            tax: estimate_taxes(&self.estimator, profile),
            insurance: analyze_contracts(contracts),
            third_pillar: analyze_accounts(&self.engine, accounts, age),
        }
    }

    pub fn estimator(&self) -> &TaxEstimator {
        &self.estimator
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}

impl Default for AnalysisRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{InsuranceKind, PillarKind};

    #[test]
    fn test_full_household_analysis() {
        let runner = AnalysisRunner::new();

        let profile = Profile {
            birth_date: NaiveDate::from_ymd_opt(1962, 3, 1).unwrap(),
            annual_income: 10_000.0,
            taxable_wealth: 50_000.0,
        };
        let contracts = vec![InsuranceContract {
            id: 1,
            insurer: "Helsana".to_string(),
            kind: InsuranceKind::Health,
            annual_premium: 4_800.0,
            death_capital: 0.0,
            disability_rent: 0.0,
            is_active: true,
        }];
        let accounts = vec![PillarAccount {
            id: 1,
            institution: "BCV".to_string(),
            kind: PillarKind::Pillar3aBank,
            current_amount: 1_000.0,
            annual_contribution: 500.0,
            return_rate_percent: 2.0,
            is_active: true,
        }];

        // Born 1962, analyzed in 2025: age 63, two years to retirement
        let on = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let analysis = runner.analyze(&profile, &contracts, &accounts, on);

        assert_eq!(analysis.age, 63);
        assert_eq!(analysis.tax.total_tax, 353.0);
        assert_eq!(analysis.insurance.total_annual_premium, 4_800.0);
        assert_eq!(analysis.third_pillar.projections[0].years_to_retirement, 2);
        assert!((analysis.third_pillar.total_projected_amount - 2_050.40).abs() < 1e-9);
    }
}
