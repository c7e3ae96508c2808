//! Insurance portfolio aggregation

use crate::record::{CoverageBucket, InsuranceContract};
use serde::{Deserialize, Serialize};

/// Per-bucket contract counts and premium totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketSummary {
    pub bucket: CoverageBucket,
    pub count: usize,
    pub annual_premium: f64,
}

/// Aggregated view of an insurance portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceAnalysis {
    /// One summary per coverage bucket, in `CoverageBucket::ALL` order
    pub buckets: Vec<BucketSummary>,

    /// Number of active contracts
    pub active_contracts: usize,

    /// Total annual premium across active contracts, CHF
    pub total_annual_premium: f64,

    /// Total insured death capital, CHF
    pub total_death_capital: f64,

    /// Total annual disability rent, CHF
    pub total_disability_rent: f64,
}

/// Aggregate active contracts into per-bucket and grand totals
///
/// Callers are expected to pass active-only snapshots; inactive contracts
/// are skipped here as well so the invariant holds at the API boundary.
pub fn analyze_contracts(contracts: &[InsuranceContract]) -> InsuranceAnalysis {
    let mut buckets: Vec<BucketSummary> = CoverageBucket::ALL
        .iter()
        .map(|&bucket| BucketSummary {
            bucket,
            count: 0,
            annual_premium: 0.0,
        })
        .collect();

    let mut active_contracts = 0;
    let mut total_annual_premium = 0.0;
    let mut total_death_capital = 0.0;
    let mut total_disability_rent = 0.0;

    for contract in contracts.iter().filter(|c| c.is_active) {
        active_contracts += 1;
        total_annual_premium += contract.annual_premium;
        total_death_capital += contract.death_capital;
        total_disability_rent += contract.disability_rent;

        let idx = CoverageBucket::ALL
            .iter()
            .position(|&b| b == contract.bucket())
            .unwrap_or(CoverageBucket::ALL.len() - 1);
        buckets[idx].count += 1;
        buckets[idx].annual_premium += contract.annual_premium;
    }

    InsuranceAnalysis {
        buckets,
        active_contracts,
        total_annual_premium,
        total_death_capital,
        total_disability_rent,
    }
}
