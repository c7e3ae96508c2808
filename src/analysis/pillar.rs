//! Third-pillar portfolio aggregation

use crate::projection::{AccountProjection, ProjectionEngine};
use crate::record::{PillarAccount, PillarKind};
use serde::{Deserialize, Serialize};

/// Per-kind account counts and balance totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindSummary {
    pub kind: PillarKind,
    pub count: usize,
    pub current_amount: f64,
}

/// Aggregated view of a third-pillar portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThirdPillarAnalysis {
    /// Per-account projections, in input order
    pub projections: Vec<AccountProjection>,

    /// One summary per account kind, in fixed order (3a bank, 3a insurance, 3b)
    pub by_kind: Vec<KindSummary>,

    /// Number of active accounts
    pub active_accounts: usize,

    /// Total current balance, CHF
    pub total_current_amount: f64,

    /// Total planned annual contribution, CHF
    pub total_annual_contribution: f64,

    /// Total projected balance at retirement, CHF
    pub total_projected_amount: f64,

    /// Total projected annual rent, CHF
    pub total_projected_annual_rent: f64,
}

const ALL_KINDS: [PillarKind; 3] = [
    PillarKind::Pillar3aBank,
    PillarKind::Pillar3aInsurance,
    PillarKind::Pillar3b,
];

/// Project every active account and aggregate the results
///
/// Totals are, by construction, the sums of the independently computed
/// per-account projections.
pub fn analyze_accounts(
    engine: &ProjectionEngine,
    accounts: &[PillarAccount],
    current_age: u8,
) -> ThirdPillarAnalysis {
    let active: Vec<PillarAccount> = accounts.iter().filter(|a| a.is_active).cloned().collect();
    let projections = engine.project_batch(&active, current_age);

    let mut by_kind: Vec<KindSummary> = ALL_KINDS
        .iter()
        .map(|&kind| KindSummary {
            kind,
            count: 0,
            current_amount: 0.0,
        })
        .collect();

    let mut total_current_amount = 0.0;
    let mut total_annual_contribution = 0.0;
    for account in &active {
        total_current_amount += account.current_amount;
        total_annual_contribution += account.annual_contribution;

        // Exhaustive so a new kind cannot silently land in the wrong bucket
        let idx = match account.kind {
            PillarKind::Pillar3aBank => 0,
            PillarKind::Pillar3aInsurance => 1,
            PillarKind::Pillar3b => 2,
        };
        by_kind[idx].count += 1;
        by_kind[idx].current_amount += account.current_amount;
    }

    let total_projected_amount = projections.iter().map(|p| p.projected_amount).sum();
    let total_projected_annual_rent = projections.iter().map(|p| p.projected_annual_rent).sum();

    ThirdPillarAnalysis {
        projections,
        by_kind,
        active_accounts: active.len(),
        total_current_amount,
        total_annual_contribution,
        total_projected_amount,
        total_projected_annual_rent,
    }
}
