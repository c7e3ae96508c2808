//! Aggregation of record snapshots into per-domain analysis results
//!
//! Results are ephemeral: recomputed on each request from the current
//! snapshots, never persisted, no identity.

mod insurance;
mod pillar;
mod tax;

pub use insurance::{analyze_contracts, BucketSummary, InsuranceAnalysis};
pub use pillar::{analyze_accounts, KindSummary, ThirdPillarAnalysis};
pub use tax::{estimate_taxes, TaxAnalysis};
