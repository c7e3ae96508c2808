//! Patrimoine - calculation engine for a Swiss personal-finance portal
//!
//! This library provides:
//! - Cantonal tax estimation over piecewise-linear bracket tables
//! - Third-pillar compound projections with annuity-style rent conversion
//! - Insurance and retirement portfolio aggregation
//! - A pre-loaded runner for full household analyses
//!
//! All calculations are pure and synchronous: authentication, persistence,
//! and presentation live outside this crate and pass in immutable snapshots.

pub mod analysis;
pub mod projection;
pub mod record;
pub mod runner;
pub mod tax;

// Re-export commonly used types
pub use projection::{AccountProjection, ProjectionConfig, ProjectionEngine};
pub use record::{InsuranceContract, PillarAccount, Profile};
pub use runner::{AnalysisRunner, HouseholdAnalysis};
pub use tax::{BracketTable, TaxEstimator};
