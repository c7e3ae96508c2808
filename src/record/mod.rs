//! Financial record snapshots and loaders

mod data;
pub mod loader;

pub use data::{
    CoverageBucket, InsuranceContract, InsuranceKind, PillarAccount, PillarKind, Profile,
};
pub use loader::{load_accounts, load_contracts};
