//! Financial record data structures matching the portal's datastore format
//!
//! Records arrive as immutable snapshots from the persistence layer. The
//! calculation code never mutates them and never holds them beyond a single
//! call. Monetary fields default to zero when absent in the source data, so
//! downstream aggregation never has to handle missing values.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Insurance line of business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsuranceKind {
    /// Mandatory health insurance (LAMal) and supplements
    Health,
    /// Private accident coverage
    Accident,
    /// Life insurance (risk or mixed)
    Life,
    /// Disability rent coverage
    Disability,
    /// Legal protection
    LegalProtection,
    /// Household contents
    Household,
    /// Private liability (RC)
    Liability,
    /// Vehicle (casco or liability)
    Vehicle,
    /// Building insurance
    Building,
    /// Travel and assistance
    Travel,
}

impl InsuranceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceKind::Health => "Health",
            InsuranceKind::Accident => "Accident",
            InsuranceKind::Life => "Life",
            InsuranceKind::Disability => "Disability",
            InsuranceKind::LegalProtection => "LegalProtection",
            InsuranceKind::Household => "Household",
            InsuranceKind::Liability => "Liability",
            InsuranceKind::Vehicle => "Vehicle",
            InsuranceKind::Building => "Building",
            InsuranceKind::Travel => "Travel",
        }
    }
}

/// Coverage bucket for portfolio segmentation
///
/// Every `InsuranceKind` maps to exactly one bucket. Kinds outside the three
/// named lines of coverage land in `Other` rather than being dropped, so
/// per-bucket totals always add up to the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageBucket {
    /// Health and accident coverage
    Health,
    /// Personal protection (life, disability, legal)
    Protection,
    /// Property coverage (household, liability, vehicle, building)
    Property,
    /// Everything else
    Other,
}

impl CoverageBucket {
    /// All buckets in display order
    pub const ALL: [CoverageBucket; 4] = [
        CoverageBucket::Health,
        CoverageBucket::Protection,
        CoverageBucket::Property,
        CoverageBucket::Other,
    ];

    /// Total mapping from insurance kind to bucket
    pub fn from_kind(kind: InsuranceKind) -> Self {
        match kind {
            InsuranceKind::Health | InsuranceKind::Accident => CoverageBucket::Health,
            InsuranceKind::Life | InsuranceKind::Disability | InsuranceKind::LegalProtection => {
                CoverageBucket::Protection
            }
            InsuranceKind::Household
            | InsuranceKind::Liability
            | InsuranceKind::Vehicle
            | InsuranceKind::Building => CoverageBucket::Property,
            InsuranceKind::Travel => CoverageBucket::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageBucket::Health => "Health",
            CoverageBucket::Protection => "Protection",
            CoverageBucket::Property => "Property",
            CoverageBucket::Other => "Other",
        }
    }
}

/// Third-pillar account type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PillarKind {
    /// Tied pillar 3a at a bank
    Pillar3aBank,
    /// Tied pillar 3a via an insurance policy
    Pillar3aInsurance,
    /// Flexible pillar 3b
    Pillar3b,
}

impl PillarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PillarKind::Pillar3aBank => "3a (bank)",
            PillarKind::Pillar3aInsurance => "3a (insurance)",
            PillarKind::Pillar3b => "3b",
        }
    }
}

/// A single insurance contract snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsuranceContract {
    /// Unique contract identifier
    pub id: u32,

    /// Insurer name
    pub insurer: String,

    /// Line of business
    pub kind: InsuranceKind,

    /// Annual premium in CHF
    #[serde(default)]
    pub annual_premium: f64,

    /// Death capital in CHF (life contracts, 0 otherwise)
    #[serde(default)]
    pub death_capital: f64,

    /// Annual disability rent in CHF (0 when not covered)
    #[serde(default)]
    pub disability_rent: f64,

    /// Whether the contract is currently in force
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl InsuranceContract {
    /// Coverage bucket this contract belongs to
    pub fn bucket(&self) -> CoverageBucket {
        CoverageBucket::from_kind(self.kind)
    }
}

/// A single third-pillar account snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarAccount {
    /// Unique account identifier
    pub id: u32,

    /// Bank or insurer holding the account
    pub institution: String,

    /// Account type (3a bank, 3a insurance, 3b)
    pub kind: PillarKind,

    /// Current balance in CHF
    #[serde(default)]
    pub current_amount: f64,

    /// Planned annual contribution in CHF
    #[serde(default)]
    pub annual_contribution: f64,

    /// Assumed annual return in percent (e.g. 2.0 for 2%)
    #[serde(default)]
    pub return_rate_percent: f64,

    /// Whether the account is currently open
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Minimal user profile needed for tax estimation and projections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Date of birth
    pub birth_date: NaiveDate,

    /// Annual taxable income in CHF
    #[serde(default)]
    pub annual_income: f64,

    /// Taxable net wealth in CHF
    #[serde(default)]
    pub taxable_wealth: f64,
}

impl Profile {
    /// Age in whole years at the given reference date
    ///
    /// Calendar-year difference only (month and day are ignored), matching the
    /// portal's convention. Can be off by up to one year around birthdays.
    pub fn age_at(&self, on: NaiveDate) -> u8 {
        let years = on.year() - self.birth_date.year();
        years.clamp(0, u8::MAX as i32) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_mapping_is_total() {
        let kinds = [
            InsuranceKind::Health,
            InsuranceKind::Accident,
            InsuranceKind::Life,
            InsuranceKind::Disability,
            InsuranceKind::LegalProtection,
            InsuranceKind::Household,
            InsuranceKind::Liability,
            InsuranceKind::Vehicle,
            InsuranceKind::Building,
            InsuranceKind::Travel,
        ];
        for kind in kinds {
            assert!(CoverageBucket::ALL.contains(&CoverageBucket::from_kind(kind)));
        }
        assert_eq!(
            CoverageBucket::from_kind(InsuranceKind::Accident),
            CoverageBucket::Health
        );
        assert_eq!(
            CoverageBucket::from_kind(InsuranceKind::Life),
            CoverageBucket::Protection
        );
        assert_eq!(
            CoverageBucket::from_kind(InsuranceKind::Vehicle),
            CoverageBucket::Property
        );
        assert_eq!(
            CoverageBucket::from_kind(InsuranceKind::Travel),
            CoverageBucket::Other
        );
    }

    #[test]
    fn test_age_whole_year_convention() {
        let profile = Profile {
            birth_date: NaiveDate::from_ymd_opt(1985, 12, 31).unwrap(),
            annual_income: 0.0,
            taxable_wealth: 0.0,
        };

        // Year difference only: counts as 40 even before the December birthday
        let on = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(profile.age_at(on), 40);

        // Reference before birth year clamps to 0
        let before = NaiveDate::from_ymd_opt(1980, 6, 1).unwrap();
        assert_eq!(profile.age_at(before), 0);
    }

    #[test]
    fn test_contract_defaults_from_json() {
        let json = r#"{"id": 7, "insurer": "Helsana", "kind": "Health"}"#;
        let contract: InsuranceContract = serde_json::from_str(json).unwrap();
        assert_eq!(contract.annual_premium, 0.0);
        assert_eq!(contract.death_capital, 0.0);
        assert!(contract.is_active);
    }
}
