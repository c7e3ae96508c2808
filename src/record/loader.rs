//! Load contract and account snapshots from CSV or JSON exports
//!
//! Validation happens here, at the construction boundary: unknown type tags
//! and negative monetary amounts are rejected row by row, so the calculation
//! code downstream only ever sees well-formed records.

use super::{InsuranceContract, InsuranceKind, PillarAccount, PillarKind};
use csv::Reader;
use std::error::Error;
use std::path::Path;

fn parse_insurance_kind(tag: &str) -> Result<InsuranceKind, Box<dyn Error>> {
    match tag {
        "Health" => Ok(InsuranceKind::Health),
        "Accident" => Ok(InsuranceKind::Accident),
        "Life" => Ok(InsuranceKind::Life),
        "Disability" => Ok(InsuranceKind::Disability),
        "LegalProtection" => Ok(InsuranceKind::LegalProtection),
        "Household" => Ok(InsuranceKind::Household),
        "Liability" => Ok(InsuranceKind::Liability),
        "Vehicle" => Ok(InsuranceKind::Vehicle),
        "Building" => Ok(InsuranceKind::Building),
        "Travel" => Ok(InsuranceKind::Travel),
        other => Err(format!("Unknown insurance kind: {}", other).into()),
    }
}

fn parse_pillar_kind(tag: &str) -> Result<PillarKind, Box<dyn Error>> {
    match tag {
        "3aBank" => Ok(PillarKind::Pillar3aBank),
        "3aInsurance" => Ok(PillarKind::Pillar3aInsurance),
        "3b" => Ok(PillarKind::Pillar3b),
        other => Err(format!("Unknown pillar kind: {}", other).into()),
    }
}

fn check_return_rate(rate: f64) -> Result<f64, Box<dyn Error>> {
    if !rate.is_finite() || rate <= -100.0 {
        return Err(format!(
            "ReturnRatePercent must be a finite rate above -100, got {}",
            rate
        )
        .into());
    }
    Ok(rate)
}

fn check_non_negative(field: &str, value: f64) -> Result<f64, Box<dyn Error>> {
    if !value.is_finite() {
        return Err(format!("{} must be finite, got {}", field, value).into());
    }
    if value < 0.0 {
        return Err(format!("{} must be non-negative, got {}", field, value).into());
    }
    Ok(value)
}

/// Raw CSV row matching the portal's contract export columns
#[derive(Debug, serde::Deserialize)]
struct ContractRow {
    #[serde(rename = "ContractID")]
    id: u32,
    #[serde(rename = "Insurer")]
    insurer: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "AnnualPremium", default)]
    annual_premium: f64,
    #[serde(rename = "DeathCapital", default)]
    death_capital: f64,
    #[serde(rename = "DisabilityRent", default)]
    disability_rent: f64,
    #[serde(rename = "Active", default = "default_active")]
    is_active: bool,
}

/// Raw CSV row matching the portal's third-pillar export columns
#[derive(Debug, serde::Deserialize)]
struct AccountRow {
    #[serde(rename = "AccountID")]
    id: u32,
    #[serde(rename = "Institution")]
    institution: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "CurrentAmount", default)]
    current_amount: f64,
    #[serde(rename = "AnnualContribution", default)]
    annual_contribution: f64,
    #[serde(rename = "ReturnRatePercent", default)]
    return_rate_percent: f64,
    #[serde(rename = "Active", default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ContractRow {
    fn to_contract(self) -> Result<InsuranceContract, Box<dyn Error>> {
        Ok(InsuranceContract {
            id: self.id,
            kind: parse_insurance_kind(&self.kind)?,
            annual_premium: check_non_negative("AnnualPremium", self.annual_premium)?,
            death_capital: check_non_negative("DeathCapital", self.death_capital)?,
            disability_rent: check_non_negative("DisabilityRent", self.disability_rent)?,
            insurer: self.insurer,
            is_active: self.is_active,
        })
    }
}

impl AccountRow {
    fn to_account(self) -> Result<PillarAccount, Box<dyn Error>> {
        Ok(PillarAccount {
            id: self.id,
            kind: parse_pillar_kind(&self.kind)?,
            current_amount: check_non_negative("CurrentAmount", self.current_amount)?,
            annual_contribution: check_non_negative("AnnualContribution", self.annual_contribution)?,
            return_rate_percent: check_return_rate(self.return_rate_percent)?,
            institution: self.institution,
            is_active: self.is_active,
        })
    }
}

/// Load all insurance contracts from a CSV file
pub fn load_contracts<P: AsRef<Path>>(path: P) -> Result<Vec<InsuranceContract>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    collect_contracts(reader)
}

/// Load contracts from any reader (e.g., string buffer, network stream)
pub fn load_contracts_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<InsuranceContract>, Box<dyn Error>> {
    collect_contracts(Reader::from_reader(reader))
}

fn collect_contracts<R: std::io::Read>(
    mut reader: Reader<R>,
) -> Result<Vec<InsuranceContract>, Box<dyn Error>> {
    let mut contracts = Vec::new();
    for result in reader.deserialize() {
        let row: ContractRow = result?;
        contracts.push(row.to_contract()?);
    }
    Ok(contracts)
}

/// Load all third-pillar accounts from a CSV file
pub fn load_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<PillarAccount>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    collect_accounts(reader)
}

/// Load accounts from any reader
pub fn load_accounts_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<PillarAccount>, Box<dyn Error>> {
    collect_accounts(Reader::from_reader(reader))
}

fn collect_accounts<R: std::io::Read>(
    mut reader: Reader<R>,
) -> Result<Vec<PillarAccount>, Box<dyn Error>> {
    let mut accounts = Vec::new();
    for result in reader.deserialize() {
        let row: AccountRow = result?;
        accounts.push(row.to_account()?);
    }
    Ok(accounts)
}

/// Load contracts from a JSON export (array of contract objects)
pub fn load_contracts_json<R: std::io::Read>(
    reader: R,
) -> Result<Vec<InsuranceContract>, Box<dyn Error>> {
    let contracts: Vec<InsuranceContract> = serde_json::from_reader(reader)?;
    for contract in &contracts {
        check_non_negative("annual_premium", contract.annual_premium)?;
        check_non_negative("death_capital", contract.death_capital)?;
        check_non_negative("disability_rent", contract.disability_rent)?;
    }
    Ok(contracts)
}

/// Load accounts from a JSON export (array of account objects)
pub fn load_accounts_json<R: std::io::Read>(
    reader: R,
) -> Result<Vec<PillarAccount>, Box<dyn Error>> {
    let accounts: Vec<PillarAccount> = serde_json::from_reader(reader)?;
    for account in &accounts {
        check_non_negative("current_amount", account.current_amount)?;
        check_non_negative("annual_contribution", account.annual_contribution)?;
        check_return_rate(account.return_rate_percent)?;
    }
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACTS_CSV: &str = "\
ContractID,Insurer,Kind,AnnualPremium,DeathCapital,DisabilityRent,Active
1,Helsana,Health,4800.0,0.0,0.0,true
2,Swiss Life,Life,2400.0,250000.0,24000.0,true
3,AXA,Household,350.0,0.0,0.0,false
";

    const ACCOUNTS_CSV: &str = "\
AccountID,Institution,Kind,CurrentAmount,AnnualContribution,ReturnRatePercent,Active
1,BCV,3aBank,25000.0,7056.0,1.5,true
2,Swiss Life,3aInsurance,40000.0,3600.0,2.0,true
";

    #[test]
    fn test_load_contracts_csv() {
        let contracts = load_contracts_from_reader(CONTRACTS_CSV.as_bytes()).unwrap();
        assert_eq!(contracts.len(), 3);
        assert_eq!(contracts[0].kind, InsuranceKind::Health);
        assert_eq!(contracts[1].death_capital, 250_000.0);
        assert!(!contracts[2].is_active);
    }

    #[test]
    fn test_load_accounts_csv() {
        let accounts = load_accounts_from_reader(ACCOUNTS_CSV.as_bytes()).unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].kind, PillarKind::Pillar3aBank);
        assert_eq!(accounts[1].return_rate_percent, 2.0);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let csv = "\
ContractID,Insurer,Kind,AnnualPremium,DeathCapital,DisabilityRent,Active
1,Helsana,Spaceship,100.0,0.0,0.0,true
";
        let err = load_contracts_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Spaceship"));
    }

    #[test]
    fn test_negative_premium_rejected() {
        let csv = "\
ContractID,Insurer,Kind,AnnualPremium,DeathCapital,DisabilityRent,Active
1,Helsana,Health,-100.0,0.0,0.0,true
";
        let err = load_contracts_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_json_loader_rejects_bad_return_rate() {
        // Same validation as the CSV path: a sub--100% rate never reaches
        // the projection engine
        let json = r#"[
            {"id": 1, "institution": "BCV", "kind": "Pillar3aBank",
             "current_amount": 1000.0, "annual_contribution": 500.0,
             "return_rate_percent": -500.0}
        ]"#;
        let err = load_accounts_json(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("ReturnRatePercent"));

        let nan = r#"[
            {"id": 1, "institution": "BCV", "kind": "Pillar3aBank",
             "current_amount": 1000.0, "annual_contribution": 500.0,
             "return_rate_percent": null}
        ]"#;
        assert!(load_accounts_json(nan.as_bytes()).is_err());
    }

    #[test]
    fn test_load_accounts_json() {
        let json = r#"[
            {"id": 1, "institution": "BCV", "kind": "Pillar3aBank",
             "current_amount": 1000.0, "annual_contribution": 500.0,
             "return_rate_percent": 2.0}
        ]"#;
        let accounts = load_accounts_json(json.as_bytes()).unwrap();
        assert_eq!(accounts.len(), 1);
        assert!(accounts[0].is_active);
    }
}
