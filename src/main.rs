//! Patrimoine CLI
//!
//! Command-line interface for running tax estimates, third-pillar
//! projections, and full household analyses against exported record files.

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use patrimoine::projection::{ProjectionConfig, DEFAULT_RETIREMENT_AGE};
use patrimoine::record::{load_accounts, load_contracts};
use patrimoine::tax::TaxEstimator;
use patrimoine::{AnalysisRunner, ProjectionEngine, Profile};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "patrimoine", version, about = "Swiss personal-finance calculations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate cantonal income and wealth tax
    Tax {
        /// Annual taxable income in CHF
        #[arg(long)]
        income: f64,

        /// Taxable net wealth in CHF
        #[arg(long, default_value_t = 0.0)]
        wealth: f64,

        /// Directory with income.csv and wealth.csv bracket tables
        /// (embedded Vaud 2024 tables when omitted)
        #[arg(long)]
        tables: Option<PathBuf>,
    },

    /// Project third-pillar accounts to retirement
    Project {
        /// CSV file with account snapshots
        #[arg(long)]
        accounts: PathBuf,

        /// Current age in whole years
        #[arg(long)]
        age: u8,

        /// Retirement age
        #[arg(long, default_value_t = DEFAULT_RETIREMENT_AGE)]
        retirement_age: u8,

        /// Print per-year detail rows
        #[arg(long)]
        detailed: bool,
    },

    /// Run a full household analysis
    Analyze {
        /// CSV file with insurance contract snapshots
        #[arg(long)]
        contracts: PathBuf,

        /// CSV file with third-pillar account snapshots
        #[arg(long)]
        accounts: PathBuf,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: NaiveDate,

        /// Annual taxable income in CHF
        #[arg(long, default_value_t = 0.0)]
        income: f64,

        /// Taxable net wealth in CHF
        #[arg(long, default_value_t = 0.0)]
        wealth: f64,

        /// Emit the analysis as JSON instead of a text report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Tax {
            income,
            wealth,
            tables,
        } => run_tax(income, wealth, tables),
        Command::Project {
            accounts,
            age,
            retirement_age,
            detailed,
        } => run_project(&accounts, age, retirement_age, detailed),
        Command::Analyze {
            contracts,
            accounts,
            birth_date,
            income,
            wealth,
            json,
        } => run_analyze(&contracts, &accounts, birth_date, income, wealth, json),
    }
}

fn run_tax(income: f64, wealth: f64, tables: Option<PathBuf>) -> Result<()> {
    let estimator = match tables {
        Some(dir) => TaxEstimator::from_csv_path(&dir)
            .map_err(|e| anyhow!("failed to load bracket tables from {}: {e}", dir.display()))?,
        None => TaxEstimator::vaud_2024(),
    };

    let income_tax = estimator.income_tax(income);
    let wealth_tax = estimator.wealth_tax(wealth);

    println!("Income {:>12.2} CHF -> tax {:>10.2} CHF", income, income_tax);
    println!("Wealth {:>12.2} CHF -> tax {:>10.2} CHF", wealth, wealth_tax);
    println!("Total tax {:>21.2} CHF", income_tax + wealth_tax);
    Ok(())
}

fn run_project(path: &PathBuf, age: u8, retirement_age: u8, detailed: bool) -> Result<()> {
    let accounts = load_accounts(path)
        .map_err(|e| anyhow!("failed to load accounts from {}: {e}", path.display()))?;
    log::info!("loaded {} accounts", accounts.len());

    let engine = ProjectionEngine::new(ProjectionConfig {
        retirement_age,
        detailed_output: detailed,
        ..ProjectionConfig::default()
    });

    println!(
        "{:>4} {:>16} {:>6} {:>14} {:>14} {:>12}",
        "ID", "Institution", "Years", "Current", "Projected", "Annual rent"
    );
    let mut total_projected = 0.0;
    let mut total_rent = 0.0;
    for account in accounts.iter().filter(|a| a.is_active) {
        let projection = engine.project_account(account, age);
        println!(
            "{:>4} {:>16} {:>6} {:>14.2} {:>14.2} {:>12.2}",
            account.id,
            account.institution,
            projection.years_to_retirement,
            account.current_amount,
            projection.projected_amount,
            projection.projected_annual_rent,
        );
        if detailed {
            for row in &projection.rows {
                println!(
                    "      year {:>2}: {:>12.2} + {:>10.2} growth + {:>10.2} contrib = {:>12.2}",
                    row.year, row.start_amount, row.growth, row.contribution, row.end_amount
                );
            }
        }
        total_projected += projection.projected_amount;
        total_rent += projection.projected_annual_rent;
    }
    println!(
        "\nTotal projected: {:.2} CHF ({:.2} CHF annual rent over {} years)",
        total_projected,
        total_rent,
        engine.config().rent_years
    );
    Ok(())
}

fn run_analyze(
    contracts_path: &PathBuf,
    accounts_path: &PathBuf,
    birth_date: NaiveDate,
    income: f64,
    wealth: f64,
    json: bool,
) -> Result<()> {
    let contracts = load_contracts(contracts_path).map_err(|e| {
        anyhow!(
            "failed to load contracts from {}: {e}",
            contracts_path.display()
        )
    })?;
    let accounts = load_accounts(accounts_path).map_err(|e| {
        anyhow!(
            "failed to load accounts from {}: {e}",
            accounts_path.display()
        )
    })?;
    log::info!(
        "loaded {} contracts, {} accounts",
        contracts.len(),
        accounts.len()
    );

    let profile = Profile {
        birth_date,
        annual_income: income,
        taxable_wealth: wealth,
    };
    let runner = AnalysisRunner::new();
    let analysis = runner.analyze(&profile, &contracts, &accounts, Local::now().date_naive());

    if json {
        let out = serde_json::to_string_pretty(&analysis).context("failed to encode analysis")?;
        println!("{}", out);
        return Ok(());
    }

    println!("Household analysis (age {})", analysis.age);
    println!("\nTaxes:");
    println!("  Income tax: {:>12.2} CHF", analysis.tax.income_tax);
    println!("  Wealth tax: {:>12.2} CHF", analysis.tax.wealth_tax);
    println!("  Total:      {:>12.2} CHF", analysis.tax.total_tax);

    println!(
        "\nInsurance ({} active contracts):",
        analysis.insurance.active_contracts
    );
    for bucket in &analysis.insurance.buckets {
        println!(
            "  {:>12}: {:>2} contracts, {:>10.2} CHF/year",
            bucket.bucket.as_str(),
            bucket.count,
            bucket.annual_premium
        );
    }
    println!(
        "  Total premium: {:.2} CHF/year, death capital {:.2} CHF, disability rent {:.2} CHF/year",
        analysis.insurance.total_annual_premium,
        analysis.insurance.total_death_capital,
        analysis.insurance.total_disability_rent
    );

    println!(
        "\nThird pillar ({} active accounts):",
        analysis.third_pillar.active_accounts
    );
    for kind in &analysis.third_pillar.by_kind {
        println!(
            "  {:>14}: {:>2} accounts, {:>12.2} CHF",
            kind.kind.as_str(),
            kind.count,
            kind.current_amount
        );
    }
    println!(
        "  Current {:.2} CHF, contributions {:.2} CHF/year",
        analysis.third_pillar.total_current_amount,
        analysis.third_pillar.total_annual_contribution
    );
    println!(
        "  Projected at retirement: {:.2} CHF ({:.2} CHF annual rent)",
        analysis.third_pillar.total_projected_amount,
        analysis.third_pillar.total_projected_annual_rent
    );
    Ok(())
}
