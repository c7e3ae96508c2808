//! Embedded cantonal bracket tables and CSV table loading
//!
//! One jurisdiction/year pair ships as an embedded constant (Vaud 2024);
//! other cantons or years are loaded from CSV without touching the
//! interpolation code.

use super::bracket::BracketTable;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Vaud 2024 income tax brackets (cumulative CHF tax per taxable income)
pub fn vaud_2024_income() -> BracketTable {
    BracketTable::from_pairs(&[
        (1_000.0, 10.0),
        (1_700.0, 18.0),
        (2_600.0, 32.0),
        (3_800.0, 56.0),
        (5_400.0, 98.0),
        (7_500.0, 188.0),
        (10_000.0, 313.0),
        (13_000.0, 478.0),
        (17_000.0, 718.0),
        (22_000.0, 1_068.0),
        (28_000.0, 1_578.0),
        (36_000.0, 2_378.0),
        (46_000.0, 3_528.0),
        (60_000.0, 5_348.0),
        (80_000.0, 8_248.0),
        (110_000.0, 13_048.0),
        (160_000.0, 21_798.0),
        (250_000.0, 38_898.0),
    ])
    .expect("embedded Vaud 2024 income table is valid")
}

/// Vaud 2024 wealth tax brackets (cumulative CHF tax per taxable net wealth)
///
/// Wealth below the exemption floor is handled by the estimator, not the
/// table; the table starts at the floor.
pub fn vaud_2024_wealth() -> BracketTable {
    BracketTable::from_pairs(&[
        (50_000.0, 40.0),
        (100_000.0, 110.0),
        (200_000.0, 270.0),
        (400_000.0, 650.0),
        (800_000.0, 1_530.0),
        (1_500_000.0, 3_210.0),
        (3_000_000.0, 7_260.0),
    ])
    .expect("embedded Vaud 2024 wealth table is valid")
}

/// Raw CSV row for a bracket table file
#[derive(Debug, serde::Deserialize)]
struct TableRow {
    #[serde(rename = "Threshold")]
    threshold: f64,
    #[serde(rename = "Tax")]
    tax: f64,
}

/// Load a bracket table from a CSV file with Threshold,Tax columns
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<BracketTable, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    collect_table(reader)
}

/// Load a bracket table from any reader
pub fn load_table_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<BracketTable, Box<dyn Error>> {
    collect_table(Reader::from_reader(reader))
}

fn collect_table<R: std::io::Read>(mut reader: Reader<R>) -> Result<BracketTable, Box<dyn Error>> {
    let mut pairs = Vec::new();
    for result in reader.deserialize() {
        let row: TableRow = result?;
        pairs.push((row.threshold, row.tax));
    }
    Ok(BracketTable::from_pairs(&pairs)?)
}
