//! TOML seed files for the in-memory store.
//!
//! ```toml
//! [[deductions]]
//! slug = "personal"
//! name = "personalDeduction"
//! amount = 60000
//! min_amount = 10000
//! max_amount = 100000
//! ```
//!
//! `min_amount` and `max_amount` default to zero when omitted.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{Deduction, RepositoryError};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeductionSeed {
    pub slug: String,
    #[serde(default)]
    pub name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub min_amount: Decimal,
    #[serde(default)]
    pub max_amount: Decimal,
}

impl From<DeductionSeed> for Deduction {
    fn from(seed: DeductionSeed) -> Self {
        Deduction {
            slug: seed.slug,
            name: seed.name,
            amount: seed.amount,
            min_amount: seed.min_amount,
            max_amount: seed.max_amount,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SeedFile {
    #[serde(default)]
    deductions: Vec<DeductionSeed>,
}

/// Parses seed rows from TOML text.
pub fn parse_seeds(input: &str) -> Result<Vec<Deduction>, RepositoryError> {
    let file: SeedFile = toml::from_str(input)
        .map_err(|e| RepositoryError::Configuration(format!("invalid seed file: {e}")))?;

    Ok(file.deductions.into_iter().map(Deduction::from).collect())
}

/// Reads and parses a seed file from disk.
pub fn load_seed_file(path: &Path) -> Result<Vec<Deduction>, RepositoryError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RepositoryError::Connection(format!("cannot read '{}': {e}", path.display()))
    })?;
    parse_seeds(&contents)
}

/// The standard configuration shipped with the calculator.
pub fn default_seeds() -> Vec<Deduction> {
    [
        ("personal", "personalDeduction", 60_000, 10_000, 100_000),
        ("donation", "donation", 100_000, 0, 100_000),
        ("k-receipt", "kReceipt", 50_000, 0, 100_000),
    ]
    .into_iter()
    .map(|(slug, name, amount, min_amount, max_amount)| Deduction {
        slug: slug.to_string(),
        name: name.to_string(),
        amount: Decimal::from(amount),
        min_amount: Decimal::from(min_amount),
        max_amount: Decimal::from(max_amount),
    })
    .collect()
}
