//! Extraction of tax inputs from a batch CSV upload.
//!
//! ## CSV Format
//!
//! Headers are matched by exact, case-sensitive name; column order does not
//! matter and unknown columns are ignored.
//!
//! | Column        | Required | Notes                                   |
//! |---------------|----------|-----------------------------------------|
//! | `totalIncome` | yes      | decimal                                 |
//! | `wht`         | yes      | decimal, at most `totalIncome`          |
//! | `donation`    | yes      | decimal                                 |
//! | `k-receipt`   | no       | decimal, treated as `0` when absent     |
//!
//! A recognised cell that is empty is an error; it is never read as `0`.
//! Any failure rejects the whole batch.
//!
//! ```csv
//! totalIncome,wht,donation
//! 500000,0,0
//! 600000,40000,20000
//! ```

use std::io::Read;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::models::CsvRow;
use crate::validation::{ValidationError, validate_csv_row};

/// Errors that reject a batch upload.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// One of `totalIncome`, `wht`, `donation` is not in the header row.
    #[error("missing required header field")]
    MissingRequiredHeader,

    /// `row` is 1-based over data rows (the header is row 0).
    #[error("value should not be empty (row {row}, column '{column}')")]
    EmptyValue { row: usize, column: &'static str },

    #[error("invalid number '{value}' (row {row}, column '{column}')")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// A row parsed cleanly but failed the numeric checks.
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: ValidationError,
    },

    /// Structural CSV problem, such as a row with the wrong number of cells.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    TotalIncome,
    Wht,
    Donation,
    KReceipt,
}

impl Column {
    const REQUIRED: [Column; 3] = [Self::TotalIncome, Self::Wht, Self::Donation];

    fn name(&self) -> &'static str {
        match self {
            Self::TotalIncome => "totalIncome",
            Self::Wht => "wht",
            Self::Donation => "donation",
            Self::KReceipt => "k-receipt",
        }
    }

    fn parse(header: &str) -> Option<Self> {
        match header {
            "totalIncome" => Some(Self::TotalIncome),
            "wht" => Some(Self::Wht),
            "donation" => Some(Self::Donation),
            "k-receipt" => Some(Self::KReceipt),
            _ => None,
        }
    }

    fn assign(
        &self,
        row: &mut CsvRow,
        value: Decimal,
    ) {
        match self {
            Self::TotalIncome => row.total_income = value,
            Self::Wht => row.wht = value,
            Self::Donation => row.donation = value,
            Self::KReceipt => row.k_receipt = value,
        }
    }
}

/// Parses and validates every data row of `reader`, preserving row order.
///
/// # Errors
///
/// * [`ExtractionError::MissingRequiredHeader`] if a required column is
///   absent (including when the input has no header at all).
/// * [`ExtractionError::EmptyValue`] / [`ExtractionError::InvalidNumber`]
///   for the first bad cell in a recognised column.
/// * [`ExtractionError::InvalidRow`] for the first row failing validation.
/// * [`ExtractionError::Csv`] for structural problems.
pub fn extract_rows<R: Read>(reader: R) -> Result<Vec<CsvRow>, ExtractionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let columns: Vec<Option<Column>> = reader.headers()?.iter().map(Column::parse).collect();
    if !Column::REQUIRED
        .iter()
        .all(|required| columns.contains(&Some(*required)))
    {
        return Err(ExtractionError::MissingRequiredHeader);
    }

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let row_number = idx + 1;

        let mut row = CsvRow::default();
        for (cell, column) in record.iter().zip(&columns) {
            let Some(column) = column else {
                continue;
            };
            let value = parse_cell(cell, *column, row_number)?;
            column.assign(&mut row, value);
        }

        validate_csv_row(&row).map_err(|source| ExtractionError::InvalidRow {
            row: row_number,
            source,
        })?;
        rows.push(row);
    }

    debug!(rows = rows.len(), "extracted batch rows");
    Ok(rows)
}

/// Convenience wrapper over [`extract_rows`] for in-memory text.
pub fn extract_rows_from_str(input: &str) -> Result<Vec<CsvRow>, ExtractionError> {
    extract_rows(input.as_bytes())
}

fn parse_cell(
    cell: &str,
    column: Column,
    row: usize,
) -> Result<Decimal, ExtractionError> {
    if cell.is_empty() {
        return Err(ExtractionError::EmptyValue {
            row,
            column: column.name(),
        });
    }

    cell.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(cell))
        .map_err(|_| ExtractionError::InvalidNumber {
            row,
            column: column.name(),
            value: cell.to_string(),
        })
}
