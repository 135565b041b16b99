use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AllowanceType, TaxRequest};

/// One parsed data row of a batch upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    pub total_income: Decimal,
    pub wht: Decimal,
    pub donation: Decimal,
    pub k_receipt: Decimal,
}

impl From<CsvRow> for TaxRequest {
    /// Both allowance entries are always present, even when the upload had
    /// no `k-receipt` column.
    fn from(row: CsvRow) -> Self {
        TaxRequest::new(row.total_income)
            .with_wht(row.wht)
            .with_allowance(AllowanceType::Donation, row.donation)
            .with_allowance(AllowanceType::KReceipt, row.k_receipt)
    }
}
