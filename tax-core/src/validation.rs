//! Input constraint checks for tax requests, batch rows, and deduction
//! updates.
//!
//! Each check short-circuits on the first failing field: income, then
//! withholding, then allowances (or the allowance columns of a batch row) in
//! input order.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::format::format_amount;
use crate::models::{Allowance, AllowanceType, CsvRow, Deduction, TaxRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("total income should be more than or equal 0")]
    TotalIncomeInvalid,

    #[error("wht should be more than or equal 0")]
    WhtInvalid,

    #[error("wht should not more than income")]
    WhtExceedsIncome,

    #[error("allowance type should be one of 'donation', 'k-receipt'")]
    AllowanceTypeInvalid,

    #[error("allowance amount should be more than or equal 0")]
    AllowanceAmountInvalid,

    /// A negative allowance column in a batch row.
    #[error("{0} amount should be more than or equal 0")]
    DeductionAmountInvalid(AllowanceType),

    /// The deduction to update could not be read. Deliberately vague about
    /// whether the slug exists.
    #[error("invalid deduction")]
    DeductionInvalid,

    #[error("amount should not be less than {}", format_amount(.0))]
    AmountBelowMinimum(Decimal),

    #[error("amount should not be more than {}", format_amount(.0))]
    AmountAboveMaximum(Decimal),

    /// Amounts too large to sum or subtract without overflowing.
    #[error("amount is too large to calculate")]
    AmountOutOfRange,
}

pub fn validate_tax_request(request: &TaxRequest) -> Result<(), ValidationError> {
    validate_total_income(request.total_income)?;
    validate_wht(request.wht, request.total_income)?;
    request.allowances.iter().try_for_each(validate_allowance)
}

/// Numeric checks for a parsed batch row. Empty cells are rejected earlier,
/// during extraction.
pub fn validate_csv_row(row: &CsvRow) -> Result<(), ValidationError> {
    validate_total_income(row.total_income)?;
    validate_wht(row.wht, row.total_income)?;
    validate_allowance_column(AllowanceType::Donation, row.donation)?;
    validate_allowance_column(AllowanceType::KReceipt, row.k_receipt)
}

/// Checks a requested amount against the bounds configured on `deduction`.
/// A `max_amount` of zero leaves the amount unbounded above.
pub fn validate_deduction_amount(
    deduction: &Deduction,
    amount: Decimal,
) -> Result<(), ValidationError> {
    if amount < deduction.min_amount {
        return Err(ValidationError::AmountBelowMinimum(deduction.min_amount));
    }
    if deduction.has_upper_bound() && amount > deduction.max_amount {
        return Err(ValidationError::AmountAboveMaximum(deduction.max_amount));
    }
    Ok(())
}

fn validate_total_income(total_income: Decimal) -> Result<(), ValidationError> {
    if total_income < Decimal::ZERO {
        return Err(ValidationError::TotalIncomeInvalid);
    }
    Ok(())
}

fn validate_wht(
    wht: Decimal,
    total_income: Decimal,
) -> Result<(), ValidationError> {
    if wht < Decimal::ZERO {
        return Err(ValidationError::WhtInvalid);
    }
    if wht > total_income {
        return Err(ValidationError::WhtExceedsIncome);
    }
    Ok(())
}

fn validate_allowance(allowance: &Allowance) -> Result<(), ValidationError> {
    if AllowanceType::parse(&allowance.allowance_type).is_none() {
        return Err(ValidationError::AllowanceTypeInvalid);
    }
    if allowance.amount < Decimal::ZERO {
        return Err(ValidationError::AllowanceAmountInvalid);
    }
    Ok(())
}

fn validate_allowance_column(
    allowance_type: AllowanceType,
    amount: Decimal,
) -> Result<(), ValidationError> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::DeductionAmountInvalid(allowance_type));
    }
    Ok(())
}
