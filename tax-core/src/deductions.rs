//! Resolution of configured deductions and per-type allowance capping.

use rust_decimal::Decimal;
use tracing::debug;

use crate::db::{DeductionRepository, RepositoryError};
use crate::models::{Allowance, AllowanceType, Deduction, DeductionConfig, DeductionSlug};
use crate::validation::ValidationError;

/// Loads the three tracked deductions, substituting the process-wide default
/// for any slug the store has no row for.
///
/// [`RepositoryError::NotFound`] from the store means nothing is configured
/// and yields the full default set; any other error is returned. Presence is
/// decided by slug, so a stored amount of zero is kept as zero.
pub async fn resolve_deduction_config(
    repo: &dyn DeductionRepository
) -> Result<DeductionConfig, RepositoryError> {
    let rows = match repo.list_deductions().await {
        Ok(rows) => rows,
        Err(RepositoryError::NotFound) => Vec::new(),
        Err(e) => return Err(e),
    };

    Ok(DeductionConfig {
        personal: pick(&rows, DeductionSlug::Personal),
        donation: pick(&rows, DeductionSlug::Donation),
        k_receipt: pick(&rows, DeductionSlug::KReceipt),
    })
}

fn pick(
    rows: &[Deduction],
    slug: DeductionSlug,
) -> Deduction {
    // Later rows win, as they would when building a map keyed by slug.
    match rows.iter().rev().find(|d| d.slug == slug.as_str()) {
        Some(row) => row.clone(),
        None => {
            debug!(slug = slug.as_str(), amount = %slug.default_amount(), "using default deduction");
            Deduction::fallback(slug)
        }
    }
}

/// Sums every allowance of `allowance_type` and caps the total at
/// `deduction.amount`. An amount of zero leaves the total uncapped.
///
/// # Errors
/// [`ValidationError::AmountOutOfRange`] if the claimed total overflows.
pub fn clamp_allowance_amount(
    allowance_type: AllowanceType,
    allowances: &[Allowance],
    deduction: &Deduction,
) -> Result<Decimal, ValidationError> {
    let claimed = allowances
        .iter()
        .filter(|a| a.is(allowance_type))
        .try_fold(Decimal::ZERO, |total, a| total.checked_add(a.amount))
        .ok_or(ValidationError::AmountOutOfRange)?;

    if !deduction.amount.is_zero() && claimed > deduction.amount {
        Ok(deduction.amount)
    } else {
        Ok(claimed)
    }
}
