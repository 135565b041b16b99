//! Progressive income tax over the bracket table.
//!
//! # Algorithm
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Net income = total income − personal − capped donation − capped k-receipt |
//! | 2    | For every bracket, tax the slice of net income that falls inside it |
//! | 3    | Total tax = sum of bracket tax (unrounded) |
//! | 4    | Settle withholding: excess wht becomes a refund, otherwise tax − wht |
//! | 5    | Round the settled figure to two places, half away from zero |
//!
//! Net income may go negative; every bracket then contributes zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::IncomeTaxCalculator;
//! use tax_core::{DeductionConfig, TaxRequest};
//!
//! let request = TaxRequest::new(dec!(500000));
//! let result = IncomeTaxCalculator::default()
//!     .calculate(&request, &DeductionConfig::default())
//!     .unwrap();
//!
//! assert_eq!(result.tax, dec!(29000));
//! assert_eq!(result.tax_levels[1].level, "150,001-500,000");
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::common::round_half_up;
use crate::deductions::clamp_allowance_amount;
use crate::format::format_thousands;
use crate::models::{
    AllowanceType, DeductionConfig, TAX_BRACKETS, TaxBracket, TaxLevel, TaxRequest, TaxResult,
};
use crate::validation::ValidationError;

/// Applies a bracket table to tax requests.
#[derive(Debug, Clone, Copy)]
pub struct IncomeTaxCalculator<'a> {
    tax_brackets: &'a [TaxBracket],
}

impl Default for IncomeTaxCalculator<'static> {
    fn default() -> Self {
        Self::new(&TAX_BRACKETS)
    }
}

impl<'a> IncomeTaxCalculator<'a> {
    /// Brackets must be ascending by `min_income` with only the last one
    /// open-ended.
    pub fn new(tax_brackets: &'a [TaxBracket]) -> Self {
        Self { tax_brackets }
    }

    /// Computes tax or refund for `request` under `config`.
    ///
    /// Always yields one [`TaxLevel`] per bracket, in bracket order.
    ///
    /// # Errors
    /// [`ValidationError::AmountOutOfRange`] when the amounts are too large
    /// to combine without overflowing.
    pub fn calculate(
        &self,
        request: &TaxRequest,
        config: &DeductionConfig,
    ) -> Result<TaxResult, ValidationError> {
        let net_income = self.net_income(request, config)?;

        let tax_levels = self
            .tax_brackets
            .iter()
            .map(|bracket| {
                Ok(TaxLevel {
                    level: bracket_label(bracket),
                    tax: self.bracket_tax(bracket, net_income)?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let total = tax_levels
            .iter()
            .try_fold(Decimal::ZERO, |sum, l| sum.checked_add(l.tax))
            .ok_or(ValidationError::AmountOutOfRange)?;
        let (tax, tax_refund) = self.settle(total, request.wht)?;

        Ok(TaxResult {
            tax,
            tax_refund,
            tax_levels,
        })
    }

    fn net_income(
        &self,
        request: &TaxRequest,
        config: &DeductionConfig,
    ) -> Result<Decimal, ValidationError> {
        let mut net = request
            .total_income
            .checked_sub(config.personal.amount)
            .ok_or(ValidationError::AmountOutOfRange)?;

        for allowance_type in [AllowanceType::Donation, AllowanceType::KReceipt] {
            let claimed = clamp_allowance_amount(
                allowance_type,
                &request.allowances,
                config.get(allowance_type.deduction_slug()),
            )?;
            net = net
                .checked_sub(claimed)
                .ok_or(ValidationError::AmountOutOfRange)?;
        }

        if net.is_sign_negative() {
            trace!(net_income = %net, "net income below zero; no bracket tax applies");
        }
        Ok(net)
    }

    /// Tax owed on the part of `net_income` inside `bracket`.
    fn bracket_tax(
        &self,
        bracket: &TaxBracket,
        net_income: Decimal,
    ) -> Result<Decimal, ValidationError> {
        let upper = match bracket.max_income {
            Some(max_income) if net_income > max_income => max_income,
            _ => net_income,
        };
        if upper <= bracket.min_income {
            return Ok(Decimal::ZERO);
        }

        upper
            .checked_sub(bracket.min_income)
            .and_then(|slice| slice.checked_mul(bracket.rate))
            .ok_or(ValidationError::AmountOutOfRange)
    }

    /// Returns `(tax, tax_refund)`; at most one is non-zero.
    fn settle(
        &self,
        total: Decimal,
        wht: Decimal,
    ) -> Result<(Decimal, Decimal), ValidationError> {
        let owed = total
            .checked_sub(wht)
            .ok_or(ValidationError::AmountOutOfRange)?;

        if owed.is_sign_negative() {
            Ok((Decimal::ZERO, round_half_up(-owed)))
        } else {
            Ok((round_half_up(owed), Decimal::ZERO))
        }
    }
}

/// `"{min+1}-{max}"`, or `"{min+1} and above"` for the open-ended bracket.
pub fn bracket_label(bracket: &TaxBracket) -> String {
    let from = format_thousands(bracket.min_income + Decimal::ONE, 0);
    match bracket.max_income {
        Some(max_income) => format!("{from}-{}", format_thousands(max_income, 0)),
        None => format!("{from} and above"),
    }
}

/// Computes a request against the standard bracket table.
pub fn compute_tax(
    request: &TaxRequest,
    config: &DeductionConfig,
) -> Result<TaxResult, ValidationError> {
    IncomeTaxCalculator::default().calculate(request, config)
}
