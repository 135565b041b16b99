//! Entry points used by the request boundary.
//!
//! [`TaxService`] computes single and batch results; [`AdminService`]
//! applies bounded deduction updates. Both hold a shared
//! [`DeductionRepository`] and keep no other state.

use std::io::Read;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::IncomeTaxCalculator;
use crate::csv_batch::{ExtractionError, extract_rows};
use crate::db::{DeductionRepository, RepositoryError};
use crate::deductions::resolve_deduction_config;
use crate::models::{
    CsvRow, CsvTaxResult, Deduction, DeductionConfig, DeductionSlug, TaxCsvResponse, TaxRequest,
    TaxResult,
};
use crate::validation::{ValidationError, validate_deduction_amount, validate_tax_request};

/// Failures surfaced to the boundary layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The deduction disappeared between validation and update.
    #[error("data not found")]
    NotFound,

    /// Backend failure; the cause is kept for diagnostics but not displayed.
    #[error("internal server error")]
    Storage(#[source] RepositoryError),
}

impl ServiceError {
    /// True for failures caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Extraction(_))
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

/// Single and batch tax computation.
#[derive(Clone)]
pub struct TaxService {
    repo: Arc<dyn DeductionRepository>,
    calculator: IncomeTaxCalculator<'static>,
}

impl TaxService {
    pub fn new(repo: Arc<dyn DeductionRepository>) -> Self {
        Self {
            repo,
            calculator: IncomeTaxCalculator::default(),
        }
    }

    /// The configured deductions with defaults applied.
    pub async fn deduction_config(&self) -> Result<DeductionConfig, ServiceError> {
        resolve_deduction_config(self.repo.as_ref())
            .await
            .map_err(ServiceError::Storage)
    }

    /// Validates `request` and computes its tax against the current
    /// deduction configuration.
    pub async fn compute_single_tax(
        &self,
        request: &TaxRequest,
    ) -> Result<TaxResult, ServiceError> {
        validate_tax_request(request)?;
        let config = self.deduction_config().await?;

        Ok(self.calculator.calculate(request, &config)?)
    }

    /// Extracts every row of a CSV upload and computes each one. Any bad row
    /// rejects the whole batch; results keep input order.
    pub async fn compute_batch_tax<R: Read>(
        &self,
        reader: R,
    ) -> Result<TaxCsvResponse, ServiceError> {
        let rows = extract_rows(reader)?;
        self.calculate_rows(&rows).await
    }

    /// Computes already-extracted rows with one configuration lookup. A row
    /// whose amounts overflow rejects the batch as
    /// [`ExtractionError::InvalidRow`].
    pub async fn calculate_rows(
        &self,
        rows: &[CsvRow],
    ) -> Result<TaxCsvResponse, ServiceError> {
        let config = self.deduction_config().await?;

        let taxes = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let result = self
                    .calculator
                    .calculate(&TaxRequest::from(*row), &config)
                    .map_err(|source| ExtractionError::InvalidRow {
                        row: idx + 1,
                        source,
                    })?;
                Ok(CsvTaxResult {
                    total_income: row.total_income,
                    tax: result.tax,
                    tax_refund: result.tax_refund,
                })
            })
            .collect::<Result<Vec<_>, ExtractionError>>()?;

        debug!(rows = taxes.len(), "computed batch");
        Ok(TaxCsvResponse { taxes })
    }
}

/// Bounded updates to configured deduction amounts.
#[derive(Clone)]
pub struct AdminService {
    repo: Arc<dyn DeductionRepository>,
}

impl AdminService {
    pub fn new(repo: Arc<dyn DeductionRepository>) -> Self {
        Self { repo }
    }

    /// Checks `amount` against the stored bounds for `slug`.
    ///
    /// Any failure to read the row, including a missing slug, is reported as
    /// [`ValidationError::DeductionInvalid`].
    pub async fn validate_deduction_request(
        &self,
        slug: DeductionSlug,
        amount: Decimal,
    ) -> Result<Deduction, ValidationError> {
        let current = self
            .repo
            .get_deduction(slug.as_str())
            .await
            .map_err(|_| ValidationError::DeductionInvalid)?;

        validate_deduction_amount(&current, amount)?;
        Ok(current)
    }

    /// Validates and persists a new amount, returning the updated row.
    ///
    /// The store is not written to unless validation passes.
    pub async fn update_deduction(
        &self,
        slug: DeductionSlug,
        amount: Decimal,
    ) -> Result<Deduction, ServiceError> {
        self.validate_deduction_request(slug, amount).await?;

        let updated = self
            .repo
            .update_deduction_amount(slug.as_str(), amount)
            .await?;
        debug!(slug = slug.as_str(), amount = %updated.amount, "deduction updated");
        Ok(updated)
    }
}
