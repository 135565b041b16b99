use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::Deduction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No matching rows. For [`DeductionRepository::list_deductions`] this
    /// means nothing has been configured yet.
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage for configured deduction rows.
#[async_trait]
pub trait DeductionRepository: Send + Sync {
    async fn list_deductions(&self) -> Result<Vec<Deduction>, RepositoryError>;

    async fn get_deduction(
        &self,
        slug: &str,
    ) -> Result<Deduction, RepositoryError>;

    /// Persist a new amount and return the updated row.
    async fn update_deduction_amount(
        &self,
        slug: &str,
        amount: Decimal,
    ) -> Result<Deduction, RepositoryError>;
}
