use async_trait::async_trait;
use rust_decimal::Decimal;
use tax_core::{Deduction, DeductionRepository, RepositoryError};
use tokio::sync::RwLock;
use tracing::debug;

use crate::seed::default_seeds;

/// Deduction rows held in process memory.
///
/// Rows keep insertion order; a slug appearing twice resolves to its first
/// occurrence for reads and updates.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    rows: RwLock<Vec<Deduction>>,
}

impl MemoryRepository {
    pub fn new(rows: Vec<Deduction>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// A store holding the standard personal, donation and k-receipt rows.
    pub fn with_defaults() -> Self {
        Self::new(default_seeds())
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl DeductionRepository for MemoryRepository {
    /// [`RepositoryError::NotFound`] when the store is empty.
    async fn list_deductions(&self) -> Result<Vec<Deduction>, RepositoryError> {
        let rows = self.rows.read().await;
        if rows.is_empty() {
            return Err(RepositoryError::NotFound);
        }
        Ok(rows.clone())
    }

    async fn get_deduction(
        &self,
        slug: &str,
    ) -> Result<Deduction, RepositoryError> {
        self.rows
            .read()
            .await
            .iter()
            .find(|d| d.slug == slug)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_deduction_amount(
        &self,
        slug: &str,
        amount: Decimal,
    ) -> Result<Deduction, RepositoryError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|d| d.slug == slug)
            .ok_or(RepositoryError::NotFound)?;

        row.amount = amount;
        debug!(slug, amount = %amount, "stored deduction amount");
        Ok(row.clone())
    }
}
