use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tax_core::db::{DbConfig, RepositoryFactory};
use tax_core::{DeductionRepository, RepositoryError};

use crate::repository::MemoryRepository;
use crate::seed::{default_seeds, load_seed_file};

/// Connection string selecting the standard seed rows.
pub const DEFAULTS: &str = ":defaults:";

/// [`RepositoryFactory`] for the in-memory store.
///
/// `connection_string` is interpreted as:
/// * empty: an empty store, so every deduction falls back to its default;
/// * [`DEFAULTS`]: the standard personal, donation and k-receipt rows;
/// * anything else: path to a TOML seed file.
///
/// ```rust
/// use tax_core::db::RepositoryRegistry;
/// use tax_db_memory::MemoryRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(MemoryRepositoryFactory));
/// assert_eq!(registry.available_backends(), vec!["memory"]);
/// ```
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Arc<dyn DeductionRepository>, RepositoryError> {
        let rows = match config.connection_string.trim() {
            "" => Vec::new(),
            DEFAULTS => default_seeds(),
            path => load_seed_file(Path::new(path))?,
        };

        tracing::debug!(rows = rows.len(), "seeded memory store");
        Ok(Arc::new(MemoryRepository::new(rows)))
    }
}
