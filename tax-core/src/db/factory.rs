use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::repository::{DeductionRepository, RepositoryError};

/// Selects a deduction store backend.
///
/// `backend` names a registered [`RepositoryFactory`]; `connection_string`
/// is handed to it untouched.
///
/// | backend  | connection_string examples                 |
/// |----------|--------------------------------------------|
/// | `memory` | empty, `:defaults:`, `deductions.toml`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            connection_string: String::new(),
        }
    }
}

/// Builds a deduction store for one backend.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Arc<dyn DeductionRepository>, RepositoryError>;
}

/// Backend factories keyed by [`RepositoryFactory::backend_name`].
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: BTreeMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a factory, replacing any previous one with the same name.
    pub fn register(&mut self, factory: Box<dyn RepositoryFactory>) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens a store through the factory named by `config.backend`.
    ///
    /// # Errors
    /// * [`RepositoryError::Configuration`] when no factory has that name.
    /// * Whatever the chosen factory returns.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Arc<dyn DeductionRepository>, RepositoryError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(RepositoryError::Configuration(format!(
                "unknown backend '{}'; available: {:?}",
                config.backend,
                self.available_backends()
            )));
        };

        tracing::debug!(backend = factory.backend_name(), "opening deduction store");
        factory.create(config).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::Deduction;

    // ── stub store ───────────────────────────────────────────────────────
    // The registry never touches the store it hands back.
    struct EmptyStore;

    #[async_trait]
    impl DeductionRepository for EmptyStore {
        async fn list_deductions(&self) -> Result<Vec<Deduction>, RepositoryError> {
            Err(RepositoryError::NotFound)
        }
        async fn get_deduction(
            &self,
            _slug: &str,
        ) -> Result<Deduction, RepositoryError> {
            Err(RepositoryError::NotFound)
        }
        async fn update_deduction_amount(
            &self,
            _slug: &str,
            _amount: Decimal,
        ) -> Result<Deduction, RepositoryError> {
            Err(RepositoryError::NotFound)
        }
    }

    struct CountingFactory {
        name: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RepositoryFactory for CountingFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Arc<dyn DeductionRepository>, RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(EmptyStore))
        }
    }

    struct BrokenFactory;

    #[async_trait]
    impl RepositoryFactory for BrokenFactory {
        fn backend_name(&self) -> &'static str {
            "broken"
        }
        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Arc<dyn DeductionRepository>, RepositoryError> {
            Err(RepositoryError::Connection("refused".to_string()))
        }
    }

    fn counting(name: &'static str) -> (Box<dyn RepositoryFactory>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Box::new(CountingFactory {
                name,
                calls: calls.clone(),
            }),
            calls,
        )
    }

    fn config(backend: &str) -> DbConfig {
        DbConfig {
            backend: backend.to_string(),
            connection_string: String::new(),
        }
    }

    #[test]
    fn default_config_selects_memory_backend() {
        let cfg = DbConfig::default();
        assert_eq!(cfg.backend, "memory");
        assert!(cfg.connection_string.is_empty());
    }

    #[test]
    fn available_backends_are_sorted_and_deduplicated() {
        let mut reg = RepositoryRegistry::new();
        reg.register(counting("memory").0);
        reg.register(counting("postgres").0);
        reg.register(counting("memory").0);

        assert_eq!(reg.available_backends(), vec!["memory", "postgres"]);
    }

    #[tokio::test]
    async fn create_dispatches_to_named_factory_only() {
        let mut reg = RepositoryRegistry::new();
        let (memory, memory_calls) = counting("memory");
        let (postgres, postgres_calls) = counting("postgres");
        reg.register(memory);
        reg.register(postgres);

        let store = reg.create(&config("memory")).await;

        assert!(store.is_ok());
        assert_eq!(memory_calls.load(Ordering::SeqCst), 1);
        assert_eq!(postgres_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_backend_lists_alternatives() {
        let mut reg = RepositoryRegistry::new();
        reg.register(counting("memory").0);

        match reg.create(&config("postgres")).await {
            Err(RepositoryError::Configuration(msg)) => {
                assert!(msg.contains("postgres"));
                assert!(msg.contains("memory"));
            }
            Err(other) => panic!("expected Configuration error, got {other:?}"),
            Ok(_) => panic!("expected Configuration error, got a store"),
        }
    }

    #[tokio::test]
    async fn factory_errors_propagate() {
        let mut reg = RepositoryRegistry::new();
        reg.register(Box::new(BrokenFactory));

        let err = reg.create(&config("broken")).await.err();

        assert_eq!(err, Some(RepositoryError::Connection("refused".to_string())));
    }
}
