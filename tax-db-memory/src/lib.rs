//! In-memory deduction store for `tax-core`.

pub mod factory;
pub mod repository;
pub mod seed;

pub use factory::{DEFAULTS, MemoryRepositoryFactory};
pub use repository::MemoryRepository;
pub use seed::{default_seeds, load_seed_file, parse_seeds};
