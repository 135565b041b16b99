pub mod calculations;
pub mod csv_batch;
pub mod db;
pub mod deductions;
pub mod format;
pub mod models;
pub mod services;
pub mod validation;

pub use csv_batch::ExtractionError;
pub use db::repository::{DeductionRepository, RepositoryError};
pub use models::*;
pub use services::{AdminService, ServiceError, TaxService};
pub use validation::ValidationError;
