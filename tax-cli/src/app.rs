//! Command handlers behind the `tax-calc` binary.
//!
//! Each handler takes already-opened services and returns the JSON text the
//! binary prints.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tax_core::db::{DbConfig, RepositoryRegistry};
use tax_core::{
    AdminService, Deduction, DeductionAmountResponse, DeductionRepository, DeductionRequest,
    DeductionSlug, TaxRequest, TaxService, ValidationError,
};
use tax_db_memory::MemoryRepositoryFactory;
use tracing::debug;

/// Registry with every backend compiled into the binary.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(MemoryRepositoryFactory));
    registry
}

pub async fn open_repository(config: &DbConfig) -> Result<Arc<dyn DeductionRepository>> {
    debug!("opening {} backend", config.backend);
    build_registry()
        .create(config)
        .await
        .with_context(|| format!("Failed to open '{}' backend", config.backend))
}

/// Computes one request given as JSON text.
pub async fn calculate(
    service: &TaxService,
    request_json: &str,
) -> Result<String> {
    let request: TaxRequest =
        serde_json::from_str(request_json).context("Failed to parse tax request JSON")?;

    let result = service.compute_single_tax(&request).await?;
    Ok(serde_json::to_string_pretty(&result)?)
}

/// Computes every row of a CSV upload.
pub async fn upload_csv<R: Read>(
    service: &TaxService,
    reader: R,
) -> Result<String> {
    let response = service.compute_batch_tax(reader).await?;
    Ok(serde_json::to_string_pretty(&response)?)
}

/// Applies an admin update from a `{"amount": n}` body; `slug` is one of
/// `personal`, `donation`, `k-receipt`.
pub async fn set_deduction(
    admin: &AdminService,
    slug: &str,
    request_json: &str,
) -> Result<String> {
    let slug = DeductionSlug::parse(slug).ok_or(ValidationError::DeductionInvalid)?;
    let request: DeductionRequest =
        serde_json::from_str(request_json).context("Failed to parse deduction request JSON")?;

    let updated = admin.update_deduction(slug, request.amount).await?;
    let response = DeductionAmountResponse::new(slug, updated.amount);
    Ok(serde_json::to_string_pretty(&response)?)
}

#[derive(Serialize)]
struct DeductionListing<'a> {
    deductions: [&'a Deduction; 3],
}

/// The resolved configuration, defaults included.
pub async fn list_deductions(service: &TaxService) -> Result<String> {
    let config = service.deduction_config().await?;

    let listing = DeductionListing {
        deductions: [&config.personal, &config.donation, &config.k_receipt],
    };
    Ok(serde_json::to_string_pretty(&listing)?)
}
