//! End-to-end tests driving the services through the memory backend.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::db::{DbConfig, RepositoryRegistry};
use tax_core::{
    AdminService, AllowanceType, CsvTaxResult, DeductionRepository, DeductionSlug,
    ExtractionError, ServiceError, TaxLevel, TaxRequest, TaxService, ValidationError,
};
use tax_db_memory::{DEFAULTS, MemoryRepository, MemoryRepositoryFactory};

const SAMPLE_BATCH: &str = include_str!("fixtures/sample_batch.csv");

fn seeded() -> Arc<dyn DeductionRepository> {
    Arc::new(MemoryRepository::with_defaults())
}

fn level(
    label: &str,
    tax: rust_decimal::Decimal,
) -> TaxLevel {
    TaxLevel {
        level: label.to_string(),
        tax,
    }
}

#[tokio::test]
async fn single_request_without_allowances() {
    let service = TaxService::new(seeded());

    let result = service
        .compute_single_tax(&TaxRequest::new(dec!(500000)))
        .await
        .unwrap();

    assert_eq!(result.tax, dec!(29000));
    assert_eq!(result.tax_refund, dec!(0));
    assert_eq!(
        result.tax_levels,
        vec![
            level("0-150,000", dec!(0)),
            level("150,001-500,000", dec!(29000)),
            level("500,001-1,000,000", dec!(0)),
            level("1,000,001-2,000,000", dec!(0)),
            level("2,000,001 and above", dec!(0)),
        ]
    );
}

#[tokio::test]
async fn single_request_rounds_once() {
    let service = TaxService::new(seeded());

    let result = service
        .compute_single_tax(&TaxRequest::new(dec!(560001)))
        .await
        .unwrap();

    assert_eq!(result.tax, dec!(35000.15));
}

#[tokio::test]
async fn withholding_above_tax_becomes_refund() {
    let service = TaxService::new(seeded());

    let result = service
        .compute_single_tax(&TaxRequest::new(dec!(500000)).with_wht(dec!(30000)))
        .await
        .unwrap();

    assert_eq!(result.tax, dec!(0));
    assert_eq!(result.tax_refund, dec!(1000));
}

#[tokio::test]
async fn empty_store_uses_default_deductions() {
    let service = TaxService::new(Arc::new(MemoryRepository::default()));

    let result = service
        .compute_single_tax(
            &TaxRequest::new(dec!(500000)).with_allowance(AllowanceType::Donation, dec!(200000)),
        )
        .await
        .unwrap();

    // 500000 - 60000 - 100000 = 340000
    assert_eq!(result.tax, dec!(19000));
}

#[tokio::test]
async fn invalid_request_is_client_error() {
    let service = TaxService::new(seeded());

    let err = service
        .compute_single_tax(&TaxRequest::new(dec!(100)).with_wht(dec!(200)))
        .await
        .unwrap_err();

    assert!(err.is_client_error());
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::WhtExceedsIncome)
    ));
}

#[tokio::test]
async fn batch_fixture_computes_in_order() {
    let service = TaxService::new(seeded());

    let response = service
        .compute_batch_tax(SAMPLE_BATCH.as_bytes())
        .await
        .unwrap();

    assert_eq!(
        response.taxes,
        vec![
            CsvTaxResult {
                total_income: dec!(500000),
                tax: dec!(29000),
                tax_refund: dec!(0),
            },
            CsvTaxResult {
                total_income: dec!(600000),
                tax: dec!(0),
                tax_refund: dec!(2000),
            },
            CsvTaxResult {
                total_income: dec!(750000),
                tax: dec!(11250),
                tax_refund: dec!(0),
            },
        ]
    );
}

#[tokio::test]
async fn batch_missing_donation_header_is_rejected() {
    let service = TaxService::new(seeded());
    let csv = "totalIncome,wht\n500000,0\n";

    let err = service.compute_batch_tax(csv.as_bytes()).await.unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Extraction(ExtractionError::MissingRequiredHeader)
    ));
}

#[tokio::test]
async fn update_below_minimum_leaves_store_untouched() {
    let repo = seeded();
    let admin = AdminService::new(repo.clone());

    let err = admin
        .update_deduction(DeductionSlug::Personal, dec!(9999))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "amount should not be less than 10,000.00");
    assert_eq!(
        repo.get_deduction("personal").await.unwrap().amount,
        dec!(60000)
    );
}

#[tokio::test]
async fn updated_deduction_feeds_later_calculations() {
    let repo = seeded();
    let admin = AdminService::new(repo.clone());
    let service = TaxService::new(repo);

    let updated = admin
        .update_deduction(DeductionSlug::Personal, dec!(70000))
        .await
        .unwrap();
    let result = service
        .compute_single_tax(&TaxRequest::new(dec!(500000)))
        .await
        .unwrap();

    assert_eq!(updated.amount, dec!(70000));
    // 430000 net: (430000 - 150000) * 10%
    assert_eq!(result.tax, dec!(28000));
}

#[tokio::test]
async fn update_on_empty_store_is_invalid_deduction() {
    let admin = AdminService::new(Arc::new(MemoryRepository::default()));

    let err = admin
        .update_deduction(DeductionSlug::KReceipt, dec!(1000))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::DeductionInvalid)
    ));
}

#[tokio::test]
async fn registry_opens_seed_file_backend() {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(MemoryRepositoryFactory));
    let config = DbConfig {
        backend: "memory".to_string(),
        connection_string: concat!(env!("CARGO_MANIFEST_DIR"), "/seeds/deductions.toml")
            .to_string(),
    };

    let repo = registry.create(&config).await.unwrap();
    let service = TaxService::new(repo);

    let deductions = service.deduction_config().await.unwrap();
    assert_eq!(deductions.get(DeductionSlug::KReceipt).amount, dec!(50000));
}

#[tokio::test]
async fn registry_rejects_unknown_backend() {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(MemoryRepositoryFactory));
    let config = DbConfig {
        backend: "postgres".to_string(),
        connection_string: DEFAULTS.to_string(),
    };

    assert!(registry.create(&config).await.is_err());
}
