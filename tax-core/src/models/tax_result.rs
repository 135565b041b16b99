use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tax attributed to one bracket of the rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLevel {
    pub level: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

/// Outcome of a single computation. At most one of `tax` and `tax_refund`
/// is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Decimal::is_zero",
        with = "rust_decimal::serde::float"
    )]
    pub tax_refund: Decimal,
    #[serde(rename = "taxLevel")]
    pub tax_levels: Vec<TaxLevel>,
}

impl TaxResult {
    /// Sum of the per-bracket tax before withholding is settled.
    pub fn bracket_total(&self) -> Decimal {
        self.tax_levels.iter().map(|l| l.tax).sum()
    }
}

/// One row of a batch response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvTaxResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Decimal::is_zero",
        with = "rust_decimal::serde::float"
    )]
    pub tax_refund: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCsvResponse {
    pub taxes: Vec<CsvTaxResult>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn result_serializes_with_wire_names() {
        let result = TaxResult {
            tax: dec!(0),
            tax_refund: dec!(1000),
            tax_levels: vec![TaxLevel {
                level: "0-150,000".to_string(),
                tax: dec!(0),
            }],
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "tax": 0.0,
                "taxRefund": 1000.0,
                "taxLevel": [{"level": "0-150,000", "tax": 0.0}]
            })
        );
    }

    #[test]
    fn zero_refund_is_omitted() {
        let row = CsvTaxResult {
            total_income: dec!(500000),
            tax: dec!(29000),
            tax_refund: dec!(0),
        };

        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({"totalIncome": 500000.0, "tax": 29000.0})
        );
    }

    #[test]
    fn bracket_total_sums_levels() {
        let result = TaxResult {
            tax: dec!(100),
            tax_refund: dec!(0),
            tax_levels: vec![
                TaxLevel {
                    level: "a".to_string(),
                    tax: dec!(40.5),
                },
                TaxLevel {
                    level: "b".to_string(),
                    tax: dec!(59.5),
                },
            ],
        };

        assert_eq!(result.bracket_total(), dec!(100));
    }
}
