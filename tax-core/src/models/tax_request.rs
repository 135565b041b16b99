use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeductionSlug;

/// Allowance categories a taxpayer may claim against their income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllowanceType {
    Donation,
    KReceipt,
}

impl AllowanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donation => "donation",
            Self::KReceipt => "k-receipt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "donation" => Some(Self::Donation),
            "k-receipt" => Some(Self::KReceipt),
            _ => None,
        }
    }

    /// The deduction row that caps claims of this type.
    pub fn deduction_slug(&self) -> DeductionSlug {
        match self {
            Self::Donation => DeductionSlug::Donation,
            Self::KReceipt => DeductionSlug::KReceipt,
        }
    }
}

impl fmt::Display for AllowanceType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One claimed allowance. The type is kept as the raw wire string so that
/// unknown types reach validation instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allowance {
    pub allowance_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl Allowance {
    pub fn new(
        allowance_type: AllowanceType,
        amount: Decimal,
    ) -> Self {
        Self {
            allowance_type: allowance_type.as_str().to_string(),
            amount,
        }
    }

    pub fn is(
        &self,
        allowance_type: AllowanceType,
    ) -> bool {
        self.allowance_type == allowance_type.as_str()
    }
}

/// A single tax computation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub wht: Decimal,
    #[serde(default)]
    pub allowances: Vec<Allowance>,
}

impl TaxRequest {
    pub fn new(total_income: Decimal) -> Self {
        Self {
            total_income,
            wht: Decimal::ZERO,
            allowances: Vec::new(),
        }
    }

    pub fn with_wht(
        mut self,
        wht: Decimal,
    ) -> Self {
        self.wht = wht;
        self
    }

    pub fn with_allowance(
        mut self,
        allowance_type: AllowanceType,
        amount: Decimal,
    ) -> Self {
        self.allowances.push(Allowance::new(allowance_type, amount));
        self
    }
}
