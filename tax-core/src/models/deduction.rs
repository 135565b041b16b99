use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Slugs of the deduction categories the calculator tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeductionSlug {
    Personal,
    Donation,
    KReceipt,
}

impl DeductionSlug {
    pub const ALL: [DeductionSlug; 3] = [Self::Personal, Self::Donation, Self::KReceipt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Donation => "donation",
            Self::KReceipt => "k-receipt",
        }
    }

    /// Case-sensitive match against the stored slug.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "personal" => Some(Self::Personal),
            "donation" => Some(Self::Donation),
            "k-receipt" => Some(Self::KReceipt),
            _ => None,
        }
    }

    /// Amount used when the store holds no row for this slug.
    pub fn default_amount(&self) -> Decimal {
        match self {
            Self::Personal => Decimal::new(60_000, 0),
            Self::Donation => Decimal::new(100_000, 0),
            Self::KReceipt => Decimal::new(50_000, 0),
        }
    }
}

/// A configured deduction row.
///
/// `max_amount` of zero means the category has no upper bound, and an
/// `amount` of zero means claimed allowances of this type are not capped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deduction {
    pub slug: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip)]
    pub min_amount: Decimal,
    #[serde(skip)]
    pub max_amount: Decimal,
}

impl Deduction {
    /// A row carrying only the process-wide default amount, used when the
    /// store has nothing configured for `slug`.
    pub fn fallback(slug: DeductionSlug) -> Self {
        Self {
            slug: slug.as_str().to_string(),
            name: String::new(),
            amount: slug.default_amount(),
            min_amount: Decimal::ZERO,
            max_amount: Decimal::ZERO,
        }
    }

    pub fn has_upper_bound(&self) -> bool {
        self.max_amount > Decimal::ZERO
    }
}

/// The three deductions a computation needs, after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionConfig {
    pub personal: Deduction,
    pub donation: Deduction,
    pub k_receipt: Deduction,
}

impl DeductionConfig {
    pub fn get(&self, slug: DeductionSlug) -> &Deduction {
        match slug {
            DeductionSlug::Personal => &self.personal,
            DeductionSlug::Donation => &self.donation,
            DeductionSlug::KReceipt => &self.k_receipt,
        }
    }
}

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            personal: Deduction::fallback(DeductionSlug::Personal),
            donation: Deduction::fallback(DeductionSlug::Donation),
            k_receipt: Deduction::fallback(DeductionSlug::KReceipt),
        }
    }
}

/// Body of an admin deduction update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Response to an admin update, keyed by the field name the API uses for
/// each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeductionAmountResponse {
    Personal {
        #[serde(rename = "personalDeduction", with = "rust_decimal::serde::float")]
        amount: Decimal,
    },
    Donation {
        #[serde(rename = "donation", with = "rust_decimal::serde::float")]
        amount: Decimal,
    },
    KReceipt {
        #[serde(rename = "kReceipt", with = "rust_decimal::serde::float")]
        amount: Decimal,
    },
}

impl DeductionAmountResponse {
    pub fn new(
        slug: DeductionSlug,
        amount: Decimal,
    ) -> Self {
        match slug {
            DeductionSlug::Personal => Self::Personal { amount },
            DeductionSlug::Donation => Self::Donation { amount },
            DeductionSlug::KReceipt => Self::KReceipt { amount },
        }
    }
}
