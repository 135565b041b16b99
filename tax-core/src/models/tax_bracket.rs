use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A contiguous income range taxed at a single marginal rate.
///
/// `max_income` of `None` marks the open-ended top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

/// Progressive rate table, ordered by `min_income`.
///
/// The first bracket starts at -1 so that its label reads `0-150,000`.
pub static TAX_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        min_income: Decimal::NEGATIVE_ONE,
        max_income: Some(Decimal::from_parts(150_000, 0, 0, false, 0)),
        rate: Decimal::ZERO,
    },
    TaxBracket {
        min_income: Decimal::from_parts(150_000, 0, 0, false, 0),
        max_income: Some(Decimal::from_parts(500_000, 0, 0, false, 0)),
        rate: Decimal::from_parts(10, 0, 0, false, 2),
    },
    TaxBracket {
        min_income: Decimal::from_parts(500_000, 0, 0, false, 0),
        max_income: Some(Decimal::from_parts(1_000_000, 0, 0, false, 0)),
        rate: Decimal::from_parts(15, 0, 0, false, 2),
    },
    TaxBracket {
        min_income: Decimal::from_parts(1_000_000, 0, 0, false, 0),
        max_income: Some(Decimal::from_parts(2_000_000, 0, 0, false, 0)),
        rate: Decimal::from_parts(20, 0, 0, false, 2),
    },
    TaxBracket {
        min_income: Decimal::from_parts(2_000_000, 0, 0, false, 0),
        max_income: None,
        rate: Decimal::from_parts(35, 0, 0, false, 2),
    },
];
