mod csv_row;
mod deduction;
mod tax_bracket;
mod tax_request;
mod tax_result;

pub use csv_row::CsvRow;
pub use deduction::{
    Deduction, DeductionAmountResponse, DeductionConfig, DeductionRequest, DeductionSlug,
};
pub use tax_bracket::{TAX_BRACKETS, TaxBracket};
pub use tax_request::{Allowance, AllowanceType, TaxRequest};
pub use tax_result::{CsvTaxResult, TaxCsvResponse, TaxLevel, TaxResult};
