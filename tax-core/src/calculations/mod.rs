//! Tax calculation logic.
//!
//! [`income_tax`] holds the progressive bracket calculator; [`common`] the
//! rounding helpers it shares with the rest of the crate.

pub mod common;
pub mod income_tax;

pub use income_tax::{IncomeTaxCalculator, bracket_label, compute_tax};
