//! Display formatting for amounts shown to users.
//!
//! Bracket labels and validation messages group the integer part in threes
//! with `,`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats `value` with `dp` fractional digits and `,` thousands separators.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format::format_thousands;
///
/// assert_eq!(format_thousands(dec!(150001), 0), "150,001");
/// assert_eq!(format_thousands(dec!(10000), 2), "10,000.00");
/// ```
pub fn format_thousands(
    value: Decimal,
    dp: u32,
) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Formats a money amount for messages: two decimals, grouped.
pub fn format_amount(value: &Decimal) -> String {
    format_thousands(*value, 2)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn small_values_have_no_separator() {
        assert_eq!(format_thousands(dec!(0), 0), "0");
        assert_eq!(format_thousands(dec!(999), 0), "999");
    }

    #[test]
    fn groups_integer_part_in_threes() {
        assert_eq!(format_thousands(dec!(1000), 0), "1,000");
        assert_eq!(format_thousands(dec!(1000001), 0), "1,000,001");
        assert_eq!(format_thousands(dec!(2000001), 0), "2,000,001");
    }

    #[test]
    fn pads_fraction_to_requested_places() {
        assert_eq!(format_thousands(dec!(100000), 2), "100,000.00");
        assert_eq!(format_thousands(dec!(1234.5), 2), "1,234.50");
    }

    #[test]
    fn rounds_before_formatting() {
        assert_eq!(format_thousands(dec!(999.995), 2), "1,000.00");
        assert_eq!(format_thousands(dec!(150000.4), 0), "150,000");
    }

    #[test]
    fn negative_values_keep_sign_outside_groups() {
        assert_eq!(format_thousands(dec!(-1234567.891), 2), "-1,234,567.89");
        assert_eq!(format_thousands(dec!(-0.001), 2), "0.00");
    }

    #[test]
    fn format_amount_uses_two_decimals() {
        assert_eq!(format_amount(&dec!(10000)), "10,000.00");
    }
}
