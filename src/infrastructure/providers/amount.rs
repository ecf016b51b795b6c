//! Premium amount parsing shared by the provider response types.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Thousands separators seen in partner-formatted amounts.
const GROUP_SEPARATORS: [char; 5] = [' ', '\u{a0}', '\u{202f}', '.', '\''];

/// Truncates a decimal amount to whole currency units. Negative amounts are
/// treated as absent.
#[must_use]
pub fn whole_units(amount: Decimal) -> Option<u64> {
    if amount.is_sign_negative() {
        return None;
    }
    amount.trunc().to_u64()
}

/// Parses a locale-formatted amount such as `"192 000,00 UZS"`.
///
/// Strips the currency suffix and splits off the fraction. A `,` is always
/// the decimal separator; without one, a `.` is the decimal separator
/// unless exactly three digits follow it. The integer part is either plain
/// digits or groups of three after a leading group of one to three digits.
/// Anything else is not an amount.
///
/// # Examples
///
/// ```
/// use osago_quotes::infrastructure::providers::amount::parse_formatted_amount;
///
/// assert_eq!(parse_formatted_amount("192 000,00 UZS"), Some(192_000));
/// assert_eq!(parse_formatted_amount("192000.00 UZS"), Some(192_000));
/// assert_eq!(parse_formatted_amount("1.250.500,75 сўм"), Some(1_250_500));
/// assert_eq!(parse_formatted_amount("n/a"), None);
/// ```
#[must_use]
pub fn parse_formatted_amount(raw: &str) -> Option<u64> {
    let amount = raw
        .trim()
        .trim_end_matches(|c: char| c.is_alphabetic() || c.is_whitespace());
    let (integer_part, fraction) = split_fraction(amount);
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut groups = integer_part.split(|c: char| GROUP_SEPARATORS.contains(&c));
    let leading = groups.next()?;
    let mut digits = leading.to_string();
    let mut grouped = false;
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
        grouped = true;
    }
    if grouped && !(1..=3).contains(&leading.len()) {
        return None;
    }
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn split_fraction(amount: &str) -> (&str, &str) {
    if let Some(split) = amount.split_once(',') {
        return split;
    }
    match amount.rsplit_once('.') {
        Some((integer, fraction)) if fraction.len() != 3 => (integer, fraction),
        _ => (amount, ""),
    }
}
