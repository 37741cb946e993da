//! Free-form duration parsing.
//!
//! Turns inputs such as `7 days`, `1 month`, `2 years`, `30` or `Lifetime`
//! into a canonical [`DurationKey`]. The input is trimmed and lower-cased,
//! then the following rules are tried in order and the first match wins:
//!
//! 1. exactly `lifetime`;
//! 2. a number followed (after optional whitespace) by `day`/`days`,
//!    anywhere in the text: the number is used as-is;
//! 3. the same with `month`/`months`: the number times 30;
//! 4. the same with `year`/`years`: the number times 365;
//! 5. the whole text is digits: used as-is.
//!
//! Unit rules search the text rather than anchoring to it, so
//! `please wait 7 days thanks` is accepted, and `1 month 7 days` resolves
//! through the day rule to `7`.

use crate::models::{DurationKey, LIFETIME};

/// Approximate length of a month, in days.
pub const DAYS_PER_MONTH: u64 = 30;

/// Approximate length of a year, in days (leap years ignored).
pub const DAYS_PER_YEAR: u64 = 365;

/// Parses a duration, or returns `None` if no rule matches.
///
/// Month and year counts too large for a 64-bit day count are rejected.
///
/// # Examples
///
/// ```
/// use reseller_catalog::duration_parser::parse_duration;
///
/// assert_eq!(parse_duration("1 month").unwrap().as_str(), "30");
/// assert!(parse_duration(" LIFETIME ").unwrap().is_lifetime());
/// assert!(parse_duration("soon").is_none());
/// ```
#[must_use]
pub fn parse_duration(raw: &str) -> Option<DurationKey> {
    let input = raw.trim().to_lowercase();
    let key = canonicalize(&input);
    match key.as_ref() {
        Some(parsed) => tracing::debug!(input = raw, key = %parsed, "parsed duration"),
        None => tracing::debug!(input = raw, "unrecognized duration"),
    }
    key
}

/// Parses a duration into its key text, or the empty string if invalid.
///
/// Callers must not commit a duration when this returns `""`.
#[inline]
#[must_use]
pub fn parse_duration_token(raw: &str) -> String {
    parse_duration(raw).map_or_else(String::new, |key| key.as_str().to_owned())
}

/// Applies the rules to already trimmed, lower-cased input.
fn canonicalize(input: &str) -> Option<DurationKey> {
    if input == LIFETIME {
        return Some(DurationKey::LIFETIME);
    }
    if let Some(days) = count_before_unit(input, "day") {
        return Some(DurationKey::from_digits(days.to_owned()));
    }
    if let Some(months) = count_before_unit(input, "month") {
        return scaled(months, DAYS_PER_MONTH);
    }
    if let Some(years) = count_before_unit(input, "year") {
        return scaled(years, DAYS_PER_YEAR);
    }
    if !input.is_empty() && input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Some(DurationKey::from_digits(input.to_owned()));
    }
    None
}

/// Finds the leftmost run of ASCII digits followed by optional
/// whitespace and then `unit`, returning the digits.
fn count_before_unit<'input>(input: &'input str, unit: &str) -> Option<&'input str> {
    let mut rest = input;
    while let Some(start) = rest.find(|c: char| c.is_ascii_digit()) {
        let (_, tail) = rest.split_at_checked(start)?;
        let run_len = tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (digits, after) = tail.split_at_checked(run_len)?;
        if after.trim_start().starts_with(unit) {
            return Some(digits);
        }
        rest = after;
    }
    None
}

/// Converts a unit count into days.
fn scaled(count: &str, days_per_unit: u64) -> Option<DurationKey> {
    let days = count.parse::<u64>().ok()?.checked_mul(days_per_unit)?;
    Some(DurationKey::from_digits(days.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(raw: &str) -> String {
        parse_duration_token(raw)
    }

    #[test]
    fn lifetime_in_any_case_and_padding() {
        assert_eq!(token("lifetime"), "lifetime");
        assert_eq!(token("LIFETIME"), "lifetime");
        assert_eq!(token("  Lifetime "), "lifetime");
        assert!(parse_duration("Lifetime").unwrap().is_lifetime());
    }

    #[test]
    fn lifetime_padding_may_be_any_whitespace() {
        assert_eq!(token("\tlifetime\n"), "lifetime");
        assert_eq!(token("\r\n LIFETIME \t"), "lifetime");
        assert_eq!(token("\u{a0}lifetime\u{3000}"), "lifetime");
    }

    #[test]
    fn unit_may_follow_unicode_whitespace() {
        assert_eq!(token("7\tdays"), "7");
        assert_eq!(token("7\ndays"), "7");
        assert_eq!(token("7\u{a0}days"), "7");
        assert_eq!(token("2\u{3000}months"), "60");
        assert_eq!(token("1 \t\u{2003}year"), "365");
    }

    #[test]
    fn lifetime_must_be_exact() {
        assert_eq!(token("lifetime access"), "");
        assert_eq!(token("life time"), "");
    }

    #[test]
    fn days_are_taken_unchanged() {
        assert_eq!(token("7 days"), "7");
        assert_eq!(token("7day"), "7");
        assert_eq!(token("1 day"), "1");
        assert_eq!(token("14   DAYS"), "14");
        assert_eq!(token("0 days"), "0");
    }

    #[test]
    fn months_convert_to_thirty_days() {
        assert_eq!(token("1 month"), "30");
        assert_eq!(token("3months"), "90");
        assert_eq!(token("12 Months"), "360");
    }

    #[test]
    fn years_convert_to_365_days() {
        assert_eq!(token("2 years"), "730");
        assert_eq!(token("1year"), "365");
    }

    #[test]
    fn bare_number_is_a_day_count() {
        assert_eq!(token("30"), "30");
        assert_eq!(token(" 365 "), "365");
    }

    #[test]
    fn invalid_inputs_yield_empty_sentinel() {
        assert_eq!(token("abc"), "");
        assert_eq!(token(""), "");
        assert_eq!(token("   "), "");
        assert_eq!(token("12 weeks"), "");
        assert_eq!(token("days"), "");
        assert!(parse_duration("forever").is_none());
    }

    #[test]
    fn unit_search_is_not_anchored() {
        assert_eq!(token("please wait 7 days thanks"), "7");
        assert_eq!(token("about 2 months total"), "60");
        assert_eq!(token("3monthly"), "90");
    }

    #[test]
    fn day_rule_wins_over_month_rule() {
        assert_eq!(token("1 month 7 days"), "7");
        assert_eq!(token("7 days 1 month"), "7");
    }

    #[test]
    fn month_rule_wins_over_year_rule() {
        assert_eq!(token("1 year 2 months"), "60");
    }

    #[test]
    fn leftmost_number_followed_by_unit_is_used() {
        assert_eq!(token("5 or 10 days"), "10");
        assert_eq!(token("1.5 months"), "150");
        assert_eq!(token("day 5 days"), "5");
    }

    #[test]
    fn day_digits_keep_leading_zeros() {
        assert_eq!(token("007 days"), "007");
        assert_eq!(token("007"), "007");
        assert_eq!(token("01 month"), "30");
    }

    #[test]
    fn non_ascii_digits_are_not_numbers() {
        assert_eq!(token("\u{0663}"), "");
        assert_eq!(token("\u{0663} days"), "");
    }

    #[test]
    fn overflowing_unit_counts_are_rejected() {
        assert_eq!(token("99999999999999999999 months"), "");
        assert_eq!(token("18446744073709551615 years"), "");
        assert_eq!(token("99999999999999999999 days"), "99999999999999999999");
    }
}
