use bigdecimal::{BigDecimal, RoundingMode};
use chrono::Utc;

use crate::types::BaseAmount;

/// Render a decimal amount as a USD display string with two fraction digits
/// and thousands separators, e.g. `$1,234,567.89`. Rounding is half-up.
pub fn format_currency(amount: &BigDecimal) -> String {
    let rounded = amount.with_scale_round(2, RoundingMode::HalfUp);
    let repr = rounded.to_string();

    let (sign, repr) = match repr.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", repr.as_str()),
    };

    let (whole, frac) = repr.split_once('.').unwrap_or((repr, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", sign, grouped, frac)
}

/// Share of `target` covered by `collected`, as a whole percentage rounded
/// half-up. Returns 0 when the target is zero; that is a display policy,
/// not arithmetic.
pub fn calculate_percentage(collected: BaseAmount, target: BaseAmount) -> u32 {
    let c = collected.get();
    let t = target.get();

    if t == 0 {
        return 0;
    }

    let whole = c / t;
    let rem = c % t;

    (whole * 100 + (rem * 100 + t / 2) / t) as u32
}

/// Strict comparison: a deadline equal to the current second has not passed.
pub fn is_deadline_passed(deadline: i64) -> bool {
    deadline_passed_at(deadline, Utc::now().timestamp())
}

fn deadline_passed_at(deadline: i64, now: i64) -> bool {
    now > deadline
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn amount(s: &str) -> BaseAmount {
        BaseAmount::from_decimal_str(s).unwrap()
    }

    #[test]
    fn formats_currency_with_grouping() {
        let value = BigDecimal::from_str("1234567.891").unwrap();
        assert_eq!(format_currency(&value), "$1,234,567.89");
    }

    #[test]
    fn formats_small_amounts_with_two_digits() {
        let value = BigDecimal::from_str("0.046").unwrap();
        assert_eq!(format_currency(&value), "$0.05");

        let value = BigDecimal::from_str("7").unwrap();
        assert_eq!(format_currency(&value), "$7.00");
    }

    #[test]
    fn percentage_of_zero_target_is_zero() {
        assert_eq!(calculate_percentage(amount("123"), BaseAmount::ZERO), 0);
        assert_eq!(
            calculate_percentage(BaseAmount::ZERO, BaseAmount::ZERO),
            0
        );
    }

    #[test]
    fn percentage_matches_expected_ratios() {
        assert_eq!(calculate_percentage(amount("50"), amount("100")), 50);
        assert_eq!(calculate_percentage(amount("0"), amount("100")), 0);
        assert_eq!(calculate_percentage(amount("100"), amount("100")), 100);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(calculate_percentage(amount("1"), amount("3")), 33);
        assert_eq!(calculate_percentage(amount("2"), amount("3")), 67);
        assert_eq!(calculate_percentage(amount("1"), amount("200")), 1);
    }

    #[test]
    fn deadline_comparison_is_strict() {
        assert!(deadline_passed_at(999, 1000));
        assert!(!deadline_passed_at(1000, 1000));
        assert!(!deadline_passed_at(1001, 1000));
    }
}
