//! Display-only rounding. Nothing formatted here is fed back into stored values.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use valeri_core::{Currency, Money, Rate, Years};

/// Round half away from zero and pad to `dp` places.
pub fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Whole-unit amount in German grouping, e.g. `-6.759 €`.
pub fn currency_whole(amount: Money, currency: Currency) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped} {}", currency.symbol())
}

/// `4.3 Years`, or `> 15 Years` when the lifetime ends before payback.
pub fn payback(period: Option<Years>, lifetime: u32) -> String {
    match period {
        Some(years) => format!("{} Years", fixed(years, 1)),
        None => format!("> {lifetime} Years"),
    }
}

/// Fraction shown as a percentage with two decimals, e.g. `5.20%`.
pub fn percent(rate: Rate) -> String {
    format!("{}%", fixed(rate * dec!(100), 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(currency_whole(dec!(-6758.5033), Currency::EUR), "-6.759 €");
        assert_eq!(currency_whole(dec!(1234567.4), Currency::EUR), "1.234.567 €");
        assert_eq!(currency_whole(dec!(999.49), Currency::CHF), "999 CHF");
        assert_eq!(currency_whole(dec!(-0.4), Currency::EUR), "0 €");
    }

    #[test]
    fn test_payback_text() {
        assert_eq!(payback(Some(dec!(4.2633)), 10), "4.3 Years");
        assert_eq!(payback(Some(Decimal::ZERO), 10), "0.0 Years");
        assert_eq!(payback(None, 15), "> 15 Years");
    }

    #[test]
    fn test_percent_text() {
        assert_eq!(percent(dec!(0.052)), "5.20%");
        assert_eq!(percent(dec!(0.06645)), "6.65%");
    }

    #[test]
    fn test_fixed_pads() {
        assert_eq!(fixed(dec!(306), 2), "306.00");
        assert_eq!(fixed(dec!(0.30600001), 4), "0.3060");
    }
}
