use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::Rate;

/// Financing mix shared by all scenarios, stored as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalStructure {
    pub equity_ratio: Rate,
    pub debt_ratio: Rate,
}

impl CapitalStructure {
    pub fn new(equity_ratio: Rate, debt_ratio: Rate) -> Self {
        Self {
            equity_ratio,
            debt_ratio,
        }
    }

    /// Build from an equity share entered in percent. The share is clamped to
    /// [0, 100] and debt takes the remainder.
    pub fn from_equity_percent(equity_pct: Decimal) -> Self {
        let equity_pct = equity_pct.clamp(Decimal::ZERO, dec!(100));
        let debt_pct = dec!(100) - equity_pct;
        Self {
            equity_ratio: equity_pct / dec!(100),
            debt_ratio: debt_pct / dec!(100),
        }
    }

    /// Same as [`from_equity_percent`](Self::from_equity_percent) for raw form
    /// text. The leading number is read (`"12abc"` is 12, `"1e1"` is 10);
    /// text that does not start with a number counts as 0% equity.
    pub fn from_equity_entry(raw: &str) -> Self {
        let pct = leading_number(raw).unwrap_or(Decimal::ZERO);
        Self::from_equity_percent(pct)
    }

    pub fn weight_sum(&self) -> Rate {
        self.equity_ratio + self.debt_ratio
    }
}

/// Longest numeric prefix of `raw`: optional sign, digits with an optional
/// fraction, optional exponent. Values beyond `Decimal`'s range saturate.
fn leading_number(raw: &str) -> Option<Decimal> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let signed = |v: Decimal| if negative { -v } else { v };

    if rest.starts_with("Infinity") {
        return Some(signed(Decimal::MAX));
    }

    let int_len = count_digits(rest);
    let (frac, end) = match rest[int_len..].strip_prefix('.') {
        Some(after) => {
            let n = count_digits(after);
            (&after[..n], int_len + 1 + n)
        }
        None => ("", int_len),
    };
    if int_len == 0 && frac.is_empty() {
        return None;
    }

    let int_part = rest[..int_len].trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let frac = &frac[..frac.len().min(20)];
    let text = if frac.is_empty() {
        int_part.to_string()
    } else {
        format!("{int_part}.{frac}")
    };
    let mut value = match Decimal::from_str(&text) {
        Ok(v) => v,
        Err(_) => return Some(signed(Decimal::MAX)),
    };

    let exponent = exponent_suffix(&rest[end..]);
    if exponent > 0 {
        for _ in 0..exponent.min(64) {
            match value.checked_mul(dec!(10)) {
                Some(v) => value = v,
                None => return Some(signed(Decimal::MAX)),
            }
        }
    } else {
        for _ in 0..exponent.unsigned_abs().min(64) {
            value /= dec!(10);
        }
    }
    Some(signed(value))
}

fn count_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// `e`/`E`, optional sign, at least one digit; 0 when absent.
fn exponent_suffix(s: &str) -> i64 {
    let Some(after) = s.strip_prefix('e').or_else(|| s.strip_prefix('E')) else {
        return 0;
    };
    let (sign, digits) = match after.as_bytes().first() {
        Some(b'-') => (-1, &after[1..]),
        Some(b'+') => (1, &after[1..]),
        _ => (1, after),
    };
    let n = count_digits(digits);
    if n == 0 {
        return 0;
    }
    let magnitude: i64 = digits[..n.min(6)].parse().unwrap_or(0);
    sign * magnitude
}

impl Default for CapitalStructure {
    fn default() -> Self {
        Self::from_equity_percent(dec!(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debt_takes_remainder() {
        let cs = CapitalStructure::from_equity_percent(dec!(35));
        assert_eq!(cs.equity_ratio, dec!(0.35));
        assert_eq!(cs.debt_ratio, dec!(0.65));
        assert_eq!(cs.weight_sum(), Decimal::ONE);
    }

    #[test]
    fn test_equity_above_hundred_is_clamped() {
        let cs = CapitalStructure::from_equity_percent(dec!(140));
        assert_eq!(cs.equity_ratio, Decimal::ONE);
        assert_eq!(cs.debt_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_negative_equity_is_clamped() {
        let cs = CapitalStructure::from_equity_percent(dec!(-5));
        assert_eq!(cs.equity_ratio, Decimal::ZERO);
        assert_eq!(cs.debt_ratio, Decimal::ONE);
    }

    #[test]
    fn test_non_numeric_entry_counts_as_zero() {
        let cs = CapitalStructure::from_equity_entry("abc");
        assert_eq!(cs.equity_ratio, Decimal::ZERO);
        assert_eq!(cs.debt_ratio, Decimal::ONE);

        let cs = CapitalStructure::from_equity_entry(" 42.5 ");
        assert_eq!(cs.equity_ratio, dec!(0.425));
    }

    #[test]
    fn test_entry_reads_leading_number() {
        assert_eq!(CapitalStructure::from_equity_entry("12abc").equity_ratio, dec!(0.12));
        assert_eq!(CapitalStructure::from_equity_entry("1e1").equity_ratio, dec!(0.1));
        assert_eq!(CapitalStructure::from_equity_entry("2.5E+1%").equity_ratio, dec!(0.25));
        assert_eq!(CapitalStructure::from_equity_entry(".5").equity_ratio, dec!(0.005));
        assert_eq!(CapitalStructure::from_equity_entry("40.").equity_ratio, dec!(0.4));
        assert_eq!(CapitalStructure::from_equity_entry("5e").equity_ratio, dec!(0.05));
    }

    #[test]
    fn test_entry_out_of_range_is_clamped() {
        let cs = CapitalStructure::from_equity_entry("1e400");
        assert_eq!(cs.equity_ratio, Decimal::ONE);
        assert_eq!(cs.debt_ratio, Decimal::ZERO);

        let cs = CapitalStructure::from_equity_entry("-Infinity");
        assert_eq!(cs.equity_ratio, Decimal::ZERO);

        let cs = CapitalStructure::from_equity_entry("1e-400");
        assert_eq!(cs.equity_ratio, Decimal::ZERO);
    }
}
