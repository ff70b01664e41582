use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::ValeriError;
use crate::types::{Money, Rate};
use crate::ValeriResult;

/// Compounding factor `(1 + rate)^periods`.
pub fn compound_factor(rate: Rate, periods: u32) -> ValeriResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| ValeriError::Overflow {
            context: format!("compounding factor (1 + {rate})^{periods}"),
        })
}

/// Grow a year-1 base amount by an escalation rate: `base * (1 + rate)^periods`.
pub fn escalate(base: Money, rate: Rate, periods: u32) -> ValeriResult<Money> {
    let factor = compound_factor(rate, periods)?;
    base.checked_mul(factor).ok_or_else(|| ValeriError::Overflow {
        context: format!("escalating {base} over {periods} periods"),
    })
}

/// Discount an amount received at the end of `periods` back to year 0.
pub fn present_value(amount: Money, rate: Rate, periods: u32) -> ValeriResult<Money> {
    let discount = compound_factor(rate, periods)?;
    if discount.is_zero() {
        return Err(ValeriError::DivisionByZero {
            context: format!("discount factor at period {periods}"),
        });
    }
    amount.checked_div(discount).ok_or_else(|| ValeriError::Overflow {
        context: format!("discounting {amount} at period {periods}"),
    })
}

/// Net Present Value of a series of year-end cash flows, the first at year 0.
pub fn npv(rate: Rate, cash_flows: &[Money]) -> ValeriResult<Money> {
    if rate <= dec!(-1) {
        return Err(ValeriError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate must be greater than -100%".into(),
        });
    }

    let mut result = Decimal::ZERO;
    let one_plus_r = Decimal::ONE + rate;
    let mut discount = Decimal::ONE;

    for (t, cf) in cash_flows.iter().enumerate() {
        if t > 0 {
            discount *= one_plus_r;
        }
        if discount.is_zero() {
            return Err(ValeriError::DivisionByZero {
                context: format!("NPV discount factor at period {t}"),
            });
        }
        result += cf / discount;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_npv_basic() {
        let cfs = vec![dec!(-1000), dec!(300), dec!(400), dec!(500)];
        let result = npv(dec!(0.10), &cfs).unwrap();
        // NPV at 10%: -1000 + 300/1.1 + 400/1.21 + 500/1.331 ≈ -21.04
        assert!((result - dec!(-21.04)).abs() < dec!(0.01));
    }

    #[test]
    fn test_npv_zero_rate() {
        let cfs = vec![dec!(-100), dec!(50), dec!(50), dec!(50)];
        let result = npv(dec!(0.0), &cfs).unwrap();
        assert_eq!(result, dec!(50));
    }

    #[test]
    fn test_npv_rejects_total_loss_rate() {
        assert!(npv(dec!(-1), &[dec!(-100), dec!(50)]).is_err());
    }

    #[test]
    fn test_escalate_two_percent() {
        assert_eq!(escalate(dec!(0.30), dec!(0.02), 1).unwrap(), dec!(0.306));
        assert_eq!(escalate(dec!(0.30), dec!(0.02), 2).unwrap(), dec!(0.31212));
    }

    #[test]
    fn test_escalate_zero_periods_is_identity() {
        assert_eq!(escalate(dec!(123.45), dec!(0.07), 0).unwrap(), dec!(123.45));
    }

    #[test]
    fn test_present_value_one_period() {
        let pv = present_value(dec!(306), dec!(0.065), 1).unwrap();
        assert!((pv - dec!(287.3239)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_present_value_zero_discount_factor() {
        let err = present_value(dec!(100), dec!(-1), 3).unwrap_err();
        assert!(matches!(err, ValeriError::DivisionByZero { .. }));
    }

    #[test]
    fn test_compound_factor_overflow() {
        let err = compound_factor(dec!(1000000), 100).unwrap_err();
        assert!(matches!(err, ValeriError::Overflow { .. }));
    }
}
