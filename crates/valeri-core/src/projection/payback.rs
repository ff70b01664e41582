use log::warn;
use rust_decimal::Decimal;

use crate::types::{Money, Years};

/// Tracks the first year the cumulative discounted flow turns non-negative.
#[derive(Debug, Clone)]
pub(crate) struct PaybackTracker {
    period: Option<Years>,
}

impl PaybackTracker {
    /// A non-negative year-0 flow pays back immediately.
    pub(crate) fn new(year_zero: Money) -> Self {
        let period = if year_zero >= Decimal::ZERO {
            Some(Decimal::ZERO)
        } else {
            None
        };
        Self { period }
    }

    /// Feed year `year`'s discounted flow and the cumulative after adding it.
    /// Only the first crossing is kept.
    pub(crate) fn observe(&mut self, year: u32, discounted: Money, cumulative: Money) {
        if self.period.is_none() && cumulative >= Decimal::ZERO {
            self.period = Some(interpolate_crossing(year, discounted, cumulative));
        }
    }

    pub(crate) fn finish(self) -> Option<Years> {
        self.period
    }
}

/// Payback inside the crossing year, assuming the year's flow accrues evenly:
/// `(year - 1) + |prior| / discounted` where `prior = cumulative - discounted`.
///
/// A zero flow in the crossing year has nothing to interpolate over; payback is
/// then placed at the start of the year (fraction 0).
pub fn interpolate_crossing(year: u32, discounted: Money, cumulative: Money) -> Years {
    let completed = Decimal::from(year.saturating_sub(1));
    if discounted.is_zero() {
        warn!("zero discounted flow in payback year {year}; placing payback at start of year");
        return completed;
    }
    let prior = cumulative - discounted;
    completed + prior.abs() / discounted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_half_year_crossing() {
        // -100 before, +200 during year 3 => crosses halfway through.
        assert_eq!(interpolate_crossing(3, dec!(200), dec!(100)), dec!(2.5));
    }

    #[test]
    fn test_crossing_at_year_end() {
        assert_eq!(interpolate_crossing(4, dec!(250), Decimal::ZERO), dec!(4));
    }

    #[test]
    fn test_zero_flow_crossing_is_start_of_year() {
        assert_eq!(interpolate_crossing(6, Decimal::ZERO, Decimal::ZERO), dec!(5));
    }

    #[test]
    fn test_tracker_keeps_first_crossing() {
        let mut tracker = PaybackTracker::new(dec!(-100));
        tracker.observe(1, dec!(50), dec!(-50));
        tracker.observe(2, dec!(100), dec!(50));
        // A later dip and recovery must not move the payback.
        tracker.observe(3, dec!(-80), dec!(-30));
        tracker.observe(4, dec!(60), dec!(30));
        assert_eq!(tracker.finish(), Some(dec!(1.5)));
    }

    #[test]
    fn test_tracker_without_crossing() {
        let mut tracker = PaybackTracker::new(dec!(-100));
        tracker.observe(1, dec!(10), dec!(-90));
        assert_eq!(tracker.finish(), None);
    }

    #[test]
    fn test_non_negative_year_zero_pays_back_immediately() {
        let mut tracker = PaybackTracker::new(Decimal::ZERO);
        tracker.observe(1, dec!(-10), dec!(-10));
        assert_eq!(tracker.finish(), Some(Decimal::ZERO));
    }
}
