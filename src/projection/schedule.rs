//! Per-period contribution and dividend event scheduling
//!
//! A projection year is split into `periods_per_year` ticks, the larger of
//! the two payment frequencies. Each tick is flagged for a contribution
//! and/or a dividend payment with a modulo rule:
//! an event fires when `period % (periods_per_year / frequency) == 1`, or on
//! every tick when the frequency equals `periods_per_year`.

use crate::inputs::PaymentFrequency;

/// Events that fire within one period of a projection year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodEvents {
    /// Period within the year (1-indexed)
    pub period: u32,

    /// A contribution is deposited this period
    pub contribution: bool,

    /// A dividend is paid (and reinvested) this period
    pub dividend: bool,
}

/// Deterministic event schedule for one projection year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchedule {
    contribution: PaymentFrequency,
    dividend: PaymentFrequency,
}

impl EventSchedule {
    pub fn new(contribution: PaymentFrequency, dividend: PaymentFrequency) -> Self {
        Self { contribution, dividend }
    }

    /// Number of ticks per year
    pub fn periods_per_year(&self) -> u32 {
        self.contribution.per_year().max(self.dividend.per_year())
    }

    /// Events for each period 1..=periods_per_year, in order
    pub fn periods(&self) -> impl Iterator<Item = PeriodEvents> {
        let periods_per_year = self.periods_per_year();
        let contribution = self.contribution.per_year();
        let dividend = self.dividend.per_year();

        (1..=periods_per_year).map(move |period| PeriodEvents {
            period,
            contribution: fires(period, periods_per_year, contribution),
            dividend: fires(period, periods_per_year, dividend),
        })
    }
}

/// Every frequency in `PaymentFrequency` divides any larger one, so the
/// spacing below is always exact.
fn fires(period: u32, periods_per_year: u32, frequency: u32) -> bool {
    frequency == periods_per_year || period % (periods_per_year / frequency) == 1
}
