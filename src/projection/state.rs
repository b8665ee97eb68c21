//! Running portfolio state carried through a projection

use crate::inputs::ProjectionInputs;

/// Notional share price at year 0; only ratios matter
pub const STARTING_SHARE_PRICE: f64 = 100.0;

/// Accumulator threaded through every period of the projection
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Current share price
    pub share_price: f64,

    /// Shares held, including reinvested dividends
    pub shares_owned: f64,

    /// Initial investment plus every deposit so far
    pub total_contributions: f64,

    /// Cumulative dividends paid (all reinvested)
    pub total_dividends: f64,

    /// Annual dividend per share; grows once a year
    pub annual_dividend_per_share: f64,
}

impl ProjectionState {
    /// Initial state before any period has run
    pub fn from_inputs(inputs: &ProjectionInputs) -> Self {
        let share_price = STARTING_SHARE_PRICE;
        Self {
            share_price,
            shares_owned: inputs.initial_investment / share_price,
            total_contributions: inputs.initial_investment,
            total_dividends: 0.0,
            annual_dividend_per_share: share_price * (inputs.annual_dividend_yield / 100.0),
        }
    }

    /// Deposit cash and buy shares at the current price
    pub fn contribute(mut self, amount: f64) -> Self {
        self.total_contributions += amount;
        self.shares_owned += amount / self.share_price;
        self
    }

    /// Pay a dividend of `per_share` on every held share and reinvest it at
    /// the current price
    pub fn reinvest_dividend(mut self, per_share: f64) -> Self {
        let paid = self.shares_owned * per_share;
        self.total_dividends += paid;
        self.shares_owned += paid / self.share_price;
        self
    }

    /// Grow the share price by one period's factor
    pub fn appreciate(mut self, factor: f64) -> Self {
        self.share_price *= factor;
        self
    }

    /// Apply the annual dividend growth at year end
    pub fn grow_dividend(mut self, growth_rate_percent: f64) -> Self {
        self.annual_dividend_per_share *= 1.0 + growth_rate_percent / 100.0;
        self
    }

    pub fn portfolio_value(&self) -> f64 {
        self.shares_owned * self.share_price
    }

    /// Forward-looking annual dividend income at the current rate
    pub fn annual_income(&self) -> f64 {
        self.shares_owned * self.annual_dividend_per_share
    }

    pub fn monthly_income(&self) -> f64 {
        self.annual_income() / 12.0
    }

    /// Current dividend yield, percent
    pub fn current_yield(&self) -> f64 {
        self.annual_dividend_per_share / self.share_price * 100.0
    }
}
