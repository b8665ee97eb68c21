//! Year-by-year output structures for projections

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisSummary;
use super::state::ProjectionState;
use crate::inputs::ProjectionInputs;

/// Round half up to a whole unit (2.5 -> 3, -2.5 -> -2).
///
/// Exact at every magnitude: `value - floor` never loses precision,
/// where `value + 0.5` would round at or above 2^52.
pub fn round_whole(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round half up to two decimal places
pub fn round_cents(value: f64) -> f64 {
    round_whole(value * 100.0) / 100.0
}

/// Fixed-point display with exact decimal ties rounded away from zero
/// (`4.125` -> `"4.13"`), where `{:.N}` would round them to even.
pub fn to_fixed(value: f64, digits: usize) -> String {
    // -0.0 displays as zero
    let value = if value == 0.0 { 0.0 } else { value };
    if !is_decimal_tie(value, digits) {
        return format!("{:.*}", digits, value);
    }

    // a tie has exactly digits + 1 decimals, so this expansion is exact
    let exact = format!("{:.*}", digits + 1, value.abs());
    let mut out = bump_last_digit(&exact[..exact.len() - 1]);
    if out.ends_with('.') {
        out.pop();
    }
    if value < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Fixed two-decimal display
pub fn fixed2(value: f64) -> String {
    to_fixed(value, 2)
}

/// Fixed one-decimal display
pub fn fixed1(value: f64) -> String {
    to_fixed(value, 1)
}

/// `value` sits exactly halfway between two `digits`-decimal numbers
/// iff `value * 2^(digits + 1)` is an odd integer.
fn is_decimal_tie(value: f64, digits: usize) -> bool {
    if !value.is_finite() {
        return false;
    }
    let scaled = (value * 2f64.powi(digits as i32 + 1)).abs();
    scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 == 1.0
}

/// Add one unit in the last place of a decimal string, carrying left
fn bump_last_digit(decimal: &str) -> String {
    let mut chars: Vec<char> = decimal.chars().collect();
    for i in (0..chars.len()).rev() {
        match chars[i] {
            '.' => continue,
            '9' => chars[i] = '0',
            d => {
                chars[i] = (d as u8 + 1) as char;
                return chars.into_iter().collect();
            }
        }
    }
    std::iter::once('1').chain(chars).collect()
}

/// Portfolio state at the end of one projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSnapshot {
    /// 0 is the starting position
    pub year: u32,

    /// Shares x price, whole units
    pub portfolio_value: f64,

    /// Cumulative deposits including the initial investment, whole units
    pub total_contributions: f64,

    /// Cumulative dividends paid, whole units
    pub total_dividends: f64,

    /// Forward annual dividend income / 12, whole units
    pub monthly_income: f64,

    /// Current dividend yield, percent with two decimals
    pub dividend_yield: String,

    pub share_price: f64,

    pub shares_owned: f64,
}

impl YearSnapshot {
    /// Year-0 snapshot; reports the input yield rather than a derived one
    pub fn opening(state: &ProjectionState, inputs: &ProjectionInputs) -> Self {
        Self {
            year: 0,
            portfolio_value: round_whole(state.portfolio_value()),
            total_contributions: round_whole(state.total_contributions),
            total_dividends: 0.0,
            monthly_income: round_whole(state.monthly_income()),
            dividend_yield: fixed2(inputs.annual_dividend_yield),
            share_price: round_cents(state.share_price),
            shares_owned: round_cents(state.shares_owned),
        }
    }

    /// Snapshot of the state at the end of `year`
    pub fn closing(year: u32, state: &ProjectionState) -> Self {
        Self {
            year,
            portfolio_value: round_whole(state.portfolio_value()),
            total_contributions: round_whole(state.total_contributions),
            total_dividends: round_whole(state.total_dividends),
            monthly_income: round_whole(state.monthly_income()),
            dividend_yield: fixed2(state.current_yield()),
            share_price: round_cents(state.share_price),
            shares_owned: round_cents(state.shares_owned),
        }
    }

    /// Annualized income at this snapshot
    pub fn annual_income(&self) -> f64 {
        self.monthly_income * 12.0
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Inputs the projection was run with
    pub inputs: ProjectionInputs,

    /// One snapshot per year, 0..=years_to_project
    #[serde(rename = "projectionData")]
    pub snapshots: Vec<YearSnapshot>,

    /// Summary derived from the final snapshot
    pub analysis: AnalysisSummary,
}

impl ProjectionResult {
    /// Last projected year
    pub fn final_snapshot(&self) -> Option<&YearSnapshot> {
        self.snapshots.last()
    }

    /// Snapshot for a given year, if projected
    pub fn snapshot(&self, year: u32) -> Option<&YearSnapshot> {
        self.snapshots.get(year as usize)
    }

    /// Number of projected years (excluding year 0)
    pub fn years(&self) -> u32 {
        self.snapshots.len().saturating_sub(1) as u32
    }
}
