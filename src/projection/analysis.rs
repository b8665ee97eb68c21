//! Summary analysis derived from a finished projection

use serde::{Deserialize, Serialize};
use std::fmt;

use super::snapshots::{fixed2, YearSnapshot};
use crate::inputs::ProjectionInputs;

/// Yields above this are tagged high risk
pub const HIGH_YIELD_THRESHOLD: f64 = 6.0;

/// Yields below this are tagged low risk
pub const LOW_YIELD_THRESHOLD: f64 = 3.0;

/// Horizon at which TFSA sheltering is considered excellent
pub const LONG_HORIZON_YEARS: u32 = 20;

/// Qualitative risk tag based on the starting dividend yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_yield(annual_dividend_yield: f64) -> Self {
        if annual_dividend_yield > HIGH_YIELD_THRESHOLD {
            RiskLevel::High
        } else if annual_dividend_yield < LOW_YIELD_THRESHOLD {
            RiskLevel::Low
        } else {
            RiskLevel::Moderate
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            RiskLevel::High => {
                "High dividend yields may indicate higher risk. Consider diversifying with lower-yield, higher-growth stocks."
            }
            RiskLevel::Low => {
                "Conservative approach with growth potential. Consider increasing dividend allocation for more income."
            }
            RiskLevel::Moderate => {
                "Balanced approach with good growth and income potential. Well-suited for long-term TFSA growth."
            }
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// How well the horizon uses tax-free compounding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TfsaEfficiency {
    Good,
    Excellent,
}

impl TfsaEfficiency {
    pub fn from_years(years_to_project: u32) -> Self {
        if years_to_project >= LONG_HORIZON_YEARS {
            TfsaEfficiency::Excellent
        } else {
            TfsaEfficiency::Good
        }
    }
}

impl fmt::Display for TfsaEfficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfsaEfficiency::Good => f.write_str("Good"),
            TfsaEfficiency::Excellent => f.write_str("Excellent"),
        }
    }
}

/// Headline figures for a projection
///
/// Percent fields are two-decimal strings. They are `None` when their
/// denominator is zero (nothing contributed, or no initial investment for
/// yield on cost).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_return_percent: Option<String>,

    /// Compound annual growth rate of value over contributions, percent
    pub average_annual_return: Option<String>,

    /// Final annual income as a percent of the initial investment
    pub yield_on_cost: Option<String>,

    pub annual_dividend_income: f64,
    pub total_dividend_payments: f64,
    pub ending_balance: f64,
    pub risk_level: RiskLevel,
    pub tfsa_efficiency: TfsaEfficiency,
    pub recommendation: String,
}

impl AnalysisSummary {
    /// Derive the summary from the (rounded) final snapshot
    pub fn derive(final_year: &YearSnapshot, inputs: &ProjectionInputs) -> Self {
        let value = final_year.portfolio_value;
        let contributions = final_year.total_contributions;
        let annual_income = final_year.annual_income();

        let total_return = ratio(value - contributions, contributions).map(|r| r * 100.0);
        let average_annual = ratio(value, contributions)
            .map(|growth| (growth.powf(1.0 / inputs.years_to_project as f64) - 1.0) * 100.0);
        let yield_on_cost = ratio(annual_income, inputs.initial_investment).map(|r| r * 100.0);

        let risk_level = RiskLevel::from_yield(inputs.annual_dividend_yield);

        Self {
            total_return_percent: total_return.map(fixed2),
            average_annual_return: average_annual.map(fixed2),
            yield_on_cost: yield_on_cost.map(fixed2),
            annual_dividend_income: annual_income,
            total_dividend_payments: final_year.total_dividends,
            ending_balance: value,
            risk_level,
            tfsa_efficiency: TfsaEfficiency::from_years(inputs.years_to_project),
            recommendation: risk_level.recommendation().to_string(),
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}
