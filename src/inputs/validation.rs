//! Range checks applied before a projection is run

use thiserror::Error;

use super::data::ProjectionInputs;

/// Upper bound for any rate input, percent
pub const MAX_RATE_PERCENT: f64 = 20.0;

/// Longest supported projection horizon
pub const MAX_YEARS: u32 = 50;

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} = {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a whole number, got {value}")]
    NotWhole { field: &'static str, value: f64 },

    #[error("payment frequency {0} is not one of 1, 2, 4 or 12")]
    InvalidFrequency(u32),

    #[error("unknown payment frequency '{0}'")]
    UnknownFrequency(String),
}

pub(crate) fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(InputError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    check_range(field, value, 0.0, f64::MAX)
}

impl ProjectionInputs {
    /// Check every field against the ranges the calculator accepts.
    ///
    /// The engine itself never rejects input; callers run this first.
    pub fn validate(&self) -> Result<(), InputError> {
        check_non_negative("initialInvestment", self.initial_investment)?;
        check_non_negative("monthlyContribution", self.monthly_contribution)?;
        check_range("annualDividendYield", self.annual_dividend_yield, 0.0, MAX_RATE_PERCENT)?;
        check_range("dividendGrowthRate", self.dividend_growth_rate, 0.0, MAX_RATE_PERCENT)?;
        check_range("stockAppreciationRate", self.stock_appreciation_rate, 0.0, MAX_RATE_PERCENT)?;
        check_range("yearsToProject", self.years_to_project as f64, 1.0, MAX_YEARS as f64)?;
        Ok(())
    }

    /// Validate and return self, for builder-style call chains
    pub fn validated(self) -> Result<Self, InputError> {
        self.validate()?;
        Ok(self)
    }
}
