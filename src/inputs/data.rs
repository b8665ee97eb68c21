//! Projection input record matching the calculator form

use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::InputError;

/// How often a payment (deposit or dividend) occurs within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PaymentFrequency {
    /// Once a year
    Annually,
    /// Twice a year
    SemiAnnually,
    /// Four times a year
    Quarterly,
    /// Twelve times a year
    Monthly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 4] = [
        PaymentFrequency::Annually,
        PaymentFrequency::SemiAnnually,
        PaymentFrequency::Quarterly,
        PaymentFrequency::Monthly,
    ];

    /// Payments per year
    pub fn per_year(self) -> u32 {
        match self {
            PaymentFrequency::Annually => 1,
            PaymentFrequency::SemiAnnually => 2,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Monthly => 12,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentFrequency::Annually => "Annually",
            PaymentFrequency::SemiAnnually => "Semi-annually",
            PaymentFrequency::Quarterly => "Quarterly",
            PaymentFrequency::Monthly => "Monthly",
        }
    }
}

impl TryFrom<u32> for PaymentFrequency {
    type Error = InputError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PaymentFrequency::Annually),
            2 => Ok(PaymentFrequency::SemiAnnually),
            4 => Ok(PaymentFrequency::Quarterly),
            12 => Ok(PaymentFrequency::Monthly),
            other => Err(InputError::InvalidFrequency(other)),
        }
    }
}

impl From<PaymentFrequency> for u32 {
    fn from(freq: PaymentFrequency) -> u32 {
        freq.per_year()
    }
}

impl std::str::FromStr for PaymentFrequency {
    type Err = InputError;

    /// Accepts either the payment count ("4") or a name ("quarterly")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<u32>() {
            return PaymentFrequency::try_from(n);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "annually" | "annual" | "yearly" => Ok(PaymentFrequency::Annually),
            "semi-annually" | "semiannually" | "semi-annual" => Ok(PaymentFrequency::SemiAnnually),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "monthly" => Ok(PaymentFrequency::Monthly),
            _ => Err(InputError::UnknownFrequency(trimmed.to_string())),
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Investment parameters for a DRIP projection
///
/// Rates are whole-number percentages (4.5 means 4.5%). Missing fields in a
/// JSON document fall back to the calculator defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionInputs {
    /// Lump sum invested at year 0
    pub initial_investment: f64,

    /// Amount deposited per month (spread over `contribution_frequency` deposits)
    pub monthly_contribution: f64,

    /// Starting dividend yield, percent
    pub annual_dividend_yield: f64,

    /// Annual growth of the per-share dividend, percent
    pub dividend_growth_rate: f64,

    /// Number of years to project
    pub years_to_project: u32,

    /// Annual share price appreciation, percent
    pub stock_appreciation_rate: f64,

    pub dividend_frequency: PaymentFrequency,

    pub contribution_frequency: PaymentFrequency,
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        Self {
            initial_investment: 10_000.0,
            monthly_contribution: 500.0,
            annual_dividend_yield: 4.5,
            dividend_growth_rate: 3.0,
            years_to_project: 25,
            stock_appreciation_rate: 6.0,
            dividend_frequency: PaymentFrequency::Quarterly,
            contribution_frequency: PaymentFrequency::Monthly,
        }
    }
}

impl ProjectionInputs {
    /// Total contributed over a year, excluding the initial investment
    pub fn annual_contribution(&self) -> f64 {
        self.monthly_contribution * 12.0
    }

    /// Amount of each individual deposit
    pub fn contribution_per_deposit(&self) -> f64 {
        self.annual_contribution() / self.contribution_frequency.per_year() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_conversion() {
        for freq in PaymentFrequency::ALL {
            assert_eq!(PaymentFrequency::try_from(freq.per_year()).unwrap(), freq);
        }
        assert_eq!(PaymentFrequency::try_from(0), Err(InputError::InvalidFrequency(0)));
        assert_eq!(PaymentFrequency::try_from(3), Err(InputError::InvalidFrequency(3)));
    }

    #[test]
    fn test_frequency_from_str() {
        assert_eq!("12".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Monthly);
        assert_eq!("Quarterly".parse::<PaymentFrequency>().unwrap(), PaymentFrequency::Quarterly);
        assert!("weekly".parse::<PaymentFrequency>().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let inputs: ProjectionInputs =
            serde_json::from_str(r#"{"initialInvestment": 2500, "dividendFrequency": 12}"#).unwrap();

        assert_eq!(inputs.initial_investment, 2500.0);
        assert_eq!(inputs.dividend_frequency, PaymentFrequency::Monthly);
        assert_eq!(inputs.years_to_project, 25);
        assert_eq!(inputs.contribution_frequency, PaymentFrequency::Monthly);
    }

    #[test]
    fn test_zero_frequency_rejected_in_json() {
        let parsed: Result<ProjectionInputs, _> = serde_json::from_str(r#"{"dividendFrequency": 0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_frequency_serializes_as_number() {
        let json = serde_json::to_value(ProjectionInputs::default()).unwrap();
        assert_eq!(json["dividendFrequency"], 4);
        assert_eq!(json["contributionFrequency"], 12);
    }

    #[test]
    fn test_contribution_per_deposit() {
        let inputs = ProjectionInputs {
            monthly_contribution: 500.0,
            contribution_frequency: PaymentFrequency::Quarterly,
            ..Default::default()
        };
        assert_eq!(inputs.contribution_per_deposit(), 1500.0);
    }
}
