//! Monthly budget tracker: expenses, savings rate and investable surplus

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::inputs::{check_non_negative, InputError};
use crate::projection::{fixed1, round_whole};

/// Savings rate at or above this is considered strong
pub const STRONG_SAVINGS_RATE: f64 = 20.0;

/// Savings rate at or above this is considered fair
pub const FAIR_SAVINGS_RATE: f64 = 10.0;

/// Dividend yield used to illustrate what a year of surplus could earn
pub const ILLUSTRATIVE_DIVIDEND_YIELD: f64 = 0.045;

/// Monthly spending by category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Expenses {
    pub housing: f64,
    pub transportation: f64,
    pub food: f64,
    pub utilities: f64,
    pub phone: f64,
    pub entertainment: f64,
    pub other: f64,
}

impl Default for Expenses {
    fn default() -> Self {
        Self {
            housing: 1_500.0,
            transportation: 400.0,
            food: 600.0,
            utilities: 200.0,
            phone: 80.0,
            entertainment: 300.0,
            other: 500.0,
        }
    }
}

impl Expenses {
    /// (category name, amount) pairs in display order
    pub fn categories(&self) -> [(&'static str, f64); 7] {
        [
            ("housing", self.housing),
            ("transportation", self.transportation),
            ("food", self.food),
            ("utilities", self.utilities),
            ("phone", self.phone),
            ("entertainment", self.entertainment),
            ("other", self.other),
        ]
    }

    pub fn total(&self) -> f64 {
        self.categories().iter().map(|(_, amount)| amount).sum()
    }
}

/// Monthly income and expenses entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetInputs {
    pub monthly_income: f64,
    pub expenses: Expenses,
}

impl Default for BudgetInputs {
    fn default() -> Self {
        Self {
            monthly_income: 5_000.0,
            expenses: Expenses::default(),
        }
    }
}

/// Qualitative grade for a savings rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingsHealth {
    Strong,
    Fair,
    Weak,
}

impl SavingsHealth {
    pub fn from_rate(savings_rate_percent: Option<f64>) -> Self {
        match savings_rate_percent {
            Some(rate) if rate >= STRONG_SAVINGS_RATE => SavingsHealth::Strong,
            Some(rate) if rate >= FAIR_SAVINGS_RATE => SavingsHealth::Fair,
            _ => SavingsHealth::Weak,
        }
    }
}

impl fmt::Display for SavingsHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SavingsHealth::Strong => "Strong",
            SavingsHealth::Fair => "Fair",
            SavingsHealth::Weak => "Weak",
        };
        f.pad(label)
    }
}

/// Derived budget figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_expenses: f64,

    /// Income less expenses; negative when overspending
    pub remaining_income: f64,

    /// Remaining / income, percent with one decimal; absent with no income
    pub savings_rate: Option<String>,

    pub savings_health: SavingsHealth,

    /// Surplus available to invest each month (never negative)
    pub investable_monthly: f64,

    /// A year of surplus at the illustrative yield, whole units
    pub projected_annual_dividends: f64,
}

impl BudgetInputs {
    pub fn validate(&self) -> Result<(), InputError> {
        check_non_negative("monthlyIncome", self.monthly_income)?;
        for (name, amount) in self.expenses.categories() {
            check_non_negative(name, amount)?;
        }
        Ok(())
    }

    pub fn summarize(&self) -> BudgetSummary {
        let total_expenses = self.expenses.total();
        let remaining_income = self.monthly_income - total_expenses;

        let savings_rate = if self.monthly_income == 0.0 {
            None
        } else {
            // grade on the displayed one-decimal value
            let rate = fixed1(remaining_income / self.monthly_income * 100.0);
            Some(rate)
        };
        let savings_health =
            SavingsHealth::from_rate(savings_rate.as_deref().and_then(|r| r.parse().ok()));

        let projected_annual_dividends = if remaining_income > 0.0 {
            round_whole(remaining_income * 12.0 * ILLUSTRATIVE_DIVIDEND_YIELD)
        } else {
            0.0
        };

        BudgetSummary {
            total_expenses,
            remaining_income,
            savings_rate,
            savings_health,
            investable_monthly: remaining_income.max(0.0),
            projected_annual_dividends,
        }
    }
}
