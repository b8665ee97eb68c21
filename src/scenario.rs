//! Scenario runner for batch and sensitivity projections
//!
//! Holds a base set of inputs, then runs many variations of it. Batches are
//! spread across threads with rayon; each projection is independent.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::inputs::{InputError, ProjectionInputs};
use crate::projection::{project, ProjectionResult};

/// Input that a sensitivity sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SweepField {
    AnnualDividendYield,
    DividendGrowthRate,
    StockAppreciationRate,
    MonthlyContribution,
    YearsToProject,
}

impl SweepField {
    /// Copy of `base` with this field set to `value`
    pub fn apply(self, base: &ProjectionInputs, value: f64) -> Result<ProjectionInputs, InputError> {
        let mut inputs = base.clone();
        match self {
            SweepField::AnnualDividendYield => inputs.annual_dividend_yield = value,
            SweepField::DividendGrowthRate => inputs.dividend_growth_rate = value,
            SweepField::StockAppreciationRate => inputs.stock_appreciation_rate = value,
            SweepField::MonthlyContribution => inputs.monthly_contribution = value,
            SweepField::YearsToProject => {
                if !value.is_finite() {
                    return Err(InputError::NotFinite { field: "yearsToProject" });
                }
                if value.fract() != 0.0 || value < 0.0 {
                    return Err(InputError::NotWhole { field: "yearsToProject", value });
                }
                inputs.years_to_project = value.min(u32::MAX as f64) as u32;
            }
        }
        inputs.validated()
    }
}

impl FromStr for SweepField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "yield" | "dividendyield" | "annualdividendyield" => Ok(SweepField::AnnualDividendYield),
            "growth" | "dividendgrowth" | "dividendgrowthrate" => Ok(SweepField::DividendGrowthRate),
            "appreciation" | "stockappreciationrate" => Ok(SweepField::StockAppreciationRate),
            "contribution" | "monthlycontribution" => Ok(SweepField::MonthlyContribution),
            "years" | "yearstoproject" => Ok(SweepField::YearsToProject),
            other => Err(format!("unknown sweep field '{}'", other)),
        }
    }
}

impl fmt::Display for SweepField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SweepField::AnnualDividendYield => "dividend yield",
            SweepField::DividendGrowthRate => "dividend growth",
            SweepField::StockAppreciationRate => "appreciation",
            SweepField::MonthlyContribution => "monthly contribution",
            SweepField::YearsToProject => "years",
        };
        f.write_str(name)
    }
}

/// One point of a sensitivity sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub value: f64,
    pub result: ProjectionResult,
}

/// Runs projections against a base set of inputs
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_inputs: ProjectionInputs,
}

impl ScenarioRunner {
    /// Runner over the calculator defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base_inputs: ProjectionInputs) -> Self {
        Self { base_inputs }
    }

    /// Validate and run a single projection
    pub fn run(&self, inputs: &ProjectionInputs) -> Result<ProjectionResult, InputError> {
        inputs.validate()?;
        Ok(project(inputs))
    }

    /// Run the base inputs
    pub fn run_base(&self) -> Result<ProjectionResult, InputError> {
        self.run(&self.base_inputs)
    }

    /// Run many independent input sets in parallel; output order matches input order
    pub fn run_batch(&self, batch: &[ProjectionInputs]) -> Vec<Result<ProjectionResult, InputError>> {
        log::info!("running batch of {} projections", batch.len());
        batch.par_iter().map(|inputs| self.run(inputs)).collect()
    }

    /// Vary one field of the base inputs over `values`.
    ///
    /// Every point is validated before any projection runs, so a bad value
    /// fails the whole sweep.
    pub fn sensitivity(&self, field: SweepField, values: &[f64]) -> Result<Vec<SweepPoint>, InputError> {
        let variants = values
            .iter()
            .map(|&value| field.apply(&self.base_inputs, value).map(|inputs| (value, inputs)))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("sweeping {} over {} values", field, variants.len());

        Ok(variants
            .into_par_iter()
            .map(|(value, inputs)| SweepPoint {
                value,
                result: project(&inputs),
            })
            .collect())
    }

    pub fn base_inputs(&self) -> &ProjectionInputs {
        &self.base_inputs
    }

    pub fn base_inputs_mut(&mut self) -> &mut ProjectionInputs {
        &mut self.base_inputs
    }
}
