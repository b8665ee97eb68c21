//! Saved portfolio records and tracked actual results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::inputs::ProjectionInputs;
use crate::projection::{fixed1, AnalysisSummary, ProjectionResult, YearSnapshot};

/// Kind tag stored with every DRIP projection record
pub const DRIP_KIND: &str = "drip";

/// Figures the user reports from their real account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActualData {
    pub current_value: Option<f64>,
    pub monthly_income: Option<f64>,
    pub total_dividends: Option<f64>,
    pub notes: Option<String>,
}

impl ActualData {
    /// True when at least one field was filled in
    pub fn has_data(&self) -> bool {
        self.current_value.is_some()
            || self.monthly_income.is_some()
            || self.total_dividends.is_some()
            || self.notes.as_deref().is_some_and(|n| !n.is_empty())
    }
}

/// A projection saved under a name, with optional actual results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRecord {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub inputs: ProjectionInputs,
    pub projection_data: Vec<YearSnapshot>,
    pub analysis: AnalysisSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_data: Option<ActualData>,
}

impl PortfolioRecord {
    pub fn from_projection(id: u64, name: &str, result: &ProjectionResult, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind: DRIP_KIND.to_string(),
            created_at,
            inputs: result.inputs.clone(),
            projection_data: result.snapshots.clone(),
            analysis: result.analysis.clone(),
            actual_data: None,
        }
    }

    pub fn final_projection(&self) -> Option<&YearSnapshot> {
        self.projection_data.last()
    }

    pub fn projected_value(&self) -> f64 {
        self.final_projection().map(|s| s.portfolio_value).unwrap_or(0.0)
    }

    pub fn actual_value(&self) -> f64 {
        self.actual_data
            .as_ref()
            .and_then(|a| a.current_value)
            .unwrap_or(0.0)
    }

    /// Actual vs projected final value, percent with one decimal.
    /// Absent until both figures are non-zero.
    pub fn performance_percent(&self) -> Option<String> {
        let actual = self.actual_value();
        let projected = self.projected_value();
        if actual == 0.0 || projected == 0.0 {
            return None;
        }
        Some(fixed1((actual - projected) / projected * 100.0))
    }
}

/// Totals across every saved portfolio
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    pub portfolio_count: usize,
    pub total_projected_value: f64,
    pub total_projected_income: f64,
    pub total_contributions: f64,
    pub total_actual_value: f64,
}

impl PortfolioStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PortfolioRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut stats, record| {
            stats.portfolio_count += 1;
            if let Some(last) = record.final_projection() {
                stats.total_projected_value += last.portfolio_value;
                stats.total_projected_income += last.annual_income();
                stats.total_contributions += last.total_contributions;
            }
            stats.total_actual_value += record.actual_value();
            stats
        })
    }
}
