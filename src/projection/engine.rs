//! Core projection engine for yearly DRIP portfolio projections

use super::analysis::AnalysisSummary;
use super::schedule::{EventSchedule, PeriodEvents};
use super::snapshots::{ProjectionResult, YearSnapshot};
use super::state::ProjectionState;
use crate::inputs::ProjectionInputs;

/// Main projection engine
///
/// Total over its input domain: it never fails and never rejects input.
/// Run `ProjectionInputs::validate` first to keep results meaningful.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    inputs: ProjectionInputs,
    schedule: EventSchedule,
}

impl ProjectionEngine {
    pub fn new(inputs: ProjectionInputs) -> Self {
        let schedule = EventSchedule::new(inputs.contribution_frequency, inputs.dividend_frequency);
        Self { inputs, schedule }
    }

    /// Run the full projection: year 0 through `years_to_project`
    pub fn project(&self) -> ProjectionResult {
        let inputs = &self.inputs;
        let mut state = ProjectionState::from_inputs(inputs);

        let mut snapshots = Vec::with_capacity(inputs.years_to_project as usize + 1);
        snapshots.push(YearSnapshot::opening(&state, inputs));

        for year in 1..=inputs.years_to_project {
            state = self.project_year(state);
            snapshots.push(YearSnapshot::closing(year, &state));
        }

        log::debug!(
            "projected {} years: final value {:.2}, dividends {:.2}",
            inputs.years_to_project,
            state.portfolio_value(),
            state.total_dividends,
        );

        // the opening snapshot guarantees at least one entry
        let analysis = AnalysisSummary::derive(&snapshots[snapshots.len() - 1], inputs);

        ProjectionResult {
            inputs: inputs.clone(),
            snapshots,
            analysis,
        }
    }

    /// Fold one year's periods over the state, then grow the dividend rate
    fn project_year(&self, state: ProjectionState) -> ProjectionState {
        // Dividends all year are paid at the rate fixed on the first day
        let dividend_per_payment =
            state.annual_dividend_per_share / self.inputs.dividend_frequency.per_year() as f64;
        let appreciation = self.appreciation_per_period();

        self.schedule
            .periods()
            .fold(state, |state, events| {
                self.apply_period(state, events, dividend_per_payment, appreciation)
            })
            .grow_dividend(self.inputs.dividend_growth_rate)
    }

    /// Contribution, then dividend reinvestment, both at the pre-appreciation
    /// price; the price then appreciates regardless of events.
    fn apply_period(
        &self,
        mut state: ProjectionState,
        events: PeriodEvents,
        dividend_per_payment: f64,
        appreciation: f64,
    ) -> ProjectionState {
        let deposit = self.inputs.contribution_per_deposit();
        if events.contribution && deposit > 0.0 {
            state = state.contribute(deposit);
        }
        if events.dividend {
            state = state.reinvest_dividend(dividend_per_payment);
        }
        state.appreciate(appreciation)
    }

    /// Per-period price factor so appreciation compounds to the annual rate
    fn appreciation_per_period(&self) -> f64 {
        let annual = 1.0 + self.inputs.stock_appreciation_rate / 100.0;
        annual.powf(1.0 / self.schedule.periods_per_year() as f64)
    }
}

/// Convenience wrapper: project a single set of inputs
pub fn project(inputs: &ProjectionInputs) -> ProjectionResult {
    ProjectionEngine::new(inputs.clone()).project()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::PaymentFrequency;
    use crate::projection::{RiskLevel, TfsaEfficiency};
    use approx::assert_abs_diff_eq;

    fn quiet_inputs() -> ProjectionInputs {
        ProjectionInputs {
            initial_investment: 10_000.0,
            monthly_contribution: 0.0,
            annual_dividend_yield: 0.0,
            dividend_growth_rate: 0.0,
            years_to_project: 5,
            stock_appreciation_rate: 0.0,
            dividend_frequency: PaymentFrequency::Quarterly,
            contribution_frequency: PaymentFrequency::Monthly,
        }
    }

    #[test]
    fn test_sequence_covers_every_year() {
        let result = project(&ProjectionInputs::default());

        assert_eq!(result.snapshots.len(), 26);
        for (i, snapshot) in result.snapshots.iter().enumerate() {
            assert_eq!(snapshot.year, i as u32);
        }
        assert_eq!(result.years(), 25);
    }

    #[test]
    fn test_totals_non_decreasing() {
        let result = project(&ProjectionInputs::default());

        for pair in result.snapshots.windows(2) {
            assert!(pair[1].total_contributions >= pair[0].total_contributions);
            assert!(pair[1].total_dividends >= pair[0].total_dividends);
            assert!(pair[1].shares_owned > 0.0);
            assert!(pair[1].share_price > 0.0);
        }
    }

    #[test]
    fn test_value_equals_shares_times_price() {
        let result = project(&ProjectionInputs::default());

        for snapshot in &result.snapshots {
            let implied = snapshot.shares_owned * snapshot.share_price;
            // shares and price are each rounded to cents
            let tolerance = 0.005 * (snapshot.shares_owned + snapshot.share_price) + 1.0;
            assert_abs_diff_eq!(snapshot.portfolio_value, implied, epsilon = tolerance);
        }
    }

    #[test]
    fn test_no_growth_sources_keeps_value_flat() {
        let result = project(&quiet_inputs());

        assert_eq!(result.snapshots.len(), 6);
        for snapshot in &result.snapshots {
            assert_eq!(snapshot.portfolio_value, 10_000.0);
            assert_eq!(snapshot.total_contributions, 10_000.0);
            assert_eq!(snapshot.total_dividends, 0.0);
        }
    }

    #[test]
    fn test_pure_appreciation_compounds() {
        let inputs = ProjectionInputs {
            stock_appreciation_rate: 6.0,
            years_to_project: 10,
            ..quiet_inputs()
        };
        let result = project(&inputs);

        for snapshot in &result.snapshots {
            let expected = 10_000.0 * 1.06_f64.powi(snapshot.year as i32);
            assert_abs_diff_eq!(snapshot.portfolio_value, expected, epsilon = 1.0);
        }
    }

    #[test]
    fn test_single_annual_dividend_reinvested() {
        let inputs = ProjectionInputs {
            annual_dividend_yield: 5.0,
            years_to_project: 1,
            dividend_frequency: PaymentFrequency::Annually,
            ..quiet_inputs()
        };
        let result = project(&inputs);
        let year_one = &result.snapshots[1];

        assert_eq!(year_one.total_dividends, 500.0);
        assert_eq!(year_one.shares_owned, 105.0);
        assert_eq!(year_one.share_price, 100.0);
        assert_eq!(year_one.portfolio_value, 10_500.0);
        assert_eq!(year_one.dividend_yield, "5.00");
    }

    #[test]
    fn test_dividend_rate_fixed_for_the_year() {
        // Quarterly payments at 5%/4 each, compounding via reinvestment within the year
        let inputs = ProjectionInputs {
            annual_dividend_yield: 5.0,
            dividend_growth_rate: 10.0,
            years_to_project: 1,
            dividend_frequency: PaymentFrequency::Quarterly,
            ..quiet_inputs()
        };
        let result = project(&inputs);
        let year_one = &result.snapshots[1];

        let shares_after = 100.0 * 1.0125_f64.powi(4);
        assert_abs_diff_eq!(year_one.total_dividends, (shares_after - 100.0) * 100.0, epsilon = 0.5);
        // growth applies after the year closes: 5.5 per share on a 100 price
        assert_eq!(year_one.dividend_yield, "5.50");
    }

    #[test]
    fn test_contributions_accumulate() {
        let inputs = ProjectionInputs {
            monthly_contribution: 500.0,
            years_to_project: 3,
            contribution_frequency: PaymentFrequency::Monthly,
            ..quiet_inputs()
        };
        let result = project(&inputs);

        assert_eq!(result.snapshots[1].total_contributions, 16_000.0);
        assert_eq!(result.snapshots[3].total_contributions, 28_000.0);
        assert_eq!(result.snapshots[3].portfolio_value, 28_000.0);
    }

    #[test]
    fn test_contribution_bought_before_appreciation() {
        // One annual deposit at the start of the year, bought at 100 then grown 10%
        let inputs = ProjectionInputs {
            initial_investment: 0.0,
            monthly_contribution: 100.0,
            stock_appreciation_rate: 10.0,
            years_to_project: 1,
            contribution_frequency: PaymentFrequency::Annually,
            dividend_frequency: PaymentFrequency::Annually,
            ..quiet_inputs()
        };
        let result = project(&inputs);

        assert_eq!(result.snapshots[1].shares_owned, 12.0);
        assert_eq!(result.snapshots[1].portfolio_value, 1_320.0);
    }

    #[test]
    fn test_analysis_tags() {
        let mut inputs = ProjectionInputs {
            annual_dividend_yield: 7.0,
            years_to_project: 25,
            ..Default::default()
        };
        let result = project(&inputs);
        assert_eq!(result.analysis.risk_level, RiskLevel::High);
        assert_eq!(result.analysis.tfsa_efficiency, TfsaEfficiency::Excellent);

        inputs.annual_dividend_yield = 2.0;
        inputs.years_to_project = 10;
        let result = project(&inputs);
        assert_eq!(result.analysis.risk_level, RiskLevel::Low);
        assert_eq!(result.analysis.tfsa_efficiency, TfsaEfficiency::Good);

        inputs.annual_dividend_yield = 4.5;
        assert_eq!(project(&inputs).analysis.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn test_analysis_matches_final_snapshot() {
        let result = project(&ProjectionInputs::default());
        let last = result.final_snapshot().unwrap();

        assert_eq!(result.analysis.ending_balance, last.portfolio_value);
        assert_eq!(result.analysis.total_dividend_payments, last.total_dividends);
        assert_eq!(result.analysis.annual_dividend_income, last.monthly_income * 12.0);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let inputs = ProjectionInputs::default();
        let engine = ProjectionEngine::new(inputs.clone());

        assert_eq!(engine.project(), engine.project());
        assert_eq!(project(&inputs), engine.project());
    }

    #[test]
    fn test_frequent_dividends_compound_faster() {
        let base = ProjectionInputs {
            annual_dividend_yield: 5.0,
            years_to_project: 20,
            ..quiet_inputs()
        };
        let annual = project(&ProjectionInputs {
            dividend_frequency: PaymentFrequency::Annually,
            ..base.clone()
        });
        let monthly = project(&ProjectionInputs {
            dividend_frequency: PaymentFrequency::Monthly,
            ..base
        });

        assert!(
            monthly.analysis.ending_balance > annual.analysis.ending_balance,
            "monthly {} vs annual {}",
            monthly.analysis.ending_balance,
            annual.analysis.ending_balance
        );
    }
}
