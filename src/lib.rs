//! DRIP Projection - dividend reinvestment projections for Canadian TFSA investors
//!
//! This library provides:
//! - Year-by-year DRIP projections with contributions, reinvested dividends
//!   and share price appreciation
//! - Summary analysis (total return, CAGR, yield on cost, risk tags)
//! - A monthly budget tracker for finding investable surplus
//! - Saved portfolios compared against actual results
//! - Batch and sensitivity scenario runs

pub mod inputs;
pub mod projection;
pub mod budget;
pub mod portfolio;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use inputs::{InputError, PaymentFrequency, ProjectionInputs};
pub use projection::{project, AnalysisSummary, ProjectionEngine, ProjectionResult, YearSnapshot};
pub use budget::{BudgetInputs, BudgetSummary};
pub use portfolio::{PortfolioBook, PortfolioRecord};
pub use scenario::{ScenarioRunner, SweepField};
