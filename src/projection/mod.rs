//! DRIP projection engine: yearly snapshots plus summary analysis

mod state;
mod engine;
mod snapshots;
mod analysis;
pub mod schedule;

pub use state::{ProjectionState, STARTING_SHARE_PRICE};
pub use engine::{project, ProjectionEngine};
pub use snapshots::{fixed1, fixed2, round_cents, round_whole, to_fixed, ProjectionResult, YearSnapshot};
pub use analysis::{AnalysisSummary, RiskLevel, TfsaEfficiency};
pub use schedule::{EventSchedule, PeriodEvents};
