//! Projection inputs, payment frequencies and range validation

mod data;
mod validation;
pub mod loader;

pub use data::{PaymentFrequency, ProjectionInputs};
pub use validation::{InputError, MAX_RATE_PERCENT, MAX_YEARS};
pub use loader::{load_inputs, parse_inputs};

pub(crate) use validation::check_non_negative;
