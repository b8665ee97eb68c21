//! Saved portfolios: projections kept under a name and compared against
//! actual account results

mod data;
mod book;

pub use data::{ActualData, PortfolioRecord, PortfolioStats, DRIP_KIND};
pub use book::{PortfolioBook, PortfolioError};
