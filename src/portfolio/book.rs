//! Collection of saved portfolios backed by a local JSON file

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

use super::data::{ActualData, PortfolioRecord, PortfolioStats};
use crate::projection::ProjectionResult;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("portfolio {0} not found")]
    NotFound(u64),

    #[error("portfolio name must not be empty")]
    EmptyName,

    #[error("portfolio file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("portfolio file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Saved portfolios, ordered by creation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioBook {
    portfolios: Vec<PortfolioRecord>,
}

impl PortfolioBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a book from disk; a missing file yields an empty book
    pub fn load(path: &Path) -> Result<Self, PortfolioError> {
        if !path.exists() {
            log::info!("no portfolio book at {}, starting empty", path.display());
            return Ok(Self::new());
        }
        let file = File::open(path)?;
        let book: Self = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("loaded {} portfolios from {}", book.len(), path.display());
        Ok(book)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), PortfolioError> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        log::info!("wrote {} portfolios to {}", self.len(), path.display());
        Ok(())
    }

    /// Save a projection under `name`, returning the new id
    pub fn save(&mut self, name: &str, result: &ProjectionResult, now: DateTime<Utc>) -> Result<u64, PortfolioError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PortfolioError::EmptyName);
        }
        let id = self.portfolios.iter().map(|p| p.id).max().map_or(1, |max| max + 1);
        self.portfolios.push(PortfolioRecord::from_projection(id, name, result, now));
        Ok(id)
    }

    /// Replace the actual results recorded for a portfolio
    pub fn update_actual(&mut self, id: u64, actual: ActualData) -> Result<(), PortfolioError> {
        let record = self
            .portfolios
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PortfolioError::NotFound(id))?;
        record.actual_data = Some(actual);
        Ok(())
    }

    pub fn delete(&mut self, id: u64) -> Result<PortfolioRecord, PortfolioError> {
        let index = self
            .portfolios
            .iter()
            .position(|p| p.id == id)
            .ok_or(PortfolioError::NotFound(id))?;
        Ok(self.portfolios.remove(index))
    }

    pub fn get(&self, id: u64) -> Option<&PortfolioRecord> {
        self.portfolios.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortfolioRecord> {
        self.portfolios.iter()
    }

    pub fn len(&self) -> usize {
        self.portfolios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty()
    }

    pub fn stats(&self) -> PortfolioStats {
        PortfolioStats::from_records(&self.portfolios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::ProjectionInputs;
    use crate::projection::project;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn small_projection(years: u32) -> ProjectionResult {
        project(&ProjectionInputs {
            years_to_project: years,
            ..Default::default()
        })
    }

    #[test]
    fn test_save_assigns_increasing_ids() {
        let mut book = PortfolioBook::new();
        let first = book.save("Starter", &small_projection(5), now()).unwrap();
        let second = book.save("Long haul", &small_projection(30), now()).unwrap();

        assert_eq!((first, second), (1, 2));
        assert_eq!(book.len(), 2);
        assert_eq!(book.get(2).unwrap().name, "Long haul");
        assert_eq!(book.get(1).unwrap().kind, "drip");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut book = PortfolioBook::new();
        assert!(matches!(
            book.save("   ", &small_projection(1), now()),
            Err(PortfolioError::EmptyName)
        ));
    }

    #[test]
    fn test_delete_and_missing_ids() {
        let mut book = PortfolioBook::new();
        let id = book.save("Temp", &small_projection(2), now()).unwrap();

        assert!(matches!(book.delete(99), Err(PortfolioError::NotFound(99))));
        assert_eq!(book.delete(id).unwrap().name, "Temp");
        assert!(book.is_empty());
        assert!(matches!(
            book.update_actual(id, ActualData::default()),
            Err(PortfolioError::NotFound(_))
        ));
    }

    #[test]
    fn test_stats_and_performance() {
        let mut book = PortfolioBook::new();
        let a = book.save("A", &small_projection(5), now()).unwrap();
        book.save("B", &small_projection(10), now()).unwrap();

        let projected_a = book.get(a).unwrap().projected_value();
        let actual = projected_a * 1.1;
        book.update_actual(
            a,
            ActualData {
                current_value: Some(actual),
                notes: Some("on track".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        let stats = book.stats();
        let expected_value: f64 = book.iter().map(|p| p.projected_value()).sum();
        let expected_income: f64 = book
            .iter()
            .map(|p| p.final_projection().unwrap().monthly_income * 12.0)
            .sum();

        assert_eq!(stats.portfolio_count, 2);
        assert_eq!(stats.total_projected_value, expected_value);
        assert_eq!(stats.total_projected_income, expected_income);
        assert_eq!(stats.total_actual_value, actual);

        let record = book.get(a).unwrap();
        assert!(record.actual_data.as_ref().unwrap().has_data());
        assert_eq!(record.performance_percent().as_deref(), Some("10.0"));
        assert_eq!(book.get(2).unwrap().performance_percent(), None);
    }

    #[test]
    fn test_performance_rounds_exact_tie_up() {
        let flat = project(&ProjectionInputs {
            initial_investment: 10_000.0,
            monthly_contribution: 0.0,
            annual_dividend_yield: 0.0,
            stock_appreciation_rate: 0.0,
            years_to_project: 1,
            ..Default::default()
        });
        let mut book = PortfolioBook::new();
        let id = book.save("Flat", &flat, now()).unwrap();
        assert_eq!(book.get(id).unwrap().projected_value(), 10_000.0);

        // (12025 - 10000) / 10000 * 100 is exactly 20.25
        book.update_actual(
            id,
            ActualData {
                current_value: Some(12_025.0),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(book.get(id).unwrap().performance_percent().as_deref(), Some("20.3"));
    }

    #[test]
    fn test_json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("drip_book_{}.json", std::process::id()));
        let mut book = PortfolioBook::new();
        book.save("Saved", &small_projection(3), now()).unwrap();

        book.write_json(&path).unwrap();
        let loaded = PortfolioBook::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, book);
    }

    #[test]
    fn test_missing_file_is_empty_book() {
        let path = std::env::temp_dir().join("drip_book_does_not_exist.json");
        assert!(PortfolioBook::load(&path).unwrap().is_empty());
    }
}
