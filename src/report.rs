//! CSV, JSON and console formatting for projection output

use serde::Serialize;
use std::error::Error;
use std::io::Write;

use crate::projection::ProjectionResult;

/// CSV row layout; field order defines the column order
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "PortfolioValue")]
    portfolio_value: f64,
    #[serde(rename = "TotalContributions")]
    total_contributions: f64,
    #[serde(rename = "TotalDividends")]
    total_dividends: f64,
    #[serde(rename = "MonthlyIncome")]
    monthly_income: f64,
    #[serde(rename = "DividendYield")]
    dividend_yield: &'a str,
    #[serde(rename = "SharePrice")]
    share_price: f64,
    #[serde(rename = "SharesOwned")]
    shares_owned: f64,
}

/// Write one CSV row per projected year
pub fn write_csv<W: Write>(result: &ProjectionResult, writer: W) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for snapshot in &result.snapshots {
        csv_writer.serialize(CsvRow {
            year: snapshot.year,
            portfolio_value: snapshot.portfolio_value,
            total_contributions: snapshot.total_contributions,
            total_dividends: snapshot.total_dividends,
            monthly_income: snapshot.monthly_income,
            dividend_yield: &snapshot.dividend_yield,
            share_price: snapshot.share_price,
            shares_owned: snapshot.shares_owned,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(value: &T, writer: W) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(writer, value)
}

/// Whole-unit currency with thousands separators, e.g. `$1,234,567`
pub fn format_currency(value: f64) -> String {
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0.0 && rounded > 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Percent display for optional two-decimal strings
pub fn format_percent(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("{}%", v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::ProjectionInputs;
    use crate::projection::project;

    #[test]
    fn test_csv_output() {
        let result = project(&ProjectionInputs {
            years_to_project: 2,
            ..Default::default()
        });
        let mut buffer = Vec::new();
        write_csv(&result, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Year,PortfolioValue,TotalContributions,TotalDividends,MonthlyIncome,DividendYield,SharePrice,SharesOwned"
        );
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("0,10000.0,10000.0,0.0,38.0,4.50,100.0,100.0"));
        assert!(lines[3].starts_with("2,"));
    }

    #[test]
    fn test_json_output_names() {
        let result = project(&ProjectionInputs {
            years_to_project: 1,
            ..Default::default()
        });
        let mut buffer = Vec::new();
        write_json(&result, &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["projectionData"].as_array().unwrap().len(), 2);
        assert_eq!(value["analysis"]["tfsaEfficiency"], "Good");
        assert_eq!(value["inputs"]["yearsToProject"], 1);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(-52_300.0), "-$52,300");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some("7.25")), "7.25%");
        assert_eq!(format_percent(None), "n/a");
    }
}
