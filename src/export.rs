//! CSV export
//!
//! UTF-8, comma separated, one header row. Projection exports are wide: a
//! `Year` column followed by one integer column per series.

use crate::error::Result;
use crate::portfolio::{PortfolioTable, RiskCounts};
use crate::projection::ProjectionResult;
use csv::Writer;
use std::io;

pub const PORTFOLIO_TABLE_HEADER: [&str; 6] = [
    "PostalCode",
    "RiskRating",
    "DSCRDelta",
    "LTVDelta",
    "EnergyDelta",
    "RetrofitCost",
];

/// Write every point of a projection
pub fn write_projection_csv<W: io::Write>(result: &ProjectionResult, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    let mut header = vec!["Year".to_string()];
    header.extend(result.series.iter().cloned());
    wtr.write_record(&header)?;

    for point in &result.points {
        let mut record = vec![point.year.to_string()];
        record.extend(point.values.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the portfolio table in its current display order
pub fn write_portfolio_table_csv<W: io::Write>(table: &PortfolioTable, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(PORTFOLIO_TABLE_HEADER)?;

    for row in table.rows() {
        wtr.write_record([
            row.postal_code.clone(),
            row.risk_rating.code().to_string(),
            row.dscr_delta.to_string(),
            row.ltv_delta.to_string(),
            row.energy_delta.to_string(),
            row.retrofit_cost.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_risk_distribution_csv<W: io::Write>(rows: &[RiskCounts], writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["Group", "Low", "Medium", "High"])?;

    for row in rows {
        wtr.write_record([
            row.name.clone(),
            row.low.to_string(),
            row.medium.to_string(),
            row.high.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Asset, Noi};
    use crate::portfolio::{risk_distribution, GroupBy};
    use crate::projection::{ChartView, ProjectionConfig, ProjectionEngine};

    #[test]
    fn test_projection_csv() {
        let mut asset = Asset::custom();
        asset.address = "10 Main St, Unit 4".to_string();
        asset.noi_2024 = Noi::new(100_000.0, 40_000.0);
        let engine = ProjectionEngine::new(ProjectionConfig {
            view: ChartView::Split,
            ..Default::default()
        });
        let result = engine.project_assets(&[asset]);

        let mut buf = Vec::new();
        write_projection_csv(&result, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 27);
        assert_eq!(lines[0], "Year,\"10 Main St, Unit 4 Revenue\",\"10 Main St, Unit 4 OpEx\"");
        assert_eq!(lines[1], "2025,100000,40000");
        assert!(lines[26].starts_with("2050,"));
    }

    #[test]
    fn test_portfolio_table_csv() {
        let mut buf = Vec::new();
        write_portfolio_table_csv(&PortfolioTable::mock(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "PostalCode,RiskRating,DSCRDelta,LTVDelta,EnergyDelta,RetrofitCost");
        assert_eq!(lines[1], "M5V 2A1,L,0.12,-2.5,-15.3,250000");
    }

    #[test]
    fn test_risk_distribution_csv() {
        let mut buf = Vec::new();
        write_risk_distribution_csv(&risk_distribution(GroupBy::Certs), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Group,Low,Medium,High\nLEED,30,15,5\n"));
    }
}
