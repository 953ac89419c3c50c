//! Sortable per-property table on the portfolio analysis step

use crate::asset::RiskRating;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One property's change in key metrics under the transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRow {
    pub id: u32,
    pub postal_code: String,
    pub risk_rating: RiskRating,
    pub dscr_delta: f64,
    /// Change in LTV, percentage points
    pub ltv_delta: f64,
    /// Change in energy intensity, percent
    pub energy_delta: f64,
    pub retrofit_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    PostalCode,
    RiskRating,
    DscrDelta,
    LtvDelta,
    EnergyDelta,
    RetrofitCost,
}

impl SortField {
    pub fn from_key(key: &str) -> Result<Self> {
        match key {
            "postalCode" => Ok(SortField::PostalCode),
            "riskRating" => Ok(SortField::RiskRating),
            "dscrDelta" => Ok(SortField::DscrDelta),
            "ltvDelta" => Ok(SortField::LtvDelta),
            "energyDelta" => Ok(SortField::EnergyDelta),
            "retrofitCost" => Ok(SortField::RetrofitCost),
            other => Err(Error::UnknownSortField(other.to_string())),
        }
    }

    fn compare(&self, a: &PortfolioRow, b: &PortfolioRow) -> Ordering {
        match self {
            SortField::PostalCode => a.postal_code.cmp(&b.postal_code),
            // Letter order of the rating code: H < L < M
            SortField::RiskRating => a.risk_rating.code().cmp(b.risk_rating.code()),
            SortField::DscrDelta => a.dscr_delta.total_cmp(&b.dscr_delta),
            SortField::LtvDelta => a.ltv_delta.total_cmp(&b.ltv_delta),
            SortField::EnergyDelta => a.energy_delta.total_cmp(&b.energy_delta),
            SortField::RetrofitCost => a.retrofit_cost.total_cmp(&b.retrofit_cost),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Table rows plus the header-click sort state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioTable {
    rows: Vec<PortfolioRow>,
    sort: Option<(SortField, SortDirection)>,
}

impl PortfolioTable {
    pub fn new(rows: Vec<PortfolioRow>) -> Self {
        Self { rows, sort: None }
    }

    /// Table seeded with the demo rows
    pub fn mock() -> Self {
        Self::new(mock_rows())
    }

    pub fn sort_state(&self) -> Option<(SortField, SortDirection)> {
        self.sort
    }

    /// Header click: a new field sorts ascending; the same field cycles
    /// ascending, descending, unsorted
    pub fn click(&mut self, field: SortField) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == field => {
                Some((field, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == field => None,
            _ => Some((field, SortDirection::Ascending)),
        };
    }

    /// Rows in display order; insertion order when unsorted
    pub fn rows(&self) -> Vec<&PortfolioRow> {
        let mut rows: Vec<&PortfolioRow> = self.rows.iter().collect();
        if let Some((field, direction)) = self.sort {
            rows.sort_by(|a, b| match direction {
                SortDirection::Ascending => field.compare(a, b),
                SortDirection::Descending => field.compare(b, a),
            });
        }
        rows
    }

    pub fn total_retrofit_cost(&self) -> f64 {
        self.rows.iter().map(|r| r.retrofit_cost).sum()
    }
}

fn row(
    id: u32,
    postal_code: &str,
    risk_rating: RiskRating,
    dscr: f64,
    ltv: f64,
    energy: f64,
    cost: f64,
) -> PortfolioRow {
    PortfolioRow {
        id,
        postal_code: postal_code.to_string(),
        risk_rating,
        dscr_delta: dscr,
        ltv_delta: ltv,
        energy_delta: energy,
        retrofit_cost: cost,
    }
}

pub fn mock_rows() -> Vec<PortfolioRow> {
    vec![
        row(1, "M5V 2A1", RiskRating::Low, 0.12, -2.5, -15.3, 250_000.0),
        row(2, "V6B 1S5", RiskRating::Medium, 0.05, -1.2, -8.7, 180_000.0),
        row(3, "H2Y 1C6", RiskRating::High, -0.08, 3.5, 5.2, 320_000.0),
        row(4, "T2P 1J9", RiskRating::Medium, 0.03, -0.8, -6.5, 210_000.0),
        row(5, "K1P 5J6", RiskRating::Low, 0.09, -1.9, -12.1, 190_000.0),
        row(6, "M4W 1A5", RiskRating::High, -0.11, 4.2, 7.8, 350_000.0),
        row(7, "V7Y 1C1", RiskRating::Low, 0.14, -3.1, -18.5, 280_000.0),
        row(8, "H3B 2Y7", RiskRating::Medium, 0.02, -0.5, -4.3, 150_000.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(table: &PortfolioTable) -> Vec<u32> {
        table.rows().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_unsorted_keeps_insertion_order() {
        let table = PortfolioTable::mock();
        assert_eq!(ids(&table), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_click_cycles_asc_desc_none() {
        let mut table = PortfolioTable::mock();

        table.click(SortField::RetrofitCost);
        assert_eq!(table.sort_state(), Some((SortField::RetrofitCost, SortDirection::Ascending)));
        assert_eq!(ids(&table), vec![8, 2, 5, 4, 1, 7, 3, 6]);

        table.click(SortField::RetrofitCost);
        assert_eq!(ids(&table), vec![6, 3, 7, 1, 4, 5, 2, 8]);

        table.click(SortField::RetrofitCost);
        assert_eq!(table.sort_state(), None);
        assert_eq!(ids(&table), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_new_field_restarts_ascending() {
        let mut table = PortfolioTable::mock();
        table.click(SortField::DscrDelta);
        table.click(SortField::DscrDelta);
        table.click(SortField::PostalCode);
        assert_eq!(table.sort_state(), Some((SortField::PostalCode, SortDirection::Ascending)));
        let first = table.rows()[0].postal_code.clone();
        assert_eq!(first, "H2Y 1C6");
    }

    #[test]
    fn test_sort_by_negative_deltas() {
        let mut table = PortfolioTable::mock();
        table.click(SortField::DscrDelta);
        assert_eq!(table.rows()[0].id, 6);
        assert_eq!(table.rows()[7].id, 7);
    }

    #[test]
    fn test_sort_field_keys() {
        assert_eq!(SortField::from_key("ltvDelta").unwrap(), SortField::LtvDelta);
        assert!(SortField::from_key("noi").is_err());
        assert_eq!(PortfolioTable::mock().total_retrofit_cost(), 1_930_000.0);
    }
}
