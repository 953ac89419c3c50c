//! Asset data structures matching the session payload format

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Coarse risk rating, serialized as the single-letter code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskRating {
    #[serde(rename = "L")]
    Low,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "H")]
    High,
}

impl RiskRating {
    pub fn code(&self) -> &'static str {
        match self {
            RiskRating::Low => "L",
            RiskRating::Medium => "M",
            RiskRating::High => "H",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskRating::Low => "Low",
            RiskRating::Medium => "Medium",
            RiskRating::High => "High",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "L" => Ok(RiskRating::Low),
            "M" => Ok(RiskRating::Medium),
            "H" => Ok(RiskRating::High),
            other => Err(Error::UnknownRiskRating(other.to_string())),
        }
    }
}

/// Baseline-year revenue and operating expenses
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Noi {
    pub revenue: f64,
    pub op_ex: f64,
}

impl Noi {
    pub fn new(revenue: f64, op_ex: f64) -> Self {
        Self { revenue, op_ex }
    }

    /// Net operating income
    pub fn net(&self) -> f64 {
        self.revenue - self.op_ex
    }
}

/// Heating energy mix in percent
///
/// The two shares are edited independently and are not forced to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatSource {
    pub fossil: f64,
    pub renewable: f64,
}

impl HeatSource {
    pub fn total(&self) -> f64 {
        self.fossil + self.renewable
    }

    pub fn is_balanced(&self) -> bool {
        (self.total() - 100.0).abs() < 1e-9
    }
}

impl Default for HeatSource {
    fn default() -> Self {
        Self {
            fossil: 80.0,
            renewable: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Default for Location {
    /// Downtown Toronto
    fn default() -> Self {
        Self {
            lat: 43.65,
            lng: -79.38,
        }
    }
}

/// Building size bucket used by the search filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    /// Under 10,000 sq ft
    Small,
    /// 10,000 to 50,000 sq ft
    Medium,
    /// 50,000 sq ft and over
    Large,
}

impl SizeCategory {
    pub fn from_size(size: f64) -> Self {
        if size < 10_000.0 {
            SizeCategory::Small
        } else if size < 50_000.0 {
            SizeCategory::Medium
        } else {
            SizeCategory::Large
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "small" => Some(SizeCategory::Small),
            "medium" => Some(SizeCategory::Medium),
            "large" => Some(SizeCategory::Large),
            _ => None,
        }
    }
}

/// A single commercial property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Catalog identifier ("custom" for user-entered assets)
    pub id: String,

    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub property_type: String,

    /// Appraised value
    pub value: f64,

    /// Gross floor area in sq ft
    pub size: f64,

    /// Building age in years
    pub age: u32,

    pub heat_source: HeatSource,
    pub certifications: Vec<String>,

    pub loan_amount: f64,

    /// Loan term in years
    pub term: u32,

    pub annual_debt_payment: f64,

    /// Baseline year revenue and operating expenses
    #[serde(rename = "noi2024")]
    pub noi_2024: Noi,

    /// Coarse NOI outlook carried from the catalog
    #[serde(rename = "projectedNOI")]
    pub projected_noi: Vec<f64>,

    pub risk_rating: RiskRating,

    /// Debt-service-coverage ratio
    pub dscr: f64,

    /// Loan-to-value in percent
    pub ltv: f64,

    /// Energy use intensity (ekWh/sq ft)
    pub energy_intensity: f64,

    pub retrofit_cost: f64,

    pub location: Location,
}

impl Asset {
    /// Blank asset for the "add custom asset" path
    pub fn custom() -> Self {
        Self {
            id: "custom".to_string(),
            address: String::new(),
            city: String::new(),
            postal_code: String::new(),
            property_type: String::new(),
            value: 0.0,
            size: 0.0,
            age: 0,
            heat_source: HeatSource::default(),
            certifications: Vec::new(),
            loan_amount: 0.0,
            term: 5,
            annual_debt_payment: 0.0,
            noi_2024: Noi::default(),
            projected_noi: vec![0.0; 5],
            risk_rating: RiskRating::Medium,
            dscr: 0.0,
            ltv: 0.0,
            energy_intensity: 0.0,
            retrofit_cost: 0.0,
            location: Location::default(),
        }
    }

    /// Name shown on charts: the address, or "Building A", "Building B", ... by position
    pub fn display_name(&self, index: usize) -> String {
        if self.address.is_empty() {
            building_label(index)
        } else {
            self.address.clone()
        }
    }

    pub fn size_category(&self) -> SizeCategory {
        SizeCategory::from_size(self.size)
    }

    /// NOI over annual debt payment; 0 when there is no debt service
    pub fn computed_dscr(&self) -> f64 {
        if self.annual_debt_payment <= 0.0 {
            0.0
        } else {
            self.noi_2024.net() / self.annual_debt_payment
        }
    }

    /// Loan over value in percent; 0 when the value is unknown
    pub fn computed_ltv(&self) -> f64 {
        if self.value <= 0.0 {
            0.0
        } else {
            self.loan_amount / self.value * 100.0
        }
    }

    /// Recompute DSCR and LTV from the current inputs
    pub fn refresh_ratios(&mut self) {
        self.dscr = self.computed_dscr();
        self.ltv = self.computed_ltv();
    }
}

/// "Building A" for index 0, "Building B" for 1, ...
pub fn building_label(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    format!("Building {}", letter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_custom_template() {
        let asset = Asset::custom();
        assert_eq!(asset.id, "custom");
        assert_eq!(asset.term, 5);
        assert_eq!(asset.risk_rating, RiskRating::Medium);
        assert_eq!(asset.heat_source.fossil, 80.0);
        assert_eq!(asset.heat_source.renewable, 20.0);
        assert!(asset.heat_source.is_balanced());
        assert_eq!(asset.projected_noi.len(), 5);
    }

    #[test]
    fn test_display_name_falls_back_to_building_letter() {
        let mut asset = Asset::custom();
        assert_eq!(asset.display_name(0), "Building A");
        assert_eq!(asset.display_name(2), "Building C");
        asset.address = "100 King St W".to_string();
        assert_eq!(asset.display_name(2), "100 King St W");
    }

    #[test]
    fn test_ratios() {
        let mut asset = Asset::custom();
        asset.value = 10_000_000.0;
        asset.loan_amount = 6_500_000.0;
        asset.annual_debt_payment = 400_000.0;
        asset.noi_2024 = Noi::new(1_000_000.0, 400_000.0);
        asset.refresh_ratios();

        assert_relative_eq!(asset.dscr, 1.5, epsilon = 1e-12);
        assert_relative_eq!(asset.ltv, 65.0, epsilon = 1e-12);

        asset.annual_debt_payment = 0.0;
        asset.value = 0.0;
        asset.refresh_ratios();
        assert_eq!(asset.dscr, 0.0);
        assert_eq!(asset.ltv, 0.0);
    }

    #[test]
    fn test_size_category_boundaries() {
        assert_eq!(SizeCategory::from_size(9_999.0), SizeCategory::Small);
        assert_eq!(SizeCategory::from_size(10_000.0), SizeCategory::Medium);
        assert_eq!(SizeCategory::from_size(49_999.0), SizeCategory::Medium);
        assert_eq!(SizeCategory::from_size(50_000.0), SizeCategory::Large);
    }

    #[test]
    fn test_payload_field_names() {
        let json = serde_json::to_value(Asset::custom()).unwrap();
        assert!(json.get("noi2024").is_some());
        assert!(json["noi2024"].get("opEx").is_some());
        assert!(json.get("heatSource").is_some());
        assert!(json.get("projectedNOI").is_some());
        assert!(json.get("annualDebtPayment").is_some());
        assert_eq!(json["riskRating"], "M");
    }

    #[test]
    fn test_unbalanced_heat_source_is_allowed() {
        let mix = HeatSource {
            fossil: 70.0,
            renewable: 10.0,
        };
        assert!(!mix.is_balanced());
        assert_eq!(mix.total(), 80.0);
    }
}
