//! In-memory asset catalog and search

use super::{Asset, HeatSource, Location, Noi, RiskRating, SizeCategory};
use serde::{Deserialize, Serialize};

/// Maximum number of assets that can be analyzed together
pub const MAX_SELECTED_ASSETS: usize = 3;

/// Search box and dropdown filters on the asset search step
///
/// Empty strings (and the "all" option) disable a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub term: String,
    pub city: String,
    pub property_type: String,
    pub size: String,
}

impl SearchFilters {
    pub fn with_term(term: &str) -> Self {
        Self {
            term: term.to_string(),
            ..Default::default()
        }
    }

    fn matches(&self, asset: &Asset) -> bool {
        let term = self.term.to_lowercase();
        let matches_term = asset.address.to_lowercase().contains(&term)
            || asset.city.to_lowercase().contains(&term);

        let matches_city = is_unset(&self.city) || asset.city == self.city;
        let matches_type =
            is_unset(&self.property_type) || asset.property_type == self.property_type;
        let matches_size = is_unset(&self.size)
            || SizeCategory::from_key(&self.size) == Some(asset.size_category());

        matches_term && matches_city && matches_type && matches_size
    }
}

fn is_unset(filter: &str) -> bool {
    filter.is_empty() || filter == "all"
}

/// Searchable set of assets
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    assets: Vec<Asset>,
}

impl AssetCatalog {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    /// Catalog seeded with the built-in demo properties
    pub fn mock() -> Self {
        Self::new(mock_assets())
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Assets matching all active filters, in catalog order
    pub fn search(&self, filters: &SearchFilters) -> Vec<&Asset> {
        self.assets.iter().filter(|a| filters.matches(a)).collect()
    }

    /// Clone the assets whose ids are listed, in catalog order; unknown ids are skipped
    pub fn resolve(&self, ids: &[String]) -> Vec<Asset> {
        self.assets
            .iter()
            .filter(|a| ids.iter().any(|id| id == &a.id))
            .cloned()
            .collect()
    }

    /// Distinct cities in first-seen order
    pub fn cities(&self) -> Vec<String> {
        distinct(self.assets.iter().map(|a| a.city.as_str()))
    }

    /// Distinct property types in first-seen order
    pub fn property_types(&self) -> Vec<String> {
        distinct(self.assets.iter().map(|a| a.property_type.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn mock_asset(
    id: &str,
    address: &str,
    city: &str,
    postal_code: &str,
    property_type: &str,
    value: f64,
    size: f64,
    age: u32,
    fossil: f64,
    certifications: &[&str],
    loan_amount: f64,
    term: u32,
    annual_debt_payment: f64,
    revenue: f64,
    op_ex: f64,
    risk_rating: RiskRating,
    energy_intensity: f64,
    retrofit_cost: f64,
    location: (f64, f64),
) -> Asset {
    let noi = Noi::new(revenue, op_ex);
    let mut asset = Asset {
        id: id.to_string(),
        address: address.to_string(),
        city: city.to_string(),
        postal_code: postal_code.to_string(),
        property_type: property_type.to_string(),
        value,
        size,
        age,
        heat_source: HeatSource {
            fossil,
            renewable: 100.0 - fossil,
        },
        certifications: certifications.iter().map(|c| c.to_string()).collect(),
        loan_amount,
        term,
        annual_debt_payment,
        noi_2024: noi,
        // Five-year outlook at 2% growth
        projected_noi: (0..5).map(|i| (noi.net() * (1.0 + 0.02 * i as f64)).round()).collect(),
        risk_rating,
        dscr: 0.0,
        ltv: 0.0,
        energy_intensity,
        retrofit_cost,
        location: Location {
            lat: location.0,
            lng: location.1,
        },
    };
    asset.refresh_ratios();
    asset
}

/// Demo portfolio of Canadian commercial properties
pub fn mock_assets() -> Vec<Asset> {
    vec![
        mock_asset(
            "1", "200 Bay St", "Toronto", "M5V 2A1", "Office",
            45_000_000.0, 120_000.0, 32, 75.0, &["LEED"],
            29_000_000.0, 10, 2_100_000.0,
            6_800_000.0, 3_400_000.0, RiskRating::Low, 24.5, 250_000.0,
            (43.6476, -79.3810),
        ),
        mock_asset(
            "2", "1055 W Georgia St", "Vancouver", "V6B 1S5", "Office",
            38_000_000.0, 95_000.0, 41, 60.0, &["BOMA BEST"],
            26_000_000.0, 7, 1_950_000.0,
            5_200_000.0, 2_700_000.0, RiskRating::Medium, 28.1, 180_000.0,
            (49.2856, -123.1207),
        ),
        mock_asset(
            "3", "355 Rue Saint-Jacques", "Montreal", "H2Y 1C6", "Retail",
            12_500_000.0, 38_000.0, 58, 90.0, &[],
            9_800_000.0, 5, 820_000.0,
            1_700_000.0, 1_050_000.0, RiskRating::High, 36.4, 320_000.0,
            (45.5017, -73.5590),
        ),
        mock_asset(
            "4", "333 7 Ave SW", "Calgary", "T2P 1J9", "Office",
            21_000_000.0, 68_000.0, 27, 85.0, &["ENERGY STAR"],
            14_000_000.0, 10, 1_100_000.0,
            2_900_000.0, 1_450_000.0, RiskRating::Medium, 31.2, 210_000.0,
            (51.0478, -114.0712),
        ),
        mock_asset(
            "5", "50 O'Connor St", "Ottawa", "K1P 5J6", "Mixed Use",
            16_000_000.0, 42_000.0, 19, 55.0, &["LEED", "WELL"],
            9_000_000.0, 8, 700_000.0,
            2_050_000.0, 980_000.0, RiskRating::Low, 18.7, 190_000.0,
            (45.4215, -75.6972),
        ),
        mock_asset(
            "6", "21 St Clair Ave E", "Toronto", "M4W 1A5", "Multifamily",
            8_400_000.0, 8_500.0, 64, 95.0, &[],
            6_900_000.0, 5, 560_000.0,
            980_000.0, 470_000.0, RiskRating::High, 39.8, 350_000.0,
            (43.6880, -79.3925),
        ),
    ]
}
