//! Load an asset catalog from CSV
//!
//! One row per asset; certifications are `;`-separated and the heat-source
//! mix is given as two percentage columns.

use super::{Asset, HeatSource, Location, Noi, RiskRating};
use crate::error::{Error, Result};
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the catalog export columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "PostalCode")]
    postal_code: String,
    #[serde(rename = "PropertyType")]
    property_type: String,
    #[serde(rename = "Value")]
    value: f64,
    #[serde(rename = "Size")]
    size: f64,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "FossilPct")]
    fossil_pct: f64,
    #[serde(rename = "RenewablePct")]
    renewable_pct: f64,
    #[serde(rename = "Certifications", default)]
    certifications: String,
    #[serde(rename = "LoanAmount")]
    loan_amount: f64,
    #[serde(rename = "Term")]
    term: u32,
    #[serde(rename = "AnnualDebtPayment")]
    annual_debt_payment: f64,
    #[serde(rename = "Revenue2024")]
    revenue: f64,
    #[serde(rename = "OpEx2024")]
    op_ex: f64,
    #[serde(rename = "RiskRating")]
    risk_rating: String,
    #[serde(rename = "EnergyIntensity")]
    energy_intensity: f64,
    #[serde(rename = "RetrofitCost")]
    retrofit_cost: f64,
    #[serde(rename = "Lat")]
    lat: f64,
    #[serde(rename = "Lng")]
    lng: f64,
}

impl CsvRow {
    fn into_asset(self) -> Result<Asset> {
        let risk_rating =
            RiskRating::from_code(self.risk_rating.trim()).map_err(|_| Error::InvalidAsset {
                id: self.id.clone(),
                reason: format!("unknown risk rating {:?}", self.risk_rating),
            })?;

        if self.op_ex < 0.0 {
            return Err(Error::InvalidAsset {
                id: self.id,
                reason: format!("negative operating expenses {}", self.op_ex),
            });
        }

        let certifications = self
            .certifications
            .split(';')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        let mut asset = Asset {
            id: self.id,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            property_type: self.property_type,
            value: self.value,
            size: self.size,
            age: self.age,
            heat_source: HeatSource {
                fossil: self.fossil_pct,
                renewable: self.renewable_pct,
            },
            certifications,
            loan_amount: self.loan_amount,
            term: self.term,
            annual_debt_payment: self.annual_debt_payment,
            noi_2024: Noi::new(self.revenue, self.op_ex),
            projected_noi: Vec::new(),
            risk_rating,
            dscr: 0.0,
            ltv: 0.0,
            energy_intensity: self.energy_intensity,
            retrofit_cost: self.retrofit_cost,
            location: Location {
                lat: self.lat,
                lng: self.lng,
            },
        };
        asset.refresh_ratios();
        Ok(asset)
    }
}

/// Load all assets from a CSV file
pub fn load_assets<P: AsRef<Path>>(path: P) -> Result<Vec<Asset>> {
    let reader = Reader::from_path(path)?;
    collect_assets(reader)
}

/// Load assets from any reader (e.g., string buffer)
pub fn load_assets_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Asset>> {
    collect_assets(Reader::from_reader(reader))
}

fn collect_assets<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Asset>> {
    let mut assets = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        assets.push(row.into_asset()?);
    }
    log::debug!("loaded {} assets", assets.len());
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Id,Address,City,PostalCode,PropertyType,Value,Size,Age,FossilPct,RenewablePct,Certifications,LoanAmount,Term,AnnualDebtPayment,Revenue2024,OpEx2024,RiskRating,EnergyIntensity,RetrofitCost,Lat,Lng";

    #[test]
    fn test_load_from_reader() {
        let data = format!(
            "{}\n\
             a1,10 Main St,Toronto,M5V 1A1,Office,1000000,20000,15,60,40,LEED; WELL,500000,10,50000,200000,80000,M,22.5,75000,43.6,-79.4\n\
             a2,,Ottawa,K1P 1A1,Retail,500000,5000,40,100,0,,0,5,0,90000,30000,H,35,120000,45.4,-75.7\n",
            HEADER
        );
        let assets = load_assets_from_reader(data.as_bytes()).unwrap();

        assert_eq!(assets.len(), 2);
        let a1 = &assets[0];
        assert_eq!(a1.certifications, vec!["LEED", "WELL"]);
        assert_eq!(a1.noi_2024, Noi::new(200_000.0, 80_000.0));
        assert_eq!(a1.risk_rating, RiskRating::Medium);
        assert!((a1.dscr - 2.4).abs() < 1e-12);
        assert!((a1.ltv - 50.0).abs() < 1e-12);

        let a2 = &assets[1];
        assert!(a2.certifications.is_empty());
        assert_eq!(a2.dscr, 0.0);
        assert_eq!(a2.display_name(1), "Building B");
    }

    #[test]
    fn test_rejects_unknown_rating() {
        let data = format!(
            "{}\na1,10 Main St,Toronto,M5V 1A1,Office,1,1,1,50,50,,0,5,0,1,0,X,1,1,0,0\n",
            HEADER
        );
        let err = load_assets_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidAsset { .. }));
    }

    #[test]
    fn test_rejects_negative_opex() {
        let data = format!(
            "{}\na1,10 Main St,Toronto,M5V 1A1,Office,1,1,1,50,50,,0,5,0,1,-5,L,1,1,0,0\n",
            HEADER
        );
        assert!(load_assets_from_reader(data.as_bytes()).is_err());
    }
}
