//! Asset records, the demo catalog, and catalog loading

mod data;
mod catalog;
pub mod loader;

pub use data::{Asset, HeatSource, Location, Noi, RiskRating, SizeCategory, building_label};
pub use catalog::{AssetCatalog, SearchFilters, mock_assets, MAX_SELECTED_ASSETS};
pub use loader::{load_assets, load_assets_from_reader};
