//! Portfolio filters, risk distribution, and the per-property table

mod config;
mod filters;
mod risk;
pub mod table;

pub use config::PortfolioConfig;
pub use filters::{FilterCategory, FilterSet, SelectedFilters};
pub use risk::{risk_distribution, GroupBy, RiskCounts};
pub use table::{PortfolioRow, PortfolioTable, SortDirection, SortField};
