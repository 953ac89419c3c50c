//! Transition Risk - climate-transition projections for commercial real estate
//!
//! This library provides:
//! - Scenario curves for Baseline, 1.5 °C, 2 °C immediate and 2 °C delayed pathways
//! - Per-asset NOI projections (combined or revenue/opEx split) over 2025-2050
//! - Portfolio bucket projections (Retrofit, Pay Fines, Benchmark)
//! - The search -> details -> analysis and filter -> analysis wizard flows
//! - Portfolio risk distribution, sortable table, and CSV export

pub mod error;
pub mod asset;
pub mod scenario;
pub mod projection;
pub mod portfolio;
pub mod wizard;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use asset::{Asset, AssetCatalog, Noi};
pub use scenario::{Scenario, ScenarioRunner};
pub use projection::{ProjectionEngine, ProjectionConfig, ProjectionResult, ChartView, UnitMode};
pub use wizard::{AssetFlow, PortfolioFlow, Route};
