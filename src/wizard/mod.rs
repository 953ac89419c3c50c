//! Multi-step navigation for the asset and portfolio flows
//!
//! Asset flow: search -> details (one page per selected asset) -> analysis.
//! Portfolio flow: filter -> analysis. The only data crossing a step boundary
//! is a typed handoff; entering analysis without one resets to the first step.

mod asset_flow;
mod portfolio_flow;

pub use asset_flow::{
    AssetAnalysis, AssetDetails, AssetEdit, AssetFlow, AssetHandoff, AssetSearch, DetailsOutcome,
};
pub use portfolio_flow::{
    PortfolioAnalysis, PortfolioFilter, PortfolioFlow, PortfolioHandoff,
};

use serde::{Deserialize, Serialize};

/// Logical pages of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    AssetSearch,
    AssetDetails,
    AssetAnalysis,
    PortfolioFilter,
    PortfolioAnalysis,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::AssetSearch => "/asset/search",
            Route::AssetDetails => "/asset/details",
            Route::AssetAnalysis => "/asset/analysis",
            Route::PortfolioFilter => "/portfolio/filter",
            Route::PortfolioAnalysis => "/portfolio/analysis",
        }
    }

    /// Step an analysis page redirects to when its handoff is missing
    pub fn origin(&self) -> Route {
        match self {
            Route::AssetSearch | Route::AssetDetails | Route::AssetAnalysis => Route::AssetSearch,
            Route::PortfolioFilter | Route::PortfolioAnalysis => Route::PortfolioFilter,
        }
    }
}
