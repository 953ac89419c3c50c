//! Scenario projections for assets and portfolio buckets

mod state;
mod engine;
mod series;
mod portfolio;
mod retrofit;

pub use state::{YearState, YearFactors};
pub use engine::{ProjectionEngine, ProjectionConfig, ChartView, SeriesBaseline};
pub use series::{ProjectionPoint, ProjectionResult, SeriesSummary, round_value, DISPLAY_STEP};
pub use portfolio::{project_portfolio, Bucket, UnitMode, group_thousands};
pub use retrofit::{
    RetrofitFinancing, RetrofitPriority, DEFAULT_LOAN_RATE_PCT, DEFAULT_LOAN_TERM_YEARS,
};
