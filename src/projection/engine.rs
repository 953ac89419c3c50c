//! Core projection engine for per-asset NOI series

use crate::asset::{Asset, Noi};
use crate::error::{Error, Result};
use crate::scenario::Scenario;
use super::series::{round_value, ProjectionPoint, ProjectionResult, DISPLAY_STEP};
use super::state::YearState;
use serde::{Deserialize, Serialize};
use std::env;

/// How each asset is charted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    /// One NOI series per asset
    #[default]
    Combined,
    /// Separate revenue and operating-expense series per asset
    Split,
}

impl ChartView {
    pub fn key(&self) -> &'static str {
        match self {
            ChartView::Combined => "combined",
            ChartView::Split => "split",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        match key {
            "combined" => Ok(ChartView::Combined),
            "split" => Ok(ChartView::Split),
            other => Err(Error::UnknownView(other.to_string())),
        }
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Climate pathway to project under
    pub scenario: Scenario,

    /// Combined NOI or revenue/opEx split
    pub view: ChartView,

    /// Stride used when sampling the full series for display
    pub display_step: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Baseline,
            view: ChartView::Combined,
            display_step: DISPLAY_STEP,
        }
    }
}

impl ProjectionConfig {
    /// Defaults overridden by TRANSITION_SCENARIO, TRANSITION_VIEW and TRANSITION_DISPLAY_STEP
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let scenario = env::var("TRANSITION_SCENARIO")
            .ok()
            .map(|s| Scenario::from_key_or_baseline(&s))
            .unwrap_or(defaults.scenario);

        let view = env::var("TRANSITION_VIEW")
            .ok()
            .and_then(|s| ChartView::from_key(&s).ok())
            .unwrap_or(defaults.view);

        let display_step = env::var("TRANSITION_DISPLAY_STEP")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&step: &usize| step > 0)
            .unwrap_or(defaults.display_step);

        Self {
            scenario,
            view,
            display_step,
        }
    }
}

/// A named baseline pair to project
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBaseline {
    pub name: String,
    pub noi: Noi,
}

impl SeriesBaseline {
    pub fn new(name: impl Into<String>, noi: Noi) -> Self {
        Self {
            name: name.into(),
            noi,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project each asset's 2024 NOI, naming series by display name
    pub fn project_assets(&self, assets: &[Asset]) -> ProjectionResult {
        let baselines: Vec<SeriesBaseline> = assets
            .iter()
            .enumerate()
            .map(|(i, asset)| SeriesBaseline::new(asset.display_name(i), asset.noi_2024))
            .collect();
        self.project_baselines(&baselines)
    }

    /// Run the full 2025-2050 projection for the given baselines
    pub fn project_baselines(&self, baselines: &[SeriesBaseline]) -> ProjectionResult {
        for b in baselines.iter().filter(|b| b.noi.op_ex < 0.0) {
            log::warn!("{}: negative operating expenses {}", b.name, b.noi.op_ex);
        }

        let mut result = ProjectionResult::new(self.config.scenario, self.series_names(baselines));
        let mut state = YearState::start();

        while !state.is_complete() {
            result.add_point(self.calculate_year(&state, baselines));
            state.advance_year();
        }

        log::debug!(
            "projected {} series over {} years under {}",
            result.series.len(),
            result.len(),
            self.config.scenario
        );
        result
    }

    /// Full projection sampled at the configured display step
    pub fn project_display(&self, assets: &[Asset]) -> ProjectionResult {
        self.project_assets(assets).downsample(self.config.display_step)
    }

    fn series_names(&self, baselines: &[SeriesBaseline]) -> Vec<String> {
        match self.config.view {
            ChartView::Combined => baselines.iter().map(|b| b.name.clone()).collect(),
            ChartView::Split => baselines
                .iter()
                .flat_map(|b| [format!("{} Revenue", b.name), format!("{} OpEx", b.name)])
                .collect(),
        }
    }

    /// Calculate all series values for a single year
    fn calculate_year(&self, state: &YearState, baselines: &[SeriesBaseline]) -> ProjectionPoint {
        let f = state.factors(self.config.scenario);

        let values = match self.config.view {
            ChartView::Combined => baselines
                .iter()
                .map(|b| round_value(b.noi.net() * f.noi_adjustment * f.noi_growth))
                .collect(),
            ChartView::Split => baselines
                .iter()
                .flat_map(|b| {
                    [
                        round_value(b.noi.revenue * f.revenue_adjustment * f.revenue_growth),
                        round_value(b.noi.op_ex * f.opex_adjustment * f.opex_growth),
                    ]
                })
                .collect(),
        };

        ProjectionPoint {
            year: state.year,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{END_YEAR, START_YEAR};

    fn baseline_asset() -> Asset {
        let mut asset = Asset::custom();
        asset.address = "10 Main St".to_string();
        asset.noi_2024 = Noi::new(100_000.0, 40_000.0);
        asset
    }

    fn engine(scenario: Scenario, view: ChartView) -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig {
            scenario,
            view,
            ..Default::default()
        })
    }

    #[test]
    fn test_baseline_end_to_end() {
        let result =
            engine(Scenario::Baseline, ChartView::Combined).project_assets(&[baseline_asset()]);

        assert_eq!(result.len(), 26);
        assert_eq!(result.points[0].year, START_YEAR);
        assert_eq!(result.points[25].year, END_YEAR);
        assert_eq!(result.value("10 Main St", 2025), Some(60_000));
        assert_eq!(result.value("10 Main St", 2030), Some(66_000));
        assert_eq!(result.value("10 Main St", 2050), Some(90_000));
    }

    #[test]
    fn test_one_point_five_combined() {
        let result =
            engine(Scenario::OnePointFive, ChartView::Combined).project_assets(&[baseline_asset()]);
        // 60000 * 0.925 * 1.1
        assert_eq!(result.value("10 Main St", 2030), Some(61_050));
        // 60000 * 0.95
        assert_eq!(result.value("10 Main St", 2025), Some(57_000));
    }

    #[test]
    fn test_delayed_tracks_baseline_until_2035() {
        let assets = [baseline_asset()];
        let baseline = engine(Scenario::Baseline, ChartView::Combined).project_assets(&assets);
        let delayed =
            engine(Scenario::TwoDegreeDelayed, ChartView::Combined).project_assets(&assets);

        for year in 2025..2035 {
            assert_eq!(baseline.value("10 Main St", year), delayed.value("10 Main St", year));
        }
        // 60000 * 0.9 * 1.2
        assert_eq!(delayed.value("10 Main St", 2035), Some(64_800));
    }

    #[test]
    fn test_split_view_series_and_values() {
        let mut second = Asset::custom();
        second.noi_2024 = Noi::new(50_000.0, 10_000.0);
        let result = engine(Scenario::OnePointFive, ChartView::Split)
            .project_assets(&[baseline_asset(), second]);

        assert_eq!(
            result.series,
            vec!["10 Main St Revenue", "10 Main St OpEx", "Building B Revenue", "Building B OpEx"]
        );
        // 100000 * 0.98, 40000 * 1.02
        assert_eq!(result.value("10 Main St Revenue", 2025), Some(98_000));
        assert_eq!(result.value("10 Main St OpEx", 2025), Some(40_800));
        // 100000 * 0.97 * 1.1 and 40000 * 1.035 * 1.075
        assert_eq!(result.value("10 Main St Revenue", 2030), Some(106_700));
        assert_eq!(result.value("10 Main St OpEx", 2030), Some(44_505));
    }

    #[test]
    fn test_split_is_not_forced_to_match_combined() {
        let assets = [baseline_asset()];
        let combined =
            engine(Scenario::TwoDegreeImmediate, ChartView::Combined).project_assets(&assets);
        let split = engine(Scenario::TwoDegreeImmediate, ChartView::Split).project_assets(&assets);

        let noi = combined.value("10 Main St", 2040).unwrap();
        let rev = split.value("10 Main St Revenue", 2040).unwrap();
        let opex = split.value("10 Main St OpEx", 2040).unwrap();
        assert_ne!(noi, rev - opex);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let assets = [baseline_asset()];
        for scenario in Scenario::ALL {
            for view in [ChartView::Combined, ChartView::Split] {
                let e = engine(scenario, view);
                assert_eq!(e.project_assets(&assets), e.project_assets(&assets));
            }
        }
    }

    #[test]
    fn test_display_downsampling() {
        let e = engine(Scenario::TwoDegreeDelayed, ChartView::Split);
        let assets = [baseline_asset()];
        let full = e.project_assets(&assets);
        let display = e.project_display(&assets);

        assert_eq!(display.len(), 6);
        for (k, idx) in [0usize, 5, 10, 15, 20, 25].iter().enumerate() {
            assert_eq!(display.points[k], full.points[*idx]);
        }
    }

    #[test]
    fn test_empty_input_still_yields_years() {
        let result = ProjectionEngine::default().project_assets(&[]);
        assert_eq!(result.len(), 26);
        assert!(result.series.is_empty());
        assert!(result.points.iter().all(|p| p.values.is_empty()));
    }

    #[test]
    fn test_view_keys() {
        assert_eq!(ChartView::from_key("split").unwrap(), ChartView::Split);
        assert!(ChartView::from_key("stacked").is_err());
        assert_eq!(ChartView::default().key(), "combined");
    }
}
