//! Climate-transition scenarios and their year-indexed adjustment curves
//!
//! Every curve is a pure function of `(scenario, year)`. The scenario set is
//! closed, so each curve is an exhaustive match rather than runtime config.
//! Also hosts [`ScenarioRunner`] for evaluating the same inputs under every
//! scenario at once.

use crate::asset::Asset;
use crate::error::{Error, Result};
use crate::projection::{
    project_portfolio, ProjectionConfig, ProjectionEngine, ProjectionResult, UnitMode,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First projected year
pub const START_YEAR: u32 = 2025;

/// Last projected year (inclusive)
pub const END_YEAR: u32 = 2050;

/// Number of annual points in a full projection
pub const HORIZON_YEARS: usize = (END_YEAR - START_YEAR + 1) as usize;

/// Year at which the delayed-transition pathway kicks in
pub const DELAYED_TRANSITION_YEAR: u32 = 2035;

/// Annual NOI growth used in combined mode (and for the revenue split)
pub const NOI_GROWTH_RATE: f64 = 0.02;

/// Annual operating-expense growth used in split mode
pub const OPEX_GROWTH_RATE: f64 = 0.015;

/// Named climate-transition pathway
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    #[default]
    #[serde(rename = "baseline")]
    Baseline,
    #[serde(rename = "1.5c")]
    OnePointFive,
    #[serde(rename = "2c-immediate")]
    TwoDegreeImmediate,
    #[serde(rename = "2c-delayed")]
    TwoDegreeDelayed,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Baseline,
        Scenario::OnePointFive,
        Scenario::TwoDegreeImmediate,
        Scenario::TwoDegreeDelayed,
    ];

    /// Stable key used in payloads, CLI flags and env vars
    pub fn key(&self) -> &'static str {
        match self {
            Scenario::Baseline => "baseline",
            Scenario::OnePointFive => "1.5c",
            Scenario::TwoDegreeImmediate => "2c-immediate",
            Scenario::TwoDegreeDelayed => "2c-delayed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Baseline => "Baseline",
            Scenario::OnePointFive => "1.5 °C",
            Scenario::TwoDegreeImmediate => "2 °C Immediate",
            Scenario::TwoDegreeDelayed => "2 °C Delayed",
        }
    }

    /// Strict parse; unknown keys are an error
    pub fn from_key(key: &str) -> Result<Self> {
        Scenario::ALL
            .iter()
            .copied()
            .find(|s| s.key() == key)
            .ok_or_else(|| Error::UnknownScenario(key.to_string()))
    }

    /// Lenient parse used by the analysis steps: unknown keys project as Baseline
    pub fn from_key_or_baseline(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|_| {
            log::warn!("unrecognized scenario {:?}, falling back to baseline", key);
            Scenario::Baseline
        })
    }

    /// Multiplier applied to baseline NOI in combined mode
    pub fn noi_adjustment(&self, year: u32) -> f64 {
        let y = years_since_start(year);
        match self {
            Scenario::Baseline => 1.0,
            Scenario::OnePointFive => 0.95 - y * 0.005,
            Scenario::TwoDegreeImmediate => 0.97 - y * 0.003,
            Scenario::TwoDegreeDelayed => delayed(year, 1.0, 0.9, -0.008),
        }
    }

    /// Multiplier applied to baseline revenue in split mode
    pub fn revenue_adjustment(&self, year: u32) -> f64 {
        let y = years_since_start(year);
        match self {
            Scenario::Baseline => 1.0,
            Scenario::OnePointFive => 0.98 - y * 0.002,
            Scenario::TwoDegreeImmediate => 0.99 - y * 0.001,
            Scenario::TwoDegreeDelayed => delayed(year, 1.0, 0.95, -0.005),
        }
    }

    /// Multiplier applied to baseline operating expenses in split mode
    pub fn opex_adjustment(&self, year: u32) -> f64 {
        let y = years_since_start(year);
        match self {
            Scenario::Baseline => 1.0,
            Scenario::OnePointFive => 1.02 + y * 0.003,
            Scenario::TwoDegreeImmediate => 1.01 + y * 0.002,
            Scenario::TwoDegreeDelayed => delayed(year, 1.0, 1.05, 0.01),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Scenario::from_key(s)
    }
}

/// Years elapsed since [`START_YEAR`] (negative before it)
pub fn years_since_start(year: u32) -> f64 {
    year as f64 - START_YEAR as f64
}

/// Linear growth multiplier `1 + rate * (year - 2025)`
pub fn linear_growth(rate: f64, year: u32) -> f64 {
    1.0 + years_since_start(year) * rate
}

/// Flat `before` until the delayed transition year, then `base + slope * (year - 2035)`
pub(crate) fn delayed(year: u32, before: f64, base: f64, slope: f64) -> f64 {
    if year < DELAYED_TRANSITION_YEAR {
        before
    } else {
        base + (year - DELAYED_TRANSITION_YEAR) as f64 * slope
    }
}

/// Evaluates the same inputs under several scenarios
///
/// Each evaluation is a pure projection, so the scenario fan-out runs on the
/// rayon pool and the results come back in [`Scenario::ALL`] order.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_config: ProjectionConfig,
}

impl ScenarioRunner {
    pub fn new(base_config: ProjectionConfig) -> Self {
        Self { base_config }
    }

    /// Project assets under a single scenario, keeping the rest of the base config
    pub fn run(&self, assets: &[Asset], scenario: Scenario) -> ProjectionResult {
        let config = ProjectionConfig {
            scenario,
            ..self.base_config.clone()
        };
        ProjectionEngine::new(config).project_assets(assets)
    }

    /// Project assets under every scenario
    pub fn run_all(&self, assets: &[Asset]) -> Vec<(Scenario, ProjectionResult)> {
        Scenario::ALL
            .par_iter()
            .map(|&scenario| (scenario, self.run(assets, scenario)))
            .collect()
    }

    /// Portfolio bucket projections under every scenario
    pub fn run_portfolio_all(&self, unit: UnitMode) -> Vec<(Scenario, ProjectionResult)> {
        Scenario::ALL
            .par_iter()
            .map(|&scenario| (scenario, project_portfolio(scenario, unit)))
            .collect()
    }

    pub fn base_config(&self) -> &ProjectionConfig {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Noi;
    use crate::projection::ChartView;
    use approx::assert_relative_eq;

    #[test]
    fn test_baseline_is_identity_every_year() {
        for year in START_YEAR..=END_YEAR {
            assert_eq!(Scenario::Baseline.noi_adjustment(year), 1.0);
            assert_eq!(Scenario::Baseline.revenue_adjustment(year), 1.0);
            assert_eq!(Scenario::Baseline.opex_adjustment(year), 1.0);
            let expected = 1.0 + 0.02 * (year - START_YEAR) as f64;
            assert_relative_eq!(linear_growth(NOI_GROWTH_RATE, year), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_one_point_five_at_2030() {
        assert_relative_eq!(Scenario::OnePointFive.noi_adjustment(2030), 0.925, epsilon = 1e-12);
        assert_relative_eq!(Scenario::OnePointFive.revenue_adjustment(2030), 0.97, epsilon = 1e-12);
        assert_relative_eq!(Scenario::OnePointFive.opex_adjustment(2030), 1.035, epsilon = 1e-12);
    }

    #[test]
    fn test_two_degree_immediate_declines_linearly() {
        assert_relative_eq!(
            Scenario::TwoDegreeImmediate.noi_adjustment(2025),
            0.97,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            Scenario::TwoDegreeImmediate.noi_adjustment(2050),
            0.895,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_delayed_is_flat_then_drops_at_2035() {
        for year in START_YEAR..DELAYED_TRANSITION_YEAR {
            assert_eq!(Scenario::TwoDegreeDelayed.noi_adjustment(year), 1.0);
            assert_eq!(Scenario::TwoDegreeDelayed.opex_adjustment(year), 1.0);
        }
        assert_eq!(Scenario::TwoDegreeDelayed.noi_adjustment(2035), 0.9);
        assert_eq!(Scenario::TwoDegreeDelayed.revenue_adjustment(2035), 0.95);
        assert_eq!(Scenario::TwoDegreeDelayed.opex_adjustment(2035), 1.05);
        assert_relative_eq!(Scenario::TwoDegreeDelayed.noi_adjustment(2045), 0.82, epsilon = 1e-12);
    }

    #[test]
    fn test_key_parsing() {
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::from_key(scenario.key()).unwrap(), scenario);
            assert_eq!(scenario.key().parse::<Scenario>().unwrap(), scenario);
        }
        assert!(matches!(Scenario::from_key("3c"), Err(Error::UnknownScenario(_))));
        assert_eq!(Scenario::from_key_or_baseline("3c"), Scenario::Baseline);
        assert_eq!(Scenario::from_key_or_baseline("2c-delayed"), Scenario::TwoDegreeDelayed);
    }

    #[test]
    fn test_serde_uses_keys() {
        let json = serde_json::to_string(&Scenario::OnePointFive).unwrap();
        assert_eq!(json, "\"1.5c\"");
        let back: Scenario = serde_json::from_str("\"2c-immediate\"").unwrap();
        assert_eq!(back, Scenario::TwoDegreeImmediate);
    }

    #[test]
    fn test_runner_matches_single_runs() {
        let mut asset = Asset::custom();
        asset.address = "1 Front St".to_string();
        asset.noi_2024 = Noi::new(100_000.0, 40_000.0);
        let assets = vec![asset];

        let runner = ScenarioRunner::new(ProjectionConfig {
            view: ChartView::Combined,
            ..Default::default()
        });
        let all = runner.run_all(&assets);

        assert_eq!(all.len(), 4);
        for (i, (scenario, result)) in all.iter().enumerate() {
            assert_eq!(*scenario, Scenario::ALL[i]);
            assert_eq!(result, &runner.run(&assets, *scenario));
        }
        // Transition scenarios end below the baseline
        let baseline_2050 = all[0].1.value("1 Front St", END_YEAR).unwrap();
        for (_, result) in &all[1..] {
            assert!(result.value("1 Front St", END_YEAR).unwrap() < baseline_2050);
        }
    }

    #[test]
    fn test_runner_portfolio_all() {
        let runner = ScenarioRunner::default();
        let all = runner.run_portfolio_all(UnitMode::Count);
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].1.value("Retrofit", START_YEAR), Some(120));
    }
}
