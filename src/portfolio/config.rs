//! Initial controls for portfolio analysis

use super::GroupBy;
use crate::projection::UnitMode;
use crate::scenario::Scenario;
use std::env;

/// Starting scenario, unit and grouping of the portfolio analysis step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortfolioConfig {
    pub scenario: Scenario,
    pub unit: UnitMode,
    pub group_by: GroupBy,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Baseline,
            unit: UnitMode::Count,
            group_by: GroupBy::Geography,
        }
    }
}

impl PortfolioConfig {
    /// Defaults overridden by TRANSITION_SCENARIO, TRANSITION_UNIT and TRANSITION_GROUP_BY
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let scenario = env::var("TRANSITION_SCENARIO")
            .ok()
            .map(|s| Scenario::from_key_or_baseline(&s))
            .unwrap_or(defaults.scenario);

        let unit = env::var("TRANSITION_UNIT")
            .ok()
            .map(|s| UnitMode::from_key_lenient(&s))
            .unwrap_or(defaults.unit);

        let group_by = env::var("TRANSITION_GROUP_BY")
            .ok()
            .map(|s| GroupBy::from_key_or_default(&s))
            .unwrap_or(defaults.group_by);

        Self {
            scenario,
            unit,
            group_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{ChartView, RetrofitFinancing};

    #[test]
    fn test_default_config() {
        let config = PortfolioConfig::default();
        assert_eq!(config.scenario, Scenario::Baseline);
        assert_eq!(config.unit, UnitMode::Count);
        assert_eq!(config.group_by, GroupBy::Geography);
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(Scenario::default(), Scenario::Baseline);
        assert_eq!(UnitMode::default(), UnitMode::Count);
        assert_eq!(GroupBy::default(), GroupBy::Geography);
        assert_eq!(ChartView::default(), ChartView::Combined);
        assert_eq!(RetrofitFinancing::default(), RetrofitFinancing::Upfront);
    }
}
