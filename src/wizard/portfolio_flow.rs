//! Portfolio flow: filter selection, then analysis

use crate::error::Result;
use crate::export;
use crate::portfolio::{
    risk_distribution, FilterCategory, FilterSet, GroupBy, PortfolioConfig, PortfolioTable,
    RiskCounts, SelectedFilters,
};
use crate::projection::{project_portfolio, ProjectionResult, UnitMode, DISPLAY_STEP};
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::io;

/// Filter step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioFilter {
    filters: FilterSet,
    pub search_term: String,
}

impl PortfolioFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter step with a previous selection restored
    pub fn with_selection(selected: &SelectedFilters) -> Self {
        let mut step = Self::new();
        for (category, options) in selected {
            for option in options {
                step.filters.toggle(category, option);
            }
        }
        step
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn toggle(&mut self, category: &str, option: &str) -> bool {
        self.filters.toggle(category, option)
    }

    pub fn remove(&mut self, category: &str, option: &str) {
        self.filters.remove(category, option);
    }

    pub fn total_selected(&self) -> usize {
        self.filters.total_selected()
    }

    /// Categories narrowed by the search box
    pub fn visible_categories(&self) -> Vec<FilterCategory> {
        self.filters.search(&self.search_term)
    }

    /// Snapshot the selection for the analysis step
    pub fn continue_to_analysis(&self) -> PortfolioHandoff {
        PortfolioHandoff {
            filters: self.filters.selected(),
        }
    }
}

/// Selected filters passed from the filter step to analysis
///
/// Serializes as a JSON object of category name to option list. An empty
/// object is a valid handoff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioHandoff {
    filters: SelectedFilters,
}

impl PortfolioHandoff {
    pub fn filters(&self) -> &SelectedFilters {
        &self.filters
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Analysis step for the filtered portfolio
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioAnalysis {
    filters: SelectedFilters,
    pub scenario: Scenario,
    pub unit: UnitMode,
    pub group_by: GroupBy,
    pub table: PortfolioTable,
}

impl PortfolioAnalysis {
    pub fn enter(handoff: PortfolioHandoff) -> Self {
        Self::with_config(handoff, PortfolioConfig::default())
    }

    pub fn with_config(handoff: PortfolioHandoff, config: PortfolioConfig) -> Self {
        Self {
            filters: handoff.filters,
            scenario: config.scenario,
            unit: config.unit,
            group_by: config.group_by,
            table: PortfolioTable::mock(),
        }
    }

    pub fn filters(&self) -> &SelectedFilters {
        &self.filters
    }

    pub fn select_scenario(&mut self, key: &str) {
        self.scenario = Scenario::from_key_or_baseline(key);
    }

    pub fn select_unit(&mut self, key: &str) {
        self.unit = UnitMode::from_key_lenient(key);
    }

    pub fn select_group_by(&mut self, key: &str) {
        self.group_by = GroupBy::from_key_or_default(key);
    }

    /// Full 26-year bucket projection
    pub fn projection(&self) -> ProjectionResult {
        project_portfolio(self.scenario, self.unit)
    }

    pub fn chart(&self) -> ProjectionResult {
        self.projection().downsample(DISPLAY_STEP)
    }

    pub fn risk_distribution(&self) -> Vec<RiskCounts> {
        risk_distribution(self.group_by)
    }

    /// Back to the filter step with the selection restored
    pub fn back_to_filter(&self) -> PortfolioFilter {
        PortfolioFilter::with_selection(&self.filters)
    }

    /// Export the property table, in its current sort order, as CSV
    pub fn export_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        export::write_portfolio_table_csv(&self.table, writer)
    }
}

/// Where the portfolio flow currently is
#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioFlow {
    Filter(PortfolioFilter),
    Analysis(PortfolioAnalysis),
}

impl Default for PortfolioFlow {
    fn default() -> Self {
        PortfolioFlow::Filter(PortfolioFilter::new())
    }
}

impl PortfolioFlow {
    pub fn route(&self) -> super::Route {
        match self {
            PortfolioFlow::Filter(_) => super::Route::PortfolioFilter,
            PortfolioFlow::Analysis(_) => super::Route::PortfolioAnalysis,
        }
    }

    /// Enter analysis from a serialized handoff
    ///
    /// Missing or unreadable payloads reset to the filter step.
    pub fn resume_analysis(payload: Option<&str>) -> Self {
        let Some(payload) = payload else {
            log::debug!("no portfolio handoff, redirecting to filter");
            return PortfolioFlow::default();
        };
        match PortfolioHandoff::from_json(payload) {
            Ok(handoff) => PortfolioFlow::Analysis(PortfolioAnalysis::enter(handoff)),
            Err(e) => {
                log::warn!("discarding portfolio handoff: {}", e);
                PortfolioFlow::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::SortField;
    use crate::wizard::Route;

    #[test]
    fn test_filter_to_analysis_round_trip() {
        let mut step = PortfolioFilter::new();
        step.toggle("Geography", "Toronto");
        step.toggle("Certifications", "LEED");
        step.toggle("Certifications", "WELL");
        step.remove("Certifications", "WELL");

        let handoff = step.continue_to_analysis();
        let payload = handoff.to_json().unwrap();
        assert_eq!(payload, r#"{"Certifications":["LEED"],"Geography":["Toronto"]}"#);

        let flow = PortfolioFlow::resume_analysis(Some(&payload));
        assert_eq!(flow.route(), Route::PortfolioAnalysis);
        let PortfolioFlow::Analysis(analysis) = flow else {
            panic!("expected analysis");
        };
        assert_eq!(analysis.filters(), handoff.filters());

        let back = analysis.back_to_filter();
        assert_eq!(back.total_selected(), 2);
    }

    #[test]
    fn test_empty_selection_is_valid() {
        let payload = PortfolioFilter::new().continue_to_analysis().to_json().unwrap();
        assert_eq!(payload, "{}");
        assert_eq!(
            PortfolioFlow::resume_analysis(Some(&payload)).route(),
            Route::PortfolioAnalysis
        );
    }

    #[test]
    fn test_missing_handoff_resets_to_filter() {
        assert_eq!(PortfolioFlow::resume_analysis(None).route(), Route::PortfolioFilter);
        assert_eq!(PortfolioFlow::resume_analysis(Some("[1,2]")).route(), Route::PortfolioFilter);
    }

    #[test]
    fn test_analysis_controls_fall_back() {
        let mut analysis = PortfolioAnalysis::enter(PortfolioHandoff::default());
        analysis.select_scenario("2c-delayed");
        analysis.select_unit("currency");
        analysis.select_group_by("bogus");

        assert_eq!(analysis.scenario, Scenario::TwoDegreeDelayed);
        assert_eq!(analysis.unit, UnitMode::Currency);
        assert_eq!(analysis.group_by, GroupBy::Geography);
        assert_eq!(analysis.chart().years(), vec![2025, 2030, 2035, 2040, 2045, 2050]);
        assert_eq!(analysis.projection().value("Retrofit", 2030), Some(198_000_000));
        assert_eq!(analysis.risk_distribution()[0].name, "Toronto");
    }

    #[test]
    fn test_export_follows_sort_order() {
        let mut analysis = PortfolioAnalysis::enter(PortfolioHandoff::default());
        analysis.table.click(SortField::RetrofitCost);
        let mut buf = Vec::new();
        analysis.export_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let second_line = text.lines().nth(1).unwrap();
        assert!(second_line.starts_with("H3B 2Y7,M,"));
    }
}
