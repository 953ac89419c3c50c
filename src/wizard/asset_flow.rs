//! Single-asset flow: search, per-asset details, analysis
//!
//! Each step is its own type. The details step hands an [`AssetHandoff`] to
//! the analysis step, which cannot be constructed without one.

use crate::asset::{Asset, AssetCatalog, RiskRating, SearchFilters, MAX_SELECTED_ASSETS};
use crate::error::Result;
use crate::export;
use crate::projection::{
    ChartView, ProjectionConfig, ProjectionEngine, ProjectionResult, RetrofitFinancing,
    RetrofitPriority,
};
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::io;

/// Search step: filters plus up to three selected asset ids
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetSearch {
    pub filters: SearchFilters,
    selected: Vec<String>,
}

impl AssetSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previous selection, truncated to the cap
    ///
    /// Repeated ids are kept once.
    pub fn with_selection(ids: Vec<String>) -> Self {
        let mut search = Self::new();
        for id in ids {
            if !search.is_selected(&id) {
                search.toggle(&id);
            }
        }
        search
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Deselect if selected; otherwise select unless the cap is reached
    ///
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.is_selected(id) {
            self.selected.retain(|s| s != id);
            true
        } else if self.selected.len() < MAX_SELECTED_ASSETS {
            self.selected.push(id.to_string());
            true
        } else {
            log::debug!("selection full, ignoring {}", id);
            false
        }
    }

    /// Assets shown for the current filters
    pub fn results<'a>(&self, catalog: &'a AssetCatalog) -> Vec<&'a Asset> {
        catalog.search(&self.filters)
    }

    /// Move to the details step; None when nothing selected resolves
    pub fn continue_to_details(&self, catalog: &AssetCatalog) -> Option<AssetDetails> {
        if self.selected.is_empty() {
            return None;
        }
        AssetDetails::new(catalog.resolve(&self.selected))
    }

    /// Details step for a single blank asset
    pub fn add_custom(&self) -> AssetDetails {
        AssetDetails {
            assets: vec![Asset::custom()],
            index: 0,
        }
    }
}

/// A single field edit on the details form
#[derive(Debug, Clone, PartialEq)]
pub enum AssetEdit {
    Address(String),
    City(String),
    PostalCode(String),
    PropertyType(String),
    Value(f64),
    Size(f64),
    Age(u32),
    FossilShare(f64),
    RenewableShare(f64),
    Certifications(Vec<String>),
    LoanAmount(f64),
    Term(u32),
    AnnualDebtPayment(f64),
    Revenue(f64),
    OpEx(f64),
    RiskRating(RiskRating),
    EnergyIntensity(f64),
    RetrofitCost(f64),
}

impl AssetEdit {
    fn apply(self, asset: &mut Asset) {
        match self {
            AssetEdit::Address(v) => asset.address = v,
            AssetEdit::City(v) => asset.city = v,
            AssetEdit::PostalCode(v) => asset.postal_code = v,
            AssetEdit::PropertyType(v) => asset.property_type = v,
            AssetEdit::Value(v) => asset.value = v,
            AssetEdit::Size(v) => asset.size = v,
            AssetEdit::Age(v) => asset.age = v,
            AssetEdit::FossilShare(v) => asset.heat_source.fossil = v,
            AssetEdit::RenewableShare(v) => asset.heat_source.renewable = v,
            AssetEdit::Certifications(v) => asset.certifications = v,
            AssetEdit::LoanAmount(v) => asset.loan_amount = v,
            AssetEdit::Term(v) => asset.term = v,
            AssetEdit::AnnualDebtPayment(v) => asset.annual_debt_payment = v,
            AssetEdit::Revenue(v) => asset.noi_2024.revenue = v,
            AssetEdit::OpEx(v) => asset.noi_2024.op_ex = v,
            AssetEdit::RiskRating(v) => asset.risk_rating = v,
            AssetEdit::EnergyIntensity(v) => asset.energy_intensity = v,
            AssetEdit::RetrofitCost(v) => asset.retrofit_cost = v,
        }
        asset.refresh_ratios();
    }
}

/// Details step: editing asset `index` of the selected list
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDetails {
    assets: Vec<Asset>,
    index: usize,
}

/// Result of confirming a details page
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsOutcome {
    /// Move on to the next asset
    Next(AssetDetails),
    /// Last asset confirmed; snapshot for the analysis step
    Complete(AssetHandoff),
}

impl AssetDetails {
    /// None for an empty list
    pub fn new(assets: Vec<Asset>) -> Option<Self> {
        if assets.is_empty() {
            None
        } else {
            Some(Self { assets, index: 0 })
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.assets.len()
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn current(&self) -> &Asset {
        &self.assets[self.index]
    }

    /// Apply a form edit to the current asset
    pub fn apply(&mut self, edit: AssetEdit) {
        edit.apply(&mut self.assets[self.index]);
    }

    pub fn confirm(mut self) -> DetailsOutcome {
        if self.is_last() {
            log::debug!("details complete for {} assets", self.assets.len());
            DetailsOutcome::Complete(AssetHandoff::new(self.assets))
        } else {
            self.index += 1;
            DetailsOutcome::Next(self)
        }
    }

    /// Previous asset, or back to search from the first one
    pub fn back(mut self) -> AssetFlow {
        if self.index > 0 {
            self.index -= 1;
            AssetFlow::Details(self)
        } else {
            let ids = self
                .assets
                .into_iter()
                .map(|a| a.id)
                .filter(|id| id != "custom")
                .collect();
            AssetFlow::Search(AssetSearch::with_selection(ids))
        }
    }
}

/// Frozen asset list passed from the details step to analysis
///
/// Serializes as a plain JSON array of assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetHandoff {
    assets: Vec<Asset>,
}

impl AssetHandoff {
    pub fn new(assets: Vec<Asset>) -> Self {
        for asset in assets.iter().filter(|a| !a.heat_source.is_balanced()) {
            log::warn!(
                "{}: heat source shares sum to {}",
                asset.id,
                asset.heat_source.total()
            );
        }
        Self { assets }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

/// Analysis step over the handed-off assets
#[derive(Debug, Clone, PartialEq)]
pub struct AssetAnalysis {
    assets: Vec<Asset>,
    pub config: ProjectionConfig,
    pub financing: RetrofitFinancing,
}

impl AssetAnalysis {
    pub fn enter(handoff: AssetHandoff) -> Self {
        Self::with_config(handoff, ProjectionConfig::default())
    }

    pub fn with_config(handoff: AssetHandoff, config: ProjectionConfig) -> Self {
        Self {
            assets: handoff.assets,
            config,
            financing: RetrofitFinancing::default(),
        }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn set_scenario(&mut self, scenario: Scenario) {
        self.config.scenario = scenario;
    }

    /// Scenario dropdown; unknown keys fall back to baseline
    pub fn select_scenario(&mut self, key: &str) {
        self.config.scenario = Scenario::from_key_or_baseline(key);
    }

    pub fn set_view(&mut self, view: ChartView) {
        self.config.view = view;
    }

    /// Full 26-year projection
    pub fn projection(&self) -> ProjectionResult {
        ProjectionEngine::new(self.config.clone()).project_assets(&self.assets)
    }

    /// Points shown on the chart
    pub fn chart(&self) -> ProjectionResult {
        self.projection().downsample(self.config.display_step)
    }

    /// Display name and retrofit tier for each asset
    pub fn retrofit_priorities(&self) -> Vec<(String, RetrofitPriority)> {
        self.assets
            .iter()
            .enumerate()
            .map(|(i, a)| (a.display_name(i), RetrofitPriority::for_asset(a)))
            .collect()
    }

    /// Yearly retrofit payments per asset under the selected financing
    pub fn retrofit_schedules(&self) -> Vec<(String, Vec<f64>)> {
        self.assets
            .iter()
            .enumerate()
            .map(|(i, a)| (a.display_name(i), self.financing.payment_schedule(a.retrofit_cost)))
            .collect()
    }

    /// Export the full projection as CSV
    pub fn export_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        export::write_projection_csv(&self.projection(), writer)
    }
}

/// Where the asset flow currently is
#[derive(Debug, Clone, PartialEq)]
pub enum AssetFlow {
    Search(AssetSearch),
    Details(AssetDetails),
    Analysis(AssetAnalysis),
}

impl Default for AssetFlow {
    fn default() -> Self {
        AssetFlow::Search(AssetSearch::new())
    }
}

impl AssetFlow {
    pub fn route(&self) -> super::Route {
        match self {
            AssetFlow::Search(_) => super::Route::AssetSearch,
            AssetFlow::Details(_) => super::Route::AssetDetails,
            AssetFlow::Analysis(_) => super::Route::AssetAnalysis,
        }
    }

    /// Enter analysis from a serialized handoff
    ///
    /// A missing, unreadable, or empty payload resets the flow to search.
    pub fn resume_analysis(payload: Option<&str>) -> Self {
        let Some(payload) = payload else {
            log::debug!("no asset handoff, redirecting to search");
            return AssetFlow::default();
        };
        match AssetHandoff::from_json(payload) {
            Ok(handoff) if !handoff.assets.is_empty() => {
                AssetFlow::Analysis(AssetAnalysis::enter(handoff))
            }
            Ok(_) => {
                log::debug!("empty asset handoff, redirecting to search");
                AssetFlow::default()
            }
            Err(e) => {
                log::warn!("discarding asset handoff: {}", e);
                AssetFlow::default()
            }
        }
    }
}
