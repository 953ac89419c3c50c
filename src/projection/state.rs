//! Per-year projection state

use crate::scenario::{
    linear_growth, years_since_start, Scenario, END_YEAR, NOI_GROWTH_RATE, OPEX_GROWTH_RATE,
    START_YEAR,
};

/// Position of the projection on the annual timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearState {
    /// Calendar year being projected
    pub year: u32,

    /// 0-based index into the full series
    pub index: usize,
}

impl YearState {
    /// State for the first projected year
    pub fn start() -> Self {
        Self {
            year: START_YEAR,
            index: 0,
        }
    }

    /// Advance to next year
    pub fn advance_year(&mut self) {
        self.year += 1;
        self.index += 1;
    }

    /// True once the state has moved past the last projected year
    pub fn is_complete(&self) -> bool {
        self.year > END_YEAR
    }

    pub fn years_elapsed(&self) -> f64 {
        years_since_start(self.year)
    }

    /// All multipliers that apply in this year under the given scenario
    pub fn factors(&self, scenario: Scenario) -> YearFactors {
        YearFactors {
            noi_adjustment: scenario.noi_adjustment(self.year),
            noi_growth: linear_growth(NOI_GROWTH_RATE, self.year),
            revenue_adjustment: scenario.revenue_adjustment(self.year),
            revenue_growth: linear_growth(NOI_GROWTH_RATE, self.year),
            opex_adjustment: scenario.opex_adjustment(self.year),
            opex_growth: linear_growth(OPEX_GROWTH_RATE, self.year),
        }
    }
}

/// Scenario adjustment and growth multipliers for one year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearFactors {
    pub noi_adjustment: f64,
    pub noi_growth: f64,
    pub revenue_adjustment: f64,
    pub revenue_growth: f64,
    pub opex_adjustment: f64,
    pub opex_growth: f64,
}
