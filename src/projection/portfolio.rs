//! Portfolio-level projection of the Retrofit / Pay Fines / Benchmark buckets
//!
//! Same shape as the per-asset engine, but the baselines are synthetic
//! portfolio aggregates and each bucket carries its own curves.

use crate::error::{Error, Result};
use crate::scenario::{delayed, linear_growth, years_since_start, Scenario};
use super::series::{round_value, ProjectionPoint, ProjectionResult};
use super::state::YearState;
use serde::{Deserialize, Serialize};

/// Whether bucket baselines are building counts or dollars
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitMode {
    #[default]
    Count,
    Currency,
}

impl UnitMode {
    pub fn key(&self) -> &'static str {
        match self {
            UnitMode::Count => "count",
            UnitMode::Currency => "currency",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        match key {
            "count" => Ok(UnitMode::Count),
            "currency" => Ok(UnitMode::Currency),
            other => Err(Error::UnknownUnitMode(other.to_string())),
        }
    }

    /// Anything other than "count" is treated as currency
    pub fn from_key_lenient(key: &str) -> Self {
        if key == "count" {
            UnitMode::Count
        } else {
            if key != "currency" {
                log::warn!("unrecognized unit mode {:?}, using currency", key);
            }
            UnitMode::Currency
        }
    }

    /// Tooltip formatting: "1,234" or "$1,234"
    pub fn format_value(&self, value: i64) -> String {
        match self {
            UnitMode::Count => group_thousands(value),
            UnitMode::Currency => format!("${}", group_thousands(value)),
        }
    }

    /// Axis tick formatting: "120" or "$180M"
    pub fn format_axis(&self, value: i64) -> String {
        match self {
            UnitMode::Count => value.to_string(),
            UnitMode::Currency => format!("${}M", (value as f64 / 1_000_000.0).round() as i64),
        }
    }
}

/// Insert thousands separators: 1234567 -> "1,234,567"
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Portfolio response to transition policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Retrofit,
    PayFines,
    Benchmark,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Retrofit, Bucket::PayFines, Bucket::Benchmark];

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Retrofit => "Retrofit",
            Bucket::PayFines => "Pay Fines",
            Bucket::Benchmark => "Benchmark",
        }
    }

    /// Starting magnitude for the unit mode
    pub fn base(&self, unit: UnitMode) -> f64 {
        match (self, unit) {
            (Bucket::Retrofit, UnitMode::Count) => 120.0,
            (Bucket::Retrofit, UnitMode::Currency) => 180_000_000.0,
            (Bucket::PayFines, UnitMode::Count) => 100.0,
            (Bucket::PayFines, UnitMode::Currency) => 150_000_000.0,
            (Bucket::Benchmark, UnitMode::Count) => 110.0,
            (Bucket::Benchmark, UnitMode::Currency) => 165_000_000.0,
        }
    }

    pub fn growth_rate(&self) -> f64 {
        match self {
            Bucket::Retrofit => 0.02,
            Bucket::PayFines => 0.015,
            Bucket::Benchmark => 0.018,
        }
    }

    pub fn growth(&self, year: u32) -> f64 {
        linear_growth(self.growth_rate(), year)
    }

    pub fn adjustment(&self, scenario: Scenario, year: u32) -> f64 {
        let y = years_since_start(year);
        match (self, scenario) {
            (_, Scenario::Baseline) => 1.0,
            (Bucket::Retrofit, Scenario::OnePointFive) => 0.95 - y * 0.002,
            (Bucket::Retrofit, Scenario::TwoDegreeImmediate) => 0.97 - y * 0.001,
            (Bucket::Retrofit, Scenario::TwoDegreeDelayed) => delayed(year, 1.0, 0.9, -0.01),
            (Bucket::PayFines, Scenario::OnePointFive) => 0.9 - y * 0.01,
            (Bucket::PayFines, Scenario::TwoDegreeImmediate) => 0.92 - y * 0.008,
            (Bucket::PayFines, Scenario::TwoDegreeDelayed) => delayed(year, 0.98, 0.8, -0.015),
            (Bucket::Benchmark, Scenario::OnePointFive) => 0.92 - y * 0.008,
            (Bucket::Benchmark, Scenario::TwoDegreeImmediate) => 0.94 - y * 0.006,
            (Bucket::Benchmark, Scenario::TwoDegreeDelayed) => delayed(year, 0.99, 0.85, -0.012),
        }
    }
}

/// Project all three buckets over 2025-2050
pub fn project_portfolio(scenario: Scenario, unit: UnitMode) -> ProjectionResult {
    let series = Bucket::ALL.iter().map(|b| b.label().to_string()).collect();
    let mut result = ProjectionResult::new(scenario, series);
    let mut state = YearState::start();

    while !state.is_complete() {
        let values = Bucket::ALL
            .iter()
            .map(|b| {
                let adjusted = b.base(unit) * b.adjustment(scenario, state.year);
                round_value(adjusted * b.growth(state.year))
            })
            .collect();
        result.add_point(ProjectionPoint {
            year: state.year,
            values,
        });
        state.advance_year();
    }

    log::debug!("projected portfolio buckets under {} ({})", scenario, unit.key());
    result
}
