//! Projection output structures

use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};

/// Every 5th year is shown on charts (2025, 2030, ..., 2050)
pub const DISPLAY_STEP: usize = 5;

/// Round half up to the nearest currency unit (or count)
pub fn round_value(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// One year of projected values, one entry per series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub values: Vec<i64>,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Scenario the series were projected under
    pub scenario: Scenario,

    /// Series names, in the same order as each point's values
    pub series: Vec<String>,

    /// Annual points in year order
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionResult {
    pub fn new(scenario: Scenario, series: Vec<String>) -> Self {
        Self {
            scenario,
            series,
            points: Vec::new(),
        }
    }

    /// Add a projected point
    pub fn add_point(&mut self, point: ProjectionPoint) {
        debug_assert_eq!(point.values.len(), self.series.len());
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn years(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.year).collect()
    }

    pub fn series_index(&self, name: &str) -> Option<usize> {
        self.series.iter().position(|s| s == name)
    }

    /// Value of a named series in a given year
    pub fn value(&self, series: &str, year: u32) -> Option<i64> {
        let idx = self.series_index(series)?;
        self.points
            .iter()
            .find(|p| p.year == year)
            .map(|p| p.values[idx])
    }

    /// Every value of a named series in year order
    pub fn series_values(&self, series: &str) -> Option<Vec<i64>> {
        let idx = self.series_index(series)?;
        Some(self.points.iter().map(|p| p.values[idx]).collect())
    }

    /// Keep points at indices 0, step, 2*step, ...
    pub fn downsample(&self, step: usize) -> ProjectionResult {
        let step = step.max(1);
        ProjectionResult {
            scenario: self.scenario,
            series: self.series.clone(),
            points: self.points.iter().step_by(step).cloned().collect(),
        }
    }

    /// Points shown on charts
    pub fn display(&self) -> ProjectionResult {
        self.downsample(DISPLAY_STEP)
    }

    /// Get summary statistics per series
    pub fn summary(&self) -> Vec<SeriesSummary> {
        self.series
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<i64> = self.points.iter().map(|p| p.values[idx]).collect();
                let first_value = values.first().copied().unwrap_or(0);
                let last_value = values.last().copied().unwrap_or(0);
                let change_pct = if first_value == 0 {
                    0.0
                } else {
                    (last_value - first_value) as f64 / first_value.abs() as f64 * 100.0
                };
                SeriesSummary {
                    name: name.clone(),
                    first_value,
                    last_value,
                    peak_value: values.iter().copied().max().unwrap_or(0),
                    total: values.iter().sum(),
                    change_pct,
                }
            })
            .collect()
    }
}

/// Summary statistics for one projected series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub name: String,
    pub first_value: i64,
    pub last_value: i64,
    pub peak_value: i64,
    pub total: i64,
    pub change_pct: f64,
}
