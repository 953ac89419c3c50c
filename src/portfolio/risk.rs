//! Risk-rating distribution of the portfolio by grouping dimension

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Dimension the risk distribution is grouped by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Geography,
    Lob,
    Type,
    Certs,
    Energy,
    Intensity,
}

impl GroupBy {
    pub const ALL: [GroupBy; 6] = [
        GroupBy::Geography,
        GroupBy::Lob,
        GroupBy::Type,
        GroupBy::Certs,
        GroupBy::Energy,
        GroupBy::Intensity,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            GroupBy::Geography => "geography",
            GroupBy::Lob => "lob",
            GroupBy::Type => "type",
            GroupBy::Certs => "certs",
            GroupBy::Energy => "energy",
            GroupBy::Intensity => "intensity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::Geography => "Geography",
            GroupBy::Lob => "Line of Business",
            GroupBy::Type => "Property Type",
            GroupBy::Certs => "Certifications",
            GroupBy::Energy => "Energy Source",
            GroupBy::Intensity => "Energy Intensity",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        GroupBy::ALL
            .iter()
            .copied()
            .find(|g| g.key() == key)
            .ok_or_else(|| Error::UnknownGrouping(key.to_string()))
    }

    /// Unknown keys group by geography
    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|_| {
            log::warn!("unrecognized grouping {:?}, using geography", key);
            GroupBy::Geography
        })
    }
}

/// Asset counts per risk rating within one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCounts {
    pub name: String,
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl RiskCounts {
    fn new(name: &str, low: u32, medium: u32, high: u32) -> Self {
        Self {
            name: name.to_string(),
            low,
            medium,
            high,
        }
    }

    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high
    }

    /// Share of high-risk assets in percent
    pub fn high_share_pct(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.high as f64 / total as f64 * 100.0,
        }
    }
}

/// Stacked Low/Medium/High counts for each group
pub fn risk_distribution(group_by: GroupBy) -> Vec<RiskCounts> {
    let rows: [(&str, u32, u32, u32); 5] = match group_by {
        GroupBy::Geography => [
            ("Toronto", 25, 15, 10),
            ("Vancouver", 18, 12, 5),
            ("Montreal", 15, 10, 8),
            ("Calgary", 12, 8, 6),
            ("Ottawa", 10, 7, 3),
        ],
        GroupBy::Lob => [
            ("Commercial", 30, 20, 15),
            ("Corporate", 25, 15, 10),
            ("Real Estate", 20, 12, 8),
            ("Small Business", 15, 10, 5),
            ("Enterprise", 10, 5, 2),
        ],
        GroupBy::Type => [
            ("Office", 22, 18, 15),
            ("Retail", 18, 12, 10),
            ("Industrial", 25, 10, 5),
            ("Multifamily", 20, 15, 8),
            ("Mixed Use", 15, 10, 7),
        ],
        GroupBy::Certs => [
            ("LEED", 30, 15, 5),
            ("BOMA BEST", 25, 12, 8),
            ("ENERGY STAR", 22, 10, 6),
            ("WELL", 18, 8, 4),
            ("None", 5, 20, 25),
        ],
        GroupBy::Energy => [
            ("Natural Gas", 15, 20, 25),
            ("Electric", 20, 15, 10),
            ("Renewable", 30, 10, 5),
            ("District", 25, 15, 8),
            ("Mixed", 10, 25, 12),
        ],
        GroupBy::Intensity => [
            ("Very Low", 35, 10, 5),
            ("Low", 30, 15, 8),
            ("Medium", 20, 25, 10),
            ("High", 10, 20, 25),
            ("Very High", 5, 15, 30),
        ],
    };

    rows.iter()
        .map(|&(name, low, medium, high)| RiskCounts::new(name, low, medium, high))
        .collect()
}
