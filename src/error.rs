//! Error type shared by the library

use thiserror::Error;

/// Errors raised by strict parsing, handoff decoding, loading and export
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("unknown chart view: {0}")]
    UnknownView(String),

    #[error("unknown unit mode: {0}")]
    UnknownUnitMode(String),

    #[error("unknown grouping: {0}")]
    UnknownGrouping(String),

    #[error("unknown sort field: {0}")]
    UnknownSortField(String),

    #[error("unknown risk rating: {0}")]
    UnknownRiskRating(String),

    #[error("invalid catalog row for asset {id}: {reason}")]
    InvalidAsset { id: String, reason: String },

    #[error("invalid handoff payload: {0}")]
    Handoff(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
