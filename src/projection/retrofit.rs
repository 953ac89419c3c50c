//! Retrofit financing and priority
//!
//! Financing turns an asset's retrofit cost into a yearly payment schedule;
//! priority tiers come from energy intensity.

use crate::asset::Asset;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOAN_RATE_PCT: f64 = 5.0;
pub const DEFAULT_LOAN_TERM_YEARS: u32 = 10;

/// How the retrofit capex is paid
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RetrofitFinancing {
    /// Full cost in the first year
    #[default]
    Upfront,
    /// Level annual payments
    Loan {
        /// Annual interest rate in percent
        rate_pct: f64,
        term_years: u32,
    },
}

impl RetrofitFinancing {
    /// Loan financing at the default 5% over 10 years
    pub fn default_loan() -> Self {
        RetrofitFinancing::Loan {
            rate_pct: DEFAULT_LOAN_RATE_PCT,
            term_years: DEFAULT_LOAN_TERM_YEARS,
        }
    }

    /// Payment due in each year the financing is active
    ///
    /// Loans use the level annuity payment `P * r / (1 - (1 + r)^-n)`.
    pub fn annual_payment(&self, cost: f64) -> f64 {
        match *self {
            RetrofitFinancing::Upfront => cost,
            RetrofitFinancing::Loan { term_years: 0, .. } => cost,
            RetrofitFinancing::Loan { rate_pct, term_years } => {
                let r = rate_pct / 100.0;
                let n = term_years as i32;
                if r.abs() < 1e-12 {
                    cost / term_years as f64
                } else {
                    cost * r / (1.0 - (1.0 + r).powi(-n))
                }
            }
        }
    }

    /// Yearly payments starting in the first projected year
    pub fn payment_schedule(&self, cost: f64) -> Vec<f64> {
        match *self {
            RetrofitFinancing::Upfront | RetrofitFinancing::Loan { term_years: 0, .. } => {
                vec![cost]
            }
            RetrofitFinancing::Loan { term_years, .. } => {
                vec![self.annual_payment(cost); term_years as usize]
            }
        }
    }

    /// Sum of all payments, including interest
    pub fn total_cost(&self, cost: f64) -> f64 {
        self.payment_schedule(cost).iter().sum()
    }
}

/// Retrofit urgency tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RetrofitPriority {
    Low,
    Medium,
    High,
}

impl RetrofitPriority {
    /// Above 30 is high, above 20 medium, otherwise low
    pub fn from_energy_intensity(intensity: f64) -> Self {
        if intensity > 30.0 {
            RetrofitPriority::High
        } else if intensity > 20.0 {
            RetrofitPriority::Medium
        } else {
            RetrofitPriority::Low
        }
    }

    pub fn for_asset(asset: &Asset) -> Self {
        Self::from_energy_intensity(asset.energy_intensity)
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RetrofitPriority::High => "High priority: HVAC upgrade, building envelope improvements",
            RetrofitPriority::Medium => "Medium priority: Lighting retrofit, smart controls",
            RetrofitPriority::Low => "Low priority: Maintenance optimization",
        }
    }
}
