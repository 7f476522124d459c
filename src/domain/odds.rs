use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const ALL_ODDS_LABEL: &str = "All Odds";

/// Bands shown on the results page when configuration does not override them.
pub static DEFAULT_ODDS_BANDS: Lazy<Vec<OddsBand>> = Lazy::new(|| {
    vec![
        OddsBand::below(10.0),
        OddsBand::below(20.0),
        OddsBand::below(30.0),
    ]
});

/// Odds bucket with an inclusive minimum and an optional exclusive maximum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OddsBand {
    pub label: String,
    #[serde(default)]
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl OddsBand {
    pub fn new(label: impl Into<String>, min: f64, max: Option<f64>) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    /// Band covering every price below `max`, labelled the way the results table shows it.
    pub fn below(max: f64) -> Self {
        Self::new(format!("Odds < {max:.1}"), 0.0, Some(max))
    }

    /// The synthetic band that always summarises the whole filtered set.
    pub fn all_odds() -> Self {
        Self::new(ALL_ODDS_LABEL, 0.0, None)
    }

    pub fn is_all_odds(&self) -> bool {
        self.label == ALL_ODDS_LABEL
    }

    /// Non-finite odds never fall inside a band.
    pub fn contains(&self, odds: f64) -> bool {
        if !odds.is_finite() {
            return false;
        }
        odds >= self.min && self.max.map_or(true, |max| odds < max)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidOddsBand {
            label: self.label.clone(),
            reason: reason.to_string(),
        };
        if self.label.trim().is_empty() {
            return Err(invalid("label is empty"));
        }
        if !self.min.is_finite() {
            return Err(invalid("minimum must be finite"));
        }
        if let Some(max) = self.max {
            if !max.is_finite() {
                return Err(invalid("maximum must be finite"));
            }
            if max <= self.min {
                return Err(invalid("maximum must exceed minimum"));
            }
        }
        Ok(())
    }
}

/// Aggregate figures for one odds band.
///
/// `roi` is total profit divided by the number of bets, not by stake.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OddsBandSummary {
    pub label: String,
    pub bets: usize,
    pub wins: usize,
    pub total_stake: Decimal,
    pub total_profit: Decimal,
    /// Percentage of bets that won, `0` when the band is empty.
    pub strike_rate: Decimal,
    pub roi: Decimal,
    /// Mean of the finite odds in the band; `None` when there are none.
    pub avg_odds: Option<f64>,
}

impl OddsBandSummary {
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            bets: 0,
            wins: 0,
            total_stake: Decimal::ZERO,
            total_profit: Decimal::ZERO,
            strike_rate: Decimal::ZERO,
            roi: Decimal::ZERO,
            avg_odds: None,
        }
    }
}
