use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{odds::OddsBandSummary, range::ResolvedRange};

/// One step of the running profit/loss series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CumulativePoint {
    pub index: usize,
    pub date: NaiveDate,
    pub pl: Decimal,
    pub running_pl: Decimal,
}

/// Calendar month key, ordered by year then month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month >= 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub profit: Decimal,
    pub bets: usize,
    pub wins: usize,
}

impl MonthSummary {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            profit: Decimal::ZERO,
            bets: 0,
            wins: 0,
        }
    }
}

/// Whether months without bets are emitted as zero rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyLayout {
    #[default]
    Sparse,
    Dense,
}

/// All three results views computed over the same filtered bets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceReport {
    pub range: ResolvedRange,
    pub cumulative: Vec<CumulativePoint>,
    pub monthly: Vec<MonthSummary>,
    pub by_band: Vec<OddsBandSummary>,
}

impl PerformanceReport {
    pub fn total_profit(&self) -> Decimal {
        self.cumulative
            .last()
            .map(|point| point.running_pl)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn bet_count(&self) -> usize {
        self.cumulative.len()
    }

    pub fn band(&self, label: &str) -> Option<&OddsBandSummary> {
        self.by_band.iter().find(|summary| summary.label == label)
    }
}
