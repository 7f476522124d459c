use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Outcome of a settled selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum SelectionResult {
    Won,
    Lost,
    Placed,
}

impl SelectionResult {
    pub fn is_win(self) -> bool {
        matches!(self, SelectionResult::Won)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SelectionResult::Won => "won",
            SelectionResult::Lost => "lost",
            SelectionResult::Placed => "placed",
        }
    }
}

impl fmt::Display for SelectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionResult {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "won" | "win" | "w" | "winner" => Ok(SelectionResult::Won),
            "lost" | "lose" | "loss" | "l" | "loser" => Ok(SelectionResult::Lost),
            "placed" | "place" | "p" => Ok(SelectionResult::Placed),
            other => Err(format!("unknown selection result `{other}`")),
        }
    }
}

impl TryFrom<String> for SelectionResult {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SelectionResult> for String {
    fn from(value: SelectionResult) -> Self {
        value.as_str().to_string()
    }
}

/// One settled wager as exported by the results API.
///
/// `running_pl` is whatever cumulative figure the upstream producer attached.
/// It is kept for display; the aggregator always recomputes the running sum
/// from `pl` after sorting by date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BetRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub time: String,
    pub result: SelectionResult,
    /// Missing or `null` prices load as NaN and are only left out of average odds.
    #[serde(alias = "bsp", default = "missing_odds", deserialize_with = "odds_or_missing")]
    pub odds: f64,
    pub stake: Decimal,
    #[serde(default)]
    pub liability: Decimal,
    #[serde(alias = "profit_loss")]
    pub pl: Decimal,
    #[serde(default, alias = "cumulative_pl", skip_serializing_if = "Option::is_none")]
    pub running_pl: Option<Decimal>,
}

fn missing_odds() -> f64 {
    f64::NAN
}

fn odds_or_missing<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(missing_odds))
}

impl BetRecord {
    pub fn new(
        date: NaiveDate,
        result: SelectionResult,
        odds: f64,
        stake: Decimal,
        pl: Decimal,
    ) -> Self {
        Self {
            date,
            country: String::new(),
            course: String::new(),
            time: String::new(),
            result,
            odds,
            stake,
            liability: Decimal::ZERO,
            pl,
            running_pl: None,
        }
    }

    pub fn with_venue(mut self, country: impl Into<String>, course: impl Into<String>) -> Self {
        self.country = country.into();
        self.course = course.into();
        self
    }

    pub fn is_win(&self) -> bool {
        self.result.is_win()
    }

    pub fn has_finite_odds(&self) -> bool {
        self.odds.is_finite()
    }
}
