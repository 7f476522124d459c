use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const ALL_TIME_LABEL: &str = "All Time";
pub const PRESENT_LABEL: &str = "Present";

/// Named reporting windows offered by the results views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DateRangeToken {
    Last7Days,
    Last30Days,
    Last3Months,
    Last6Months,
    YearToDate,
    AllTime,
}

impl DateRangeToken {
    pub const ALL: [DateRangeToken; 6] = [
        DateRangeToken::Last7Days,
        DateRangeToken::Last30Days,
        DateRangeToken::Last3Months,
        DateRangeToken::Last6Months,
        DateRangeToken::YearToDate,
        DateRangeToken::AllTime,
    ];

    /// Parses a token, returning `None` for anything unrecognised.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = match raw.trim().to_ascii_lowercase().as_str() {
            "7d" | "7days" | "last7days" | "last_7_days" | "week" => DateRangeToken::Last7Days,
            "30d" | "30days" | "last30days" | "last_30_days" | "month" => {
                DateRangeToken::Last30Days
            }
            "3m" | "3months" | "last3months" | "last_3_months" => DateRangeToken::Last3Months,
            "6m" | "6months" | "last6months" | "last_6_months" => DateRangeToken::Last6Months,
            "ytd" | "year" | "yeartodate" | "year_to_date" => DateRangeToken::YearToDate,
            "all" | "alltime" | "all_time" => DateRangeToken::AllTime,
            _ => return None,
        };
        Some(token)
    }

    /// Parses a token, treating unknown input as [`DateRangeToken::AllTime`].
    pub fn parse_lenient(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_else(|| {
            tracing::warn!(token = raw, "unrecognised date range, using all time");
            DateRangeToken::AllTime
        })
    }

    pub fn code(self) -> &'static str {
        match self {
            DateRangeToken::Last7Days => "7d",
            DateRangeToken::Last30Days => "30d",
            DateRangeToken::Last3Months => "3m",
            DateRangeToken::Last6Months => "6m",
            DateRangeToken::YearToDate => "ytd",
            DateRangeToken::AllTime => "all",
        }
    }
}

impl Default for DateRangeToken {
    fn default() -> Self {
        DateRangeToken::AllTime
    }
}

impl fmt::Display for DateRangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Concrete interval produced from a [`DateRangeToken`]. Both bounds are
/// inclusive; `None` on both sides means unbounded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub label: String,
}

impl ResolvedRange {
    pub fn all_time() -> Self {
        Self {
            start: None,
            end: None,
            label: ALL_TIME_LABEL.to_string(),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let after_start = self.start.map_or(true, |start| date >= start);
        let before_end = self.end.map_or(true, |end| date <= end);
        after_start && before_end
    }
}
