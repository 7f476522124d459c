use chrono::{DateTime, Utc};

use crate::core::calendar::{shift_days, shift_month, start_of_year};
use crate::core::time::Clock;
use crate::currency::format_date;
use crate::domain::range::{DateRangeToken, ResolvedRange, PRESENT_LABEL};

pub struct DateRangeService;

impl DateRangeService {
    /// Resolves `token` against `now`. Bounded ranges end today and start a
    /// calendar distance back; all time has no bounds.
    pub fn resolve(token: DateRangeToken, now: DateTime<Utc>) -> ResolvedRange {
        let today = now.date_naive();
        let start = match token {
            DateRangeToken::Last7Days => shift_days(today, -7),
            DateRangeToken::Last30Days => shift_days(today, -30),
            DateRangeToken::Last3Months => shift_month(today, -3),
            DateRangeToken::Last6Months => shift_month(today, -6),
            DateRangeToken::YearToDate => start_of_year(today),
            DateRangeToken::AllTime => return ResolvedRange::all_time(),
        };
        ResolvedRange {
            start: Some(start),
            end: Some(today),
            label: format!("{} - {}", format_date(start), PRESENT_LABEL),
        }
    }

    /// Like [`DateRangeService::resolve`], but unknown tokens resolve to all time.
    pub fn resolve_str(raw: &str, now: DateTime<Utc>) -> ResolvedRange {
        Self::resolve(DateRangeToken::parse_lenient(raw), now)
    }

    pub fn resolve_with_clock(token: DateRangeToken, clock: &dyn Clock) -> ResolvedRange {
        Self::resolve(token, clock.now())
    }
}
