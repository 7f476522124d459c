use chrono::{Datelike, Duration, NaiveDate};

/// Moves `date` by `months` calendar months, clamping the day to the length
/// of the target month (31 March minus one month is 29 or 28 February).
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn shift_month_clamps_to_shorter_months() {
        assert_eq!(shift_month(date(2024, 5, 31), -3), date(2024, 2, 29));
        assert_eq!(shift_month(date(2023, 5, 31), -3), date(2023, 2, 28));
        assert_eq!(shift_month(date(2024, 8, 31), -6), date(2024, 2, 29));
    }

    #[test]
    fn shift_month_crosses_year_boundaries() {
        assert_eq!(shift_month(date(2024, 2, 15), -3), date(2023, 11, 15));
        assert_eq!(shift_month(date(2024, 11, 15), 3), date(2025, 2, 15));
    }

    #[test]
    fn shift_days_moves_backwards() {
        assert_eq!(shift_days(date(2024, 3, 1), -7), date(2024, 2, 23));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
