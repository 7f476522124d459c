use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("GBP")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "GBP" => "£".into(),
        "EUR" => "€".into(),
        "USD" => "$".into(),
        "AUD" => "A$".into(),
        _ => format!("{code} "),
    }
}

/// Rounds a monetary amount to pennies, halves away from zero.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn fixed2(value: Decimal) -> String {
    let mut rounded = round2(value);
    rounded.rescale(2);
    rounded.to_string()
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats `amount` as `£1,234.50`, with a leading `-` for losses.
pub fn format_currency_value(amount: Decimal, code: &CurrencyCode) -> String {
    let body = fixed2(amount.abs());
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    let sign = if round2(amount).is_sign_negative() && !round2(amount).is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{}{}.{frac_part}",
        symbol_for(code.as_str()),
        group_digits(int_part)
    )
}

/// Sterling shorthand for [`format_currency_value`].
pub fn format_currency(amount: Decimal) -> String {
    format_currency_value(amount, &CurrencyCode::default())
}

/// Formats a percentage with an explicit sign: `+12.50%`, `-3.00%`.
pub fn format_signed_percent(value: Decimal) -> String {
    let rounded = round2(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}%", fixed2(rounded.abs()))
    } else {
        format!("+{}%", fixed2(rounded.abs()))
    }
}

/// Formats an unsigned percentage such as a strike rate: `42.86%`.
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", fixed2(value))
}

pub fn format_odds(odds: Option<f64>) -> String {
    match odds {
        Some(value) if value.is_finite() => format!("{value:.2}"),
        _ => "-".to_string(),
    }
}

/// Promotion badge text, e.g. `25% OFF` or `12.5% OFF`.
pub fn discount_badge(percent: Decimal) -> String {
    format!("{}% OFF", percent.normalize())
}

/// Day month year, e.g. `08 Oct 2026`.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        month_label(date.month()),
        date.year()
    )
}

pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}
