use chrono::{DateTime, NaiveDate, Utc};

use crate::core::services::PricingService;
use crate::currency::{
    discount_badge, format_currency_value, format_date, format_odds, format_percent,
    format_signed_percent, CurrencyCode,
};
use crate::domain::{
    Catalog, CumulativePoint, MonthSummary, OddsBandSummary, PerformanceReport, PriceQuote,
    ResolvedRange, ALL_ODDS_LABEL,
};

use super::table::{Table, TableColumn};

pub fn range_summary(range: &ResolvedRange) -> String {
    let bound = |date: Option<NaiveDate>| date.map(format_date).unwrap_or_else(|| "-".into());
    format!(
        "{}\n  start: {}\n  end:   {}",
        range.label,
        bound(range.start),
        bound(range.end)
    )
}

/// One-line headline taken from the "All Odds" summary.
pub fn headline(report: &PerformanceReport, code: &CurrencyCode) -> String {
    match report.band(ALL_ODDS_LABEL) {
        Some(all) => format!(
            "{}: {} bets, {} wins, P/L {}, strike rate {}, ROI {}",
            report.range.label,
            all.bets,
            all.wins,
            format_currency_value(all.total_profit, code),
            format_percent(all.strike_rate),
            format_signed_percent(all.roi)
        ),
        None => format!("{}: no results", report.range.label),
    }
}

pub fn cumulative_table(points: &[CumulativePoint], code: &CurrencyCode) -> Table {
    let mut table = Table::new(vec![
        TableColumn::right("#"),
        TableColumn::left("Date"),
        TableColumn::right("P/L"),
        TableColumn::right("Running P/L"),
    ]);
    for point in points {
        table.push_row(vec![
            (point.index + 1).to_string(),
            format_date(point.date),
            format_currency_value(point.pl, code),
            format_currency_value(point.running_pl, code),
        ]);
    }
    table
}

pub fn monthly_table(months: &[MonthSummary], code: &CurrencyCode) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right("Bets"),
        TableColumn::right("Wins"),
        TableColumn::right("P/L"),
    ]);
    for month in months {
        table.push_row(vec![
            month.month.to_string(),
            month.bets.to_string(),
            month.wins.to_string(),
            format_currency_value(month.profit, code),
        ]);
    }
    table
}

pub fn band_table(bands: &[OddsBandSummary], code: &CurrencyCode) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Range"),
        TableColumn::right("Bets"),
        TableColumn::right("Wins"),
        TableColumn::right("Strike"),
        TableColumn::right("Profit"),
        TableColumn::right("ROI"),
        TableColumn::right("Avg Odds"),
    ]);
    for band in bands {
        table.push_row(vec![
            band.label.clone(),
            band.bets.to_string(),
            band.wins.to_string(),
            format_percent(band.strike_rate),
            format_currency_value(band.total_profit, code),
            format_signed_percent(band.roi),
            format_odds(band.avg_odds),
        ]);
    }
    table
}

pub fn quote_line(product: &str, quote: &PriceQuote, code: &CurrencyCode) -> String {
    match quote {
        PriceQuote::Standard { base_price } => {
            format!("{product}: {}", format_currency_value(*base_price, code))
        }
        PriceQuote::Promotional {
            base_price,
            display_price,
            promotion_id,
            discount_percent,
        } => format!(
            "{product}: {} (was {}, {} via {promotion_id})",
            format_currency_value(*display_price, code),
            format_currency_value(*base_price, code),
            discount_badge(*discount_percent)
        ),
    }
}

pub fn plans_table(catalog: &Catalog, now: DateTime<Utc>, code: &CurrencyCode) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Plan"),
        TableColumn::left("Product"),
        TableColumn::right("Price"),
        TableColumn::left("Per"),
        TableColumn::left("Offer"),
    ]);
    for plan in catalog.plans() {
        let quote = PricingService::quote_plan(plan, catalog, now);
        let offer = quote.discount_percent().map(discount_badge).unwrap_or_default();
        table.push_row(vec![
            plan.name.clone(),
            plan.product_id.clone(),
            format_currency_value(quote.display_price(), code),
            plan.period.to_string(),
            offer,
        ]);
    }
    table
}

pub fn systems_table(catalog: &Catalog) -> Option<Table> {
    let mut table = Table::new(vec![TableColumn::left("Product"), TableColumn::left("System")]);
    for (product, system) in catalog.systems() {
        table.push_row(vec![product.to_string(), system.to_string()]);
    }
    (!table.rows.is_empty()).then_some(table)
}
