use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::bet::BetRecord;
use crate::domain::odds::{OddsBand, OddsBandSummary, ALL_ODDS_LABEL};
use crate::domain::performance::{
    CumulativePoint, MonthKey, MonthSummary, MonthlyLayout, PerformanceReport,
};
use crate::domain::range::ResolvedRange;

/// Running profit/loss over date-sorted bets. Cloning the series restarts it.
#[derive(Debug, Clone)]
pub struct CumulativeSeries<'a> {
    records: &'a [&'a BetRecord],
    position: usize,
    running: Decimal,
}

impl<'a> CumulativeSeries<'a> {
    pub fn new(records: &'a [&'a BetRecord]) -> Self {
        Self {
            records,
            position: 0,
            running: Decimal::ZERO,
        }
    }
}

impl Iterator for CumulativeSeries<'_> {
    type Item = CumulativePoint;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.get(self.position)?;
        self.running += record.pl;
        let point = CumulativePoint {
            index: self.position,
            date: record.date,
            pl: record.pl,
            running_pl: self.running,
        };
        self.position += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CumulativeSeries<'_> {}

pub struct PerformanceService;

impl PerformanceService {
    /// Keeps the bets dated inside `range` and orders them by date. Bets on the
    /// same date keep their input order.
    pub fn filter<'a>(records: &'a [BetRecord], range: &ResolvedRange) -> Vec<&'a BetRecord> {
        let mut filtered: Vec<&BetRecord> = records
            .iter()
            .filter(|record| range.contains(record.date))
            .collect();
        filtered.sort_by_key(|record| record.date);
        filtered
    }

    pub fn cumulative<'a>(filtered: &'a [&'a BetRecord]) -> CumulativeSeries<'a> {
        CumulativeSeries::new(filtered)
    }

    pub fn monthly(
        filtered: &[&BetRecord],
        range: &ResolvedRange,
        layout: MonthlyLayout,
    ) -> Vec<MonthSummary> {
        let mut months: BTreeMap<MonthKey, MonthSummary> = BTreeMap::new();
        for record in filtered {
            let key = MonthKey::of(record.date);
            let entry = months
                .entry(key)
                .or_insert_with(|| MonthSummary::empty(key));
            entry.profit += record.pl;
            entry.bets += 1;
            if record.is_win() {
                entry.wins += 1;
            }
        }

        if layout == MonthlyLayout::Dense {
            let span = match (range.start, range.end) {
                (Some(start), Some(end)) => Some((MonthKey::of(start), MonthKey::of(end))),
                _ => months
                    .keys()
                    .next()
                    .copied()
                    .zip(months.keys().next_back().copied()),
            };
            if let Some((first, last)) = span {
                let mut key = first;
                while key <= last {
                    months.entry(key).or_insert_with(|| MonthSummary::empty(key));
                    key = key.next();
                }
            }
        }

        months.into_values().collect()
    }

    /// Summarises every supplied band and then the synthetic "All Odds" band,
    /// which covers the whole filtered set. A supplied band carrying the
    /// "All Odds" label is replaced by the synthetic one.
    pub fn by_band(filtered: &[&BetRecord], bands: &[OddsBand]) -> Vec<OddsBandSummary> {
        let mut summaries: Vec<OddsBandSummary> = bands
            .iter()
            .filter(|band| !band.is_all_odds())
            .map(|band| {
                Self::summarize(
                    &band.label,
                    filtered
                        .iter()
                        .copied()
                        .filter(|record| band.contains(record.odds)),
                )
            })
            .collect();
        summaries.push(Self::summarize(ALL_ODDS_LABEL, filtered.iter().copied()));
        summaries
    }

    pub fn summarize<'a>(
        label: &str,
        records: impl IntoIterator<Item = &'a BetRecord>,
    ) -> OddsBandSummary {
        let mut summary = OddsBandSummary::empty(label);
        let mut odds_total = 0.0_f64;
        let mut odds_count = 0_usize;

        for record in records {
            summary.bets += 1;
            if record.is_win() {
                summary.wins += 1;
            }
            summary.total_stake += record.stake;
            summary.total_profit += record.pl;
            if record.has_finite_odds() {
                odds_total += record.odds;
                odds_count += 1;
            }
        }

        if summary.bets > 0 {
            let bets = Decimal::from(summary.bets);
            summary.strike_rate = Decimal::from(summary.wins) * Decimal::ONE_HUNDRED / bets;
            summary.roi = summary.total_profit / bets;
        }
        if odds_count > 0 {
            summary.avg_odds = Some(odds_total / odds_count as f64);
        }
        summary
    }

    /// Computes the cumulative, monthly and banded views over one filtered set.
    pub fn aggregate(
        records: &[BetRecord],
        range: &ResolvedRange,
        bands: &[OddsBand],
        layout: MonthlyLayout,
    ) -> PerformanceReport {
        let filtered = Self::filter(records, range);
        tracing::debug!(
            total = records.len(),
            retained = filtered.len(),
            range = %range.label,
            "filtered results"
        );

        let skipped = filtered
            .iter()
            .filter(|record| !record.has_finite_odds())
            .count();
        if skipped > 0 {
            tracing::warn!(skipped, "bets with non-finite odds left out of average odds");
        }

        PerformanceReport {
            range: range.clone(),
            cumulative: Self::cumulative(&filtered).collect(),
            monthly: Self::monthly(&filtered, range, layout),
            by_band: Self::by_band(&filtered, bands),
        }
    }
}
