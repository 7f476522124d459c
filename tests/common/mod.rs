#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use results_core::config::ConfigManager;
use results_core::domain::{BetRecord, SelectionResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a config manager backed by a unique directory for each test.
pub fn setup_test_env() -> ConfigManager {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    ConfigManager::with_base_dir(base).expect("create config manager for temp dir")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn bet(day: NaiveDate, result: SelectionResult, odds: f64, pl: Decimal) -> BetRecord {
    BetRecord::new(day, result, odds, dec!(10), pl)
}

/// The three-bet history used across the aggregation tests.
pub fn worked_example() -> Vec<BetRecord> {
    vec![
        bet(date(2024, 1, 1), SelectionResult::Won, 6.0, dec!(5)),
        bet(date(2024, 1, 2), SelectionResult::Lost, 12.0, dec!(-2)),
        bet(date(2024, 2, 1), SelectionResult::Won, 25.0, dec!(10)),
    ]
}

/// A longer deterministic history spread across 2023 and 2024 with mixed odds.
pub fn season(count: usize) -> Vec<BetRecord> {
    let start = date(2023, 1, 1);
    (0..count)
        .map(|idx| {
            let day = start + chrono::Duration::days((idx * 3 % 540) as i64);
            let odds = 1.5 + (idx % 40) as f64;
            let (result, pl) = if idx % 4 == 0 {
                (SelectionResult::Won, Decimal::from((idx % 9) as i64 + 1))
            } else {
                (SelectionResult::Lost, dec!(-1.25))
            };
            bet(day, result, odds, pl).with_venue("GB", "Ascot")
        })
        .collect()
}

pub const RESULTS_JSON: &str = r#"{
  "results": [
    {"date": "2024-05-20", "country": "GB", "course": "Ascot", "time": "14:30",
     "result": "won", "bsp": 6.4, "stake": 10, "liability": 0, "profit_loss": 54.0},
    {"date": "2024-05-25", "country": "IRE", "course": "Leopardstown", "time": "15:10",
     "result": "lost", "bsp": 14.0, "stake": 10, "liability": 0, "profit_loss": -10.0},
    {"date": "2023-11-02", "country": "GB", "course": "Newbury", "time": "13:05",
     "result": "lost", "bsp": 3.2, "stake": 10, "liability": 0, "profit_loss": -10.0}
  ]
}"#;
