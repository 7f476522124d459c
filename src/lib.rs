#![doc(test(attr(deny(warnings))))]

//! Results Core computes the figures behind a sports-trading subscription
//! site: reporting date ranges, profit/loss aggregation over settled bets,
//! and promotional pricing for plan tiers.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Results Core tracing initialized.");
    });
}
