pub mod bet;
pub mod odds;
pub mod performance;
pub mod plan;
pub mod promotion;
pub mod range;

pub use bet::{BetRecord, SelectionResult};
pub use odds::{OddsBand, OddsBandSummary, ALL_ODDS_LABEL, DEFAULT_ODDS_BANDS};
pub use performance::{CumulativePoint, MonthKey, MonthSummary, MonthlyLayout, PerformanceReport};
pub use plan::{default_plans, BillingPeriod, Catalog, PlanTier};
pub use promotion::{PriceQuote, Promotion, PromotionTable};
pub use range::{DateRangeToken, ResolvedRange, ALL_TIME_LABEL, PRESENT_LABEL};
