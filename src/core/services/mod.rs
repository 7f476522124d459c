pub mod performance_service;
pub mod pricing_service;
pub mod range_service;

pub use performance_service::{CumulativeSeries, PerformanceService};
pub use pricing_service::PricingService;
pub use range_service::DateRangeService;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("unknown product `{0}`")]
    UnknownProduct(String),
    #[error("{0}")]
    Invalid(String),
}
