use std::collections::{BTreeMap, HashSet};
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::promotion::PromotionTable;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Monthly,
    Quarterly,
    Annual,
}

impl BillingPeriod {
    pub fn label(self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "month",
            BillingPeriod::Quarterly => "quarter",
            BillingPeriod::Annual => "year",
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A subscription tier offered on the pricing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanTier {
    pub product_id: String,
    pub name: String,
    pub base_price: Decimal,
    pub period: BillingPeriod,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl PlanTier {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        base_price: Decimal,
        period: BillingPeriod,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            base_price,
            period,
            features: Vec::new(),
        }
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }
}

pub fn default_plans() -> Vec<PlanTier> {
    vec![
        PlanTier::new("monthly", "Monthly", dec!(30), BillingPeriod::Monthly).with_features([
            "All systems",
            "Daily selections by email",
            "Results dashboard",
        ]),
        PlanTier::new("quarterly", "Quarterly", dec!(80), BillingPeriod::Quarterly).with_features(
            [
                "All systems",
                "Daily selections by email",
                "Results dashboard",
                "Save over monthly billing",
            ],
        ),
        PlanTier::new("annual", "Annual", dec!(300), BillingPeriod::Annual).with_features([
            "All systems",
            "Daily selections by email",
            "Results dashboard",
            "Two months free",
        ]),
    ]
}

/// Static lookup data loaded once at start-up: plan tiers, product to system
/// names, and the validated promotion table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    plans: Vec<PlanTier>,
    systems: BTreeMap<String, String>,
    promotions: PromotionTable,
}

impl Catalog {
    pub fn new(
        plans: Vec<PlanTier>,
        systems: BTreeMap<String, String>,
        promotions: PromotionTable,
    ) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for plan in &plans {
            if !seen.insert(plan.product_id.as_str()) {
                return Err(ConfigError::DuplicatePlan(plan.product_id.clone()));
            }
        }
        Ok(Self {
            plans,
            systems,
            promotions,
        })
    }

    pub fn plans(&self) -> &[PlanTier] {
        &self.plans
    }

    pub fn plan(&self, product_id: &str) -> Option<&PlanTier> {
        self.plans.iter().find(|plan| plan.product_id == product_id)
    }

    pub fn system_name(&self, product_id: &str) -> Option<&str> {
        self.systems.get(product_id).map(String::as_str)
    }

    pub fn systems(&self) -> &BTreeMap<String, String> {
        &self.systems
    }

    pub fn promotions(&self) -> &PromotionTable {
        &self.promotions
    }
}
