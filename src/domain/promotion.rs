use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// A percentage discount on a set of products, valid within a time window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    pub id: String,
    pub products: BTreeSet<String>,
    pub discount_percent: Decimal,
    pub starts_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Promotion {
    pub fn new<I, S>(
        id: impl Into<String>,
        products: I,
        discount_percent: Decimal,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            products: products.into_iter().map(Into::into).collect(),
            discount_percent,
            starts_at,
            ends_at,
            label: None,
        }
    }

    pub fn applies_to(&self, product_id: &str) -> bool {
        self.products.contains(product_id)
    }

    /// Window check with both ends inclusive; an open end never expires.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && self.ends_at.map_or(true, |end| end >= now)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(end) = self.ends_at {
            if end < self.starts_at {
                return Err(ConfigError::PromotionWindow {
                    id: self.id.clone(),
                });
            }
        }
        if self.discount_percent < Decimal::ZERO || self.discount_percent > Decimal::ONE_HUNDRED {
            return Err(ConfigError::DiscountOutOfRange {
                id: self.id.clone(),
                percent: self.discount_percent.to_string(),
            });
        }
        if self.products.is_empty() {
            return Err(ConfigError::EmptyProductSet {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Validated, immutable list of promotions.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct PromotionTable {
    promotions: Vec<Promotion>,
}

impl PromotionTable {
    /// Validates every promotion and rejects duplicate ids.
    pub fn new(promotions: Vec<Promotion>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for promotion in &promotions {
            promotion.validate()?;
            if !seen.insert(promotion.id.as_str()) {
                return Err(ConfigError::DuplicatePromotion(promotion.id.clone()));
            }
        }
        Ok(Self { promotions })
    }

    pub fn as_slice(&self) -> &[Promotion] {
        &self.promotions
    }

    pub fn get(&self, id: &str) -> Option<&Promotion> {
        self.promotions.iter().find(|promotion| promotion.id == id)
    }
}

impl<'de> Deserialize<'de> for PromotionTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let promotions = Vec::<Promotion>::deserialize(deserializer)?;
        PromotionTable::new(promotions).map_err(serde::de::Error::custom)
    }
}

/// Price shown for a product after promotions are considered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceQuote {
    Standard {
        base_price: Decimal,
    },
    Promotional {
        base_price: Decimal,
        display_price: Decimal,
        promotion_id: String,
        discount_percent: Decimal,
    },
}

impl PriceQuote {
    pub fn base_price(&self) -> Decimal {
        match self {
            PriceQuote::Standard { base_price } | PriceQuote::Promotional { base_price, .. } => {
                *base_price
            }
        }
    }

    pub fn display_price(&self) -> Decimal {
        match self {
            PriceQuote::Standard { base_price } => *base_price,
            PriceQuote::Promotional { display_price, .. } => *display_price,
        }
    }

    pub fn promotion_id(&self) -> Option<&str> {
        match self {
            PriceQuote::Standard { .. } => None,
            PriceQuote::Promotional { promotion_id, .. } => Some(promotion_id),
        }
    }

    pub fn discount_percent(&self) -> Option<Decimal> {
        match self {
            PriceQuote::Standard { .. } => None,
            PriceQuote::Promotional {
                discount_percent, ..
            } => Some(*discount_percent),
        }
    }

    pub fn is_promotional(&self) -> bool {
        matches!(self, PriceQuote::Promotional { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn window_is_inclusive_at_both_ends() {
        let end = start() + Duration::days(7);
        let promo = Promotion::new("summer", ["monthly"], dec!(20), start(), Some(end));
        assert!(promo.is_active(start()));
        assert!(promo.is_active(end));
        assert!(!promo.is_active(end + Duration::seconds(1)));
        assert!(!promo.is_active(start() - Duration::seconds(1)));
    }

    #[test]
    fn table_rejects_inverted_window() {
        let promo = Promotion::new(
            "broken",
            ["monthly"],
            dec!(10),
            start(),
            Some(start() - Duration::days(1)),
        );
        let err = PromotionTable::new(vec![promo]).expect_err("window must be rejected");
        assert_eq!(
            err,
            ConfigError::PromotionWindow {
                id: "broken".into()
            }
        );
    }

    #[test]
    fn table_rejects_duplicate_ids_and_bad_discounts() {
        let a = Promotion::new("dup", ["monthly"], dec!(10), start(), None);
        let b = Promotion::new("dup", ["annual"], dec!(15), start(), None);
        assert_eq!(
            PromotionTable::new(vec![a, b]),
            Err(ConfigError::DuplicatePromotion("dup".into()))
        );

        let greedy = Promotion::new("greedy", ["monthly"], dec!(120), start(), None);
        assert!(matches!(
            PromotionTable::new(vec![greedy]),
            Err(ConfigError::DiscountOutOfRange { .. })
        ));
    }

    #[test]
    fn deserializing_a_table_validates_it() {
        let json = r#"[{
            "id": "late",
            "products": ["monthly"],
            "discount_percent": 10,
            "starts_at": "2024-06-10T00:00:00Z",
            "ends_at": "2024-06-01T00:00:00Z"
        }]"#;
        let err = serde_json::from_str::<PromotionTable>(json).expect_err("invalid window");
        assert!(err.to_string().contains("ends before it starts"));
    }
}
