use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::currency::round2;
use crate::domain::plan::{Catalog, PlanTier};
use crate::domain::promotion::{PriceQuote, Promotion};

use super::{ServiceError, ServiceResult};

pub struct PricingService;

impl PricingService {
    /// Active promotions for `product_id` at `now`.
    pub fn eligible<'a>(
        product_id: &'a str,
        promotions: &'a [Promotion],
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = &'a Promotion> + 'a {
        promotions
            .iter()
            .filter(move |promo| promo.applies_to(product_id) && promo.is_active(now))
    }

    /// Picks the largest active discount. Equal discounts go to the lowest id.
    pub fn best_promotion<'a>(
        product_id: &'a str,
        promotions: &'a [Promotion],
        now: DateTime<Utc>,
    ) -> Option<&'a Promotion> {
        Self::eligible(product_id, promotions, now).min_by(|a, b| {
            b.discount_percent
                .cmp(&a.discount_percent)
                .then_with(|| a.id.cmp(&b.id))
        })
    }

    pub fn quote(
        product_id: &str,
        base_price: Decimal,
        promotions: &[Promotion],
        now: DateTime<Utc>,
    ) -> PriceQuote {
        let Some(promotion) = Self::best_promotion(product_id, promotions, now) else {
            return PriceQuote::Standard { base_price };
        };
        let factor = Decimal::ONE - promotion.discount_percent / Decimal::ONE_HUNDRED;
        let display_price = round2(base_price * factor);
        tracing::debug!(
            product = product_id,
            promotion = %promotion.id,
            %display_price,
            "promotion applied"
        );
        PriceQuote::Promotional {
            base_price,
            display_price,
            promotion_id: promotion.id.clone(),
            discount_percent: promotion.discount_percent,
        }
    }

    pub fn quote_plan(plan: &PlanTier, catalog: &Catalog, now: DateTime<Utc>) -> PriceQuote {
        Self::quote(
            &plan.product_id,
            plan.base_price,
            catalog.promotions().as_slice(),
            now,
        )
    }

    /// Quotes a configured plan, or any product when an explicit base price is given.
    pub fn quote_product(
        product_id: &str,
        base_price: Option<Decimal>,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> ServiceResult<PriceQuote> {
        let base_price = match base_price {
            Some(price) => price,
            None => catalog
                .plan(product_id)
                .map(|plan| plan.base_price)
                .ok_or_else(|| ServiceError::UnknownProduct(product_id.to_string()))?,
        };
        if base_price.is_sign_negative() {
            return Err(ServiceError::Invalid(format!(
                "base price {base_price} is negative"
            )));
        }
        Ok(Self::quote(
            product_id,
            base_price,
            catalog.promotions().as_slice(),
            now,
        ))
    }
}
