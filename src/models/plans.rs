use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::membership::MembershipTier;

/// A subscription plan as shown on the pricing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipPlan {
    pub tier: MembershipTier,
    pub name: &'static str,
    pub monthly_price: Decimal,
    /// None = unlimited
    pub daily_load_limit: Option<u32>,
    /// None = no cap
    pub load_value_cap: Option<Decimal>,
    pub ai_generation_rate: Decimal,
    pub payment_processing_rate: Decimal,
    /// What cancelling one month of this plan costs.
    pub cancellation_fee: Decimal,
    pub features: Vec<&'static str>,
}
