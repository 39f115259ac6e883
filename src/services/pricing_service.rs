use rust_decimal::Decimal;

use crate::models::membership::MembershipTier;
use crate::models::plans::MembershipPlan;
use crate::services::fee_service::FeeCalculator;

pub struct PricingService;

impl PricingService {
    /// Monthly subscription price for a tier. Visitors and admins have no plan.
    pub fn monthly_price(tier: MembershipTier) -> Option<Decimal> {
        match tier {
            MembershipTier::Free => Some(Decimal::ZERO),
            MembershipTier::Pro => Some(Decimal::from(149)),
            MembershipTier::Enterprise => Some(Decimal::from(399)),
            MembershipTier::Visitor | MembershipTier::Admin => None,
        }
    }

    /// Plans offered on the pricing page, cheapest first
    pub fn plan_catalog(calculator: &FeeCalculator) -> Vec<MembershipPlan> {
        [
            MembershipTier::Free,
            MembershipTier::Pro,
            MembershipTier::Enterprise,
        ]
        .into_iter()
        .filter_map(|tier| Self::plan_for(calculator, tier))
        .collect()
    }

    pub fn plan_for(calculator: &FeeCalculator, tier: MembershipTier) -> Option<MembershipPlan> {
        let monthly_price = Self::monthly_price(tier)?;
        let schedule = calculator.schedule();
        let limited = tier.has_booking_limits();

        let (name, features) = match tier {
            MembershipTier::Free => (
                "Free",
                vec!["Basic AI load matching", "Email support"],
            ),
            MembershipTier::Pro => (
                "Pro",
                vec![
                    "Unlimited daily loads",
                    "No load value limits",
                    "Route optimization",
                    "Phone & chat support",
                ],
            ),
            _ => (
                "Enterprise",
                vec![
                    "Everything in Pro",
                    "Discounted payment processing",
                    "Dedicated account manager",
                    "Custom integrations",
                ],
            ),
        };

        Some(MembershipPlan {
            tier,
            name,
            monthly_price,
            daily_load_limit: limited.then_some(schedule.free_daily_load_limit),
            load_value_cap: limited.then_some(schedule.free_load_value_cap),
            ai_generation_rate: schedule.ai_generation_rate,
            payment_processing_rate: calculator.payment_processing_rate(tier),
            cancellation_fee: calculator
                .compute_cancellation_fee(monthly_price)
                .cancellation_fee,
            features,
        })
    }
}
