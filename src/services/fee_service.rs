//! Fee calculator.
//!
//! Pure functions of (amount, membership, schedule). Every rate is read
//! from the [`FeeSchedule`] the calculator was built with.

use log::debug;
use rust_decimal::Decimal;

use crate::config::FeeSchedule;
use crate::error::{FeeError, Result};
use crate::models::fees::{
    CancellationBreakdown, FeeBreakdown, FeeCollectionSummary, FeeKind, FeeLineItem,
    GateDecision, ReasonCode, TransactionKind,
};
use crate::models::membership::{MembershipContext, MembershipTier};
use crate::models::money::{normalize_amount, normalize_f64, round_cents};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeCalculator {
    schedule: FeeSchedule,
}

impl FeeCalculator {
    pub fn new(schedule: FeeSchedule) -> Result<Self> {
        schedule.validate()?;
        Ok(FeeCalculator { schedule })
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Enterprise members get the discounted processing rate.
    pub fn payment_processing_rate(&self, tier: MembershipTier) -> Decimal {
        match tier {
            MembershipTier::Enterprise => self.schedule.enterprise_payment_processing_rate,
            _ => self.schedule.payment_processing_rate,
        }
    }

    /// Visitor administrative rate for a booking flow.
    pub fn administrative_rate(&self, kind: TransactionKind) -> Decimal {
        match kind {
            TransactionKind::LoadBooking => self.schedule.administrative_rate,
            TransactionKind::VisitorCheckout => self.schedule.checkout_administrative_rate,
        }
    }

    /// Fees for a load booking. Line items, in order: AI generation,
    /// payment processing, and for visitors the administrative and visitor
    /// booking fees.
    pub fn compute_transaction_fees(
        &self,
        base_amount: Decimal,
        tier: MembershipTier,
        is_visitor: bool,
    ) -> FeeBreakdown {
        self.compute_flow_fees(TransactionKind::LoadBooking, base_amount, tier, is_visitor)
    }

    /// Same line items as [`compute_transaction_fees`](Self::compute_transaction_fees),
    /// with the administrative rate of the given flow.
    pub fn compute_flow_fees(
        &self,
        kind: TransactionKind,
        base_amount: Decimal,
        tier: MembershipTier,
        is_visitor: bool,
    ) -> FeeBreakdown {
        let base = normalize_amount(base_amount);

        let mut items = vec![
            FeeLineItem::charge(FeeKind::AiGeneration, self.schedule.ai_generation_rate, base),
            FeeLineItem::charge(
                FeeKind::PaymentProcessing,
                self.payment_processing_rate(tier),
                base,
            ),
        ];
        if is_visitor {
            items.push(FeeLineItem::charge(
                FeeKind::Administrative,
                self.administrative_rate(kind),
                base,
            ));
            items.push(FeeLineItem::charge(
                FeeKind::VisitorBooking,
                self.schedule.visitor_booking_rate,
                base,
            ));
        }

        let breakdown = FeeBreakdown::from_items(base, items);
        debug!(
            "{:?} fees for {} on {} (visitor: {}): {} fees, {} total",
            kind, tier, base, is_visitor, breakdown.total_fees, breakdown.grand_total
        );
        breakdown
    }

    /// Same as [`compute_transaction_fees`](Self::compute_transaction_fees)
    /// for a raw float; NaN and negatives count as 0.
    pub fn compute_transaction_fees_raw(
        &self,
        base_amount: f64,
        tier: MembershipTier,
        is_visitor: bool,
    ) -> FeeBreakdown {
        self.compute_transaction_fees(normalize_f64(base_amount), tier, is_visitor)
    }

    /// For callers holding the tier as a string. An unknown tier is an error.
    pub fn compute_transaction_fees_for(
        &self,
        base_amount: f64,
        tier: &str,
        is_visitor: bool,
    ) -> Result<FeeBreakdown> {
        let tier: MembershipTier = tier.parse()?;
        Ok(self.compute_transaction_fees_raw(base_amount, tier, is_visitor))
    }

    pub fn quote(&self, context: &MembershipContext, base_amount: Decimal) -> FeeBreakdown {
        self.compute_transaction_fees(base_amount, context.tier, context.is_visitor())
    }

    pub fn compute_cancellation_fee(&self, original_amount: Decimal) -> CancellationBreakdown {
        let original = normalize_amount(original_amount);
        let rate = self.schedule.cancellation_rate;
        let cancellation_fee = round_cents(original * rate);

        CancellationBreakdown {
            label: FeeKind::Cancellation.label(),
            original_amount: original,
            rate,
            cancellation_fee,
            refund_amount: original - cancellation_fee,
        }
    }

    /// Free members are capped per day and per load; everyone else books
    /// freely. The daily limit is checked first.
    pub fn compute_membership_gate_decision(
        &self,
        tier: MembershipTier,
        daily_loads_booked: u32,
        load_value: Decimal,
    ) -> GateDecision {
        if !tier.has_booking_limits() {
            return GateDecision::allow();
        }

        if daily_loads_booked >= self.schedule.free_daily_load_limit {
            debug!(
                "Booking denied: {} loads booked today, limit {}",
                daily_loads_booked, self.schedule.free_daily_load_limit
            );
            return GateDecision::deny(ReasonCode::DailyLimitReached);
        }
        if load_value > self.schedule.free_load_value_cap {
            debug!(
                "Booking denied: load value {} above cap {}",
                load_value, self.schedule.free_load_value_cap
            );
            return GateDecision::deny(ReasonCode::ValueCapExceeded);
        }

        GateDecision::allow()
    }

    /// Projected fee revenue for `successful_jobs` completed jobs out of
    /// `total_jobs`, each worth `average_job_value`. Jobs that did not
    /// complete are assumed cancelled.
    pub fn fee_collection_summary(
        &self,
        total_jobs: u64,
        successful_jobs: u64,
        average_job_value: Decimal,
    ) -> Result<FeeCollectionSummary> {
        if successful_jobs > total_jobs {
            return Err(FeeError::InvalidJobCounts {
                total: total_jobs,
                successful: successful_jobs,
            });
        }

        let average = normalize_amount(average_job_value);
        let overflow = || FeeError::AmountOverflow { jobs: total_jobs };
        let revenue = average
            .checked_mul(Decimal::from(successful_jobs))
            .ok_or_else(overflow)?;
        let cancelled_value = average
            .checked_mul(Decimal::from(total_jobs - successful_jobs))
            .ok_or_else(overflow)?;

        let fee_lines = [
            (FeeKind::AiGeneration, self.schedule.ai_generation_rate, revenue),
            (FeeKind::LiveAiBooking, self.schedule.live_ai_booking_rate, revenue),
            (FeeKind::Administrative, self.schedule.administrative_rate, revenue),
            (FeeKind::Cancellation, self.schedule.cancellation_rate, cancelled_value),
        ]
        .into_iter()
        .map(|(kind, rate, amount)| FeeLineItem::checked_charge(kind, rate, amount))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(overflow)?;

        let total_fees_collected = fee_lines
            .iter()
            .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.amount))
            .ok_or_else(overflow)?;

        let success_rate_percent = if total_jobs == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(successful_jobs) / Decimal::from(total_jobs) * Decimal::ONE_HUNDRED)
                .round_dp(1)
        };

        Ok(FeeCollectionSummary {
            total_jobs,
            successful_jobs,
            average_job_value: average,
            revenue,
            ai_generation_fees: fee_lines[0].amount,
            live_ai_booking_fees: fee_lines[1].amount,
            administrative_fees: fee_lines[2].amount,
            estimated_cancellation_fees: fee_lines[3].amount,
            total_fees_collected,
            success_rate_percent,
            fee_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dollars(amount: i64) -> Decimal {
        Decimal::from(amount)
    }

    fn calculator() -> FeeCalculator {
        FeeCalculator::default()
    }

    #[test]
    fn test_free_member_fees() {
        let breakdown = calculator().compute_transaction_fees(dollars(1000), MembershipTier::Free, false);

        assert_eq!(breakdown.amount_for(FeeKind::AiGeneration), dollars(30));
        assert_eq!(breakdown.amount_for(FeeKind::PaymentProcessing), dollars(30));
        assert_eq!(breakdown.amount_for(FeeKind::Administrative), Decimal::ZERO);
        assert!(breakdown.line_item(FeeKind::Administrative).is_none());
        assert_eq!(breakdown.total_fees, dollars(60));
        assert_eq!(breakdown.grand_total, dollars(1060));
    }

    #[test]
    fn test_enterprise_pays_less_processing() {
        let calc = calculator();
        let free = calc.compute_transaction_fees(dollars(1000), MembershipTier::Free, false);
        let enterprise =
            calc.compute_transaction_fees(dollars(1000), MembershipTier::Enterprise, false);

        assert_eq!(enterprise.amount_for(FeeKind::PaymentProcessing), dollars(25));
        assert_eq!(free.grand_total - enterprise.grand_total, dollars(5));
    }

    #[test]
    fn test_pro_and_admin_use_standard_processing_rate() {
        let calc = calculator();
        for tier in [MembershipTier::Pro, MembershipTier::Admin, MembershipTier::Visitor] {
            assert_eq!(calc.payment_processing_rate(tier), Decimal::new(3, 2));
        }
    }

    #[test]
    fn test_visitor_surcharges_stack() {
        let breakdown =
            calculator().compute_transaction_fees(dollars(1000), MembershipTier::Visitor, true);

        let kinds: Vec<FeeKind> = breakdown.line_items.iter().map(|item| item.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FeeKind::AiGeneration,
                FeeKind::PaymentProcessing,
                FeeKind::Administrative,
                FeeKind::VisitorBooking,
            ]
        );
        assert_eq!(breakdown.amount_for(FeeKind::Administrative), dollars(50));
        assert_eq!(breakdown.amount_for(FeeKind::VisitorBooking), dollars(100));
        assert_eq!(breakdown.total_fees, dollars(210));
        assert_eq!(breakdown.grand_total, dollars(1210));
    }

    #[test]
    fn test_zero_and_invalid_bases() {
        let calc = calculator();
        for raw in [0.0, f64::NAN, -50.0, f64::NEG_INFINITY] {
            let breakdown = calc.compute_transaction_fees_raw(raw, MembershipTier::Free, true);
            assert!(breakdown.line_items.iter().all(|item| item.amount.is_zero()));
            assert_eq!(breakdown.grand_total, Decimal::ZERO);
        }

        let negative = calc.compute_transaction_fees(dollars(-10), MembershipTier::Pro, false);
        assert_eq!(negative.base_amount, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_tier_string_is_an_error() {
        let calc = calculator();
        assert_eq!(
            calc.compute_transaction_fees_for(100.0, "premium", false),
            Err(FeeError::UnknownTier("premium".to_string()))
        );
        let breakdown = calc
            .compute_transaction_fees_for(100.0, "basic", false)
            .unwrap();
        assert_eq!(breakdown.grand_total, dollars(106));
    }

    #[test]
    fn test_quote_uses_context() {
        let calc = calculator();
        let visitor = calc.quote(&MembershipContext::visitor(), dollars(100));
        let member = calc.quote(&MembershipContext::member(MembershipTier::Free), dollars(100));

        assert_eq!(visitor.line_items.len(), 4);
        assert_eq!(member.line_items.len(), 2);
    }

    #[test]
    fn test_checkout_flow_uses_its_administrative_rate() {
        let calc = calculator();
        let checkout = calc.compute_flow_fees(
            TransactionKind::VisitorCheckout,
            dollars(1000),
            MembershipTier::Visitor,
            true,
        );
        let booking = calc.compute_flow_fees(
            TransactionKind::LoadBooking,
            dollars(1000),
            MembershipTier::Visitor,
            true,
        );

        assert_eq!(checkout.amount_for(FeeKind::Administrative), dollars(30));
        assert_eq!(checkout.amount_for(FeeKind::VisitorBooking), dollars(100));
        assert_eq!(checkout.grand_total, dollars(1190));
        assert_eq!(booking, calc.compute_transaction_fees(dollars(1000), MembershipTier::Visitor, true));
        assert_eq!(booking.amount_for(FeeKind::Administrative), dollars(50));
    }

    #[test]
    fn test_members_pay_no_administrative_fee_in_any_flow() {
        let calc = calculator();
        for kind in [TransactionKind::LoadBooking, TransactionKind::VisitorCheckout] {
            let breakdown = calc.compute_flow_fees(kind, dollars(1000), MembershipTier::Pro, false);
            assert!(breakdown.line_item(FeeKind::Administrative).is_none());
            assert_eq!(breakdown.grand_total, dollars(1060));
        }
    }

    #[test]
    fn test_cancellation_fee() {
        let cancellation = calculator().compute_cancellation_fee(dollars(500));
        assert_eq!(cancellation.label, "Cancellation Fee");
        assert_eq!(cancellation.cancellation_fee, dollars(25));
        assert_eq!(cancellation.refund_amount, dollars(475));

        // Plan price with cents
        let cancellation = calculator().compute_cancellation_fee(Decimal::new(14999, 2));
        assert_eq!(cancellation.cancellation_fee, Decimal::new(750, 2));
        assert_eq!(cancellation.refund_amount, Decimal::new(14249, 2));
    }

    #[test]
    fn test_gate_daily_limit() {
        let decision =
            calculator().compute_membership_gate_decision(MembershipTier::Free, 3, dollars(200));
        assert_eq!(decision, GateDecision::deny(ReasonCode::DailyLimitReached));
    }

    #[test]
    fn test_gate_value_cap() {
        let calc = calculator();
        let decision = calc.compute_membership_gate_decision(MembershipTier::Free, 1, dollars(1500));
        assert_eq!(decision, GateDecision::deny(ReasonCode::ValueCapExceeded));

        // The cap itself is allowed
        let decision = calc.compute_membership_gate_decision(MembershipTier::Free, 1, dollars(1000));
        assert!(decision.allowed);
    }

    #[test]
    fn test_gate_daily_limit_checked_first() {
        let decision =
            calculator().compute_membership_gate_decision(MembershipTier::Free, 5, dollars(5000));
        assert_eq!(decision.reason, Some(ReasonCode::DailyLimitReached));
    }

    #[test]
    fn test_gate_unlimited_tiers() {
        let calc = calculator();
        for tier in [
            MembershipTier::Pro,
            MembershipTier::Enterprise,
            MembershipTier::Admin,
            MembershipTier::Visitor,
        ] {
            assert!(calc
                .compute_membership_gate_decision(tier, 50, dollars(25_000))
                .allowed);
        }
    }

    #[test]
    fn test_gate_follows_schedule_limits() {
        let calc = FeeCalculator::new(FeeSchedule {
            free_daily_load_limit: 2,
            free_load_value_cap: dollars(500),
            ..FeeSchedule::default()
        })
        .unwrap();

        assert_eq!(
            calc.compute_membership_gate_decision(MembershipTier::Free, 2, dollars(100))
                .reason,
            Some(ReasonCode::DailyLimitReached)
        );
        assert_eq!(
            calc.compute_membership_gate_decision(MembershipTier::Free, 0, dollars(750))
                .reason,
            Some(ReasonCode::ValueCapExceeded)
        );
    }

    #[test]
    fn test_new_rejects_invalid_schedule() {
        let result = FeeCalculator::new(FeeSchedule {
            ai_generation_rate: Decimal::new(-1, 2),
            ..FeeSchedule::default()
        });
        assert!(matches!(result, Err(FeeError::InvalidRate { .. })));
    }

    #[test]
    fn test_fee_collection_summary() {
        let summary = calculator()
            .fee_collection_summary(100, 80, dollars(1750))
            .unwrap();

        assert_eq!(summary.revenue, dollars(140_000));
        assert_eq!(summary.ai_generation_fees, dollars(4_200));
        assert_eq!(summary.live_ai_booking_fees, dollars(5_600));
        assert_eq!(summary.administrative_fees, dollars(7_000));
        // 20 cancelled * 1750 * 5%
        assert_eq!(summary.estimated_cancellation_fees, dollars(1_750));
        assert_eq!(summary.total_fees_collected, dollars(18_550));
        assert_eq!(summary.success_rate_percent, dollars(80));

        let labels: Vec<&str> = summary.fee_lines.iter().map(|line| line.label).collect();
        assert_eq!(
            labels,
            vec![
                "AI Generation Fee",
                "Live AI Auto-Booking Fee",
                "Administrative Fee",
                "Cancellation Fee",
            ]
        );
    }

    #[test]
    fn test_fee_collection_summary_edge_cases() {
        let calc = calculator();
        let empty = calc.fee_collection_summary(0, 0, dollars(1750)).unwrap();
        assert_eq!(empty.total_fees_collected, Decimal::ZERO);
        assert_eq!(empty.success_rate_percent, Decimal::ZERO);

        assert_eq!(
            calc.fee_collection_summary(3, 4, dollars(1750)),
            Err(FeeError::InvalidJobCounts {
                total: 3,
                successful: 4
            })
        );
    }

    #[test]
    fn test_fee_collection_summary_overflow() {
        let result =
            calculator().fee_collection_summary(u64::MAX, u64::MAX, Decimal::from(1_000_000_000_000_i64));
        assert_eq!(result, Err(FeeError::AmountOverflow { jobs: u64::MAX }));
    }

    fn full_rate_calculator() -> FeeCalculator {
        FeeCalculator::new(FeeSchedule {
            ai_generation_rate: Decimal::ONE,
            payment_processing_rate: Decimal::ONE,
            enterprise_payment_processing_rate: Decimal::ONE,
            administrative_rate: Decimal::ONE,
            checkout_administrative_rate: Decimal::ONE,
            visitor_booking_rate: Decimal::ONE,
            cancellation_rate: Decimal::ONE,
            live_ai_booking_rate: Decimal::ONE,
            ..FeeSchedule::default()
        })
        .unwrap()
    }

    #[test]
    fn test_fee_collection_summary_total_overflow_is_an_error() {
        let jobs = 70_000_000_000_000_000;
        let result = full_rate_calculator().fee_collection_summary(
            jobs,
            jobs,
            Decimal::from(1_000_000_000_000_i64),
        );
        assert_eq!(result, Err(FeeError::AmountOverflow { jobs }));
    }

    #[test]
    fn test_fee_collection_summary_with_full_rates() {
        let summary = full_rate_calculator()
            .fee_collection_summary(100, 80, dollars(1750))
            .unwrap();

        assert_eq!(summary.ai_generation_fees, dollars(140_000));
        assert_eq!(summary.estimated_cancellation_fees, dollars(35_000));
        assert_eq!(summary.total_fees_collected, dollars(455_000));
    }
}
