use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;

use crate::models::bookings::BookingUsage;
use crate::models::fees::{GateDecision, ReasonCode};
use crate::models::membership::MembershipTier;
use crate::models::money::format_currency;
use crate::services::fee_service::FeeCalculator;

pub struct BookingService;

impl BookingService {
    /// Gate decision for booking one more load on `today`, after rolling
    /// the daily counter over if the last booking was on an earlier day.
    pub fn check_booking(
        calculator: &FeeCalculator,
        tier: MembershipTier,
        usage: &BookingUsage,
        today: NaiveDate,
        load_value: Decimal,
    ) -> GateDecision {
        calculator.compute_membership_gate_decision(tier, usage.loads_on(today), load_value)
    }

    /// Usage after booking the load, or the reason it was refused.
    pub fn book_load(
        calculator: &FeeCalculator,
        tier: MembershipTier,
        usage: &BookingUsage,
        today: NaiveDate,
        load_value: Decimal,
    ) -> Result<BookingUsage, ReasonCode> {
        let decision = Self::check_booking(calculator, tier, usage, today, load_value);
        match decision.reason {
            Some(reason) => Err(reason),
            None => {
                let next = usage.record_booking(today);
                info!(
                    "Load booked for {} member: {} loads on {}",
                    tier, next.loads_booked, today
                );
                Ok(next)
            }
        }
    }

    /// Inline message shown next to a disabled "Book" button.
    pub fn denial_message(calculator: &FeeCalculator, reason: ReasonCode) -> String {
        let schedule = calculator.schedule();
        match reason {
            ReasonCode::DailyLimitReached => format!(
                "Free tier allows {} loads per day. Upgrade for unlimited booking.",
                schedule.free_daily_load_limit
            ),
            ReasonCode::ValueCapExceeded => format!(
                "Free tier limited to {} loads. Upgrade for higher value loads.",
                format_currency(schedule.free_load_value_cap)
            ),
        }
    }
}
