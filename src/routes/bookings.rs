use actix_web::{web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::bookings::BookingUsage;
use crate::models::fees::ReasonCode;
use crate::models::membership::{MembershipContext, MembershipTier};
use crate::models::money::{limit_value, RawAmount};
use crate::routes::{bad_request, resolve_tier};
use crate::services::booking_service::BookingService;
use crate::services::fee_service::FeeCalculator;

#[derive(Debug, Default, Deserialize)]
pub struct BookingGateInput {
    #[serde(default)]
    membership_tier: Option<String>,
    #[serde(default)]
    daily_loads_booked: Option<i64>,
    #[serde(default)]
    last_booked_on: Option<NaiveDate>,
    #[serde(default)]
    load_value: Option<RawAmount>,
}

#[derive(Serialize)]
struct BookingGateResponse {
    membership_tier: MembershipTier,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<ReasonCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    loads_booked_today: u32,
    /// What the caller should store if it goes ahead with the booking.
    #[serde(skip_serializing_if = "Option::is_none")]
    next_usage: Option<BookingUsage>,
}

pub async fn booking_gate(
    context: MembershipContext,
    calculator: web::Data<FeeCalculator>,
    input: web::Json<BookingGateInput>,
) -> impl Responder {
    let input = input.into_inner();

    let tier = match resolve_tier(input.membership_tier.as_deref(), context.tier) {
        Ok(tier) => tier,
        Err(e) => {
            warn!("Booking gate request rejected: {}", e);
            return bad_request(&e);
        }
    };

    // Negative counts are treated like malformed amounts
    let loads_booked = input
        .daily_loads_booked
        .unwrap_or(0)
        .clamp(0, i64::from(u32::MAX)) as u32;
    let usage = BookingUsage::new(loads_booked, input.last_booked_on);
    let today = Utc::now().date_naive();
    let load_value = limit_value(input.load_value.as_ref());

    let loads_booked_today = usage.loads_on(today);
    let response = match BookingService::book_load(&calculator, tier, &usage, today, load_value) {
        Ok(next_usage) => BookingGateResponse {
            membership_tier: tier,
            allowed: true,
            reason: None,
            title: None,
            message: None,
            loads_booked_today,
            next_usage: Some(next_usage),
        },
        Err(reason) => BookingGateResponse {
            membership_tier: tier,
            allowed: false,
            reason: Some(reason),
            title: Some(reason.title()),
            message: Some(BookingService::denial_message(&calculator, reason)),
            loads_booked_today,
            next_usage: None,
        },
    };

    HttpResponse::Ok().json(response)
}
