use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::FeeError;
use crate::middleware::tier_auth::RequireTier;
use crate::models::membership::MembershipTier;

pub mod admin;
pub mod bookings;
pub mod fees;
pub mod health;
pub mod plans;

/// Registers every route. The app must carry `web::Data<FeeCalculator>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/fees")
                        .route("/transaction", web::post().to(fees::transaction_fees))
                        .route("/cancellation", web::post().to(fees::cancellation_fee)),
                )
                .route("/bookings/gate", web::post().to(bookings::booking_gate))
                .route("/plans", web::get().to(plans::get_plans))
                // Admin routes
                .service(
                    web::scope("/admin")
                        .wrap(RequireTier::new(MembershipTier::Admin))
                        .route("/fee-summary", web::get().to(admin::fee_summary)),
                ),
        );
}

pub(crate) fn bad_request(error: &FeeError) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": error.to_string() }))
}

/// Tier named in the body wins over the one in the request header.
pub(crate) fn resolve_tier(
    body_tier: Option<&str>,
    header_tier: MembershipTier,
) -> Result<MembershipTier, FeeError> {
    match body_tier {
        Some(raw) => raw.parse(),
        None => Ok(header_tier),
    }
}
