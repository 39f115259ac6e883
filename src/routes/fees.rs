use actix_web::{web, HttpResponse, Responder};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::fees::{
    BreakdownDisplay, CancellationBreakdown, FeeBreakdown, TransactionKind,
};
use crate::models::membership::{MembershipContext, MembershipTier};
use crate::models::money::{format_currency, normalize_raw, RawAmount};
use crate::routes::{bad_request, resolve_tier};
use crate::services::fee_service::FeeCalculator;

#[derive(Debug, Default, Deserialize)]
pub struct TransactionFeeInput {
    #[serde(default)]
    base_amount: Option<RawAmount>,
    #[serde(default)]
    membership_tier: Option<String>,
    /// Defaults to "not authenticated", i.e. the visitor tier.
    #[serde(default)]
    is_visitor: Option<bool>,
    #[serde(default)]
    transaction_kind: TransactionKind,
}

#[derive(Serialize)]
struct TransactionFeeResponse {
    membership_tier: MembershipTier,
    membership_label: &'static str,
    is_visitor: bool,
    transaction_kind: TransactionKind,
    #[serde(flatten)]
    breakdown: FeeBreakdown,
    effective_rate_percent: Decimal,
    display: BreakdownDisplay,
}

#[derive(Debug, Default, Deserialize)]
pub struct CancellationInput {
    #[serde(default)]
    original_amount: Option<RawAmount>,
}

#[derive(Serialize)]
struct CancellationDisplay {
    original_amount: String,
    cancellation_fee: String,
    refund_amount: String,
}

#[derive(Serialize)]
struct CancellationResponse {
    #[serde(flatten)]
    breakdown: CancellationBreakdown,
    display: CancellationDisplay,
}

pub async fn transaction_fees(
    context: MembershipContext,
    calculator: web::Data<FeeCalculator>,
    input: web::Json<TransactionFeeInput>,
) -> impl Responder {
    let input = input.into_inner();

    let context = match resolve_tier(input.membership_tier.as_deref(), context.tier) {
        Ok(tier) if input.membership_tier.is_some() => MembershipContext::member(tier),
        Ok(_) => context,
        Err(e) => {
            warn!("Transaction fee request rejected: {}", e);
            return bad_request(&e);
        }
    };
    let is_visitor = input.is_visitor.unwrap_or_else(|| context.is_visitor());
    let base_amount = normalize_raw(input.base_amount.as_ref());

    let kind = input.transaction_kind;

    let breakdown = calculator.compute_flow_fees(kind, base_amount, context.tier, is_visitor);

    HttpResponse::Ok().json(TransactionFeeResponse {
        membership_tier: context.tier,
        membership_label: if is_visitor {
            MembershipTier::Visitor.display_name()
        } else {
            context.tier.display_name()
        },
        is_visitor,
        transaction_kind: kind,
        effective_rate_percent: breakdown.effective_rate_percent(),
        display: breakdown.display(),
        breakdown,
    })
}

pub async fn cancellation_fee(
    calculator: web::Data<FeeCalculator>,
    input: web::Json<CancellationInput>,
) -> impl Responder {
    let original_amount = normalize_raw(input.original_amount.as_ref());
    let breakdown = calculator.compute_cancellation_fee(original_amount);

    HttpResponse::Ok().json(CancellationResponse {
        display: CancellationDisplay {
            original_amount: format_currency(breakdown.original_amount),
            cancellation_fee: format_currency(breakdown.cancellation_fee),
            refund_amount: format_currency(breakdown.refund_amount),
        },
        breakdown,
    })
}
