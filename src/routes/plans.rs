use actix_web::{web, HttpResponse, Responder};

use crate::services::fee_service::FeeCalculator;
use crate::services::pricing_service::PricingService;

pub async fn get_plans(calculator: web::Data<FeeCalculator>) -> impl Responder {
    HttpResponse::Ok().json(PricingService::plan_catalog(&calculator))
}
