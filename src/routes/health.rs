use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::env;

use crate::config::FeeSchedule;
use crate::services::fee_service::FeeCalculator;

#[derive(Serialize)]
struct HealthStatus<'a> {
    status: &'static str,
    environment: String,
    version: &'static str,
    fee_schedule: &'a FeeSchedule,
}

pub async fn health_check(calculator: web::Data<FeeCalculator>) -> impl Responder {
    let health = HealthStatus {
        status: "ok",
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION"),
        fee_schedule: calculator.schedule(),
    };

    HttpResponse::Ok().json(health)
}
