use actix_web::{web, HttpResponse, Responder};
use log::info;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::DEFAULT_AVERAGE_JOB_VALUE;
use crate::models::money::normalize_f64;
use crate::routes::bad_request;
use crate::services::fee_service::FeeCalculator;

#[derive(Debug, Deserialize)]
pub struct FeeSummaryQuery {
    total_jobs: u64,
    successful_jobs: u64,
    avg_job_value: Option<f64>,
}

pub async fn fee_summary(
    calculator: web::Data<FeeCalculator>,
    query: web::Query<FeeSummaryQuery>,
) -> impl Responder {
    let average_job_value = query
        .avg_job_value
        .map(normalize_f64)
        .unwrap_or_else(|| Decimal::from(DEFAULT_AVERAGE_JOB_VALUE));

    match calculator.fee_collection_summary(
        query.total_jobs,
        query.successful_jobs,
        average_job_value,
    ) {
        Ok(summary) => {
            info!(
                "Fee summary for {} jobs: {} collected",
                summary.total_jobs, summary.total_fees_collected
            );
            HttpResponse::Ok().json(summary)
        }
        Err(e) => bad_request(&e),
    }
}
