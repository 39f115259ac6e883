mod common;

use actix_web::test;
use serde_json::Value;

use common::{TestApp, TIER_HEADER};

async fn fee_summary(tier: Option<&str>, query: &str) -> (u16, Value) {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let mut req = test::TestRequest::get().uri(&format!("/api/admin/fee-summary?{}", query));
    if let Some(tier) = tier {
        req = req.insert_header((TIER_HEADER, tier));
    }
    let resp = test::call_service(&app, req.to_request()).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[actix_rt::test]
async fn test_fee_summary_without_tier() {
    let (status, body) = fee_summary(None, "total_jobs=10&successful_jobs=8").await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "No membership context");
}

#[actix_rt::test]
async fn test_fee_summary_for_non_admin() {
    for tier in ["free", "pro", "enterprise", "visitor"] {
        let (status, _) = fee_summary(Some(tier), "total_jobs=10&successful_jobs=8").await;
        assert_eq!(status, 403, "tier {} should be forbidden", tier);
    }
}

#[actix_rt::test]
async fn test_fee_summary_with_unknown_tier() {
    let (status, _) = fee_summary(Some("superuser"), "total_jobs=10&successful_jobs=8").await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_fee_summary_for_admin() {
    let (status, body) = fee_summary(Some("admin"), "total_jobs=100&successful_jobs=80").await;

    assert_eq!(status, 200);
    assert_eq!(body["average_job_value"], 1750.0);
    assert_eq!(body["revenue"], 140000.0);
    assert_eq!(body["ai_generation_fees"], 4200.0);
    assert_eq!(body["live_ai_booking_fees"], 5600.0);
    assert_eq!(body["administrative_fees"], 7000.0);
    assert_eq!(body["estimated_cancellation_fees"], 1750.0);
    assert_eq!(body["total_fees_collected"], 18550.0);
    assert_eq!(body["success_rate_percent"], 80.0);
    assert_eq!(body["fee_lines"][1]["label"], "Live AI Auto-Booking Fee");
    assert_eq!(body["fee_lines"][3]["kind"], "cancellation");
}

#[actix_rt::test]
async fn test_fee_summary_custom_average() {
    let (status, body) = fee_summary(
        Some("admin"),
        "total_jobs=4&successful_jobs=4&avg_job_value=1000",
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["revenue"], 4000.0);
    assert_eq!(body["estimated_cancellation_fees"], 0.0);
}

#[actix_rt::test]
async fn test_fee_summary_rejects_impossible_counts() {
    let (status, body) = fee_summary(Some("admin"), "total_jobs=5&successful_jobs=6").await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("cannot exceed"));
}

#[actix_rt::test]
async fn test_fee_summary_missing_query() {
    let (status, _) = fee_summary(Some("admin"), "").await;
    assert!(status == 400);
}
