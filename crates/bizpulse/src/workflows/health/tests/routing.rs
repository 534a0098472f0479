use super::common::*;

use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::workflows::health::router::assessment_handler;
use crate::workflows::health::tools::StaticCatalog;
use crate::workflows::health::{health_router, AssessmentRequest, FactRecord};

fn post_json(body: serde_json::Value) -> Request<axum::body::Body> {
    Request::post("/api/v1/health/assessment")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&body).expect("encode body"),
        ))
        .expect("build request")
}

#[tokio::test]
async fn assessment_route_returns_score_plan_and_tools() {
    let router = health_router(build_service());

    let response = router
        .oneshot(post_json(json!({
            "facts": {
                "monthly_revenue": 800,
                "gross_margin_pct": 35,
                "monthly_churn_pct": 12,
                "conversion_rate_pct": 0.8,
                "weekly_ops_hours": 45
            },
            "include_reasoning": true
        })))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["score"]["composite_score"], 33);
    assert_eq!(body["action_plan"]["primary_pillar"], "retention");
    assert_eq!(body["tools"][0]["id"], "relate");
    assert_eq!(body["tools"][0]["pick"], "best_for_you");
    assert!(body["reasoning"]["composite"].is_string());
}

#[tokio::test]
async fn assessment_route_accepts_an_empty_fact_record() {
    let router = health_router(build_service());

    let response = router
        .oneshot(post_json(json!({ "facts": {}, "business_type": "local" })))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["score"]["business_type"], "local");
    assert_eq!(
        body["score"]["missing_data"]
            .as_array()
            .map(Vec::len),
        Some(13)
    );
}

#[tokio::test]
async fn assessment_route_rejects_out_of_range_percentages() {
    let router = health_router(build_service());

    let response = router
        .oneshot(post_json(json!({ "facts": { "gross_margin_pct": 180 } })))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(
        body["error"],
        "gross_margin_pct must be between 0 and 100 (got 180)"
    );
}

#[tokio::test]
async fn assessment_handler_maps_negative_facts_to_unprocessable() {
    let response = assessment_handler::<StaticCatalog, SilentNarrative>(
        State(build_service()),
        axum::Json(AssessmentRequest {
            facts: FactRecord {
                weekly_support_tickets: Some(-3.0),
                ..FactRecord::default()
            },
            ..AssessmentRequest::default()
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn schedule_is_returned_when_a_start_date_is_supplied() {
    let router = health_router(build_service());

    let response = router
        .oneshot(post_json(json!({
            "facts": { "monthly_churn_pct": 8 },
            "start_date": "2025-01-06"
        })))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["schedule"][0]["due_on"], "2025-01-06");
}
