use super::common::*;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::workflows::health::narrative::enrich;
use crate::workflows::health::tools::{StaticCatalog, ToolCatalog};
use crate::workflows::health::{
    AssessmentError, AssessmentRequest, BusinessType, FactField, FactRecord,
    FactValidationError, HealthCheckService, NarrativeBrief, Pillar,
};

fn request(facts: FactRecord) -> AssessmentRequest {
    AssessmentRequest {
        facts,
        ..AssessmentRequest::default()
    }
}

#[test]
fn assessment_combines_score_plan_and_tools() {
    let service = build_service();
    let response = service
        .assess(request(struggling_facts()))
        .expect("assessment succeeds");

    assert_eq!(response.score.composite_score, 33);
    assert_eq!(response.action_plan.primary_pillar, Pillar::Retention);
    assert_eq!(response.tools.as_ref().map(Vec::len), Some(6));
    assert!(response.reasoning.is_none());
    assert!(response.schedule.is_none());
    assert!(response.narrative.is_none());
}

#[test]
fn reasoning_and_schedule_are_opt_in() {
    let service = build_service();
    let response = service
        .assess(AssessmentRequest {
            facts: struggling_facts(),
            business_type: Some(BusinessType::Subscription),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 2),
            include_reasoning: true,
        })
        .expect("assessment succeeds");

    assert_eq!(response.score.business_type, BusinessType::Subscription);
    let reasoning = response.reasoning.expect("reasoning requested");
    assert_eq!(reasoning.tasks.len(), response.action_plan.tasks.len());

    let schedule = response.schedule.expect("schedule requested");
    assert_eq!(schedule.len(), response.action_plan.tasks.len());
    assert_eq!(
        schedule[0].due_on,
        NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
    );
    assert_eq!(
        schedule.last().expect("scheduled task").due_on,
        NaiveDate::from_ymd_opt(2025, 6, 8).expect("valid date")
    );
}

#[test]
fn invalid_facts_are_rejected_before_scoring() {
    let service = build_service();
    let error = service
        .assess(request(FactRecord {
            monthly_churn_pct: Some(140.0),
            ..FactRecord::default()
        }))
        .expect_err("churn above 100 is rejected");

    match error {
        AssessmentError::Validation(FactValidationError::PercentOutOfRange { field, .. }) => {
            assert_eq!(field, FactField::MonthlyChurnPct);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unavailable_catalog_omits_tools() {
    let service = HealthCheckService::new(Arc::new(UnavailableCatalog), Arc::new(SilentNarrative));
    let response = service
        .assess(request(struggling_facts()))
        .expect("assessment still succeeds");

    assert!(response.tools.is_none());
    assert!(!response.action_plan.tasks.is_empty());
}

#[test]
fn empty_catalog_omits_tools() {
    let service = HealthCheckService::new(
        Arc::new(StaticCatalog::new(ToolCatalog::default())),
        Arc::new(SilentNarrative),
    );
    let response = service
        .assess(request(FactRecord::default()))
        .expect("assessment succeeds");

    assert!(response.tools.is_none());
    assert_eq!(response.score.composite_score, 35);
}

#[test]
fn narrative_is_attached_when_the_generator_succeeds() {
    let narrator = Arc::new(RecordingNarrative::default());
    let service = HealthCheckService::new(
        Arc::new(StaticCatalog::new(sample_catalog())),
        Arc::clone(&narrator),
    );
    let response = service
        .assess(request(thriving_facts()))
        .expect("assessment succeeds");

    assert_eq!(
        response.narrative.as_deref(),
        Some("Your business scores 81 overall.")
    );
    let briefs = narrator.briefs.lock().expect("lock briefs");
    assert_eq!(briefs.len(), 1);
    assert_eq!(briefs[0].composite_score, 81);
    assert_eq!(briefs[0].weakest_pillar, Pillar::Operations);
    assert_eq!(briefs[0].strongest_pillar, Pillar::Revenue);
}

#[test]
fn narrative_failures_degrade_to_no_narrative() {
    let service = HealthCheckService::new(
        Arc::new(StaticCatalog::new(sample_catalog())),
        Arc::new(FailingNarrative),
    );
    let response = service
        .assess(request(thriving_facts()))
        .expect("assessment succeeds");
    assert!(response.narrative.is_none());

    let score = service
        .score(&thriving_facts(), None)
        .expect("valid facts");
    let plan = crate::workflows::health::build_action_plan(
        &score,
        &thriving_facts(),
        &crate::workflows::health::ActionCatalog::standard(),
    );
    let brief = NarrativeBrief::from_assessment(&score, &plan);
    assert_eq!(enrich(&FailingNarrative, &brief), None);
    assert_eq!(enrich(&SilentNarrative, &brief), None);
}

#[test]
fn assessment_serializes_with_snake_case_fields() {
    let service = build_service();
    let response = service
        .assess(request(facts_without_unit_economics()))
        .expect("assessment succeeds");
    let json = serde_json::to_value(&response).expect("serialize");

    assert_eq!(json["score"]["business_type"], "service");
    assert_eq!(
        json["score"]["missing_data"],
        serde_json::json!(["cac", "ltv"])
    );
    assert!(json["score"]["pillars"]["profitability"]["score"].is_u64());
    assert!(json.get("reasoning").is_none());
    assert!(json["action_plan"]["tasks"][0]["due_in_days"].is_u64());
}
