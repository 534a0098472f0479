use std::sync::Arc;

use bizpulse::workflows::health::{
    AssessmentRequest, AssessmentResponse, BusinessType, FactField, FactRecord,
    HealthCheckService, NarrativeBrief, NarrativeError, NarrativeGenerator, PickLabel, Pillar,
    StaticCatalog, ToolCatalog,
};
use chrono::NaiveDate;

const CATALOG_CSV: &str = "\
id,name,category,free_tier,rating,price,commission_rate,url
ledgerly,Ledgerly,accounting,true,4.4,$0,15%,https://ledgerly.example
invoicely,Invoicely,invoicing,false,4.6,$19/mo,30% recurring,https://invoicely.example
mailpost,Mailpost,email_marketing,true,4.5,$0,20%,https://mailpost.example
keepr,Keepr,customer_success,false,4.2,$49/mo,35%,https://keepr.example
relate,Relate,crm,true,4.7,$12/mo,25%,https://relate.example
shopfront,Shopfront,ecommerce,true,4.3,$29/mo,20%,https://shopfront.example
paylink,Paylink,payments,false,4.6,2.9%,40%,https://paylink.example
searchly,Searchly,seo,false,4.1,$99/mo,30%,https://searchly.example
adwise,Adwise,advertising,true,,Free,varies,https://adwise.example
flowbot,Flowbot,automation,true,4.6,$9/mo,25%,https://flowbot.example
";

struct Silent;

impl NarrativeGenerator for Silent {
    fn generate(&self, _brief: &NarrativeBrief) -> Result<String, NarrativeError> {
        Err(NarrativeError::Disabled)
    }
}

fn service() -> HealthCheckService<StaticCatalog, Silent> {
    let catalog = ToolCatalog::from_reader(CATALOG_CSV.as_bytes()).expect("catalog parses");
    HealthCheckService::new(Arc::new(StaticCatalog::new(catalog)), Arc::new(Silent))
}

fn assess(facts: FactRecord, business_type: Option<BusinessType>) -> AssessmentResponse {
    service()
        .assess(AssessmentRequest {
            facts,
            business_type,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 2),
            include_reasoning: true,
        })
        .expect("valid facts")
}

#[test]
fn struggling_service_business_gets_a_retention_first_week() {
    let response = assess(
        FactRecord {
            monthly_revenue: Some(800.0),
            gross_margin_pct: Some(35.0),
            monthly_churn_pct: Some(12.0),
            conversion_rate_pct: Some(0.8),
            weekly_ops_hours: Some(45.0),
            ..FactRecord::default()
        },
        None,
    );

    let score = &response.score;
    assert_eq!(score.business_type, BusinessType::Service);
    assert_eq!(score.composite_score, 33);
    assert!(score.primary_risk.starts_with("Retention is your biggest risk"));
    assert!(score
        .pillar(Pillar::Operations)
        .expect("operations")
        .reasons
        .iter()
        .any(|reason| reason == "You spend 45 hours per week on operations"));

    assert_eq!(response.action_plan.primary_pillar, Pillar::Retention);
    assert_eq!(response.action_plan.tasks.len(), 7);
    assert_eq!(response.action_plan.tasks[0].id, "retention_exit_interviews");

    let schedule = response.schedule.expect("schedule");
    assert_eq!(
        schedule.first().map(|task| task.due_on),
        NaiveDate::from_ymd_opt(2025, 6, 2)
    );
    assert_eq!(
        schedule.last().map(|task| task.due_on),
        NaiveDate::from_ymd_opt(2025, 6, 8)
    );

    let tools = response.tools.expect("tools");
    let first = &tools[0];
    assert_eq!(first.tool.id, "relate");
    assert_eq!(first.pick, PickLabel::BestForYou);
    assert_eq!(first.pillar, Pillar::Retention);

    let reasoning = response.reasoning.expect("reasoning");
    assert_eq!(reasoning.tools.len(), tools.len());
    assert_eq!(reasoning.tasks.len(), response.action_plan.tasks.len());
    assert!(response.narrative.is_none());
}

#[test]
fn thriving_business_scores_high_for_every_type() {
    for business_type in BusinessType::ordered() {
        let response = assess(
            FactRecord {
                monthly_revenue: Some(65_000.0),
                gross_margin_pct: Some(72.0),
                monthly_churn_pct: Some(1.5),
                conversion_rate_pct: Some(5.5),
                ltv: Some(3_000.0),
                cac: Some(100.0),
                ..FactRecord::default()
            },
            Some(business_type),
        );
        assert!(
            response.score.composite_score >= 70,
            "{business_type:?} scored {}",
            response.score.composite_score
        );
        assert!(response
            .action_plan
            .tasks
            .iter()
            .all(|task| !task.id.starts_with("metrics_")));
    }
}

#[test]
fn missing_unit_economics_surface_as_estimated_data() {
    let response = assess(
        FactRecord {
            monthly_revenue: Some(12_000.0),
            gross_margin_pct: Some(58.0),
            net_monthly_profit: Some(1_800.0),
            cash_runway_months: Some(5.0),
            monthly_churn_pct: Some(4.0),
            conversion_rate_pct: Some(2.5),
            monthly_traffic: Some(8_000.0),
            average_order_value: Some(60.0),
            weekly_ops_hours: Some(30.0),
            fulfillment_days: Some(3.0),
            weekly_support_tickets: Some(20.0),
            ..FactRecord::default()
        },
        None,
    );

    assert_eq!(
        response.score.missing_data,
        vec![FactField::Cac, FactField::Ltv]
    );
    assert_eq!(response.score.pillar_score(Pillar::Profitability), 62);

    let notes = response.reasoning.expect("reasoning").estimated_data;
    assert!(!notes.is_empty());
    assert!(notes
        .iter()
        .all(|note| note.impact_range == "+5 to +15 points possible with real data"));
}

#[test]
fn empty_facts_still_produce_a_full_assessment() {
    let response = assess(FactRecord::default(), Some(BusinessType::Local));

    assert_eq!(response.score.missing_data.len(), 13);
    assert!(response.score.composite_score > 0);
    assert!((3..=5).contains(&response.score.next_steps.len()));
    assert!(!response.action_plan.tasks.is_empty());
    assert!(response.action_plan.tasks.len() <= 10);
    assert!(response
        .action_plan
        .tasks
        .iter()
        .all(|task| (1..=7).contains(&task.due_in_days)));
}

#[test]
fn invalid_facts_are_rejected_before_scoring() {
    let result = service().assess(AssessmentRequest {
        facts: FactRecord {
            monthly_churn_pct: Some(140.0),
            ..FactRecord::default()
        },
        ..AssessmentRequest::default()
    });
    let error = result.expect_err("churn above 100 is invalid");
    assert!(error.to_string().contains("monthly_churn_pct"));
}
