use super::common::*;

use chrono::NaiveDate;

use crate::workflows::health::plan::{
    build_action_plan, ActionCatalog, Effort, TaskTemplate, MAX_PLAN_DAYS, MAX_PLAN_TASKS,
};
use crate::workflows::health::{score_business, BusinessType, FactRecord, Pillar};

fn template(key: &'static str, title: &'static str, pillar: Pillar) -> TaskTemplate {
    TaskTemplate {
        key,
        title,
        rationale: "Test rationale.",
        first_action: "Do the thing.",
        expected_impact: "Some impact",
        effort: Effort::Small,
        pillar,
        eligible: None,
    }
}

fn task_ids(facts: &FactRecord, catalog: &ActionCatalog) -> Vec<String> {
    let score = score_business(facts, None);
    build_action_plan(&score, facts, catalog)
        .tasks
        .into_iter()
        .map(|task| task.id)
        .collect()
}

#[test]
fn standard_catalog_has_three_to_five_templates_per_pillar() {
    let catalog = ActionCatalog::standard();
    for pillar in Pillar::ordered() {
        let count = catalog.tasks_for_pillar(pillar).len();
        assert!((3..=5).contains(&count), "{pillar:?} has {count}");
    }
}

#[test]
fn struggling_business_plan_targets_retention_then_revenue() {
    let facts = struggling_facts();
    let score = score_business(&facts, Some(BusinessType::Service));
    let plan = build_action_plan(&score, &facts, &ActionCatalog::standard());

    assert_eq!(plan.primary_pillar, Pillar::Retention);
    assert_eq!(plan.secondary_pillar, Some(Pillar::Revenue));

    let ids: Vec<&str> = plan.tasks.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "retention_exit_interviews",
            "retention_save_offer",
            "retention_welcome_sequence",
            "retention_loyalty_perk",
            "revenue_premium_tier",
            "revenue_reactivate_past_customers",
            "metrics_establish_cac_ltv",
        ]
    );

    let days: Vec<u8> = plan.tasks.iter().map(|task| task.due_in_days).collect();
    assert_eq!(days, vec![1, 2, 3, 4, 5, 6, 7]);
    assert!(plan.tasks[1].rationale.contains("Retention currently scores 20"));
}

#[test]
fn gated_templates_need_their_fact_to_be_present() {
    let ids = task_ids(&FactRecord::default(), &ActionCatalog::standard());

    assert_eq!(
        ids,
        vec![
            "revenue_premium_tier",
            "revenue_reactivate_past_customers",
            "profitability_expense_audit",
            "metrics_establish_cac_ltv",
            "metrics_establish_churn",
        ]
    );
}

#[test]
fn metric_tasks_are_skipped_once_the_metrics_are_known() {
    let ids = task_ids(&thriving_facts(), &ActionCatalog::standard());
    assert!(ids.iter().all(|id| !id.starts_with("metrics_")));
}

#[test]
fn plan_never_exceeds_ten_tasks_and_caps_days_at_seven() {
    let catalog = ActionCatalog::new(vec![
        template("r1", "Revenue one", Pillar::Revenue),
        template("r2", "Revenue two", Pillar::Revenue),
        template("r3", "Revenue three", Pillar::Revenue),
        template("r4", "Revenue four", Pillar::Revenue),
        template("r5", "Revenue five", Pillar::Revenue),
        template("r6", "Revenue six", Pillar::Revenue),
        template("p1", "Profit one", Pillar::Profitability),
        template("p2", "Profit two", Pillar::Profitability),
        template("p3", "Profit three", Pillar::Profitability),
        template("p4", "Profit four", Pillar::Profitability),
    ]);
    let facts = FactRecord::default();
    let score = score_business(&facts, None);
    let plan = build_action_plan(&score, &facts, &catalog);

    assert_eq!(plan.tasks.len(), MAX_PLAN_TASKS);
    let ids: Vec<&str> = plan.tasks.iter().map(|task| task.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "r1",
            "r2",
            "r3",
            "r4",
            "r5",
            "p1",
            "p2",
            "p3",
            "metrics_establish_cac_ltv",
            "metrics_establish_churn",
        ]
    );
    let days: Vec<u8> = plan.tasks.iter().map(|task| task.due_in_days).collect();
    assert_eq!(days, vec![1, 2, 3, 4, 5, 6, 7, 7, 7, 7]);
    assert!(plan
        .tasks
        .iter()
        .all(|task| (1..=MAX_PLAN_DAYS).contains(&task.due_in_days)));
}

#[test]
fn near_duplicate_metric_tasks_are_not_appended() {
    let catalog = ActionCatalog::new(vec![
        template(
            "r1",
            "Establish your CAC and LTV baseline!",
            Pillar::Revenue,
        ),
        template("p1", "Profit one", Pillar::Profitability),
    ]);

    let ids = task_ids(&FactRecord::default(), &catalog);
    assert_eq!(ids, vec!["r1", "p1", "metrics_establish_churn"]);
}

#[test]
fn due_dates_resolve_from_an_explicit_start() {
    let facts = struggling_facts();
    let score = score_business(&facts, None);
    let plan = build_action_plan(&score, &facts, &ActionCatalog::standard());
    let start = NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date");

    assert_eq!(plan.tasks[0].due_on(start), start);
    assert_eq!(
        plan.tasks[6].due_on(start),
        NaiveDate::from_ymd_opt(2025, 3, 16).expect("valid date")
    );
}

#[test]
fn plan_is_deterministic() {
    let facts = facts_without_unit_economics();
    let score = score_business(&facts, None);
    let catalog = ActionCatalog::standard();

    assert_eq!(
        build_action_plan(&score, &facts, &catalog),
        build_action_plan(&score, &facts, &catalog)
    );
}

#[test]
fn implied_revenue_gap_gates_lever_step_and_task_alike() {
    let catalog = ActionCatalog::standard();
    let checkout = catalog
        .task_templates()
        .iter()
        .find(|template| template.key == "revenue_audit_checkout")
        .expect("checkout audit template");

    for (revenue, expected) in [(7_000.0, true), (8_000.0, false)] {
        let facts = FactRecord {
            monthly_revenue: Some(revenue),
            monthly_traffic: Some(10_000.0),
            conversion_rate_pct: Some(2.0),
            average_order_value: Some(50.0),
            ..FactRecord::default()
        };
        let score = score_business(&facts, None);

        let lever = score
            .pillar(Pillar::Revenue)
            .expect("revenue result")
            .levers
            .iter()
            .any(|lever| lever.starts_with("Traffic and conversion imply"));
        let step = score
            .next_steps
            .iter()
            .any(|step| step.title == "Capture the revenue your traffic implies");

        assert_eq!(lever, expected, "lever at revenue {revenue}");
        assert_eq!(step, expected, "step at revenue {revenue}");
        assert_eq!(checkout.is_eligible(&facts), expected, "task at revenue {revenue}");
    }
}
