use crate::infra::{ConfiguredCatalog, DisabledNarrative, TemplateNarrative};
use bizpulse::error::AppError;
use bizpulse::workflows::health::{
    AssessmentRequest, AssessmentResponse, BusinessType, FactRecord, HealthCheckService,
    NarrativeGenerator, ToolCatalogSource,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the business facts (fields may be omitted).
    #[arg(long)]
    pub(crate) facts: PathBuf,
    /// Business type (storefront, subscription, service, creator, local). Defaults to service.
    #[arg(long, value_parser = crate::infra::parse_business_type)]
    pub(crate) business_type: Option<BusinessType>,
    /// Tool catalog CSV. Defaults to the bundled demo catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Start date for the 7-day plan (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Include an explanation for every surfaced item.
    #[arg(long)]
    pub(crate) explain: bool,
    /// Print the assessment as JSON instead of a text report.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Business type used for the sample assessment. Defaults to local.
    #[arg(long, value_parser = crate::infra::parse_business_type)]
    pub(crate) business_type: Option<BusinessType>,
    /// Start date for the plan (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        facts: facts_path,
        business_type,
        catalog,
        start,
        explain,
        json,
    } = args;

    let raw = std::fs::read_to_string(&facts_path)?;
    let facts: FactRecord = serde_json::from_str(&raw).map_err(|err| {
        AppError::Input(format!("{} is not a valid facts document: {err}", facts_path.display()))
    })?;

    let source = match catalog {
        Some(path) => ConfiguredCatalog::File(path),
        None => ConfiguredCatalog::bundled()?,
    };
    let service = HealthCheckService::new(Arc::new(source), Arc::new(DisabledNarrative));
    let start = start.unwrap_or_else(|| Local::now().date_naive());

    let response = service.assess(AssessmentRequest {
        facts,
        business_type,
        start_date: Some(start),
        include_reasoning: explain,
    })?;

    if json {
        let payload = serde_json::to_string_pretty(&response)
            .map_err(|err| AppError::Input(format!("failed to encode assessment: {err}")))?;
        println!("{payload}");
    } else {
        render_assessment(&response, start);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let business_type = args.business_type.unwrap_or(BusinessType::Local);
    let start = args.start.unwrap_or_else(|| Local::now().date_naive());
    let source = ConfiguredCatalog::bundled()?;

    println!("Business health demo");
    println!(
        "Catalog: {} | Business type: {}",
        source.describe(),
        business_type.label()
    );
    println!("Sample facts: a small shop with thin margins and no unit economics\n");

    let response = assess_sample(source, TemplateNarrative, business_type, start)?;
    render_assessment(&response, start);
    Ok(())
}

fn assess_sample<C, N>(
    catalog: C,
    narrator: N,
    business_type: BusinessType,
    start: NaiveDate,
) -> Result<AssessmentResponse, AppError>
where
    C: ToolCatalogSource + 'static,
    N: NarrativeGenerator + 'static,
{
    let service = HealthCheckService::new(Arc::new(catalog), Arc::new(narrator));
    let response = service.assess(AssessmentRequest {
        facts: demo_facts(),
        business_type: Some(business_type),
        start_date: Some(start),
        include_reasoning: true,
    })?;
    Ok(response)
}

fn demo_facts() -> FactRecord {
    FactRecord {
        monthly_revenue: Some(9_500.0),
        gross_margin_pct: Some(38.0),
        net_monthly_profit: Some(450.0),
        cash_runway_months: Some(2.5),
        monthly_churn_pct: Some(7.0),
        conversion_rate_pct: Some(1.8),
        monthly_traffic: Some(2_400.0),
        average_order_value: Some(42.0),
        weekly_ops_hours: Some(38.0),
        fulfillment_days: Some(4.0),
        weekly_support_tickets: Some(30.0),
        ..FactRecord::default()
    }
}

pub(crate) fn render_assessment(response: &AssessmentResponse, start: NaiveDate) {
    let score = &response.score;

    println!(
        "Overall health: {}/100 ({})",
        score.composite_score,
        score.business_type.label()
    );

    println!("\nPillars");
    for (pillar, result) in &score.pillars {
        println!("  {:<14} {:>3}", pillar.label(), result.score);
        for reason in &result.reasons {
            println!("      - {reason}");
        }
    }

    println!("\nPrimary risk: {}", score.primary_risk);
    println!("Fastest lever: {}", score.fastest_lever);

    println!("\nNext steps");
    for (index, step) in score.next_steps.iter().enumerate() {
        println!("  {}. {}: {}", index + 1, step.title, step.detail);
    }

    println!("\n7-day plan starting {start}");
    for task in &response.action_plan.tasks {
        println!(
            "  {} [{}] {} (effort: {}, {})",
            task.due_on(start),
            task.pillar.label(),
            task.title,
            task.effort.label(),
            task.expected_impact
        );
        println!("      first action: {}", task.first_action);
    }

    match &response.tools {
        Some(tools) => {
            println!("\nRecommended tools");
            for tool in tools {
                let promo = tool
                    .promo
                    .map(|promo| format!(", {}", promo.label()))
                    .unwrap_or_default();
                println!(
                    "  {} ({}) for {}: {}{}",
                    tool.tool.name,
                    tool.pick.label(),
                    tool.pillar.label(),
                    tool.tool.price,
                    promo
                );
            }
        }
        None => println!("\nRecommended tools: none available"),
    }

    if !score.missing_data.is_empty() {
        let names: Vec<&str> = score.missing_data.iter().map(|field| field.label()).collect();
        println!("\nEstimated (not provided): {}", names.join(", "));
    }

    if let Some(reasoning) = &response.reasoning {
        println!("\nWhy this score");
        println!("  {}", reasoning.composite);
        println!("  {}", reasoning.primary_risk);
        println!("  {}", reasoning.fastest_lever);
        for note in &reasoning.estimated_data {
            println!(
                "  {} ({}): {}",
                note.pillar.label(),
                note.impact_range,
                note.explanation
            );
        }
    }

    if let Some(narrative) = &response.narrative {
        println!("\nSummary\n  {narrative}");
    }
}
