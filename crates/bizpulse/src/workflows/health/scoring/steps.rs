use super::super::domain::{FactRecord, Pillar, PillarResult};
use super::breakpoints::has_implied_revenue_upside;
use super::composite::pillars_by_score;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub(crate) const MIN_STEPS: usize = 3;
pub(crate) const MAX_STEPS: usize = 7;
const STEPS_PER_PILLAR: usize = 2;

/// A generic recommended step. Filler steps carry no pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStep {
    pub title: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<Pillar>,
    /// The fact condition that triggered the step, e.g. "monthly churn above 5%".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

struct StepTemplate {
    title: &'static str,
    detail: &'static str,
    condition: &'static str,
    applies: fn(&FactRecord) -> bool,
}

fn step_templates(pillar: Pillar) -> Vec<StepTemplate> {
    match pillar {
        Pillar::Revenue => vec![
            StepTemplate {
                title: "Launch a premium offer",
                detail: "Create a higher-priced package for your best customers to raise revenue per sale.",
                condition: "monthly revenue below $5,000",
                applies: |facts| matches!(facts.monthly_revenue, Some(revenue) if revenue < 5_000.0),
            },
            StepTemplate {
                title: "Bundle to raise order value",
                detail: "Pair complementary products or services so each purchase is worth more.",
                condition: "average order value below $50",
                applies: |facts| matches!(facts.average_order_value, Some(aov) if aov < 50.0),
            },
            StepTemplate {
                title: "Capture the revenue your traffic implies",
                detail: "Your traffic and conversion suggest more revenue than you report; audit checkout and follow-up for leaks.",
                condition: "traffic and conversion implying over 30% more revenue than you report",
                applies: has_implied_revenue_upside,
            },
        ],
        Pillar::Profitability => vec![
            StepTemplate {
                title: "Review pricing against costs",
                detail: "List your top offers with their direct costs and reprice anything below a 50% gross margin.",
                condition: "gross margin below 50%",
                applies: |facts| matches!(facts.gross_margin_pct, Some(margin) if margin < 50.0),
            },
            StepTemplate {
                title: "Stop the monthly loss",
                detail: "Identify the expenses that push net profit below zero and cut or renegotiate them this month.",
                condition: "net monthly profit below zero",
                applies: |facts| matches!(facts.net_monthly_profit, Some(profit) if profit < 0.0),
            },
            StepTemplate {
                title: "Extend your cash runway",
                detail: "Set aside a fixed share of each payment until you hold six months of expenses.",
                condition: "cash runway under 6 months",
                applies: |facts| matches!(facts.cash_runway_months, Some(months) if months < 6.0),
            },
            StepTemplate {
                title: "Fix your unit economics",
                detail: "Raise lifetime value or cut acquisition cost until each customer returns at least three times what they cost.",
                condition: "an LTV:CAC ratio below 3",
                applies: |facts| matches!(facts.ltv_to_cac(), Some(ratio) if ratio < 3.0),
            },
        ],
        Pillar::Retention => vec![
            StepTemplate {
                title: "Reduce churn with exit interviews",
                detail: "Talk to five recently lost customers and fix the most common reason they left.",
                condition: "monthly churn above 5%",
                applies: |facts| matches!(facts.monthly_churn_pct, Some(churn) if churn > 5.0),
            },
            StepTemplate {
                title: "Launch a repeat-purchase program",
                detail: "Reward returning customers with a loyalty perk to raise lifetime value.",
                condition: "customer lifetime value below $300",
                applies: |facts| matches!(facts.ltv, Some(ltv) if ltv < 300.0),
            },
        ],
        Pillar::Acquisition => vec![
            StepTemplate {
                title: "Test your sales funnel",
                detail: "Run a two-week A/B test on the headline and call to action of your main landing page.",
                condition: "a conversion rate below 2%",
                applies: |facts| matches!(facts.conversion_rate_pct, Some(rate) if rate < 2.0),
            },
            StepTemplate {
                title: "Grow qualified traffic",
                detail: "Publish one search-focused piece of content per week aimed at buyers, not browsers.",
                condition: "monthly traffic below 2,000 visits",
                applies: |facts| matches!(facts.monthly_traffic, Some(traffic) if traffic < 2_000.0),
            },
            StepTemplate {
                title: "Lower acquisition cost",
                detail: "Move spend from your most expensive channel to the one with the lowest cost per customer.",
                condition: "customer acquisition cost above $150",
                applies: |facts| matches!(facts.cac, Some(cac) if cac > 150.0),
            },
        ],
        Pillar::Operations => vec![
            StepTemplate {
                title: "Automate a recurring task",
                detail: "Pick the task you repeat most each week and automate or delegate it.",
                condition: "more than 35 weekly operations hours",
                applies: |facts| matches!(facts.weekly_ops_hours, Some(hours) if hours > 35.0),
            },
            StepTemplate {
                title: "Speed up fulfillment",
                detail: "Map every step from order to delivery and remove the slowest hand-off.",
                condition: "fulfillment taking more than 5 days",
                applies: |facts| matches!(facts.fulfillment_days, Some(days) if days > 5.0),
            },
            StepTemplate {
                title: "Deflect repetitive support questions",
                detail: "Write an FAQ covering your five most common questions and link it in every reply.",
                condition: "more than 30 support tickets a week",
                applies: |facts| matches!(facts.weekly_support_tickets, Some(tickets) if tickets > 30.0),
            },
        ],
    }
}

const GENERIC_STEPS: [(&str, &str); 3] = [
    (
        "Complete your business profile",
        "Add the metrics you left blank so the score reflects your real numbers instead of estimates.",
    ),
    (
        "Track your core metrics monthly",
        "Record revenue, margin, churn, and conversion on the same day each month to spot trends early.",
    ),
    (
        "Benchmark against competitors",
        "Compare your pricing, offer, and reviews with three direct competitors to find gaps.",
    ),
];

/// Walks pillars weakest first, taking up to two matching steps from each, and
/// pads with generic steps to reach the minimum.
pub(crate) fn generate_next_steps(
    facts: &FactRecord,
    pillars: &BTreeMap<Pillar, PillarResult>,
) -> Vec<NextStep> {
    let mut steps: Vec<NextStep> = Vec::new();

    'pillars: for (pillar, _) in pillars_by_score(pillars) {
        let mut taken = 0;
        for template in step_templates(pillar) {
            if steps.len() >= MAX_STEPS {
                break 'pillars;
            }
            if taken >= STEPS_PER_PILLAR {
                break;
            }
            if (template.applies)(facts) {
                steps.push(NextStep {
                    title: template.title.to_string(),
                    detail: template.detail.to_string(),
                    pillar: Some(pillar),
                    condition: Some(template.condition.to_string()),
                });
                taken += 1;
            }
        }
    }

    for (title, detail) in GENERIC_STEPS {
        if steps.len() >= MIN_STEPS {
            break;
        }
        if steps.iter().any(|step| step.title == title) {
            continue;
        }
        steps.push(NextStep {
            title: title.to_string(),
            detail: detail.to_string(),
            pillar: None,
            condition: None,
        });
    }

    steps
}
