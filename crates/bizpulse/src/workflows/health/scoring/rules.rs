//! Business-type rule tables for the primary risk and fastest lever.
//!
//! Each table is evaluated top to bottom and the first matching rule wins. When no
//! rule for the business type matches, a pure fallback derived from pillar scores
//! is used instead.

use super::super::domain::{BusinessType, FactRecord, Pillar, PillarResult};
use super::composite::pillars_by_score;
use super::pillars::{format_money, format_number};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A predicate over facts paired with the text it produces.
pub(crate) struct FactRule {
    pub key: &'static str,
    pub applies: fn(&FactRecord) -> bool,
    pub outcome: fn(&FactRecord) -> String,
}

/// Records where a risk or lever text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSource {
    BusinessRule {
        business_type: BusinessType,
        key: String,
    },
    PillarFallback {
        pillar: Pillar,
        score: u8,
    },
    Generic,
}

pub(crate) const GENERIC_LEVER: &str =
    "Add more business data to unlock a personalized improvement lever";

fn above(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(value) if value > threshold)
}

fn below(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(value) if value < threshold)
}

fn pct(value: Option<f64>) -> String {
    format!("{}%", format_number(value.unwrap_or_default()))
}

const STOREFRONT_RISKS: &[FactRule] = &[
    FactRule {
        key: "storefront_low_conversion",
        applies: |facts| below(facts.conversion_rate_pct, 2.0),
        outcome: |facts| {
            format!(
                "A {} conversion rate means most shoppers leave without buying, which caps every other growth effort",
                pct(facts.conversion_rate_pct)
            )
        },
    },
    FactRule {
        key: "storefront_thin_margin",
        applies: |facts| below(facts.gross_margin_pct, 30.0),
        outcome: |facts| {
            format!(
                "Product margins of {} leave too little to cover shipping, returns, and ads",
                pct(facts.gross_margin_pct)
            )
        },
    },
];

const SUBSCRIPTION_RISKS: &[FactRule] = &[
    FactRule {
        key: "subscription_high_churn",
        applies: |facts| above(facts.monthly_churn_pct, 5.0),
        outcome: |facts| {
            format!(
                "Monthly churn of {} is existential for a subscription business: you replace most of your base every year",
                pct(facts.monthly_churn_pct)
            )
        },
    },
    FactRule {
        key: "subscription_weak_unit_economics",
        applies: |facts| below(facts.ltv_to_cac(), 3.0),
        outcome: |facts| {
            format!(
                "An LTV:CAC ratio of {}:1 means each new subscriber barely pays back what it cost to acquire",
                format_number(facts.ltv_to_cac().unwrap_or_default())
            )
        },
    },
];

const SERVICE_RISKS: &[FactRule] = &[
    FactRule {
        key: "service_owner_bottleneck",
        applies: |facts| above(facts.weekly_ops_hours, 50.0),
        outcome: |facts| {
            format!(
                "At {} operations hours per week, delivery depends on you and there is no capacity left to grow",
                format_number(facts.weekly_ops_hours.unwrap_or_default())
            )
        },
    },
    FactRule {
        key: "service_unprofitable_delivery",
        applies: |facts| below(facts.net_monthly_profit, 0.0),
        outcome: |facts| {
            format!(
                "The business is losing {} per month, so each additional client deepens the loss",
                format_money(facts.net_monthly_profit.unwrap_or_default().abs())
            )
        },
    },
];

const CREATOR_RISKS: &[FactRule] = &[
    FactRule {
        key: "creator_small_audience",
        applies: |facts| below(facts.monthly_traffic, 5_000.0),
        outcome: |facts| {
            format!(
                "An audience of {} monthly visitors is too small to support sponsorships or product launches",
                format_number(facts.monthly_traffic.unwrap_or_default())
            )
        },
    },
    FactRule {
        key: "creator_low_monetization",
        applies: |facts| below(facts.monthly_revenue, 1_000.0),
        outcome: |facts| {
            format!(
                "Monthly revenue of {} means your audience is not yet monetized",
                format_money(facts.monthly_revenue.unwrap_or_default())
            )
        },
    },
];

const LOCAL_RISKS: &[FactRule] = &[
    FactRule {
        key: "local_short_runway",
        applies: |facts| below(facts.cash_runway_months, 3.0),
        outcome: |facts| {
            format!(
                "With {} months of cash runway, one slow season could force closure",
                format_number(facts.cash_runway_months.unwrap_or_default())
            )
        },
    },
    FactRule {
        key: "local_weak_repeat_visits",
        applies: |facts| above(facts.monthly_churn_pct, 10.0),
        outcome: |facts| {
            format!(
                "Losing {} of customers each month means the neighborhood is not coming back",
                pct(facts.monthly_churn_pct)
            )
        },
    },
];

pub(crate) fn risk_rules(business_type: BusinessType) -> &'static [FactRule] {
    match business_type {
        BusinessType::Storefront => STOREFRONT_RISKS,
        BusinessType::Subscription => SUBSCRIPTION_RISKS,
        BusinessType::Service => SERVICE_RISKS,
        BusinessType::Creator => CREATOR_RISKS,
        BusinessType::Local => LOCAL_RISKS,
    }
}

const STOREFRONT_LEVERS: &[FactRule] = &[
    FactRule {
        key: "storefront_raise_aov",
        applies: |facts| below(facts.average_order_value, 50.0),
        outcome: |facts| {
            format!(
                "Add product bundles and a free-shipping threshold above your {} average order",
                format_money(facts.average_order_value.unwrap_or_default())
            )
        },
    },
    FactRule {
        key: "storefront_simplify_checkout",
        applies: |facts| below(facts.conversion_rate_pct, 2.0),
        outcome: |_| {
            "Cut checkout to a single page and enable guest checkout".to_string()
        },
    },
];

const SUBSCRIPTION_LEVERS: &[FactRule] = &[
    FactRule {
        key: "subscription_save_flow",
        applies: |facts| above(facts.monthly_churn_pct, 3.0),
        outcome: |_| {
            "Add a cancellation save flow offering a pause or downgrade before subscribers leave"
                .to_string()
        },
    },
    FactRule {
        key: "subscription_trial_onboarding",
        applies: |facts| below(facts.conversion_rate_pct, 3.0),
        outcome: |_| {
            "Guide trial users to their first success within 24 hours with a setup checklist"
                .to_string()
        },
    },
];

const SERVICE_LEVERS: &[FactRule] = &[
    FactRule {
        key: "service_raise_prices",
        applies: |facts| below(facts.gross_margin_pct, 50.0),
        outcome: |_| {
            "Raise prices 10-15% on your next three proposals".to_string()
        },
    },
    FactRule {
        key: "service_productize",
        applies: |facts| above(facts.weekly_ops_hours, 40.0),
        outcome: |_| {
            "Package your most common engagement as a fixed-scope offer with a checklist"
                .to_string()
        },
    },
];

const CREATOR_LEVERS: &[FactRule] = &[
    FactRule {
        key: "creator_lead_magnet",
        applies: |facts| below(facts.conversion_rate_pct, 1.0),
        outcome: |_| {
            "Offer a free resource in exchange for an email address on every post"
                .to_string()
        },
    },
    FactRule {
        key: "creator_collaborate",
        applies: |facts| below(facts.monthly_traffic, 5_000.0),
        outcome: |_| {
            "Collaborate with one creator of a similar size each month to reach a new audience"
                .to_string()
        },
    },
];

const LOCAL_LEVERS: &[FactRule] = &[
    FactRule {
        key: "local_self_service_booking",
        applies: |facts| above(facts.weekly_support_tickets, 30.0),
        outcome: |_| {
            "Enable online self-service booking and post answers to common questions"
                .to_string()
        },
    },
    FactRule {
        key: "local_listings_and_reviews",
        applies: |facts| below(facts.conversion_rate_pct, 2.0),
        outcome: |_| {
            "Complete your local business listing and ask every happy customer for a review"
                .to_string()
        },
    },
];

pub(crate) fn lever_rules(business_type: BusinessType) -> &'static [FactRule] {
    match business_type {
        BusinessType::Storefront => STOREFRONT_LEVERS,
        BusinessType::Subscription => SUBSCRIPTION_LEVERS,
        BusinessType::Service => SERVICE_LEVERS,
        BusinessType::Creator => CREATOR_LEVERS,
        BusinessType::Local => LOCAL_LEVERS,
    }
}

/// First rule in `rules` whose predicate holds.
pub(crate) fn first_match<'a>(rules: &'a [FactRule], facts: &FactRecord) -> Option<&'a FactRule> {
    rules.iter().find(|rule| (rule.applies)(facts))
}

pub(crate) fn identify_primary_risk(
    facts: &FactRecord,
    business_type: BusinessType,
    pillars: &BTreeMap<Pillar, PillarResult>,
) -> (String, RuleSource) {
    let rules = risk_rules(business_type);
    if let Some(rule) = first_match(rules, facts) {
        return (
            (rule.outcome)(facts),
            RuleSource::BusinessRule {
                business_type,
                key: rule.key.to_string(),
            },
        );
    }

    fallback_risk(pillars)
}

/// Severity-templated risk for the weakest pillar.
pub(crate) fn fallback_risk(pillars: &BTreeMap<Pillar, PillarResult>) -> (String, RuleSource) {
    let Some(&(pillar, score)) = pillars_by_score(pillars).first() else {
        return (
            "Not enough information to identify a primary risk".to_string(),
            RuleSource::Generic,
        );
    };

    let label = pillar.label();
    let text = if score < 40 {
        format!(
            "{label} is your biggest risk: a score of {score} signals a critical weakness holding the whole business back"
        )
    } else if score < 60 {
        format!("{label} is your biggest risk: a score of {score} needs attention before it limits growth")
    } else {
        format!("{label} is your relatively weakest area at {score}; keep it from slipping")
    };

    (text, RuleSource::PillarFallback { pillar, score })
}

pub(crate) fn identify_fastest_lever(
    facts: &FactRecord,
    business_type: BusinessType,
    pillars: &BTreeMap<Pillar, PillarResult>,
) -> (String, RuleSource) {
    let rules = lever_rules(business_type);
    if let Some(rule) = first_match(rules, facts) {
        return (
            (rule.outcome)(facts),
            RuleSource::BusinessRule {
                business_type,
                key: rule.key.to_string(),
            },
        );
    }

    fallback_lever(pillars)
}

/// First lever of the weakest pillar that has any levers.
pub(crate) fn fallback_lever(pillars: &BTreeMap<Pillar, PillarResult>) -> (String, RuleSource) {
    pillars_by_score(pillars)
        .into_iter()
        .find_map(|(pillar, score)| {
            pillars
                .get(&pillar)
                .and_then(|result| result.levers.first())
                .map(|lever| (lever.clone(), RuleSource::PillarFallback { pillar, score }))
        })
        .unwrap_or_else(|| (GENERIC_LEVER.to_string(), RuleSource::Generic))
}
