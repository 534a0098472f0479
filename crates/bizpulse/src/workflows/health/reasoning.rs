//! Plain-language explanations for everything an assessment surfaces.
//!
//! Explanations are rebuilt from the [`ScoreResult`] and the item being explained;
//! nothing here feeds back into a score.

use serde::{Deserialize, Serialize};

use super::domain::{FactField, Pillar};
use super::plan::{ActionPlan, ActionTask};
use super::scoring::{format_number, NextStep, RuleSource, ScoreResult};
use super::tools::{PickLabel, RecommendedTool};
use super::weights::weights_for;

const ALL_MISSING_IMPACT: &str = "+5 to +25 points possible with real data";
const SOME_MISSING_IMPACT: &str = "+5 to +15 points possible with real data";

/// Explanation attached to one surfaced item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub subject: String,
    pub text: String,
}

/// Missing facts for one pillar and what supplying them could change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatedDataNote {
    pub pillar: Pillar,
    pub missing: Vec<FactField>,
    pub impact_range: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reasoning {
    pub composite: String,
    pub primary_risk: String,
    pub fastest_lever: String,
    pub next_steps: Vec<Explanation>,
    pub tasks: Vec<Explanation>,
    pub tools: Vec<Explanation>,
    pub estimated_data: Vec<EstimatedDataNote>,
}

pub fn explain_all(score: &ScoreResult, plan: &ActionPlan, tools: &[RecommendedTool]) -> Reasoning {
    Reasoning {
        composite: explain_composite(score),
        primary_risk: explain_risk(score),
        fastest_lever: explain_lever(score),
        next_steps: score
            .next_steps
            .iter()
            .map(|step| Explanation {
                subject: step.title.clone(),
                text: explain_step(score, step),
            })
            .collect(),
        tasks: plan
            .tasks
            .iter()
            .map(|task| Explanation {
                subject: task.id.clone(),
                text: explain_task(score, task),
            })
            .collect(),
        tools: tools
            .iter()
            .map(|tool| Explanation {
                subject: tool.tool.id.clone(),
                text: explain_tool(score, tool),
            })
            .collect(),
        estimated_data: explain_estimated_data(score),
    }
}

/// Breaks the composite down into per-pillar weighted contributions.
pub fn explain_composite(score: &ScoreResult) -> String {
    let weights = weights_for(score.business_type);
    let contributions: Vec<String> = Pillar::ordered()
        .into_iter()
        .map(|pillar| {
            let weight = weights.weight(pillar);
            let pillar_score = score.pillar_score(pillar);
            format!(
                "{} {} x {}% = {}",
                pillar.label(),
                pillar_score,
                format_number((weight * 100.0).round()),
                format_number(round_tenth(f64::from(pillar_score) * weight))
            )
        })
        .collect();

    let mut text = format!(
        "Your overall score of {} is a weighted average of five pillars tuned for a {} business. Contributions: {}.",
        score.composite_score,
        score.business_type.label().to_lowercase(),
        contributions.join("; ")
    );

    let ranked = score.pillars_by_score();
    let high = ranked.last().map(|(_, score)| *score);
    let strongest = ranked.iter().find(|(_, score)| Some(*score) == high);
    if let (Some((weakest, low)), Some((strongest, high))) = (ranked.first(), strongest) {
        if low != high {
            text.push_str(&format!(
                " {} is the weakest pillar at {} and {} the strongest at {}.",
                weakest.label(),
                low,
                strongest.label(),
                high
            ));
        }
    }
    text
}

pub fn explain_risk(score: &ScoreResult) -> String {
    match &score.risk_source {
        RuleSource::BusinessRule { business_type, key } => format!(
            "This risk comes from the {} check for {} businesses, the first warning sign your numbers matched. Checks specific to your business type take precedence over pillar scores. {}",
            rule_name(key),
            business_type.label().to_lowercase(),
            weakest_sentence(score)
        ),
        RuleSource::PillarFallback { pillar, score: pillar_score } => format!(
            "None of the warning signs for {} businesses matched your numbers, so the risk points at your weakest pillar. {} scored {}, the lowest of the five, and carries {}% of your overall score.",
            score.business_type.label().to_lowercase(),
            pillar.label(),
            pillar_score,
            weight_pct(score, *pillar)
        ),
        RuleSource::Generic => "There was not enough data to single out a risk. Adding your core metrics will make this part of the assessment specific to you.".to_string(),
    }
}

pub fn explain_lever(score: &ScoreResult) -> String {
    match &score.lever_source {
        RuleSource::BusinessRule { business_type, key } => format!(
            "This lever comes from the {} play for {} businesses, which your numbers qualified for. It is usually the quickest change with a visible effect for this kind of business.",
            rule_name(key),
            business_type.label().to_lowercase()
        ),
        RuleSource::PillarFallback { pillar, score: pillar_score } => format!(
            "No business-type play matched, so this lever is the top suggestion from your weakest pillar with levers available. {} scored {} and carries {}% of your overall score, so gains there move the total fastest.",
            pillar.label(),
            pillar_score,
            weight_pct(score, *pillar)
        ),
        RuleSource::Generic => "Your data did not point to a specific lever yet. Filling in the missing metrics will unlock a personalized recommendation.".to_string(),
    }
}

pub fn explain_step(score: &ScoreResult, step: &NextStep) -> String {
    match (step.pillar, step.condition.as_deref()) {
        (Some(pillar), Some(condition)) => format!(
            "This step targets {}, which scored {} and ranks {} of five. It was suggested because your facts show {}.",
            pillar.label(),
            score.pillar_score(pillar),
            rank_phrase(score, pillar),
            condition
        ),
        (Some(pillar), None) => format!(
            "This step targets {}, which scored {} and ranks {} of five. It addresses the weakest readings in that pillar.",
            pillar.label(),
            score.pillar_score(pillar),
            rank_phrase(score, pillar)
        ),
        (None, _) => "This is a general step that applies to every business. It was added so your assessment always includes at least three actions.".to_string(),
    }
}

pub fn explain_task(score: &ScoreResult, task: &ActionTask) -> String {
    let focus = if task.id.starts_with("metrics_") {
        "it measures a metric you left blank".to_string()
    } else {
        match position(score, task.pillar) {
            Some(0) => "it is your primary focus".to_string(),
            Some(1) => "it is your secondary focus".to_string(),
            _ => "it supports your plan".to_string(),
        }
    };

    format!(
        "{} is in your plan for {} because {}, with a score of {}. It is scheduled for day {} and takes {} effort.",
        task.title,
        task.pillar.label(),
        focus,
        score.pillar_score(task.pillar),
        task.due_in_days,
        task.effort.label().to_lowercase()
    )
}

pub fn explain_tool(score: &ScoreResult, tool: &RecommendedTool) -> String {
    let mut text = format!(
        "{} is the {} pick for {}, which scored {}.",
        tool.tool.name,
        tool.pick.label(),
        tool.pillar.label(),
        score.pillar_score(tool.pillar)
    );

    let reason = match tool.pick {
        PickLabel::BestForYou if tool.tool.has_free_tier => {
            " It has a free tier, so you can try it before spending anything.".to_string()
        }
        PickLabel::BestForYou => match tool.tool.rating {
            Some(rating) => format!(
                " It has the strongest rating among the matching tools at {}.",
                format_number(rating)
            ),
            None => " It was the first matching tool in the catalog.".to_string(),
        },
        PickLabel::TopPartner => {
            " It is a partner tool with the strongest referral terms among the remaining matches, and we may earn a commission if you sign up.".to_string()
        }
    };
    text.push_str(&reason);

    if let Some(promo) = tool.promo {
        text.push_str(&format!(" It is labelled {}.", promo.label()));
    }
    text
}

/// Impact claim for a pillar with `missing` facts. A pillar scored from its default
/// (`estimated`) claims the wide range even when some of its facts were supplied.
pub fn impact_range(pillar: Pillar, missing: &[FactField], estimated: bool) -> Option<&'static str> {
    let absent = pillar
        .fields()
        .iter()
        .filter(|field| missing.contains(field))
        .count();
    match (absent, estimated) {
        (0, _) => None,
        (_, true) => Some(ALL_MISSING_IMPACT),
        (_, false) => Some(SOME_MISSING_IMPACT),
    }
}

pub fn explain_estimated_data(score: &ScoreResult) -> Vec<EstimatedDataNote> {
    Pillar::ordered()
        .into_iter()
        .filter_map(|pillar| {
            let estimated = score.is_estimated(pillar);
            let impact = impact_range(pillar, &score.missing_data, estimated)?;
            let missing: Vec<FactField> = pillar
                .fields()
                .iter()
                .copied()
                .filter(|field| score.is_missing(*field))
                .collect();
            let names: Vec<String> = missing
                .iter()
                .map(|field| field.label().to_lowercase())
                .collect();
            let all_missing = missing.len() == pillar.fields().len();
            let change = impact.trim_end_matches(" possible with real data");

            let explanation = if all_missing {
                format!(
                    "{} is estimated because none of its facts were provided ({}). It uses a conservative score of {} until real numbers are available, so supplying them could change it by {}.",
                    pillar.label(),
                    names.join(", "),
                    score.pillar_score(pillar),
                    change
                )
            } else if estimated {
                format!(
                    "{} is estimated because the facts you supplied cannot be scored without {}. It uses a conservative score of {} until those numbers are available, so supplying them could change it by {}.",
                    pillar.label(),
                    names.join(", "),
                    score.pillar_score(pillar),
                    change
                )
            } else {
                format!(
                    "{} is partially estimated because {} {} not provided. The current score of {} reflects only the facts you supplied, and filling the gaps could change it by {}.",
                    pillar.label(),
                    names.join(", "),
                    if names.len() == 1 { "was" } else { "were" },
                    score.pillar_score(pillar),
                    change
                )
            };

            Some(EstimatedDataNote {
                pillar,
                missing,
                impact_range: impact.to_string(),
                explanation,
            })
        })
        .collect()
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn weight_pct(score: &ScoreResult, pillar: Pillar) -> String {
    format_number((weights_for(score.business_type).weight(pillar) * 100.0).round())
}

fn position(score: &ScoreResult, pillar: Pillar) -> Option<usize> {
    score
        .pillars_by_score()
        .iter()
        .position(|(candidate, _)| *candidate == pillar)
}

fn rank_phrase(score: &ScoreResult, pillar: Pillar) -> &'static str {
    match position(score, pillar) {
        Some(0) => "lowest",
        Some(1) => "second lowest",
        Some(2) => "third lowest",
        Some(3) => "fourth lowest",
        _ => "highest",
    }
}

fn weakest_sentence(score: &ScoreResult) -> String {
    match score.pillars_by_score().first() {
        Some((pillar, pillar_score)) => {
            format!("Your weakest pillar is {} at {}.", pillar.label(), pillar_score)
        }
        None => "No pillar scores were available.".to_string(),
    }
}

/// `"service_owner_bottleneck"` reads as `"owner bottleneck"`.
fn rule_name(key: &str) -> String {
    key.split_once('_')
        .map(|(_, rest)| rest)
        .unwrap_or(key)
        .replace('_', " ")
}
