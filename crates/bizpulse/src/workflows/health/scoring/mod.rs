mod breakpoints;
mod composite;
mod pillars;
mod rules;
mod steps;

pub use rules::RuleSource;
pub use steps::NextStep;

pub(crate) use breakpoints::has_implied_revenue_upside;
pub(crate) use composite::pillars_by_score;
pub(crate) use pillars::format_number;

use super::domain::{BusinessType, FactField, FactRecord, Pillar, PillarResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output of the scoring stage and the input to every downstream consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub business_type: BusinessType,
    pub composite_score: u8,
    pub pillars: BTreeMap<Pillar, PillarResult>,
    pub primary_risk: String,
    pub risk_source: RuleSource,
    pub fastest_lever: String,
    pub lever_source: RuleSource,
    pub next_steps: Vec<NextStep>,
    pub missing_data: Vec<FactField>,
}

impl ScoreResult {
    pub fn pillar(&self, pillar: Pillar) -> Option<&PillarResult> {
        self.pillars.get(&pillar)
    }

    pub fn pillar_score(&self, pillar: Pillar) -> u8 {
        self.pillars
            .get(&pillar)
            .map(|result| result.score)
            .unwrap_or_else(|| pillar.default_score())
    }

    /// Pillars weakest first; equal scores keep canonical order.
    pub fn pillars_by_score(&self) -> Vec<(Pillar, u8)> {
        pillars_by_score(&self.pillars)
    }

    /// Whether the pillar fell back to its default score.
    pub fn is_estimated(&self, pillar: Pillar) -> bool {
        self.pillars
            .get(&pillar)
            .map_or(true, |result| result.estimated)
    }

    pub fn is_missing(&self, field: FactField) -> bool {
        self.missing_data.contains(&field)
    }
}

/// Scores a fact record. An absent business type uses [`BusinessType::DEFAULT`].
///
/// Pure and deterministic: identical inputs always produce identical results.
pub fn score_business(facts: &FactRecord, business_type: Option<BusinessType>) -> ScoreResult {
    let business_type = BusinessType::resolve(business_type);
    let pillars = pillars::score_pillars(facts);
    let composite_score = composite::composite_score(&pillars, business_type);
    let (primary_risk, risk_source) = rules::identify_primary_risk(facts, business_type, &pillars);
    let (fastest_lever, lever_source) =
        rules::identify_fastest_lever(facts, business_type, &pillars);
    let next_steps = steps::generate_next_steps(facts, &pillars);

    ScoreResult {
        business_type,
        composite_score,
        pillars,
        primary_risk,
        risk_source,
        fastest_lever,
        lever_source,
        next_steps,
        missing_data: facts.missing_fields(),
    }
}

/// Scores a single pillar in isolation.
pub fn score_pillar(pillar: Pillar, facts: &FactRecord) -> PillarResult {
    pillars::score_pillar(pillar, facts)
}
