use super::super::domain::Pillar;
use super::super::scoring::ScoreResult;
use super::categories::{categories_for, fit_rationale};
use super::picks::{pick_best_fit, pick_top_partner, promo_label};
use super::{PickLabel, RecommendedTool, ToolEntry};
use std::collections::BTreeSet;

/// Number of weakest pillars that receive tool picks.
pub const PILLARS_CONSIDERED: usize = 3;

/// Picks up to two tools for each of the three weakest pillars.
///
/// A tool id is recommended at most once per call. Pillars with no matching,
/// unused catalog entries are skipped.
pub fn recommend_tools(score: &ScoreResult, catalog: &[ToolEntry]) -> Vec<RecommendedTool> {
    let mut consumed: BTreeSet<&str> = BTreeSet::new();
    let mut recommendations = Vec::new();

    for (pillar, pillar_score) in score
        .pillars_by_score()
        .into_iter()
        .take(PILLARS_CONSIDERED)
    {
        let candidates = candidates_for(pillar, catalog, &consumed);
        let Some(best) = pick_best_fit(&candidates) else {
            continue;
        };
        consumed.insert(best.id.as_str());
        recommendations.push(recommend(best, pillar, pillar_score, PickLabel::BestForYou));

        let remaining: Vec<&ToolEntry> = candidates
            .into_iter()
            .filter(|entry| entry.id != best.id)
            .collect();
        if let Some(partner) = pick_top_partner(&remaining) {
            consumed.insert(partner.id.as_str());
            recommendations.push(recommend(
                partner,
                pillar,
                pillar_score,
                PickLabel::TopPartner,
            ));
        }
    }

    recommendations
}

fn candidates_for<'a>(
    pillar: Pillar,
    catalog: &'a [ToolEntry],
    consumed: &BTreeSet<&str>,
) -> Vec<&'a ToolEntry> {
    let categories = categories_for(pillar);
    catalog
        .iter()
        .filter(|entry| categories.contains(&entry.category.as_str()))
        .filter(|entry| !consumed.contains(entry.id.as_str()))
        .collect()
}

fn recommend(entry: &ToolEntry, pillar: Pillar, pillar_score: u8, pick: PickLabel) -> RecommendedTool {
    RecommendedTool {
        tool: entry.clone(),
        fit_rationale: fit_rationale(entry, pillar, pillar_score),
        pick,
        promo: promo_label(entry),
        pillar,
    }
}
