use super::super::domain::{BusinessType, Pillar, PillarResult};
use super::super::weights::weights_for;
use std::collections::BTreeMap;

/// Weighted sum of pillar scores, clamped to `[0, 100]` and rounded.
pub(crate) fn composite_score(
    pillars: &BTreeMap<Pillar, PillarResult>,
    business_type: BusinessType,
) -> u8 {
    let weights = weights_for(business_type);
    let weighted: f64 = pillars
        .iter()
        .map(|(pillar, result)| f64::from(result.score) * weights.weight(*pillar))
        .sum();

    weighted.clamp(0.0, 100.0).round() as u8
}

/// Pillars sorted weakest first. Equal scores keep canonical pillar order.
pub(crate) fn pillars_by_score(pillars: &BTreeMap<Pillar, PillarResult>) -> Vec<(Pillar, u8)> {
    let mut ranked: Vec<(Pillar, u8)> = pillars
        .iter()
        .map(|(pillar, result)| (*pillar, result.score))
        .collect();
    ranked.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    ranked
}
