use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{BusinessType, FactField, Pillar};
use super::plan::ActionPlan;
use super::scoring::ScoreResult;

const BRIEF_TASKS: usize = 3;

/// Data handed to an optional narrative generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeBrief {
    pub business_type: BusinessType,
    pub composite_score: u8,
    pub weakest_pillar: Pillar,
    pub strongest_pillar: Pillar,
    pub primary_risk: String,
    pub fastest_lever: String,
    pub first_tasks: Vec<String>,
    pub missing_data: Vec<FactField>,
}

impl NarrativeBrief {
    pub fn from_assessment(score: &ScoreResult, plan: &ActionPlan) -> Self {
        let ranked = score.pillars_by_score();
        let weakest_pillar = ranked
            .first()
            .map(|(pillar, _)| *pillar)
            .unwrap_or(plan.primary_pillar);
        let top = ranked.last().map(|(_, score)| *score);
        let strongest_pillar = ranked
            .iter()
            .find(|(_, score)| Some(*score) == top)
            .map(|(pillar, _)| *pillar)
            .unwrap_or(weakest_pillar);

        Self {
            business_type: score.business_type,
            composite_score: score.composite_score,
            weakest_pillar,
            strongest_pillar,
            primary_risk: score.primary_risk.clone(),
            fastest_lever: score.fastest_lever.clone(),
            first_tasks: plan
                .tasks
                .iter()
                .take(BRIEF_TASKS)
                .map(|task| task.title.clone())
                .collect(),
            missing_data: score.missing_data.clone(),
        }
    }
}

/// Outbound hook for prose summaries (e.g. a language model adapter).
pub trait NarrativeGenerator: Send + Sync {
    fn generate(&self, brief: &NarrativeBrief) -> Result<String, NarrativeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("narrative generation disabled")]
    Disabled,
    #[error("narrative transport unavailable: {0}")]
    Transport(String),
    #[error("narrative rejected: {0}")]
    Rejected(String),
}

/// Runs the generator; any failure or blank output means no narrative.
pub fn enrich<N>(generator: &N, brief: &NarrativeBrief) -> Option<String>
where
    N: NarrativeGenerator + ?Sized,
{
    match generator.generate(brief) {
        Ok(text) if text.trim().is_empty() => {
            debug!("narrative generator returned empty text");
            None
        }
        Ok(text) => Some(text.trim().to_string()),
        Err(NarrativeError::Disabled) => None,
        Err(error) => {
            warn!(%error, "narrative enrichment failed; continuing without it");
            None
        }
    }
}
