use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::{BusinessType, FactRecord, FactValidationError};
use super::narrative::{enrich, NarrativeBrief, NarrativeGenerator};
use super::plan::{build_action_plan, ActionCatalog, ActionPlan};
use super::reasoning::{explain_all, Reasoning};
use super::scoring::{score_business, ScoreResult};
use super::tools::{recommend_tools, RecommendedTool, ToolCatalogSource};

/// Body of `POST /api/v1/health/assessment`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub facts: FactRecord,
    #[serde(default)]
    pub business_type: Option<BusinessType>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub include_reasoning: bool,
}

/// A plan task resolved to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub task_id: String,
    pub due_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub score: ScoreResult,
    pub action_plan: ActionPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduledTask>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<RecommendedTool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<Reasoning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

/// Service composing scoring, planning, tool matching, and explanations.
pub struct HealthCheckService<C, N> {
    catalog: Arc<C>,
    narrator: Arc<N>,
    actions: Arc<ActionCatalog>,
}

impl<C, N> HealthCheckService<C, N>
where
    C: ToolCatalogSource + 'static,
    N: NarrativeGenerator + 'static,
{
    pub fn new(catalog: Arc<C>, narrator: Arc<N>) -> Self {
        Self::with_actions(catalog, narrator, ActionCatalog::standard())
    }

    pub fn with_actions(catalog: Arc<C>, narrator: Arc<N>, actions: ActionCatalog) -> Self {
        Self {
            catalog,
            narrator,
            actions: Arc::new(actions),
        }
    }

    /// Validate the facts and score them.
    pub fn score(
        &self,
        facts: &FactRecord,
        business_type: Option<BusinessType>,
    ) -> Result<ScoreResult, AssessmentError> {
        facts.validate()?;
        Ok(score_business(facts, business_type))
    }

    /// Run the full assessment pipeline for one request.
    pub fn assess(&self, request: AssessmentRequest) -> Result<AssessmentResponse, AssessmentError> {
        let score = self.score(&request.facts, request.business_type)?;
        let action_plan = build_action_plan(&score, &request.facts, &self.actions);
        let tools = self.recommend(&score);

        let schedule = request.start_date.map(|start| {
            action_plan
                .tasks
                .iter()
                .map(|task| ScheduledTask {
                    task_id: task.id.clone(),
                    due_on: task.due_on(start),
                })
                .collect()
        });

        let reasoning = request.include_reasoning.then(|| {
            explain_all(&score, &action_plan, tools.as_deref().unwrap_or_default())
        });

        let brief = NarrativeBrief::from_assessment(&score, &action_plan);
        let narrative = enrich(self.narrator.as_ref(), &brief);

        info!(
            business_type = ?score.business_type,
            composite_score = score.composite_score,
            tasks = action_plan.tasks.len(),
            missing = score.missing_data.len(),
            "health assessment completed"
        );

        Ok(AssessmentResponse {
            score,
            action_plan,
            schedule,
            tools,
            reasoning,
            narrative,
        })
    }

    fn recommend(&self, score: &ScoreResult) -> Option<Vec<RecommendedTool>> {
        let catalog = match self.catalog.load() {
            Ok(catalog) => catalog,
            Err(error) => {
                warn!(%error, "tool catalog unavailable; omitting tool recommendations");
                return None;
            }
        };
        if catalog.is_empty() {
            debug!("tool catalog is empty; omitting tool recommendations");
            return None;
        }

        let picks = recommend_tools(score, catalog.entries());
        (!picks.is_empty()).then_some(picks)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Validation(#[from] FactValidationError),
}
