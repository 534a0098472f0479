//! Business health assessment: five-pillar scoring, a 7-day action plan, tool
//! picks, and explanations of each.

pub mod domain;
pub mod narrative;
pub mod plan;
pub mod reasoning;
pub mod router;
pub mod scoring;
pub mod service;
pub mod tools;
pub mod weights;

pub use domain::{BusinessType, FactField, FactRecord, FactValidationError, Pillar, PillarResult};
pub use narrative::{enrich, NarrativeBrief, NarrativeError, NarrativeGenerator};
pub use plan::{build_action_plan, ActionCatalog, ActionPlan, ActionTask, Effort};
pub use reasoning::{explain_all, EstimatedDataNote, Explanation, Reasoning};
pub use router::health_router;
pub use scoring::{score_business, score_pillar, NextStep, RuleSource, ScoreResult};
pub use service::{
    AssessmentError, AssessmentRequest, AssessmentResponse, HealthCheckService, ScheduledTask,
};
pub use tools::{
    recommend_tools, CatalogError, PickLabel, PromoLabel, RecommendedTool, StaticCatalog,
    ToolCatalog, ToolCatalogSource, ToolEntry,
};
pub use weights::{weights_for, WeightVector};

#[cfg(test)]
mod tests;
