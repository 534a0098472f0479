mod catalog;
mod scheduler;

pub use catalog::{ActionCatalog, TaskTemplate};
pub use scheduler::{build_action_plan, due_in_days_for, MAX_PLAN_DAYS, MAX_PLAN_TASKS};

use super::domain::Pillar;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Small,
    Medium,
    Large,
}

impl Effort {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

/// A concrete task scheduled within the 7-day plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTask {
    pub id: String,
    pub title: String,
    pub rationale: String,
    pub first_action: String,
    pub expected_impact: String,
    pub effort: Effort,
    pub due_in_days: u8,
    pub pillar: Pillar,
}

impl ActionTask {
    /// Calendar date for this task when the plan starts on `start`; day 1 is `start`.
    pub fn due_on(&self, start: NaiveDate) -> NaiveDate {
        start + Duration::days(i64::from(self.due_in_days) - 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub primary_pillar: Pillar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_pillar: Option<Pillar>,
    pub tasks: Vec<ActionTask>,
}
