mod catalog;
mod categories;
mod matcher;
mod picks;

pub use catalog::{CatalogError, StaticCatalog, ToolCatalog, ToolCatalogSource};
pub use categories::{categories_for, fit_rationale};
pub use matcher::{recommend_tools, PILLARS_CONSIDERED};
pub use picks::{commission_value, pick_best_fit, pick_top_partner, price_value, promo_label};

use super::domain::Pillar;
use serde::{Deserialize, Serialize};

/// One row of the affiliate tool catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub has_free_tier: bool,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub commission_rate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickLabel {
    BestForYou,
    TopPartner,
}

impl PickLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BestForYou => "best for you",
            Self::TopPartner => "top partner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoLabel {
    TopRated,
    BudgetFriendly,
    FreeTierAvailable,
}

impl PromoLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopRated => "top rated",
            Self::BudgetFriendly => "budget friendly",
            Self::FreeTierAvailable => "free tier available",
        }
    }
}

/// A catalog entry selected for one of the weakest pillars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTool {
    #[serde(flatten)]
    pub tool: ToolEntry,
    pub fit_rationale: String,
    pub pick: PickLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo: Option<PromoLabel>,
    pub pillar: Pillar,
}
