use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::health::narrative::{NarrativeBrief, NarrativeError, NarrativeGenerator};
use crate::workflows::health::tools::{
    CatalogError, StaticCatalog, ToolCatalog, ToolCatalogSource, ToolEntry,
};
use crate::workflows::health::{FactRecord, HealthCheckService};

/// Sparse, unhealthy record: low revenue, thin margin, heavy churn, overloaded owner.
pub(super) fn struggling_facts() -> FactRecord {
    FactRecord {
        monthly_revenue: Some(800.0),
        gross_margin_pct: Some(35.0),
        monthly_churn_pct: Some(12.0),
        conversion_rate_pct: Some(0.8),
        weekly_ops_hours: Some(45.0),
        ..FactRecord::default()
    }
}

/// Rich, healthy record with an LTV:CAC of 30.
pub(super) fn thriving_facts() -> FactRecord {
    FactRecord {
        monthly_revenue: Some(65_000.0),
        gross_margin_pct: Some(72.0),
        monthly_churn_pct: Some(1.5),
        conversion_rate_pct: Some(5.5),
        ltv: Some(3_000.0),
        cac: Some(100.0),
        ..FactRecord::default()
    }
}

/// Every fact except acquisition cost and lifetime value.
pub(super) fn facts_without_unit_economics() -> FactRecord {
    FactRecord {
        monthly_revenue: Some(12_000.0),
        gross_margin_pct: Some(58.0),
        net_monthly_profit: Some(1_800.0),
        cash_runway_months: Some(5.0),
        monthly_churn_pct: Some(4.0),
        conversion_rate_pct: Some(2.5),
        monthly_traffic: Some(8_000.0),
        average_order_value: Some(60.0),
        cac: None,
        ltv: None,
        weekly_ops_hours: Some(30.0),
        fulfillment_days: Some(3.0),
        weekly_support_tickets: Some(20.0),
    }
}

pub(super) fn tool(
    id: &str,
    category: &str,
    free: bool,
    rating: Option<f64>,
    price: &str,
    commission: &str,
) -> ToolEntry {
    ToolEntry {
        id: id.to_string(),
        name: format!("{id} app"),
        category: category.to_string(),
        has_free_tier: free,
        rating,
        price: price.to_string(),
        commission_rate: commission.to_string(),
        url: Some(format!("https://example.com/{id}")),
    }
}

pub(super) fn sample_tools() -> Vec<ToolEntry> {
    vec![
        tool("ledgerly", "accounting", true, Some(4.4), "$0", "15%"),
        tool("invoicely", "invoicing", false, Some(4.6), "$19/mo", "30% recurring"),
        tool("runwayr", "finance", false, Some(4.8), "$29/mo", "10%"),
        tool("mailpost", "email_marketing", true, Some(4.5), "$0", "20%"),
        tool("keepr", "customer_success", false, Some(4.2), "$49/mo", "35%"),
        tool("relate", "crm", true, Some(4.7), "$12/mo", "25%"),
        tool("shopfront", "ecommerce", true, Some(4.3), "$29/mo", "20%"),
        tool("paylink", "payments", false, Some(4.6), "2.9%", "40%"),
        tool("searchly", "seo", false, Some(4.1), "$99/mo", "30%"),
        tool("adwise", "advertising", true, None, "Free", "varies"),
        tool("flowbot", "automation", true, Some(4.6), "$9/mo", "25%"),
        tool("booker", "scheduling", true, Some(4.2), "$12/mo", "15%"),
    ]
}

pub(super) fn sample_catalog() -> ToolCatalog {
    ToolCatalog::new(sample_tools())
}

/// Catalog source whose backing store is unreachable.
#[derive(Debug, Default)]
pub(super) struct UnavailableCatalog;

impl ToolCatalogSource for UnavailableCatalog {
    fn load(&self) -> Result<ToolCatalog, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }
}

/// Narrative generator that is switched off.
#[derive(Debug, Default)]
pub(super) struct SilentNarrative;

impl NarrativeGenerator for SilentNarrative {
    fn generate(&self, _brief: &NarrativeBrief) -> Result<String, NarrativeError> {
        Err(NarrativeError::Disabled)
    }
}

/// Narrative generator that records each brief and returns fixed prose.
#[derive(Debug, Default)]
pub(super) struct RecordingNarrative {
    pub(super) briefs: Mutex<Vec<NarrativeBrief>>,
}

impl NarrativeGenerator for RecordingNarrative {
    fn generate(&self, brief: &NarrativeBrief) -> Result<String, NarrativeError> {
        self.briefs.lock().expect("lock briefs").push(brief.clone());
        Ok(format!(
            "  Your business scores {} overall.  ",
            brief.composite_score
        ))
    }
}

#[derive(Debug, Default)]
pub(super) struct FailingNarrative;

impl NarrativeGenerator for FailingNarrative {
    fn generate(&self, _brief: &NarrativeBrief) -> Result<String, NarrativeError> {
        Err(NarrativeError::Transport("connection reset".to_string()))
    }
}

pub(super) fn build_service() -> Arc<HealthCheckService<StaticCatalog, SilentNarrative>> {
    Arc::new(HealthCheckService::new(
        Arc::new(StaticCatalog::new(sample_catalog())),
        Arc::new(SilentNarrative),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
