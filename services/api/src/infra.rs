use bizpulse::config::CatalogConfig;
use bizpulse::workflows::health::{
    BusinessType, CatalogError, NarrativeBrief, NarrativeError, NarrativeGenerator, ToolCatalog,
    ToolCatalogSource,
};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const BUNDLED_TOOLS_CSV: &str = include_str!("../data/demo_tools.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Tool catalog chosen at startup: the bundled demo list or a CSV on disk.
#[derive(Debug, Clone)]
pub(crate) enum ConfiguredCatalog {
    Bundled(ToolCatalog),
    File(PathBuf),
}

impl ConfiguredCatalog {
    pub(crate) fn bundled() -> Result<Self, CatalogError> {
        Ok(Self::Bundled(bundled_catalog()?))
    }

    pub(crate) fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        match &config.tool_catalog {
            Some(path) => Ok(Self::File(path.clone())),
            None => Self::bundled(),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Bundled(catalog) => format!("bundled demo catalog ({} tools)", catalog.len()),
            Self::File(path) => path.display().to_string(),
        }
    }
}

impl ToolCatalogSource for ConfiguredCatalog {
    fn load(&self) -> Result<ToolCatalog, CatalogError> {
        match self {
            Self::Bundled(catalog) => Ok(catalog.clone()),
            Self::File(path) => ToolCatalog::from_path(path),
        }
    }
}

pub(crate) fn bundled_catalog() -> Result<ToolCatalog, CatalogError> {
    ToolCatalog::from_reader(BUNDLED_TOOLS_CSV.as_bytes())
}

/// Narrative hook with no backing generator configured.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct DisabledNarrative;

impl NarrativeGenerator for DisabledNarrative {
    fn generate(&self, _brief: &NarrativeBrief) -> Result<String, NarrativeError> {
        Err(NarrativeError::Disabled)
    }
}

/// Offline generator used by the CLI demo; assembles a short summary from the brief.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct TemplateNarrative;

impl NarrativeGenerator for TemplateNarrative {
    fn generate(&self, brief: &NarrativeBrief) -> Result<String, NarrativeError> {
        let mut text = format!(
            "As a {} business you score {} out of 100. {} is holding you back the most, while {} is your strongest area.",
            brief.business_type.label().to_lowercase(),
            brief.composite_score,
            brief.weakest_pillar.label(),
            brief.strongest_pillar.label().to_lowercase()
        );
        if let Some(first) = brief.first_tasks.first() {
            text.push_str(&format!(" Start this week with: {first}."));
        }
        if !brief.missing_data.is_empty() {
            text.push_str(&format!(
                " {} metrics were estimated; filling them in will sharpen the score.",
                brief.missing_data.len()
            ));
        }
        Ok(text)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_business_type(raw: &str) -> Result<BusinessType, String> {
    BusinessType::parse(raw).ok_or_else(|| {
        format!("unknown business type '{raw}' (expected storefront, subscription, service, creator, or local)")
    })
}
