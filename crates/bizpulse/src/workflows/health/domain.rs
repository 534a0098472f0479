use serde::{Deserialize, Serialize};

/// Sparse set of business metrics supplied by the operator or an integration.
///
/// Every field is optional. Percentages are expected to already sit in `[0, 100]`;
/// the scoring engine does not check ranges, callers run [`FactRecord::validate`]
/// before handing a record over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactRecord {
    pub monthly_revenue: Option<f64>,
    pub gross_margin_pct: Option<f64>,
    pub net_monthly_profit: Option<f64>,
    pub cash_runway_months: Option<f64>,
    pub monthly_churn_pct: Option<f64>,
    pub conversion_rate_pct: Option<f64>,
    pub monthly_traffic: Option<f64>,
    pub average_order_value: Option<f64>,
    pub cac: Option<f64>,
    pub ltv: Option<f64>,
    pub weekly_ops_hours: Option<f64>,
    pub fulfillment_days: Option<f64>,
    pub weekly_support_tickets: Option<f64>,
}

impl FactRecord {
    pub fn value(&self, field: FactField) -> Option<f64> {
        match field {
            FactField::MonthlyRevenue => self.monthly_revenue,
            FactField::GrossMarginPct => self.gross_margin_pct,
            FactField::NetMonthlyProfit => self.net_monthly_profit,
            FactField::CashRunwayMonths => self.cash_runway_months,
            FactField::MonthlyChurnPct => self.monthly_churn_pct,
            FactField::ConversionRatePct => self.conversion_rate_pct,
            FactField::MonthlyTraffic => self.monthly_traffic,
            FactField::AverageOrderValue => self.average_order_value,
            FactField::Cac => self.cac,
            FactField::Ltv => self.ltv,
            FactField::WeeklyOpsHours => self.weekly_ops_hours,
            FactField::FulfillmentDays => self.fulfillment_days,
            FactField::WeeklySupportTickets => self.weekly_support_tickets,
        }
    }

    /// Fields that were not supplied, in declaration order.
    pub fn missing_fields(&self) -> Vec<FactField> {
        FactField::ordered()
            .into_iter()
            .filter(|field| self.value(*field).is_none())
            .collect()
    }

    /// LTV divided by CAC when both are known and CAC is positive.
    pub fn ltv_to_cac(&self) -> Option<f64> {
        match (self.ltv, self.cac) {
            (Some(ltv), Some(cac)) if cac > 0.0 => Some(ltv / cac),
            _ => None,
        }
    }

    /// Net profit as a percentage of revenue when both are known and revenue is positive.
    pub fn net_margin_pct(&self) -> Option<f64> {
        match (self.net_monthly_profit, self.monthly_revenue) {
            (Some(profit), Some(revenue)) if revenue > 0.0 => Some(profit / revenue * 100.0),
            _ => None,
        }
    }

    /// Revenue implied by traffic, conversion, and order value.
    pub fn implied_revenue(&self) -> Option<f64> {
        match (
            self.monthly_traffic,
            self.conversion_rate_pct,
            self.average_order_value,
        ) {
            (Some(traffic), Some(conversion), Some(aov)) => {
                Some(traffic * (conversion / 100.0) * aov)
            }
            _ => None,
        }
    }

    /// Range checks callers apply before scoring.
    pub fn validate(&self) -> Result<(), FactValidationError> {
        for field in FactField::ordered() {
            let Some(value) = self.value(field) else {
                continue;
            };

            if !value.is_finite() {
                return Err(FactValidationError::NonFinite { field });
            }

            if field.is_percentage() && !(0.0..=100.0).contains(&value) {
                return Err(FactValidationError::PercentOutOfRange { field, value });
            }

            if field != FactField::NetMonthlyProfit && value < 0.0 {
                return Err(FactValidationError::Negative { field, value });
            }
        }

        Ok(())
    }
}

/// Names of the individual facts, used for missing-data reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactField {
    MonthlyRevenue,
    GrossMarginPct,
    NetMonthlyProfit,
    CashRunwayMonths,
    MonthlyChurnPct,
    ConversionRatePct,
    MonthlyTraffic,
    AverageOrderValue,
    Cac,
    Ltv,
    WeeklyOpsHours,
    FulfillmentDays,
    WeeklySupportTickets,
}

impl FactField {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::MonthlyRevenue,
            Self::GrossMarginPct,
            Self::NetMonthlyProfit,
            Self::CashRunwayMonths,
            Self::MonthlyChurnPct,
            Self::ConversionRatePct,
            Self::MonthlyTraffic,
            Self::AverageOrderValue,
            Self::Cac,
            Self::Ltv,
            Self::WeeklyOpsHours,
            Self::FulfillmentDays,
            Self::WeeklySupportTickets,
        ]
    }

    /// Wire name, matching the serde representation.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MonthlyRevenue => "monthly_revenue",
            Self::GrossMarginPct => "gross_margin_pct",
            Self::NetMonthlyProfit => "net_monthly_profit",
            Self::CashRunwayMonths => "cash_runway_months",
            Self::MonthlyChurnPct => "monthly_churn_pct",
            Self::ConversionRatePct => "conversion_rate_pct",
            Self::MonthlyTraffic => "monthly_traffic",
            Self::AverageOrderValue => "average_order_value",
            Self::Cac => "cac",
            Self::Ltv => "ltv",
            Self::WeeklyOpsHours => "weekly_ops_hours",
            Self::FulfillmentDays => "fulfillment_days",
            Self::WeeklySupportTickets => "weekly_support_tickets",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MonthlyRevenue => "Monthly revenue",
            Self::GrossMarginPct => "Gross margin",
            Self::NetMonthlyProfit => "Net monthly profit",
            Self::CashRunwayMonths => "Cash runway",
            Self::MonthlyChurnPct => "Monthly churn",
            Self::ConversionRatePct => "Conversion rate",
            Self::MonthlyTraffic => "Monthly traffic",
            Self::AverageOrderValue => "Average order value",
            Self::Cac => "Customer acquisition cost",
            Self::Ltv => "Customer lifetime value",
            Self::WeeklyOpsHours => "Weekly operations hours",
            Self::FulfillmentDays => "Fulfillment time",
            Self::WeeklySupportTickets => "Weekly support tickets",
        }
    }

    pub const fn is_percentage(self) -> bool {
        matches!(
            self,
            Self::GrossMarginPct | Self::MonthlyChurnPct | Self::ConversionRatePct
        )
    }
}

/// Business archetype selecting the weight vector and rule precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Storefront,
    Subscription,
    Service,
    Creator,
    Local,
}

impl BusinessType {
    pub const DEFAULT: Self = Self::Service;

    pub const fn ordered() -> [Self; 5] {
        [
            Self::Storefront,
            Self::Subscription,
            Self::Service,
            Self::Creator,
            Self::Local,
        ]
    }

    pub const fn resolve(business_type: Option<Self>) -> Self {
        match business_type {
            Some(business_type) => business_type,
            None => Self::DEFAULT,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Storefront => "Storefront / product seller",
            Self::Subscription => "Subscription software",
            Self::Service => "Service / agency",
            Self::Creator => "Content creator",
            Self::Local => "Local / physical business",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "storefront" | "ecommerce" | "product" => Some(Self::Storefront),
            "subscription" | "saas" => Some(Self::Subscription),
            "service" | "agency" => Some(Self::Service),
            "creator" => Some(Self::Creator),
            "local" | "physical" => Some(Self::Local),
            _ => None,
        }
    }
}

/// One of the five scored dimensions. Declaration order is the canonical tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Revenue,
    Profitability,
    Retention,
    Acquisition,
    Operations,
}

impl Pillar {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Revenue,
            Self::Profitability,
            Self::Retention,
            Self::Acquisition,
            Self::Operations,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Profitability => "Profitability",
            Self::Retention => "Retention",
            Self::Acquisition => "Acquisition",
            Self::Operations => "Operations",
        }
    }

    /// Conservative score used when none of the pillar's facts were supplied.
    pub const fn default_score(self) -> u8 {
        match self {
            Self::Revenue | Self::Profitability => 30,
            Self::Retention => 40,
            Self::Acquisition => 35,
            Self::Operations => 45,
        }
    }

    /// Facts that feed this pillar's sub-scores.
    pub const fn fields(self) -> &'static [FactField] {
        match self {
            Self::Revenue => &[FactField::MonthlyRevenue, FactField::AverageOrderValue],
            Self::Profitability => &[
                FactField::GrossMarginPct,
                FactField::NetMonthlyProfit,
                FactField::CashRunwayMonths,
                FactField::Ltv,
                FactField::Cac,
            ],
            Self::Retention => &[FactField::MonthlyChurnPct, FactField::Ltv],
            Self::Acquisition => &[
                FactField::ConversionRatePct,
                FactField::MonthlyTraffic,
                FactField::Cac,
            ],
            Self::Operations => &[
                FactField::WeeklyOpsHours,
                FactField::FulfillmentDays,
                FactField::WeeklySupportTickets,
            ],
        }
    }
}

/// Score and findings for one pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarResult {
    pub score: u8,
    pub reasons: Vec<String>,
    pub levers: Vec<String>,
    /// Set when no sub-score was computable and the pillar default was used.
    #[serde(default)]
    pub estimated: bool,
}

/// Rejection raised by [`FactRecord::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FactValidationError {
    #[error("{} must be a finite number", .field.name())]
    NonFinite { field: FactField },
    #[error("{} must be between 0 and 100 (got {value})", .field.name())]
    PercentOutOfRange { field: FactField, value: f64 },
    #[error("{} must not be negative (got {value})", .field.name())]
    Negative { field: FactField, value: f64 },
}
