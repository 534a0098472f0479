use super::super::domain::{FactRecord, Pillar, PillarResult};
use super::breakpoints::{
    BreakpointTable, ACQUISITION_COST, AVERAGE_ORDER_VALUE, CASH_RUNWAY, CHURN, CONVERSION,
    has_implied_revenue_upside, FULFILLMENT, GROSS_MARGIN, LIFETIME_VALUE, LTV_TO_CAC,
    MONTHLY_REVENUE, NET_MARGIN, OPS_HOURS, SUPPORT_TICKETS, TRAFFIC,
};
use std::collections::BTreeMap;

/// Runs all five scorers over the same record.
pub(crate) fn score_pillars(facts: &FactRecord) -> BTreeMap<Pillar, PillarResult> {
    Pillar::ordered()
        .into_iter()
        .map(|pillar| (pillar, score_pillar(pillar, facts)))
        .collect()
}

pub(crate) fn score_pillar(pillar: Pillar, facts: &FactRecord) -> PillarResult {
    match pillar {
        Pillar::Revenue => score_revenue(facts),
        Pillar::Profitability => score_profitability(facts),
        Pillar::Retention => score_retention(facts),
        Pillar::Acquisition => score_acquisition(facts),
        Pillar::Operations => score_operations(facts),
    }
}

/// Accumulates sub-scores and findings for one pillar.
#[derive(Default)]
struct PillarTally {
    sub_scores: Vec<u8>,
    reasons: Vec<String>,
    levers: Vec<String>,
}

impl PillarTally {
    /// Scores `value` against `table` and records the reason for whichever side of
    /// the health threshold it lands on. Unhealthy readings also record a lever.
    fn measure(
        &mut self,
        table: &BreakpointTable,
        value: f64,
        healthy: impl FnOnce() -> String,
        unhealthy: impl FnOnce() -> (String, String),
    ) {
        self.sub_scores.push(table.score(value));
        if table.is_healthy(value) {
            self.reasons.push(healthy());
        } else {
            let (reason, lever) = unhealthy();
            self.reasons.push(reason);
            self.levers.push(lever);
        }
    }

    fn finish(self, pillar: Pillar) -> PillarResult {
        if self.sub_scores.is_empty() {
            let score = pillar.default_score();
            return PillarResult {
                score,
                reasons: vec![format!(
                    "No {} data provided; using a conservative estimate of {score}",
                    pillar.label().to_lowercase()
                )],
                levers: self.levers,
                estimated: true,
            };
        }

        let total: f64 = self.sub_scores.iter().map(|score| f64::from(*score)).sum();
        let mean = total / self.sub_scores.len() as f64;

        PillarResult {
            score: mean.round().clamp(0.0, 100.0) as u8,
            reasons: self.reasons,
            levers: self.levers,
            estimated: false,
        }
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

pub(crate) fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.0}", value.abs())
    } else {
        format!("${value:.0}")
    }
}

fn score_revenue(facts: &FactRecord) -> PillarResult {
    let mut tally = PillarTally::default();

    if let Some(revenue) = facts.monthly_revenue {
        tally.measure(
            &MONTHLY_REVENUE,
            revenue,
            || {
                format!(
                    "Monthly revenue of {} is a solid base to grow from",
                    format_money(revenue)
                )
            },
            || {
                (
                    format!(
                        "Monthly revenue of {} is below a sustainable level",
                        format_money(revenue)
                    ),
                    "Add a higher-priced offer or package to lift revenue per customer"
                        .to_string(),
                )
            },
        );
    }

    if let Some(aov) = facts.average_order_value {
        tally.measure(
            &AVERAGE_ORDER_VALUE,
            aov,
            || {
                format!(
                    "Average order value of {} supports healthy unit economics",
                    format_money(aov)
                )
            },
            || {
                (
                    format!("Average order value of {} is low", format_money(aov)),
                    "Bundle products or add upsells to raise average order value".to_string(),
                )
            },
        );
    }

    if let (Some(implied), Some(revenue)) = (facts.implied_revenue(), facts.monthly_revenue) {
        if has_implied_revenue_upside(facts) {
            tally.levers.push(format!(
                "Traffic and conversion imply about {}/month versus {} reported; tighten checkout and follow-up to capture the gap",
                format_money(implied),
                format_money(revenue)
            ));
        }
    }

    tally.finish(Pillar::Revenue)
}

fn score_profitability(facts: &FactRecord) -> PillarResult {
    let mut tally = PillarTally::default();

    if let Some(margin) = facts.gross_margin_pct {
        tally.measure(
            &GROSS_MARGIN,
            margin,
            || {
                format!(
                    "Gross margin of {}% leaves room to reinvest",
                    format_number(margin)
                )
            },
            || {
                (
                    format!("Gross margin of {}% is thin", format_number(margin)),
                    "Raise prices or renegotiate supplier costs to lift gross margin above 50%"
                        .to_string(),
                )
            },
        );
    }

    if let Some(net_margin) = facts.net_margin_pct() {
        tally.measure(
            &NET_MARGIN,
            net_margin,
            || {
                format!(
                    "Net profit margin of {}% is healthy",
                    format_number(net_margin)
                )
            },
            || {
                let reason = if net_margin < 0.0 {
                    format!(
                        "Net profit is negative at {}% of revenue",
                        format_number(net_margin)
                    )
                } else {
                    format!(
                        "Net profit margin of {}% leaves little buffer",
                        format_number(net_margin)
                    )
                };
                (
                    reason,
                    "Cut the two largest non-essential expenses to improve net margin"
                        .to_string(),
                )
            },
        );
    }

    if let Some(runway) = facts.cash_runway_months {
        tally.measure(
            &CASH_RUNWAY,
            runway,
            || {
                format!(
                    "{} months of cash runway gives you room to invest",
                    format_number(runway)
                )
            },
            || {
                (
                    format!("Only {} months of cash runway", format_number(runway)),
                    "Build cash reserves toward six months of runway before expanding"
                        .to_string(),
                )
            },
        );
    }

    if let Some(ratio) = facts.ltv_to_cac() {
        tally.measure(
            &LTV_TO_CAC,
            ratio,
            || {
                format!(
                    "LTV:CAC ratio of {}:1 shows efficient growth",
                    format_number(ratio)
                )
            },
            || {
                (
                    format!(
                        "LTV:CAC ratio of {}:1 is below the 3:1 benchmark",
                        format_number(ratio)
                    ),
                    "Improve unit economics by raising retention or lowering acquisition cost"
                        .to_string(),
                )
            },
        );
    }

    tally.finish(Pillar::Profitability)
}

fn score_retention(facts: &FactRecord) -> PillarResult {
    let mut tally = PillarTally::default();

    if let Some(churn) = facts.monthly_churn_pct {
        tally.measure(
            &CHURN,
            churn,
            || format!("Monthly churn of {}% is under control", format_number(churn)),
            || {
                (
                    format!(
                        "Monthly churn of {}% is eroding your customer base",
                        format_number(churn)
                    ),
                    "Reduce churn: interview recently lost customers and fix the top cancellation reason"
                        .to_string(),
                )
            },
        );
    }

    if let Some(ltv) = facts.ltv {
        tally.measure(
            &LIFETIME_VALUE,
            ltv,
            || format!("Customer lifetime value of {} is strong", format_money(ltv)),
            || {
                (
                    format!("Customer lifetime value of {} is low", format_money(ltv)),
                    "Introduce a loyalty offer or repeat-purchase program to raise lifetime value"
                        .to_string(),
                )
            },
        );
    }

    tally.finish(Pillar::Retention)
}

fn score_acquisition(facts: &FactRecord) -> PillarResult {
    let mut tally = PillarTally::default();

    if let Some(conversion) = facts.conversion_rate_pct {
        tally.measure(
            &CONVERSION,
            conversion,
            || {
                format!(
                    "Conversion rate of {}% is at or above typical benchmarks",
                    format_number(conversion)
                )
            },
            || {
                (
                    format!(
                        "Conversion rate of {}% is below the 2% benchmark",
                        format_number(conversion)
                    ),
                    "Run an A/B test on your main landing page headline and call to action"
                        .to_string(),
                )
            },
        );
    }

    if let Some(traffic) = facts.monthly_traffic {
        tally.measure(
            &TRAFFIC,
            traffic,
            || {
                format!(
                    "{} monthly visitors gives you a workable audience",
                    format_number(traffic)
                )
            },
            || {
                (
                    format!("Only {} monthly visitors reach you", format_number(traffic)),
                    "Publish one search-focused article or post per week to grow traffic"
                        .to_string(),
                )
            },
        );
    }

    if let Some(cac) = facts.cac {
        tally.measure(
            &ACQUISITION_COST,
            cac,
            || {
                format!(
                    "Customer acquisition cost of {} is efficient",
                    format_money(cac)
                )
            },
            || {
                (
                    format!("Customer acquisition cost of {} is high", format_money(cac)),
                    "Shift budget toward your lowest-cost acquisition channel".to_string(),
                )
            },
        );
    }

    tally.finish(Pillar::Acquisition)
}

fn score_operations(facts: &FactRecord) -> PillarResult {
    let mut tally = PillarTally::default();

    if let Some(hours) = facts.weekly_ops_hours {
        tally.measure(
            &OPS_HOURS,
            hours,
            || {
                format!(
                    "{} operations hours per week is sustainable",
                    format_number(hours)
                )
            },
            || {
                (
                    format!(
                        "You spend {} hours per week on operations",
                        format_number(hours)
                    ),
                    "Automate or delegate your most repetitive weekly task".to_string(),
                )
            },
        );
    }

    if let Some(days) = facts.fulfillment_days {
        tally.measure(
            &FULFILLMENT,
            days,
            || {
                format!(
                    "Fulfillment in {} days keeps customers happy",
                    format_number(days)
                )
            },
            || {
                (
                    format!("Fulfillment takes {} days", format_number(days)),
                    "Map the fulfillment process and remove the slowest hand-off".to_string(),
                )
            },
        );
    }

    if let Some(tickets) = facts.weekly_support_tickets {
        tally.measure(
            &SUPPORT_TICKETS,
            tickets,
            || {
                format!(
                    "{} support tickets per week is manageable",
                    format_number(tickets)
                )
            },
            || {
                (
                    format!(
                        "{} support tickets per week is straining the team",
                        format_number(tickets)
                    ),
                    "Publish an FAQ covering your five most common support questions".to_string(),
                )
            },
        );
    }

    tally.finish(Pillar::Operations)
}
