use super::super::domain::{FactField, FactRecord, Pillar};
use super::super::scoring::has_implied_revenue_upside;
use super::Effort;

#[derive(Clone)]
pub struct TaskTemplate {
    pub key: &'static str,
    pub title: &'static str,
    pub rationale: &'static str,
    pub first_action: &'static str,
    pub expected_impact: &'static str,
    pub effort: Effort,
    pub pillar: Pillar,
    /// Eligibility gate over facts; predicates over absent facts evaluate to false.
    pub eligible: Option<fn(&FactRecord) -> bool>,
}

impl std::fmt::Debug for TaskTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskTemplate")
            .field("key", &self.key)
            .field("pillar", &self.pillar)
            .field("gated", &self.eligible.is_some())
            .finish_non_exhaustive()
    }
}

impl TaskTemplate {
    pub fn is_eligible(&self, facts: &FactRecord) -> bool {
        self.eligible.map(|gate| gate(facts)).unwrap_or(true)
    }
}

/// Per-pillar task catalog the scheduler draws from.
#[derive(Debug)]
pub struct ActionCatalog {
    tasks: Vec<TaskTemplate>,
}

impl ActionCatalog {
    pub fn new(tasks: Vec<TaskTemplate>) -> Self {
        Self { tasks }
    }

    pub fn standard() -> Self {
        Self::new(standard_task_templates())
    }

    pub fn tasks_for_pillar(&self, pillar: Pillar) -> Vec<&TaskTemplate> {
        self.tasks
            .iter()
            .filter(|task| task.pillar == pillar)
            .collect()
    }

    pub fn task_templates(&self) -> &[TaskTemplate] {
        &self.tasks
    }
}

fn standard_task_templates() -> Vec<TaskTemplate> {
    vec![
        TaskTemplate {
            key: "revenue_premium_tier",
            title: "Design a premium tier",
            rationale: "A higher-priced option lifts revenue without needing more customers.",
            first_action: "List three extras your best customers already ask for and price them as a bundle.",
            expected_impact: "5-15% more revenue from existing customers",
            effort: Effort::Medium,
            pillar: Pillar::Revenue,
            eligible: None,
        },
        TaskTemplate {
            key: "revenue_upsell_bundle",
            title: "Add an upsell bundle at checkout",
            rationale: "A low average order value leaves revenue on the table at the moment of purchase.",
            first_action: "Pick the product most often bought alongside your bestseller and offer both at a small discount.",
            expected_impact: "10-20% higher average order value",
            effort: Effort::Small,
            pillar: Pillar::Revenue,
            eligible: Some(|facts: &FactRecord| matches!(facts.average_order_value, Some(aov) if aov < 75.0)),
        },
        TaskTemplate {
            key: "revenue_reactivate_past_customers",
            title: "Email past customers with a comeback offer",
            rationale: "Past buyers convert far more cheaply than new prospects.",
            first_action: "Export customers who have not bought in 90 days and send them a time-limited offer.",
            expected_impact: "Quick revenue from an existing list",
            effort: Effort::Small,
            pillar: Pillar::Revenue,
            eligible: None,
        },
        TaskTemplate {
            key: "revenue_audit_checkout",
            title: "Audit checkout for lost sales",
            rationale: "Your traffic and conversion imply more revenue than you report.",
            first_action: "Place a test order on mobile and desktop and note every point of friction.",
            expected_impact: "Recover revenue already implied by current traffic",
            effort: Effort::Medium,
            pillar: Pillar::Revenue,
            eligible: Some(has_implied_revenue_upside),
        },
        TaskTemplate {
            key: "profitability_raise_prices",
            title: "Raise prices on your top offer",
            rationale: "Gross margin below 50% leaves little to fund growth.",
            first_action: "Increase the price of your best-selling offer by 10% for all new customers.",
            expected_impact: "Up to 10 points of gross margin",
            effort: Effort::Small,
            pillar: Pillar::Profitability,
            eligible: Some(|facts: &FactRecord| matches!(facts.gross_margin_pct, Some(margin) if margin < 50.0)),
        },
        TaskTemplate {
            key: "profitability_expense_audit",
            title: "Audit recurring expenses",
            rationale: "Unused subscriptions and services quietly drain profit.",
            first_action: "Export last month's card and bank statements and flag every recurring charge.",
            expected_impact: "3-8% lower monthly costs",
            effort: Effort::Small,
            pillar: Pillar::Profitability,
            eligible: None,
        },
        TaskTemplate {
            key: "profitability_renegotiate_supplier",
            title: "Renegotiate with your top supplier",
            rationale: "Cost of goods is the biggest lever on gross margin.",
            first_action: "Request a volume or prepayment discount from your largest supplier.",
            expected_impact: "2-5 points of gross margin",
            effort: Effort::Medium,
            pillar: Pillar::Profitability,
            eligible: Some(|facts: &FactRecord| matches!(facts.gross_margin_pct, Some(margin) if margin < 60.0)),
        },
        TaskTemplate {
            key: "profitability_cash_reserve",
            title: "Open a cash reserve account",
            rationale: "Less than six months of runway leaves no room for a bad quarter.",
            first_action: "Set up an automatic transfer of 5% of every payment into a separate account.",
            expected_impact: "Steady growth toward six months of runway",
            effort: Effort::Small,
            pillar: Pillar::Profitability,
            eligible: Some(|facts: &FactRecord| matches!(facts.cash_runway_months, Some(months) if months < 6.0)),
        },
        TaskTemplate {
            key: "retention_exit_interviews",
            title: "Interview five churned customers",
            rationale: "Knowing why customers leave is the fastest way to keep the next ones.",
            first_action: "Email five recently lost customers asking for a 10-minute call.",
            expected_impact: "Clear list of the top cancellation reasons",
            effort: Effort::Small,
            pillar: Pillar::Retention,
            eligible: None,
        },
        TaskTemplate {
            key: "retention_save_offer",
            title: "Add a save offer to cancellations",
            rationale: "Churn above 5% a month means a large share of customers leave each year.",
            first_action: "Offer a pause or discounted month to anyone who starts cancelling.",
            expected_impact: "10-30% of cancellations saved",
            effort: Effort::Medium,
            pillar: Pillar::Retention,
            eligible: Some(|facts: &FactRecord| matches!(facts.monthly_churn_pct, Some(churn) if churn > 5.0)),
        },
        TaskTemplate {
            key: "retention_welcome_sequence",
            title: "Send a welcome sequence to new customers",
            rationale: "Customers who succeed early stay longer.",
            first_action: "Write three short emails covering setup, first win, and where to get help.",
            expected_impact: "Lower early churn",
            effort: Effort::Medium,
            pillar: Pillar::Retention,
            eligible: None,
        },
        TaskTemplate {
            key: "retention_loyalty_perk",
            title: "Launch a loyalty perk",
            rationale: "Rewarding repeat customers raises lifetime value.",
            first_action: "Choose one perk for customers on their third purchase or renewal and announce it.",
            expected_impact: "More repeat purchases",
            effort: Effort::Small,
            pillar: Pillar::Retention,
            eligible: None,
        },
        TaskTemplate {
            key: "acquisition_landing_page_test",
            title: "A/B test your landing page",
            rationale: "Conversion below 3% means most visitors leave without acting.",
            first_action: "Write an alternative headline that states the outcome customers get and split traffic 50/50.",
            expected_impact: "0.5-1.5 points of conversion",
            effort: Effort::Medium,
            pillar: Pillar::Acquisition,
            eligible: Some(|facts: &FactRecord| matches!(facts.conversion_rate_pct, Some(rate) if rate < 3.0)),
        },
        TaskTemplate {
            key: "acquisition_referral_incentive",
            title: "Start a referral incentive",
            rationale: "Referred customers cost less to acquire and stay longer.",
            first_action: "Offer existing customers a reward for every friend who buys.",
            expected_impact: "New customers at a lower acquisition cost",
            effort: Effort::Small,
            pillar: Pillar::Acquisition,
            eligible: None,
        },
        TaskTemplate {
            key: "acquisition_search_content",
            title: "Publish a search-focused article",
            rationale: "Content that answers buyer questions brings compounding traffic.",
            first_action: "Answer the question customers ask most before buying in a 600-word post.",
            expected_impact: "Gradual growth in qualified traffic",
            effort: Effort::Medium,
            pillar: Pillar::Acquisition,
            eligible: None,
        },
        TaskTemplate {
            key: "acquisition_channel_review",
            title: "Cut your most expensive channel",
            rationale: "Acquisition cost above $150 erodes the value of each new customer.",
            first_action: "Compare cost per customer across channels and pause the worst performer.",
            expected_impact: "Lower blended acquisition cost",
            effort: Effort::Small,
            pillar: Pillar::Acquisition,
            eligible: Some(|facts: &FactRecord| matches!(facts.cac, Some(cac) if cac > 150.0)),
        },
        TaskTemplate {
            key: "operations_time_audit",
            title: "Log a week of operations time",
            rationale: "You cannot automate what you have not measured.",
            first_action: "Track every operations task in 30-minute blocks for the next five days.",
            expected_impact: "A ranked list of tasks to automate or delegate",
            effort: Effort::Small,
            pillar: Pillar::Operations,
            eligible: None,
        },
        TaskTemplate {
            key: "operations_automate_task",
            title: "Automate your most repeated task",
            rationale: "Repetitive manual work takes time away from growth.",
            first_action: "Pick the task you do most often and set up a template or automation for it.",
            expected_impact: "2-5 hours saved per week",
            effort: Effort::Medium,
            pillar: Pillar::Operations,
            eligible: None,
        },
        TaskTemplate {
            key: "operations_support_faq",
            title: "Publish a support FAQ",
            rationale: "Repeated questions consume support time that self-service can absorb.",
            first_action: "Group last week's tickets by topic and answer the top five publicly.",
            expected_impact: "20-40% fewer repetitive tickets",
            effort: Effort::Small,
            pillar: Pillar::Operations,
            eligible: Some(|facts: &FactRecord| matches!(facts.weekly_support_tickets, Some(tickets) if tickets > 10.0)),
        },
        TaskTemplate {
            key: "operations_fulfillment_map",
            title: "Map your fulfillment steps",
            rationale: "Slow fulfillment delays cash and frustrates customers.",
            first_action: "Write down every step from order to delivery with its owner and typical delay.",
            expected_impact: "Faster delivery and fewer complaints",
            effort: Effort::Large,
            pillar: Pillar::Operations,
            eligible: Some(|facts: &FactRecord| matches!(facts.fulfillment_days, Some(days) if days > 3.0)),
        },
    ]
}

/// Task appended when any of `fields` was not supplied.
pub(crate) struct MetricTask {
    pub fields: &'static [FactField],
    pub template: TaskTemplate,
}

pub(crate) fn metric_tasks() -> Vec<MetricTask> {
    vec![
        MetricTask {
            fields: &[FactField::Cac, FactField::Ltv],
            template: TaskTemplate {
                key: "metrics_establish_cac_ltv",
                title: "Establish your CAC and LTV",
                rationale: "Without acquisition cost and lifetime value the unit economics score is an estimate.",
                first_action: "Divide last quarter's marketing spend by new customers, then average revenue per customer over their lifetime.",
                expected_impact: "A real unit-economics score instead of an estimate",
                effort: Effort::Small,
                pillar: Pillar::Profitability,
                eligible: None,
            },
        },
        MetricTask {
            fields: &[FactField::MonthlyChurnPct],
            template: TaskTemplate {
                key: "metrics_establish_churn",
                title: "Start measuring monthly churn",
                rationale: "Retention is scored from an estimate until churn is tracked.",
                first_action: "Count customers at the start of last month and how many of them did not return or renew.",
                expected_impact: "A real retention score instead of an estimate",
                effort: Effort::Small,
                pillar: Pillar::Retention,
                eligible: None,
            },
        },
    ]
}
