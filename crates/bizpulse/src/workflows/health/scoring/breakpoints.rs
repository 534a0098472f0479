//! Fixed breakpoint tables turning a raw fact into a sub-score.

use super::super::domain::FactRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Larger values are healthier; rows match on `value >= bound`.
    Higher,
    /// Smaller values are healthier; rows match on `value <= bound`.
    Lower,
}

#[derive(Debug)]
pub(crate) struct BreakpointTable {
    pub direction: Direction,
    pub rows: &'static [(f64, u8)],
    pub fallback: u8,
    /// Boundary between a healthy and an unhealthy reading.
    pub healthy_at: f64,
}

impl BreakpointTable {
    pub fn score(&self, value: f64) -> u8 {
        self.rows
            .iter()
            .find(|(bound, _)| match self.direction {
                Direction::Higher => value >= *bound,
                Direction::Lower => value <= *bound,
            })
            .map(|(_, score)| *score)
            .unwrap_or(self.fallback)
    }

    pub fn is_healthy(&self, value: f64) -> bool {
        match self.direction {
            Direction::Higher => value >= self.healthy_at,
            Direction::Lower => value <= self.healthy_at,
        }
    }
}

pub(crate) const MONTHLY_REVENUE: BreakpointTable = BreakpointTable {
    direction: Direction::Higher,
    rows: &[(50_000.0, 90), (20_000.0, 75), (5_000.0, 60), (1_000.0, 40)],
    fallback: 25,
    healthy_at: 5_000.0,
};

pub(crate) const AVERAGE_ORDER_VALUE: BreakpointTable = BreakpointTable {
    direction: Direction::Higher,
    rows: &[(200.0, 85), (75.0, 70), (30.0, 50)],
    fallback: 30,
    healthy_at: 50.0,
};

pub(crate) const GROSS_MARGIN: BreakpointTable = BreakpointTable {
    direction: Direction::Higher,
    rows: &[(70.0, 90), (50.0, 70), (30.0, 50)],
    fallback: 25,
    healthy_at: 50.0,
};

pub(crate) const NET_MARGIN: BreakpointTable = BreakpointTable {
    direction: Direction::Higher,
    rows: &[(20.0, 90), (10.0, 70), (0.0, 45)],
    fallback: 20,
    healthy_at: 10.0,
};

pub(crate) const CASH_RUNWAY: BreakpointTable = BreakpointTable {
    direction: Direction::Higher,
    rows: &[(12.0, 90), (6.0, 70), (3.0, 45)],
    fallback: 20,
    healthy_at: 6.0,
};

pub(crate) const LTV_TO_CAC: BreakpointTable = BreakpointTable {
    direction: Direction::Higher,
    rows: &[(3.0, 90), (2.0, 65), (1.0, 40)],
    fallback: 15,
    healthy_at: 3.0,
};

pub(crate) const CHURN: BreakpointTable = BreakpointTable {
    direction: Direction::Lower,
    rows: &[(2.0, 90), (5.0, 70), (10.0, 45)],
    fallback: 20,
    healthy_at: 5.0,
};

pub(crate) const LIFETIME_VALUE: BreakpointTable = BreakpointTable {
    direction: Direction::Higher,
    rows: &[(1_000.0, 85), (300.0, 65), (100.0, 45)],
    fallback: 25,
    healthy_at: 300.0,
};

pub(crate) const CONVERSION: BreakpointTable = BreakpointTable {
    direction: Direction::Higher,
    rows: &[(5.0, 90), (3.0, 75), (2.0, 60), (1.0, 40)],
    fallback: 25,
    healthy_at: 2.0,
};

pub(crate) const TRAFFIC: BreakpointTable = BreakpointTable {
    direction: Direction::Higher,
    rows: &[(50_000.0, 90), (10_000.0, 75), (2_000.0, 55), (500.0, 35)],
    fallback: 20,
    healthy_at: 2_000.0,
};

pub(crate) const ACQUISITION_COST: BreakpointTable = BreakpointTable {
    direction: Direction::Lower,
    rows: &[(50.0, 85), (150.0, 65), (400.0, 45)],
    fallback: 25,
    healthy_at: 150.0,
};

pub(crate) const OPS_HOURS: BreakpointTable = BreakpointTable {
    direction: Direction::Lower,
    rows: &[(20.0, 85), (35.0, 70), (50.0, 45)],
    fallback: 25,
    healthy_at: 35.0,
};

pub(crate) const FULFILLMENT: BreakpointTable = BreakpointTable {
    direction: Direction::Lower,
    rows: &[(2.0, 90), (5.0, 70), (10.0, 45)],
    fallback: 25,
    healthy_at: 5.0,
};

pub(crate) const SUPPORT_TICKETS: BreakpointTable = BreakpointTable {
    direction: Direction::Lower,
    rows: &[(10.0, 85), (30.0, 65), (75.0, 45)],
    fallback: 25,
    healthy_at: 30.0,
};

/// Revenue implied by traffic must exceed reported revenue by this factor to surface a lever.
pub(crate) const IMPLIED_REVENUE_UPSIDE: f64 = 1.3;

/// True when traffic, conversion, and order value imply meaningfully more revenue
/// than reported. Both sides must be present.
pub(crate) fn has_implied_revenue_upside(facts: &FactRecord) -> bool {
    match (facts.implied_revenue(), facts.monthly_revenue) {
        (Some(implied), Some(revenue)) => implied > revenue * IMPLIED_REVENUE_UPSIDE,
        _ => false,
    }
}
