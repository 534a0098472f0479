use super::domain::{BusinessType, Pillar};
use serde::Serialize;

/// Per-pillar weights for one business archetype. Entries sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightVector {
    pub revenue: f64,
    pub profitability: f64,
    pub retention: f64,
    pub acquisition: f64,
    pub operations: f64,
}

impl WeightVector {
    pub const fn weight(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Revenue => self.revenue,
            Pillar::Profitability => self.profitability,
            Pillar::Retention => self.retention,
            Pillar::Acquisition => self.acquisition,
            Pillar::Operations => self.operations,
        }
    }

    pub fn total(&self) -> f64 {
        Pillar::ordered()
            .into_iter()
            .map(|pillar| self.weight(pillar))
            .sum()
    }
}

const STOREFRONT: WeightVector = WeightVector {
    revenue: 0.25,
    profitability: 0.20,
    retention: 0.15,
    acquisition: 0.25,
    operations: 0.15,
};

const SUBSCRIPTION: WeightVector = WeightVector {
    revenue: 0.20,
    profitability: 0.15,
    retention: 0.30,
    acquisition: 0.20,
    operations: 0.15,
};

const SERVICE: WeightVector = WeightVector {
    revenue: 0.25,
    profitability: 0.25,
    retention: 0.20,
    acquisition: 0.15,
    operations: 0.15,
};

const CREATOR: WeightVector = WeightVector {
    revenue: 0.25,
    profitability: 0.15,
    retention: 0.15,
    acquisition: 0.35,
    operations: 0.10,
};

const LOCAL: WeightVector = WeightVector {
    revenue: 0.25,
    profitability: 0.20,
    retention: 0.20,
    acquisition: 0.10,
    operations: 0.25,
};

pub const fn weights_for(business_type: BusinessType) -> &'static WeightVector {
    match business_type {
        BusinessType::Storefront => &STOREFRONT,
        BusinessType::Subscription => &SUBSCRIPTION,
        BusinessType::Service => &SERVICE,
        BusinessType::Creator => &CREATOR,
        BusinessType::Local => &LOCAL,
    }
}
