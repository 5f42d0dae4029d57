use std::sync::Arc;

use crate::quotes::domain::{
    Gender, OrgSettings, Plan, PlanType, RawCarrierQuoteResponse, RawQuote, ShopperContext,
};
use crate::quotes::engine::QuoteAggregationEngine;
use crate::quotes::registry::StaticCarrierRegistry;

pub(super) fn registry() -> StaticCarrierRegistry {
    StaticCarrierRegistry::seeded()
}

pub(super) fn engine() -> QuoteAggregationEngine {
    QuoteAggregationEngine::new(Arc::new(registry()))
}

pub(super) fn shopper() -> ShopperContext {
    ShopperContext {
        state: "IA".to_string(),
        county: "Polk".to_string(),
        zip_code: "50309".to_string(),
        age: 67,
        gender: Gender::Female,
        tobacco: false,
        current_carrier: None,
    }
}

pub(super) fn quote(plan: &str, rate: u32, discount_rate: u32) -> RawQuote {
    RawQuote {
        rate,
        discount_rate,
        discount_category: None,
        age: 67,
        gender: Gender::Female,
        plan: plan.to_string(),
        tobacco: false,
    }
}

pub(super) fn response(naic: &str, name: &str, quotes: Vec<RawQuote>) -> RawCarrierQuoteResponse {
    RawCarrierQuoteResponse {
        naic: naic.to_string(),
        company_name: name.to_string(),
        quotes,
    }
}

pub(super) fn settings(contracts: &[&str]) -> OrgSettings {
    OrgSettings {
        carrier_contracts: contracts.iter().map(|c| (*c).to_string()).collect(),
    }
}

pub(super) fn plan(naic: &str, plan_type: PlanType, price: f64, price_discount: f64) -> Plan {
    Plan {
        price,
        price_discount,
        discount_category: None,
        age: 67,
        gender: Gender::Female,
        naic: naic.to_string(),
        name: naic.to_string(),
        image: "/images/carriers/default.png".to_string(),
        plan_type,
        state: "IA".to_string(),
        tobacco: false,
        coverage_summary: Vec::new(),
    }
}
