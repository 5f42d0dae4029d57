//! Quote aggregation & ranking for Medicare-supplement shopping.
//!
//! The pipeline normalizes raw carrier payloads, applies eligibility filters,
//! then ranks and caps each plan-letter bucket. Every stage is a pure function
//! over immutable inputs. Nothing in here performs I/O or
//! holds state between invocations; the HTTP surface in [`router`] is a thin
//! JSON wrapper over [`QuoteAggregationEngine`].

pub mod coverage;
pub mod discount;
pub mod domain;
pub mod engine;
pub mod registry;
pub mod request;
pub mod router;

pub(crate) mod eligibility;
pub(crate) mod normalizer;
pub(crate) mod ranker;

#[cfg(test)]
mod tests;

pub use discount::discount_percent;
pub use domain::{
    CoverageItem, Gender, OrgSettings, OrgSettingsEnvelope, Plan, PlanType, Plans, PriceView,
    RawCarrierQuoteResponse, RawQuote, ShopperContext, MINIMUM_ELIGIBILITY_AGE,
};
pub use engine::QuoteAggregationEngine;
pub use ranker::DEFAULT_BUCKET_COUNT;
pub use registry::{Carrier, CarrierRegistry, StaticCarrierRegistry};
pub use request::{decode_rater_payload, default_effective_date, PricingRequest};
pub use router::{quote_router, quote_router_with_defaults, AggregateResponse, PlanView};
