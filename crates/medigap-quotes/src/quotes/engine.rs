use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::domain::{OrgSettings, Plans, PriceView, RawCarrierQuoteResponse, ShopperContext};
use super::registry::CarrierRegistry;
use super::request::PricingRequest;
use super::{eligibility, normalizer, ranker};

/// Pure orchestrator over the quote pipeline: normalize, filter, rank.
///
/// The engine holds no per-request state and never suspends; it is a
/// deterministic function of its inputs and is safe to call concurrently.
/// Upstream transport failures are not its concern: an empty response list
/// yields empty buckets.
pub struct QuoteAggregationEngine {
    registry: Arc<dyn CarrierRegistry>,
}

impl QuoteAggregationEngine {
    pub fn new(registry: Arc<dyn CarrierRegistry>) -> Self {
        Self { registry }
    }

    /// Raw carrier responses + shopper context + org settings → ranked,
    /// bucketed plans for the given price view.
    pub fn aggregate(
        &self,
        responses: &[RawCarrierQuoteResponse],
        ctx: &ShopperContext,
        settings: Option<&OrgSettings>,
        view: PriceView,
        bucket_count: usize,
    ) -> Plans {
        let normalized = normalizer::normalize(responses, ctx, self.registry.as_ref());
        let eligible = eligibility::filter(normalized, ctx, settings, self.registry.as_ref());
        let plans = ranker::rank_and_bucket(eligible, view, bucket_count);

        debug!(
            carriers = responses.len(),
            plan_g = plans.plan_g.len(),
            plan_n = plans.plan_n.len(),
            ?view,
            "aggregated quote payload"
        );
        plans
    }

    /// Outbound rater request for the shopper, with the age floor applied.
    pub fn pricing_request(&self, ctx: &ShopperContext, effective_date: NaiveDate) -> PricingRequest {
        PricingRequest::from_context(ctx, effective_date)
    }
}
