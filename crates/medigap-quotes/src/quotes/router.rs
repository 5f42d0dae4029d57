use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::discount::discount_percent;
use super::domain::{OrgSettingsEnvelope, Plan, PriceView, ShopperContext};
use super::engine::QuoteAggregationEngine;
use super::ranker::DEFAULT_BUCKET_COUNT;
use super::request::{self, PricingRequest};

#[derive(Clone)]
struct QuoteRouterState {
    engine: Arc<QuoteAggregationEngine>,
    default_bucket_count: usize,
}

/// Router builder exposing the aggregation pipeline and the outbound
/// pricing-request builder.
pub fn quote_router(engine: Arc<QuoteAggregationEngine>, default_bucket_count: usize) -> Router {
    let state = QuoteRouterState {
        engine,
        default_bucket_count,
    };

    Router::new()
        .route("/api/v1/quotes/aggregate", post(aggregate_handler))
        .route(
            "/api/v1/quotes/pricing-request",
            post(pricing_request_handler),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AggregateRequest {
    /// Raw rater payload. Kept as loose JSON so a shape mismatch degrades to
    /// empty buckets instead of a request error.
    #[serde(default)]
    pub(crate) responses: serde_json::Value,
    pub(crate) shopper: ShopperContext,
    #[serde(default)]
    pub(crate) org_settings: Option<OrgSettingsEnvelope>,
    #[serde(default)]
    pub(crate) price_view: PriceView,
    #[serde(default)]
    pub(crate) bucket_count: Option<usize>,
}

/// A ranked plan plus the read-side discount derivation, so the UI does no
/// arithmetic.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: Plan,
    pub discount_percent: u8,
    pub display_price: f64,
}

impl PlanView {
    /// Derive the display fields for a ranked plan under the active view.
    pub fn of(plan: Plan, view: PriceView) -> Self {
        let discount_percent = discount_percent(&plan);
        let display_price = view.price_of(&plan);
        Self {
            plan,
            discount_percent,
            display_price,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    pub price_view: PriceView,
    pub bucket_count: usize,
    pub plan_g: Vec<PlanView>,
    pub plan_n: Vec<PlanView>,
}

async fn aggregate_handler(
    State(state): State<QuoteRouterState>,
    Json(payload): Json<AggregateRequest>,
) -> impl IntoResponse {
    let AggregateRequest {
        responses,
        shopper,
        org_settings,
        price_view,
        bucket_count,
    } = payload;

    let responses = request::decode_rater_payload(responses);
    let settings = org_settings.and_then(OrgSettingsEnvelope::into_settings);
    // A non-positive override would hide every plan; fall back to the
    // configured cap, matching the config-level validation.
    let bucket_count = bucket_count
        .filter(|count| *count > 0)
        .unwrap_or(state.default_bucket_count);

    let plans = state.engine.aggregate(
        &responses,
        &shopper,
        settings.as_ref(),
        price_view,
        bucket_count,
    );

    let body = AggregateResponse {
        price_view,
        bucket_count,
        plan_g: plans
            .plan_g
            .into_iter()
            .map(|plan| PlanView::of(plan, price_view))
            .collect(),
        plan_n: plans
            .plan_n
            .into_iter()
            .map(|plan| PlanView::of(plan, price_view))
            .collect(),
    };
    (StatusCode::OK, Json(body))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PricingRequestBody {
    pub(crate) shopper: ShopperContext,
    #[serde(default)]
    pub(crate) effective_date: Option<NaiveDate>,
}

async fn pricing_request_handler(
    State(state): State<QuoteRouterState>,
    Json(payload): Json<PricingRequestBody>,
) -> Json<PricingRequest> {
    let effective_date = payload
        .effective_date
        .unwrap_or_else(|| request::default_effective_date(Local::now().date_naive()));
    Json(state.engine.pricing_request(&payload.shopper, effective_date))
}

/// Convenience builder wiring the default display cap.
pub fn quote_router_with_defaults(engine: Arc<QuoteAggregationEngine>) -> Router {
    quote_router(engine, DEFAULT_BUCKET_COUNT)
}
