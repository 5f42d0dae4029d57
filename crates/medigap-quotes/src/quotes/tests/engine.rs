use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::quotes::coverage;
use crate::quotes::domain::{PlanType, PriceView};
use crate::quotes::router::quote_router;

#[test]
fn single_carrier_scenario_drops_unknown_letters() {
    let responses = vec![response(
        "999",
        "Prairie Mutual",
        vec![quote("G", 8500, 8000), quote("X", 9000, 0)],
    )];

    let plans = engine().aggregate(&responses, &shopper(), None, PriceView::Standard, 3);

    assert_eq!(plans.plan_g.len(), 1);
    assert!(plans.plan_n.is_empty());

    let plan = &plans.plan_g[0];
    assert_eq!(plan.price, 85.0);
    assert_eq!(plan.price_discount, 80.0);
    assert_eq!(plan.naic, "999");
    assert_eq!(plan.plan_type, PlanType::G);
    assert_eq!(plan.coverage_summary, coverage::summary_for(PlanType::G));
}

#[test]
fn bucket_cap_keeps_only_the_cheapest() {
    let responses = vec![
        response("88366", "Cigna", vec![quote("G", 9000, 8800)]),
        response("78700", "Aetna", vec![quote("G", 7000, 6900)]),
    ];

    let plans = engine().aggregate(&responses, &shopper(), None, PriceView::Standard, 1);

    assert_eq!(plans.plan_g.len(), 1);
    assert_eq!(plans.plan_g[0].price, 70.0);
}

#[test]
fn empty_responses_yield_empty_buckets() {
    let plans = engine().aggregate(&[], &shopper(), None, PriceView::Standard, 3);
    assert!(plans.is_empty());
}

#[test]
fn aggregation_is_deterministic() {
    let responses = vec![
        response("88366", "Cigna", vec![quote("G", 9000, 8800), quote("N", 7200, 7000)]),
        response("78700", "Aetna", vec![quote("g", 9000, 8500)]),
    ];

    let first = engine().aggregate(&responses, &shopper(), None, PriceView::Discount, 3);
    let second = engine().aggregate(&responses, &shopper(), None, PriceView::Discount, 3);
    assert_eq!(first, second);
}

fn router() -> axum::Router {
    quote_router(Arc::new(engine()), 3)
}

async fn post_json(router: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
        .expect("request");

    let response = router.oneshot(request).await.expect("router dispatch");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let payload = serde_json::from_slice(&bytes).expect("json payload");
    (status, payload)
}

#[tokio::test]
async fn aggregate_endpoint_ranks_and_annotates_discounts() {
    let body = json!({
        "responses": [
            {
                "naic": "88366",
                "companyName": "Cigna",
                "quotes": [
                    { "rate": 9000, "discountRate": 8100, "age": 67, "gender": "F", "plan": "G", "tobacco": 0 },
                    { "rate": 7200, "discountRate": 7000, "age": 67, "gender": "F", "plan": "N", "tobacco": 0 }
                ]
            }
        ],
        "shopper": {
            "state": "IA", "county": "Polk", "zipCode": "50309",
            "age": 67, "gender": "F", "tobacco": false
        }
    });

    let (status, payload) = post_json(router(), "/api/v1/quotes/aggregate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["priceView"], json!("standard"));
    assert_eq!(payload["bucketCount"], json!(3));

    let plan_g = payload["planG"].as_array().expect("planG array");
    assert_eq!(plan_g.len(), 1);
    assert_eq!(plan_g[0]["price"], json!(90.0));
    assert_eq!(plan_g[0]["discountPercent"], json!(10));
    assert_eq!(plan_g[0]["displayPrice"], json!(90.0));
    assert_eq!(plan_g[0]["name"], json!("Cigna"));

    let plan_n = payload["planN"].as_array().expect("planN array");
    assert_eq!(plan_n.len(), 1);
    assert_eq!(plan_n[0]["price"], json!(72.0));
}

#[tokio::test]
async fn aggregate_endpoint_degrades_malformed_rater_payloads() {
    let body = json!({
        "responses": { "error": "rater exploded" },
        "shopper": {
            "state": "IA", "county": "Polk", "zipCode": "50309",
            "age": 67, "gender": "F", "tobacco": false
        }
    });

    let (status, payload) = post_json(router(), "/api/v1/quotes/aggregate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["planG"], json!([]));
    assert_eq!(payload["planN"], json!([]));
}

#[tokio::test]
async fn aggregate_endpoint_honors_failed_settings_envelope() {
    let body = json!({
        "responses": [
            {
                "naic": "78700",
                "companyName": "Aetna",
                "quotes": [
                    { "rate": 8000, "discountRate": 7600, "age": 67, "gender": "F", "plan": "G", "tobacco": 0 }
                ]
            }
        ],
        "shopper": {
            "state": "IA", "county": "Polk", "zipCode": "50309",
            "age": 67, "gender": "F", "tobacco": false
        },
        "orgSettings": { "success": false, "orgSettings": { "carrierContracts": ["Cigna"] } }
    });

    let (status, payload) = post_json(router(), "/api/v1/quotes/aggregate", body).await;
    assert_eq!(status, StatusCode::OK);
    let plan_g = payload["planG"].as_array().expect("planG array");
    assert_eq!(plan_g.len(), 1, "failed envelope must not restrict carriers");
}

#[tokio::test]
async fn aggregate_endpoint_rejects_unparseable_bodies() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/quotes/aggregate")
        .header("content-type", "application/json")
        .body(Body::from("{not valid json"))
        .expect("request");
    let response = router().oneshot(request).await.expect("router dispatch");
    assert!(response.status().is_client_error());

    // Well-formed JSON that cannot deserialize into the request shape is
    // also a client error, never a panic or a 500.
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/quotes/aggregate")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"shopper": 42}"#))
        .expect("request");
    let response = router().oneshot(request).await.expect("router dispatch");
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn aggregate_endpoint_returns_empty_buckets_for_empty_payload() {
    let body = json!({
        "responses": [],
        "shopper": {
            "state": "IA", "county": "Polk", "zipCode": "50309",
            "age": 67, "gender": "F", "tobacco": false
        }
    });

    let (status, payload) = post_json(router(), "/api/v1/quotes/aggregate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["planG"], json!([]));
    assert_eq!(payload["planN"], json!([]));
}

#[tokio::test]
async fn aggregate_endpoint_displays_discount_prices_in_discount_view() {
    let body = json!({
        "responses": [
            {
                "naic": "88366",
                "companyName": "Cigna",
                "quotes": [
                    { "rate": 9000, "discountRate": 8100, "age": 67, "gender": "F", "plan": "G", "tobacco": 0 }
                ]
            }
        ],
        "shopper": {
            "state": "IA", "county": "Polk", "zipCode": "50309",
            "age": 67, "gender": "F", "tobacco": false
        },
        "priceView": "discount"
    });

    let (status, payload) = post_json(router(), "/api/v1/quotes/aggregate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["priceView"], json!("discount"));

    let plan_g = payload["planG"].as_array().expect("planG array");
    assert_eq!(plan_g[0]["displayPrice"], json!(81.0));
    assert_eq!(plan_g[0]["discountPercent"], json!(10));
    assert_eq!(plan_g[0]["price"], json!(90.0));
}

#[tokio::test]
async fn zero_bucket_count_override_falls_back_to_the_default() {
    let body = json!({
        "responses": [
            {
                "naic": "88366",
                "companyName": "Cigna",
                "quotes": [
                    { "rate": 9000, "discountRate": 8100, "age": 67, "gender": "F", "plan": "G", "tobacco": 0 }
                ]
            }
        ],
        "shopper": {
            "state": "IA", "county": "Polk", "zipCode": "50309",
            "age": 67, "gender": "F", "tobacco": false
        },
        "bucketCount": 0
    });

    let (status, payload) = post_json(router(), "/api/v1/quotes/aggregate", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["bucketCount"], json!(3));
    let plan_g = payload["planG"].as_array().expect("planG array");
    assert_eq!(plan_g.len(), 1, "a zero override must not hide plans");
}

#[tokio::test]
async fn pricing_request_endpoint_applies_the_floor() {
    let body = json!({
        "shopper": {
            "state": "IA", "county": "Polk", "zipCode": "50309",
            "age": 61, "gender": "M", "tobacco": true,
            "currentCarrier": "AARP"
        },
        "effectiveDate": "2026-10-01"
    });

    let (status, payload) = post_json(router(), "/api/v1/quotes/pricing-request", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["age"], json!(65));
    assert_eq!(payload["tobacco"], json!(true));
    assert_eq!(payload["plans"], json!(["G", "N"]));
    assert_eq!(payload["carriers"], json!("supported"));
    assert_eq!(payload["effective_date"], json!("2026-10-01"));
}
