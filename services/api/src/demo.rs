use crate::infra::parse_date;
use chrono::{Local, NaiveDate};
use clap::Args;
use medigap_quotes::error::AppError;
use medigap_quotes::quotes::{
    decode_rater_payload, default_effective_date, discount_percent, AggregateResponse, Gender,
    OrgSettingsEnvelope, Plan, PlanView, PriceView, QuoteAggregationEngine,
    RawCarrierQuoteResponse, RawQuote, ShopperContext, StaticCarrierRegistry, DEFAULT_BUCKET_COUNT,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Shopper age (the rater floor of 65 still applies)
    #[arg(long, default_value_t = 67)]
    pub(crate) age: u8,
    /// Shopper gender, M or F
    #[arg(long, default_value = "F")]
    pub(crate) gender: String,
    /// Name the shopper's current carrier to exercise the exclusion rule
    #[arg(long)]
    pub(crate) current_carrier: Option<String>,
    /// Coverage effective date (YYYY-MM-DD). Defaults to the first of next month.
    #[arg(long, value_parser = parse_date)]
    pub(crate) effective_date: Option<NaiveDate>,
    /// Per-bucket display cap
    #[arg(long, default_value_t = DEFAULT_BUCKET_COUNT)]
    pub(crate) bucket_count: usize,
}

#[derive(Args, Debug)]
pub(crate) struct AggregateArgs {
    /// JSON file holding the aggregation request (responses, shopper, optional orgSettings)
    #[arg(long)]
    pub(crate) payload: PathBuf,
    /// Per-bucket display cap override
    #[arg(long)]
    pub(crate) bucket_count: Option<usize>,
}

/// File shape mirrors the HTTP aggregate endpoint body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregateFile {
    #[serde(default)]
    responses: serde_json::Value,
    shopper: ShopperContext,
    #[serde(default)]
    org_settings: Option<OrgSettingsEnvelope>,
    #[serde(default)]
    price_view: PriceView,
    #[serde(default)]
    bucket_count: Option<usize>,
}

pub(crate) fn run_aggregate(args: AggregateArgs) -> Result<(), AppError> {
    let AggregateArgs {
        payload,
        bucket_count,
    } = args;

    let raw = std::fs::read_to_string(payload)?;
    let file: AggregateFile = serde_json::from_str(&raw)?;

    let responses = decode_rater_payload(file.responses);
    let settings = file.org_settings.and_then(OrgSettingsEnvelope::into_settings);
    let bucket_count = bucket_count
        .or(file.bucket_count)
        .filter(|count| *count > 0)
        .unwrap_or(DEFAULT_BUCKET_COUNT);

    let engine = engine();
    let plans = engine.aggregate(
        &responses,
        &file.shopper,
        settings.as_ref(),
        file.price_view,
        bucket_count,
    );

    let body = AggregateResponse {
        price_view: file.price_view,
        bucket_count,
        plan_g: plans
            .plan_g
            .into_iter()
            .map(|plan| PlanView::of(plan, file.price_view))
            .collect(),
        plan_n: plans
            .plan_n
            .into_iter()
            .map(|plan| PlanView::of(plan, file.price_view))
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        age,
        gender,
        current_carrier,
        effective_date,
        bucket_count,
    } = args;

    let gender = match gender.trim().to_ascii_uppercase().as_str() {
        "M" => Gender::Male,
        _ => Gender::Female,
    };
    let shopper = ShopperContext {
        state: "IA".to_string(),
        county: "Polk".to_string(),
        zip_code: "50309".to_string(),
        age,
        gender,
        tobacco: false,
        current_carrier,
    };
    let effective_date =
        effective_date.unwrap_or_else(|| default_effective_date(Local::now().date_naive()));

    let engine = engine();

    println!("Medigap quote aggregation demo");
    let request = engine.pricing_request(&shopper, effective_date);
    println!("\nOutbound rater request");
    println!("{}", serde_json::to_string_pretty(&request)?);

    let responses = sample_rater_responses(age, gender);
    for view in [PriceView::Standard, PriceView::Discount] {
        let plans = engine.aggregate(&responses, &shopper, None, view, bucket_count);
        println!("\nRanked buckets ({:?} pricing, top {})", view, bucket_count);
        render_bucket("Plan G", &plans.plan_g, view);
        render_bucket("Plan N", &plans.plan_n, view);
    }

    Ok(())
}

fn engine() -> QuoteAggregationEngine {
    QuoteAggregationEngine::new(Arc::new(StaticCarrierRegistry::seeded()))
}

fn render_bucket(label: &str, plans: &[Plan], view: PriceView) {
    if plans.is_empty() {
        println!("- {}: no eligible quotes", label);
        return;
    }

    println!("- {}:", label);
    for plan in plans {
        println!(
            "    {} (NAIC {}) ${:.2}/mo | household discount {}%",
            plan.name,
            plan.naic,
            view.price_of(plan),
            discount_percent(plan)
        );
    }
}

fn sample_rater_responses(age: u8, gender: Gender) -> Vec<RawCarrierQuoteResponse> {
    let quote = |plan: &str, rate: u32, discount_rate: u32| RawQuote {
        rate,
        discount_rate,
        discount_category: Some("household".to_string()),
        age: age.max(65),
        gender,
        plan: plan.to_string(),
        tobacco: false,
    };

    vec![
        RawCarrierQuoteResponse {
            naic: "71412".to_string(),
            company_name: "Mutual of Omaha".to_string(),
            quotes: vec![quote("G", 11350, 10650), quote("N", 9125, 8560)],
        },
        RawCarrierQuoteResponse {
            naic: "78700".to_string(),
            company_name: "Aetna".to_string(),
            quotes: vec![quote("G", 10980, 10420), quote("N", 8890, 8440)],
        },
        RawCarrierQuoteResponse {
            naic: "88366".to_string(),
            company_name: "Cigna".to_string(),
            quotes: vec![quote("G", 11875, 11050), quote("F", 13200, 12600)],
        },
        RawCarrierQuoteResponse {
            naic: "79413".to_string(),
            company_name: "UnitedHealthcare".to_string(),
            quotes: vec![quote("N", 9480, 9050)],
        },
    ]
}
