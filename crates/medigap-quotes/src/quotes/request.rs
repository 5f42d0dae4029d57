use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Gender, PlanType, RawCarrierQuoteResponse, ShopperContext};

/// Outbound body for the upstream rater (`POST /api/quotes`). The eligibility
/// age floor is applied here, at request-construction time, because the rater
/// only returns plans for the age it was asked about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    pub zip_code: String,
    pub state: String,
    pub county: String,
    pub age: u8,
    pub gender: Gender,
    pub tobacco: bool,
    pub plans: Vec<String>,
    pub carriers: String,
    pub effective_date: NaiveDate,
}

impl PricingRequest {
    pub fn from_context(ctx: &ShopperContext, effective_date: NaiveDate) -> Self {
        Self {
            zip_code: ctx.zip_code.clone(),
            state: ctx.state.clone(),
            county: ctx.county.clone(),
            age: ctx.effective_age(),
            gender: ctx.gender,
            tobacco: ctx.tobacco,
            plans: [PlanType::G, PlanType::N]
                .iter()
                .map(|plan| plan.letter().to_string())
                .collect(),
            carriers: "supported".to_string(),
            effective_date,
        }
    }
}

/// First day of the month after `today`, the rater's default coverage start.
pub fn default_effective_date(today: NaiveDate) -> NaiveDate {
    let (year, month) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today)
}

/// Decode a rater payload, treating any shape mismatch as an empty carrier
/// list. Upstream transport and parse failures surface to the engine as "no
/// responses", never as an error the shopper sees.
pub fn decode_rater_payload(payload: serde_json::Value) -> Vec<RawCarrierQuoteResponse> {
    match serde_json::from_value(payload) {
        Ok(responses) => responses,
        Err(err) => {
            debug!(error = %err, "rater payload did not match expected shape; treating as empty");
            Vec::new()
        }
    }
}
