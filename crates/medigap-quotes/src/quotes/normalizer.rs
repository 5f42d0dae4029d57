use tracing::debug;

use super::coverage;
use super::domain::{Plan, PlanType, RawCarrierQuoteResponse, RawQuote, ShopperContext};
use super::registry::CarrierRegistry;

/// Logo shown when an NAIC code does not resolve to a known carrier.
pub(crate) const FALLBACK_LOGO: &str = "/images/carriers/default.png";

const CENTS_PER_DOLLAR: f64 = 100.0;

/// Shape raw carrier payloads into normalized plans: a pure 1:N transform
/// with no filtering, sorting, or eligibility logic.
///
/// Quotes whose plan letter is not a supported supplement plan are silently
/// dropped; malformed letters are not an error.
pub(crate) fn normalize(
    responses: &[RawCarrierQuoteResponse],
    ctx: &ShopperContext,
    registry: &dyn CarrierRegistry,
) -> Vec<Plan> {
    let mut plans = Vec::new();

    for response in responses {
        let name = registry
            .naic_to_carrier(&response.naic)
            .map(|carrier| registry.display_name(&carrier))
            .unwrap_or_else(|| response.company_name.clone());
        let image = registry
            .logo_path(&response.naic)
            .unwrap_or_else(|| FALLBACK_LOGO.to_string());

        for quote in &response.quotes {
            let Some(plan_type) = PlanType::from_code(&quote.plan) else {
                debug!(naic = %response.naic, plan = %quote.plan, "dropping unsupported plan letter");
                continue;
            };

            plans.push(plan_from_quote(
                quote,
                plan_type,
                response,
                name.clone(),
                image.clone(),
                ctx,
            ));
        }
    }

    plans
}

fn plan_from_quote(
    quote: &RawQuote,
    plan_type: PlanType,
    response: &RawCarrierQuoteResponse,
    name: String,
    image: String,
    ctx: &ShopperContext,
) -> Plan {
    Plan {
        price: dollars(quote.rate),
        price_discount: dollars(effective_discount_rate(quote)),
        discount_category: quote.discount_category.clone(),
        age: quote.age,
        gender: quote.gender,
        naic: response.naic.clone(),
        name,
        image,
        plan_type,
        state: ctx.state.clone(),
        tobacco: quote.tobacco,
        coverage_summary: coverage::summary_for(plan_type),
    }
}

/// Validation boundary for the upstream rater: a discount of zero means "no
/// household discount offered", and a discount above the standard rate is
/// treated the same way rather than shown to the shopper.
fn effective_discount_rate(quote: &RawQuote) -> u32 {
    if quote.discount_rate == 0 || quote.discount_rate > quote.rate {
        quote.rate
    } else {
        quote.discount_rate
    }
}

fn dollars(cents: u32) -> f64 {
    f64::from(cents) / CENTS_PER_DOLLAR
}
