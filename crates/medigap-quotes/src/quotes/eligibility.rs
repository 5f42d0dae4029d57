use std::collections::HashSet;

use tracing::debug;

use super::domain::{OrgSettings, Plan, ShopperContext};
use super::registry::CarrierRegistry;

/// Apply the organization carrier-contract rule, then the shopper's
/// current-carrier exclusion. Both are independent predicate filters; the
/// order is fixed for audit clarity.
///
/// The age floor is not applied here: it is clamped into the pricing request
/// before the rater is called, since the rater only returns plans for the age
/// it was asked about.
pub(crate) fn filter(
    plans: Vec<Plan>,
    ctx: &ShopperContext,
    settings: Option<&OrgSettings>,
    registry: &dyn CarrierRegistry,
) -> Vec<Plan> {
    let plans = apply_contract_rule(plans, settings, registry);
    apply_current_carrier_exclusion(plans, ctx, registry)
}

/// Keep a plan only if its carrier is contracted for the organization.
/// Fail-open twice over: absent settings keep everything, and a plan whose
/// NAIC does not resolve to a known carrier is kept rather than dropped.
fn apply_contract_rule(
    plans: Vec<Plan>,
    settings: Option<&OrgSettings>,
    registry: &dyn CarrierRegistry,
) -> Vec<Plan> {
    let Some(settings) = settings else {
        return plans;
    };

    let before = plans.len();
    let kept: Vec<Plan> = plans
        .into_iter()
        .filter(|plan| match registry.naic_to_carrier(&plan.naic) {
            Some(carrier) => settings.is_contracted(&registry.display_name(&carrier)),
            None => true,
        })
        .collect();

    if kept.len() < before {
        debug!(
            dropped = before - kept.len(),
            "carrier-contract rule removed plans"
        );
    }
    kept
}

/// Drop every plan filed under any NAIC code belonging to the shopper's
/// current carrier. An unresolvable current-carrier string applies no
/// exclusion.
fn apply_current_carrier_exclusion(
    plans: Vec<Plan>,
    ctx: &ShopperContext,
    registry: &dyn CarrierRegistry,
) -> Vec<Plan> {
    let excluded: HashSet<String> = ctx
        .current_carrier
        .as_deref()
        .and_then(|raw| registry.resolve(raw))
        .map(|carrier| registry.carrier_to_naics(&carrier).into_iter().collect())
        .unwrap_or_default();

    if excluded.is_empty() {
        return plans;
    }

    let before = plans.len();
    let kept: Vec<Plan> = plans
        .into_iter()
        .filter(|plan| !excluded.contains(&plan.naic))
        .collect();

    if kept.len() < before {
        debug!(
            dropped = before - kept.len(),
            "current-carrier exclusion removed plans"
        );
    }
    kept
}
