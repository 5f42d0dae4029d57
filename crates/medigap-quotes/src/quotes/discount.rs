use super::domain::Plan;

/// Displayed household-discount percentage for a plan: how far the discount
/// price sits below the standard price, rounded to a whole percent.
///
/// A zero (or negative) standard price would divide by zero upstream; it is
/// guarded here and displays as no discount. The result is clamped so the
/// shopper never sees a negative percentage.
pub fn discount_percent(plan: &Plan) -> u8 {
    if plan.price <= 0.0 {
        return 0;
    }

    let percent = ((1.0 - plan.price_discount / plan.price) * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}
