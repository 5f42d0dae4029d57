use std::cmp::Ordering;

use super::domain::{Plan, PlanType, Plans, PriceView};

/// Default display cap per bucket. Every ranked plan stays reachable through
/// the "select specific plan" path; this only limits the comparison view.
pub const DEFAULT_BUCKET_COUNT: usize = 3;

/// Partition plans into their letter buckets, stable-sort each ascending by
/// the active price view, and truncate to `bucket_count`.
///
/// The partition is total: every plan lands in exactly one bucket. Stability
/// matters so ties keep their input order and repeated renders do not shuffle
/// under the shopper.
pub(crate) fn rank_and_bucket(plans: Vec<Plan>, view: PriceView, bucket_count: usize) -> Plans {
    let mut plan_g = Vec::new();
    let mut plan_n = Vec::new();

    for plan in plans {
        match plan.plan_type {
            PlanType::G => plan_g.push(plan),
            PlanType::N => plan_n.push(plan),
        }
    }

    rank_bucket(&mut plan_g, view, bucket_count);
    rank_bucket(&mut plan_n, view, bucket_count);

    Plans { plan_g, plan_n }
}

fn rank_bucket(bucket: &mut Vec<Plan>, view: PriceView, bucket_count: usize) {
    bucket.sort_by(|a, b| {
        view.price_of(a)
            .partial_cmp(&view.price_of(b))
            .unwrap_or(Ordering::Equal)
    });
    bucket.truncate(bucket_count);
}
