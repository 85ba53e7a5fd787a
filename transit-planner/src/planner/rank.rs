//! Plan arbitration across profiles.

use crate::domain::RoutePlan;

/// Pick the best plan among per-profile results.
///
/// Lowest estimated cost wins; ties go to the higher-priority profile
/// (fast, then simple, then accessible). Returns `None` when no profile
/// produced a plan.
pub fn arbitrate(plans: impl IntoIterator<Item = RoutePlan>) -> Option<RoutePlan> {
    plans
        .into_iter()
        .min_by_key(|plan| (plan.estimated_cost, plan.profile))
}
