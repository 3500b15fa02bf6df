//! Fundi subscription and trial access rules.

use super::types::{AccessInfo, AccessLevel, SubscriptionPlan, SubscriptionStatus};

const SECONDS_PER_DAY: i64 = 86_400;

/// Whether a persisted subscription status may transition to `next`.
///
/// Trials are granted at signup only, so no write may move an account
/// into `TRIAL`. Active and expired move freely as payment lapses or
/// resumes.
pub(super) fn transition_allowed(current: SubscriptionStatus, next: SubscriptionStatus) -> bool {
    use SubscriptionStatus::{Active, Expired, Trial};
    match (current, next) {
        (_, Trial) => false,
        (Trial, Active | Expired) => true,
        (Active | Expired, Active | Expired) => true,
    }
}

/// Whether a trial has run past its end and must be persisted as
/// expired before the request proceeds.
pub(super) fn trial_expired(
    status: SubscriptionStatus,
    trial_ends_at: Option<i64>,
    now_unix: i64,
) -> bool {
    status == SubscriptionStatus::Trial && trial_ends_at.is_some_and(|ends_at| ends_at < now_unix)
}

/// Whole days of trial remaining, rounded up, never negative.
pub(super) fn trial_days_left(trial_ends_at: Option<i64>, now_unix: i64) -> i64 {
    let Some(ends_at) = trial_ends_at else {
        return 0;
    };
    let seconds = ends_at - now_unix;
    if seconds <= 0 {
        0
    } else {
        (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
    }
}

/// Derived access view for a fundi account.
///
/// Never persisted; recomputed on every authenticated request so
/// downstream handlers do not re-derive the tier rule themselves.
pub(super) fn access_info(
    plan: SubscriptionPlan,
    status: SubscriptionStatus,
    trial_ends_at: Option<i64>,
    now_unix: i64,
) -> AccessInfo {
    let has_trial_access = status == SubscriptionStatus::Trial;
    let paid = plan == SubscriptionPlan::Premium && status == SubscriptionStatus::Active;

    let level = if has_trial_access {
        AccessLevel::Trial
    } else if paid {
        AccessLevel::Premium
    } else {
        AccessLevel::Free
    };

    AccessInfo {
        level,
        has_trial_access,
        trial_days_left: if has_trial_access {
            trial_days_left(trial_ends_at, now_unix)
        } else {
            0
        },
        can_access_premium_features: paid || has_trial_access,
    }
}
