//! Authorization policies layered after authentication.
//!
//! Pure checks with no I/O. Callers pass fields of the freshly loaded
//! principal and bubble the error straight into the response.

use super::error::AuthError;
use super::types::{AccountStatus, AdminRole, SubscriptionPlan, SubscriptionStatus};

/// Role-hierarchy check for the admin domain.
///
/// A missing or unknown role carries level 0 and authorizes nothing.
pub(super) fn require_role(role: Option<AdminRole>, required: AdminRole) -> Result<(), AuthError> {
    if role.map_or(0, AdminRole::level) >= required.level() {
        Ok(())
    } else {
        Err(AuthError::denied("Insufficient role"))
    }
}

/// Every principal family must be `ACTIVE` to stay authenticated.
pub(super) fn require_active(status: AccountStatus) -> Result<(), AuthError> {
    if status.is_active() {
        Ok(())
    } else {
        Err(AuthError::AccountInactive)
    }
}

/// Premium-tier check: a paid active plan or a running trial passes.
pub(super) fn require_premium_access(
    plan: SubscriptionPlan,
    status: SubscriptionStatus,
) -> Result<(), AuthError> {
    let paid = plan == SubscriptionPlan::Premium && status == SubscriptionStatus::Active;
    if paid || status == SubscriptionStatus::Trial {
        Ok(())
    } else {
        Err(AuthError::upgrade_required("Premium subscription required"))
    }
}

/// Paid-only check: a paid active plan passes, a trial does not.
#[allow(dead_code)]
pub(super) fn require_paid_subscription(
    plan: SubscriptionPlan,
    status: SubscriptionStatus,
) -> Result<(), AuthError> {
    if plan == SubscriptionPlan::Premium && status == SubscriptionStatus::Active {
        Ok(())
    } else {
        Err(AuthError::upgrade_required(
            "Active premium subscription required",
        ))
    }
}
