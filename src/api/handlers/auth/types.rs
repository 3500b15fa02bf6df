//! Principal domain types and request/response types for the auth endpoints.
//!
//! Role, status, and plan names are stored verbatim in the database and
//! serialized verbatim on the wire: one case-sensitive token set end to end.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Which of the three account families a token belongs to.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalType {
    Admin,
    Fundi,
    Client,
}

impl PrincipalType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Fundi => "fundi",
            Self::Client => "client",
        }
    }
}

/// Admin roles form a strict hierarchy; a higher role inherits everything below it.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Moderator,
    Support,
}

impl AdminRole {
    /// Hierarchy level used for authorization comparisons.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::SuperAdmin => 4,
            Self::Admin => 3,
            Self::Moderator => 2,
            Self::Support => 1,
        }
    }

    /// Parse a stored role name; unknown values yield `None` and authorize as level 0.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SUPER_ADMIN" => Some(Self::SuperAdmin),
            "ADMIN" => Some(Self::Admin),
            "MODERATOR" => Some(Self::Moderator),
            "SUPPORT" => Some(Self::Support),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::Support => "SUPPORT",
        }
    }
}

/// Account lifecycle state shared by all principal families.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
    Pending,
    Suspended,
}

impl AccountStatus {
    /// Only `ACTIVE` principals may authenticate or stay authenticated.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(Self::Active),
            "INACTIVE" => Some(Self::Inactive),
            "PENDING" => Some(Self::Pending),
            "SUSPENDED" => Some(Self::Suspended),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Pending => "PENDING",
            Self::Suspended => "SUSPENDED",
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionPlan {
    Free,
    Premium,
}

impl SubscriptionPlan {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FREE" => Some(Self::Free),
            "PREMIUM" => Some(Self::Premium),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Premium => "PREMIUM",
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    Expired,
}

impl SubscriptionStatus {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TRIAL" => Some(Self::Trial),
            "ACTIVE" => Some(Self::Active),
            "EXPIRED" => Some(Self::Expired),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trial => "TRIAL",
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
        }
    }
}

/// Access tier a fundi account currently sits in.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    Free,
    Trial,
    Premium,
}

/// Derived, non-persisted view of what a fundi account can reach right now.
#[derive(ToSchema, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    pub level: AccessLevel,
    pub has_trial_access: bool,
    pub trial_days_left: i64,
    pub can_access_premium_features: bool,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub identifier: String,
    pub secret: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PasswordChangeRequest {
    pub current: String,
    pub new: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct StatusUpdateRequest {
    pub status: AccountStatus,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SubscriptionUpdateRequest {
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body; `upgradeRequired` appears only on subscription denials.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_required: Option<bool>,
}

/// Profile snapshot returned at login and by `GET /v1/admin/session`.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
    /// `None` when the stored role name is unrecognized.
    pub role: Option<AdminRole>,
    pub status: AccountStatus,
    pub last_login: Option<i64>,
    pub created_at: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FundiProfile {
    pub id: Uuid,
    pub phone: String,
    pub email: Option<String>,
    pub status: AccountStatus,
    pub subscription_plan: SubscriptionPlan,
    pub subscription_status: SubscriptionStatus,
    pub trial_ends_at: Option<i64>,
    pub last_login: Option<i64>,
    pub created_at: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub id: Uuid,
    pub email: String,
    pub status: AccountStatus,
    pub last_login: Option<i64>,
    pub created_at: i64,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AdminLoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FundiLoginResponse {
    pub token: String,
    pub fundi: FundiProfile,
    pub access_info: AccessInfo,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ClientLoginResponse {
    pub token: String,
    pub client: ClientProfile,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AdminSessionResponse {
    pub admin: AdminProfile,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FundiSessionResponse {
    pub fundi: FundiProfile,
    pub access_info: AccessInfo,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ClientSessionResponse {
    pub client: ClientProfile,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AdminListResponse {
    pub admins: Vec<AdminProfile>,
}
