//! Admin authentication and management endpoints.

use axum::{
    Json,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use super::error::AuthError;
use super::password::{burn_password_check, hash_password, verify_password};
use super::policy::require_role;
use super::principal::require_admin;
use super::state::AuthState;
use super::storage;
use super::subscription::transition_allowed;
use super::token::issue_token;
use super::{missing_payload, weak_password};
use super::types::{
    AccountStatus, AdminListResponse, AdminLoginResponse, AdminProfile, AdminRole,
    AdminSessionResponse, ErrorBody, FundiProfile, LoginRequest, MessageResponse,
    PasswordChangeRequest, PrincipalType, StatusUpdateRequest, SubscriptionUpdateRequest,
};
use super::utils::{extract_client_ip, normalize_email};
use crate::api::handlers::{valid_email, valid_password};

#[utoipa::path(
    post,
    path = "/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = AdminLoginResponse),
        (status = 400, description = "Missing payload", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    ),
    tag = "admin"
)]
pub async fn login(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Response, AuthError> {
    let Some(Json(request)) = payload else {
        return Ok(missing_payload());
    };

    let email = normalize_email(&request.identifier);
    // Malformed identifiers get the same generic rejection as unknown
    // ones, including the hash burn, so neither the body nor the
    // timing says whether an account exists.
    if !valid_email(&email) {
        burn_password_check(&request.secret);
        return Err(AuthError::InvalidCredential);
    }

    let Some(record) = storage::lookup_admin_by_email(&pool, &email).await? else {
        burn_password_check(&request.secret);
        return Err(AuthError::InvalidCredential);
    };

    if !verify_password(&request.secret, &record.password_hash)? {
        return Err(AuthError::InvalidCredential);
    }
    if !record.status.is_active() {
        return Err(AuthError::AccountInactive);
    }

    let token = issue_token(&auth_state, record.id, PrincipalType::Admin)?;
    if let Err(err) = storage::record_admin_login(&pool, record.id, extract_client_ip(&headers)).await
    {
        error!("Failed to record admin login: {err}");
    }

    let response = AdminLoginResponse {
        token,
        admin: AdminProfile::from(&record),
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

#[utoipa::path(
    post,
    path = "/v1/admin/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "admin"
)]
pub async fn logout() -> impl IntoResponse {
    // Stateless tokens cannot be revoked server-side; acknowledge and
    // let the client clear its local state.
    (
        StatusCode::OK,
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/v1/admin/session",
    responses(
        (status = 200, description = "Current admin", body = AdminSessionResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Bad token", body = ErrorBody)
    ),
    tag = "admin"
)]
pub async fn session(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<Json<AdminSessionResponse>, AuthError> {
    let record = require_admin(&auth_state, &pool, &headers).await?;
    Ok(Json(AdminSessionResponse {
        admin: AdminProfile::from(&record),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/admin/password",
    request_body = PasswordChangeRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 401, description = "Wrong current password", body = ErrorBody)
    ),
    tag = "admin"
)]
pub async fn change_password(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<PasswordChangeRequest>>,
) -> Result<Response, AuthError> {
    let record = require_admin(&auth_state, &pool, &headers).await?;
    let Some(Json(request)) = payload else {
        return Ok(missing_payload());
    };

    if !verify_password(&request.current, &record.password_hash)? {
        return Err(AuthError::InvalidCredential);
    }
    if !valid_password(&request.new) {
        return Ok(weak_password());
    }

    let hash = hash_password(&request.new)?;
    storage::update_admin_password(&pool, record.id, &hash).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/v1/admin/admins",
    responses(
        (status = 200, description = "All admin accounts", body = AdminListResponse),
        (status = 403, description = "Requires the ADMIN role", body = ErrorBody)
    ),
    tag = "admin"
)]
pub async fn list_admins(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<Json<AdminListResponse>, AuthError> {
    let record = require_admin(&auth_state, &pool, &headers).await?;
    require_role(record.role, AdminRole::Admin)?;

    let admins = storage::list_admins(&pool).await?;
    Ok(Json(AdminListResponse {
        admins: admins.iter().map(AdminProfile::from).collect(),
    }))
}

#[utoipa::path(
    put,
    path = "/v1/admin/admins/{id}/status",
    request_body = StatusUpdateRequest,
    params(
        ("id" = Uuid, Path, description = "Admin account id")
    ),
    responses(
        (status = 200, description = "Updated admin", body = AdminProfile),
        (status = 403, description = "Requires the SUPER_ADMIN role", body = ErrorBody),
        (status = 404, description = "Unknown admin id", body = MessageResponse)
    ),
    tag = "admin"
)]
pub async fn update_admin_status(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    Path(id): Path<Uuid>,
    payload: Option<Json<StatusUpdateRequest>>,
) -> Result<Response, AuthError> {
    let record = require_admin(&auth_state, &pool, &headers).await?;
    require_role(record.role, AdminRole::SuperAdmin)?;

    let Some(Json(request)) = payload else {
        return Ok(missing_payload());
    };
    // This endpoint toggles between ACTIVE, INACTIVE, and PENDING;
    // SUSPENDED is an operational state it never sets.
    if request.status == AccountStatus::Suspended {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(MessageResponse {
                message: "Unsupported status".to_string(),
            }),
        )
            .into_response());
    }

    match storage::update_admin_status(&pool, id, request.status).await? {
        Some(updated) => Ok((StatusCode::OK, Json(AdminProfile::from(&updated))).into_response()),
        None => Ok(not_found("Admin not found")),
    }
}

#[utoipa::path(
    put,
    path = "/v1/admin/fundis/{id}/subscription",
    request_body = SubscriptionUpdateRequest,
    params(
        ("id" = Uuid, Path, description = "Fundi account id")
    ),
    responses(
        (status = 200, description = "Updated fundi", body = FundiProfile),
        (status = 403, description = "Requires the ADMIN role", body = ErrorBody),
        (status = 404, description = "Unknown fundi id", body = MessageResponse),
        (status = 409, description = "Transition not allowed", body = MessageResponse)
    ),
    tag = "admin"
)]
pub async fn update_fundi_subscription(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    Path(id): Path<Uuid>,
    payload: Option<Json<SubscriptionUpdateRequest>>,
) -> Result<Response, AuthError> {
    let record = require_admin(&auth_state, &pool, &headers).await?;
    require_role(record.role, AdminRole::Admin)?;

    let Some(Json(request)) = payload else {
        return Ok(missing_payload());
    };

    let Some(fundi) = storage::load_fundi(&pool, id).await? else {
        return Ok(not_found("Fundi not found"));
    };
    if !transition_allowed(fundi.subscription_status, request.status) {
        return Ok((
            StatusCode::CONFLICT,
            Json(MessageResponse {
                message: "Invalid subscription transition".to_string(),
            }),
        )
            .into_response());
    }

    match storage::update_fundi_subscription(&pool, id, request.plan, request.status).await? {
        Some(updated) => Ok((StatusCode::OK, Json(FundiProfile::from(&updated))).into_response()),
        None => Ok(not_found("Fundi not found")),
    }
}

fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}
