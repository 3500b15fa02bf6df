//! Fundi authentication endpoints and the subscription access view.

use axum::{
    Json,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::error::AuthError;
use super::password::{burn_password_check, hash_password, verify_password};
use super::policy::require_premium_access;
use super::principal::{reconcile_trial, require_fundi};
use super::state::AuthState;
use super::storage;
use super::subscription::access_info;
use super::token::issue_token;
use super::types::{
    AccessInfo, ErrorBody, FundiLoginResponse, FundiProfile, FundiSessionResponse, LoginRequest,
    MessageResponse, PasswordChangeRequest, PrincipalType,
};
use super::utils::{extract_client_ip, normalize_email, normalize_phone, unix_now};
use super::{missing_payload, weak_password};
use crate::api::handlers::{valid_email, valid_password, valid_phone};

#[utoipa::path(
    post,
    path = "/v1/fundi/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = FundiLoginResponse),
        (status = 400, description = "Missing payload", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    ),
    tag = "fundi"
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

    // Fundis sign in with a phone number or an email; try both
    // normalized forms against their respective columns.
    let phone = normalize_phone(&request.identifier);
    let email = normalize_email(&request.identifier);
    if !valid_phone(&phone) && !valid_email(&email) {
        burn_password_check(&request.secret);
        return Err(AuthError::InvalidCredential);
    }

    let Some(record) = storage::lookup_fundi_by_identifier(&pool, &phone, &email).await? else {
        burn_password_check(&request.secret);
        return Err(AuthError::InvalidCredential);
    };

    if !verify_password(&request.secret, &record.password_hash)? {
        return Err(AuthError::InvalidCredential);
    }
    if !record.status.is_active() {
        return Err(AuthError::AccountInactive);
    }

    // The login response carries the access view, so the trial window
    // is reconciled here exactly as on authenticated requests.
    let now = unix_now();
    let record = reconcile_trial(&pool, record, now).await?;
    let info = access_info(
        record.subscription_plan,
        record.subscription_status,
        record.trial_ends_at,
        now,
    );

    let token = issue_token(&auth_state, record.id, PrincipalType::Fundi)?;
    if let Err(err) = storage::record_fundi_login(&pool, record.id, extract_client_ip(&headers)).await
    {
        error!("Failed to record fundi login: {err}");
    }

    let response = FundiLoginResponse {
        token,
        fundi: FundiProfile::from(&record),
        access_info: info,
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

#[utoipa::path(
    post,
    path = "/v1/fundi/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "fundi"
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
    path = "/v1/fundi/session",
    responses(
        (status = 200, description = "Current fundi", body = FundiSessionResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Bad token", body = ErrorBody)
    ),
    tag = "fundi"
)]
pub async fn session(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<Json<FundiSessionResponse>, AuthError> {
    let (record, info) = require_fundi(&auth_state, &pool, &headers).await?;
    Ok(Json(FundiSessionResponse {
        fundi: FundiProfile::from(&record),
        access_info: info,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/fundi/access",
    responses(
        (status = 200, description = "Derived access view", body = AccessInfo),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    ),
    tag = "fundi"
)]
pub async fn access(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<Json<AccessInfo>, AuthError> {
    let (_, info) = require_fundi(&auth_state, &pool, &headers).await?;
    Ok(Json(info))
}

#[utoipa::path(
    get,
    path = "/v1/fundi/premium",
    responses(
        (status = 204, description = "Premium features available"),
        (status = 403, description = "Upgrade required", body = ErrorBody)
    ),
    tag = "fundi"
)]
pub async fn premium(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<StatusCode, AuthError> {
    let (record, _) = require_fundi(&auth_state, &pool, &headers).await?;
    require_premium_access(record.subscription_plan, record.subscription_status)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/fundi/password",
    request_body = PasswordChangeRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 401, description = "Wrong current password", body = ErrorBody)
    ),
    tag = "fundi"
)]
pub async fn change_password(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<PasswordChangeRequest>>,
) -> Result<Response, AuthError> {
    let (record, _) = require_fundi(&auth_state, &pool, &headers).await?;
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
    storage::update_fundi_password(&pool, record.id, &hash).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
