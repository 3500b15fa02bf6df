//! Client (employer) authentication endpoints.

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
use super::principal::require_client;
use super::state::AuthState;
use super::storage;
use super::token::issue_token;
use super::types::{
    ClientLoginResponse, ClientProfile, ClientSessionResponse, ErrorBody, LoginRequest,
    MessageResponse, PasswordChangeRequest, PrincipalType,
};
use super::utils::{extract_client_ip, normalize_email};
use super::{missing_payload, weak_password};
use crate::api::handlers::{valid_email, valid_password};

#[utoipa::path(
    post,
    path = "/v1/client/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = ClientLoginResponse),
        (status = 400, description = "Missing payload", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    ),
    tag = "client"
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
    if !valid_email(&email) {
        burn_password_check(&request.secret);
        return Err(AuthError::InvalidCredential);
    }

    let Some(record) = storage::lookup_client_by_email(&pool, &email).await? else {
        burn_password_check(&request.secret);
        return Err(AuthError::InvalidCredential);
    };

    if !verify_password(&request.secret, &record.password_hash)? {
        return Err(AuthError::InvalidCredential);
    }
    if !record.status.is_active() {
        return Err(AuthError::AccountInactive);
    }

    let token = issue_token(&auth_state, record.id, PrincipalType::Client)?;
    if let Err(err) =
        storage::record_client_login(&pool, record.id, extract_client_ip(&headers)).await
    {
        error!("Failed to record client login: {err}");
    }

    let response = ClientLoginResponse {
        token,
        client: ClientProfile::from(&record),
    };
    Ok((StatusCode::OK, Json(response)).into_response())
}

#[utoipa::path(
    post,
    path = "/v1/client/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "client"
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
    path = "/v1/client/session",
    responses(
        (status = 200, description = "Current client", body = ClientSessionResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Bad token", body = ErrorBody)
    ),
    tag = "client"
)]
pub async fn session(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<Json<ClientSessionResponse>, AuthError> {
    let record = require_client(&auth_state, &pool, &headers).await?;
    Ok(Json(ClientSessionResponse {
        client: ClientProfile::from(&record),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/client/password",
    request_body = PasswordChangeRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error", body = MessageResponse),
        (status = 401, description = "Wrong current password", body = ErrorBody)
    ),
    tag = "client"
)]
pub async fn change_password(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<PasswordChangeRequest>>,
) -> Result<Response, AuthError> {
    let record = require_client(&auth_state, &pool, &headers).await?;
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
    storage::update_client_password(&pool, record.id, &hash).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
