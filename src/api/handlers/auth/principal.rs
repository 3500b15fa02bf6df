//! Authenticated principal extraction.
//!
//! Flow overview: extract the bearer token, verify it for the expected
//! principal type, re-load the principal from the database, and reject
//! accounts that are no longer active. The token is never trusted for
//! profile data; the database row wins on every request.

use axum::http::HeaderMap;
use sqlx::PgPool;

use super::error::AuthError;
use super::policy::require_active;
use super::state::AuthState;
use super::storage::{self, AdminRecord, ClientRecord, FundiRecord};
use super::subscription::{access_info, trial_expired};
use super::token::decode_token;
use super::types::{AccessInfo, PrincipalType};
use super::utils::{extract_bearer_token, unix_now};

/// Resolve the bearer token into a fresh admin record.
pub(super) async fn require_admin(
    state: &AuthState,
    pool: &PgPool,
    headers: &HeaderMap,
) -> Result<AdminRecord, AuthError> {
    let token = extract_bearer_token(headers).ok_or(AuthError::MissingToken)?;
    let claims = decode_token(state, token, PrincipalType::Admin)?;
    let record = storage::load_admin(pool, claims.sub)
        .await?
        .ok_or(AuthError::PrincipalNotFound)?;
    require_active(record.status)?;
    Ok(record)
}

/// Resolve the bearer token into a fresh fundi record plus its derived
/// access view.
///
/// A trial past its end is persisted as expired before the record is
/// handed to the caller, so no handler ever sees a stale `TRIAL`.
pub(super) async fn require_fundi(
    state: &AuthState,
    pool: &PgPool,
    headers: &HeaderMap,
) -> Result<(FundiRecord, AccessInfo), AuthError> {
    let token = extract_bearer_token(headers).ok_or(AuthError::MissingToken)?;
    let claims = decode_token(state, token, PrincipalType::Fundi)?;
    let record = storage::load_fundi(pool, claims.sub)
        .await?
        .ok_or(AuthError::PrincipalNotFound)?;
    require_active(record.status)?;

    let now = unix_now();
    let record = reconcile_trial(pool, record, now).await?;
    let info = access_info(
        record.subscription_plan,
        record.subscription_status,
        record.trial_ends_at,
        now,
    );
    Ok((record, info))
}

/// Persist a due trial expiry and hand back the fresh record.
pub(super) async fn reconcile_trial(
    pool: &PgPool,
    record: FundiRecord,
    now: i64,
) -> Result<FundiRecord, AuthError> {
    if !trial_expired(record.subscription_status, record.trial_ends_at, now) {
        return Ok(record);
    }
    storage::expire_fundi_trial(pool, record.id).await?;
    storage::load_fundi(pool, record.id)
        .await?
        .ok_or(AuthError::PrincipalNotFound)
}

/// Resolve the bearer token into a fresh client record.
pub(super) async fn require_client(
    state: &AuthState,
    pool: &PgPool,
    headers: &HeaderMap,
) -> Result<ClientRecord, AuthError> {
    let token = extract_bearer_token(headers).ok_or(AuthError::MissingToken)?;
    let claims = decode_token(state, token, PrincipalType::Client)?;
    let record = storage::load_client(pool, claims.sub)
        .await?
        .ok_or(AuthError::PrincipalNotFound)?;
    require_active(record.status)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::super::state::AuthConfig;
    use super::super::token::issue_token;
    use super::*;
    use axum::http::HeaderValue;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    fn test_state() -> AuthState {
        AuthState::new(AuthConfig::new(
            SecretString::from("0123456789abcdef0123456789abcdef".to_string()),
            "https://fundika.dev".to_string(),
        ))
    }

    // The pool never connects; these paths fail before any query runs.
    fn lazy_pool() -> PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost:1/fundika")
            .unwrap()
    }

    #[tokio::test]
    async fn missing_token_rejected_before_storage() {
        let state = test_state();
        let pool = lazy_pool();
        let headers = HeaderMap::new();

        let err = require_admin(&state, &pool, &headers).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingToken));
    }

    #[tokio::test]
    async fn garbage_token_rejected_before_storage() {
        let state = test_state();
        let pool = lazy_pool();
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer junk"));

        let err = require_client(&state, &pool, &headers).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn cross_type_token_rejected_before_storage() {
        let state = test_state();
        let pool = lazy_pool();
        let token = issue_token(&state, Uuid::new_v4(), PrincipalType::Fundi).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let err = require_admin(&state, &pool, &headers).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
