//! Auth router tests.
//!
//! These tests drive the Axum router with requests that are resolved before
//! any database query runs. The lazy pool points at a closed port, so a test
//! that reached storage would fail loudly instead of passing by accident.

use super::token::issue_token;
use super::types::{ErrorBody, MessageResponse, PrincipalType};
use super::{AuthConfig, AuthState, admin, client, fundi};
use anyhow::Result;
use axum::{
    Extension, Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use secrecy::SecretString;
use serde_json::json;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;
use uuid::Uuid;

fn test_state() -> Arc<AuthState> {
    let secret = SecretString::from("0123456789abcdef0123456789abcdef");
    Arc::new(AuthState::new(AuthConfig::new(
        secret,
        "https://app.fundika.dev".to_string(),
    )))
}

fn lazy_pool() -> PgPool {
    // Port 1 is never listening; acquire fails fast instead of hanging
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("postgres://postgres@localhost:1/fundika")
        .unwrap()
}

fn app_router(state: Arc<AuthState>, pool: PgPool) -> Router {
    Router::new()
        .route("/v1/admin/login", post(admin::login))
        .route("/v1/admin/logout", post(admin::logout))
        .route("/v1/admin/session", get(admin::session))
        .route("/v1/fundi/login", post(fundi::login))
        .route("/v1/fundi/logout", post(fundi::logout))
        .route("/v1/fundi/session", get(fundi::session))
        .route("/v1/client/logout", post(client::logout))
        .route("/v1/client/session", get(client::session))
        .layer(Extension(state))
        .layer(Extension(pool))
}

async fn error_body(response: axum::response::Response) -> Result<ErrorBody> {
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&body)?)
}

#[tokio::test]
async fn session_without_token_is_unauthorized() -> Result<()> {
    let app = app_router(test_state(), lazy_pool());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/admin/session")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = error_body(response).await?;
    assert_eq!(body.message, "Missing bearer token");
    Ok(())
}

#[tokio::test]
async fn session_with_garbage_token_is_forbidden() -> Result<()> {
    let app = app_router(test_state(), lazy_pool());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/fundi/session")
                .header(AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = error_body(response).await?;
    assert_eq!(body.message, "Invalid token");
    Ok(())
}

#[tokio::test]
/// A token minted for one principal type opens nothing in another family's
/// routes, no matter how fresh the signature is.
async fn cross_type_token_is_forbidden() -> Result<()> {
    let state = test_state();
    let token = issue_token(&state, Uuid::new_v4(), PrincipalType::Admin)?;
    let app = app_router(state, lazy_pool());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/client/session")
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = error_body(response).await?;
    assert_eq!(body.message, "Invalid token");
    Ok(())
}

#[tokio::test]
async fn login_without_payload_is_bad_request() -> Result<()> {
    let app = app_router(test_state(), lazy_pool());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/admin/login")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body(), usize::MAX).await?;
    let parsed: MessageResponse = serde_json::from_slice(&body)?;
    assert_eq!(parsed.message, "Missing payload");
    Ok(())
}

#[tokio::test]
/// A malformed identifier draws the same generic rejection as a wrong
/// password, so the response never confirms whether an account exists.
async fn login_with_malformed_email_is_generic_unauthorized() -> Result<()> {
    let app = app_router(test_state(), lazy_pool());

    let payload = json!({ "identifier": "not-an-email", "secret": "hunter2hunter2" });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/admin/login")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = error_body(response).await?;
    assert_eq!(body.message, "Invalid credentials");
    assert_eq!(body.upgrade_required, None);
    Ok(())
}

#[tokio::test]
async fn fundi_login_with_malformed_identifier_is_generic_unauthorized() -> Result<()> {
    let app = app_router(test_state(), lazy_pool());

    // Neither a plausible MSISDN nor an email
    let payload = json!({ "identifier": "??", "secret": "hunter2hunter2" });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/fundi/login")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = error_body(response).await?;
    assert_eq!(body.message, "Invalid credentials");
    Ok(())
}

#[tokio::test]
/// Logout never fails: tokens are stateless, so there is nothing to revoke
/// and no token is required to say goodbye.
async fn logout_succeeds_without_a_token() -> Result<()> {
    let app = app_router(test_state(), lazy_pool());

    for uri in ["/v1/admin/logout", "/v1/fundi/logout", "/v1/client/logout"] {
        let response = app
            .clone()
            .oneshot(Request::builder().method("POST").uri(uri).body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK, "logout failed for {uri}");

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let parsed: MessageResponse = serde_json::from_slice(&body)?;
        assert_eq!(parsed.message, "Logged out");
    }
    Ok(())
}

#[tokio::test]
/// With a valid token but no reachable database the handler must answer 500
/// with a generic body; pool errors never leak connection details.
async fn storage_failure_is_a_generic_internal_error() -> Result<()> {
    let state = test_state();
    let token = issue_token(&state, Uuid::new_v4(), PrincipalType::Admin)?;
    let app = app_router(state, lazy_pool());

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/v1/admin/session")
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = error_body(response).await?;
    assert_eq!(body.message, "Internal server error");
    Ok(())
}
