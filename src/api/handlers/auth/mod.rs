//! Auth handlers and supporting modules.
//!
//! Admins, fundis (service providers), and clients (employers) share a
//! single bearer-token scheme while keeping separate credential
//! lifecycles. Admin routes authorize through the role hierarchy and
//! fundi routes through the subscription tier; client routes only
//! require an active account.
//!
//! ## Anti-enumeration
//!
//! Login failures never reveal whether the identifier or the secret was
//! wrong. Unknown and malformed identifiers burn a dummy Argon2 check
//! so response timing matches a real verification.
//!
//! ## Statelessness
//!
//! Tokens are self-contained HS256 JWTs; there is no session table and
//! no revocation list. The principal row is re-loaded from Postgres on
//! every authenticated request, so status and subscription changes take
//! effect on the very next call.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub(crate) mod admin;
pub(crate) mod client;
mod error;
pub(crate) mod fundi;
mod password;
mod policy;
mod principal;
mod state;
mod storage;
mod subscription;
mod token;
pub(crate) mod types;
mod utils;

pub use error::AuthError;
pub use state::{AuthConfig, AuthState};

use types::MessageResponse;

fn missing_payload() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse {
            message: "Missing payload".to_string(),
        }),
    )
        .into_response()
}

fn weak_password() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(MessageResponse {
            message: "Password too short".to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests;
