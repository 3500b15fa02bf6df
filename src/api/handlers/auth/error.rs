//! Error taxonomy for authentication and authorization failures.
//!
//! 401 means the request never proved who it is; 403 means identity was proven
//! but the token or a policy does not permit the operation. Credential failures
//! collapse to one generic message so callers cannot probe which part was wrong.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use super::types::ErrorBody;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid bearer token")]
    InvalidToken,

    #[error("bearer token expired")]
    TokenExpired,

    #[error("principal not found")]
    PrincipalNotFound,

    #[error("account is not active")]
    AccountInactive,

    #[error("invalid credentials")]
    InvalidCredential,

    #[error("{reason}")]
    PolicyDenied {
        reason: String,
        upgrade_required: bool,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    /// A subscription-gated denial carrying the upgrade hint.
    #[must_use]
    pub fn upgrade_required(reason: &str) -> Self {
        Self::PolicyDenied {
            reason: reason.to_string(),
            upgrade_required: true,
        }
    }

    /// A role or account policy denial without the upgrade hint.
    #[must_use]
    pub fn denied(reason: &str) -> Self {
        Self::PolicyDenied {
            reason: reason.to_string(),
            upgrade_required: false,
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken
            | Self::PrincipalNotFound
            | Self::AccountInactive
            | Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::InvalidToken | Self::TokenExpired | Self::PolicyDenied { .. } => {
                StatusCode::FORBIDDEN
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let upgrade_required = match &self {
            Self::PolicyDenied {
                upgrade_required: true,
                ..
            } => Some(true),
            _ => None,
        };

        let message = match &self {
            Self::MissingToken => "Missing bearer token".to_string(),
            Self::InvalidToken => "Invalid token".to_string(),
            Self::TokenExpired => "Token expired".to_string(),
            Self::PrincipalNotFound => "Account not found".to_string(),
            Self::AccountInactive => "Account is not active".to_string(),
            Self::InvalidCredential => "Invalid credentials".to_string(),
            Self::PolicyDenied { reason, .. } => reason.clone(),
            Self::Internal(err) => {
                // Storage details stay server-side; callers get a generic body
                error!("Internal auth error: {err:?}");
                "Internal server error".to_string()
            }
        };

        let status = self.status();
        (
            status,
            Json(ErrorBody {
                message,
                upgrade_required,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use axum::body::to_bytes;

    #[test]
    fn status_mapping() {
        assert_eq!(AuthError::MissingToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::PrincipalNotFound.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::AccountInactive.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::InvalidCredential.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::InvalidToken.status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::TokenExpired.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::denied("Admin role required").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::Internal(anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn policy_denial_carries_upgrade_flag() -> Result<()> {
        let response = AuthError::upgrade_required("Premium subscription required").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let parsed: ErrorBody = serde_json::from_slice(&body)?;
        assert_eq!(parsed.message, "Premium subscription required");
        assert_eq!(parsed.upgrade_required, Some(true));
        Ok(())
    }

    #[tokio::test]
    async fn role_denial_has_no_upgrade_flag() -> Result<()> {
        let response = AuthError::denied("Admin role required").into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        assert!(value.get("upgradeRequired").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn internal_error_body_is_generic() -> Result<()> {
        let response = AuthError::Internal(anyhow!("pool exhausted on shard 7")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let parsed: ErrorBody = serde_json::from_slice(&body)?;
        assert_eq!(parsed.message, "Internal server error");
        Ok(())
    }
}
