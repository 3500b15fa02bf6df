//! HS256 bearer token issuance and verification.

use anyhow::Context;
use jsonwebtoken::{Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AuthError;
use super::state::AuthState;
use super::types::PrincipalType;
use super::utils::unix_now;

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the principal id.
    pub sub: Uuid,
    /// Principal type the token was minted for.
    pub ptype: PrincipalType,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed HS256 bearer token for the given principal.
pub(super) fn issue_token(
    state: &AuthState,
    principal_id: Uuid,
    ptype: PrincipalType,
) -> Result<String, AuthError> {
    let now = unix_now();
    let claims = Claims {
        sub: principal_id,
        ptype,
        iat: now,
        exp: now + state.config().token_ttl_seconds(),
    };

    let token = jsonwebtoken::encode(&Header::default(), &claims, state.encoding_key())
        .context("failed to encode bearer token")?;
    Ok(token)
}

/// Decode and verify a bearer token, enforcing the expected principal
/// type.
///
/// Tokens are scoped to one principal type; a mismatch is rejected the
/// same way a bad signature is.
pub(super) fn decode_token(
    state: &AuthState,
    token: &str,
    expected: PrincipalType,
) -> Result<Claims, AuthError> {
    let claims =
        jsonwebtoken::decode::<Claims>(token, state.decoding_key(), &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

    if claims.ptype != expected {
        return Err(AuthError::InvalidToken);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::super::state::AuthConfig;
    use super::*;
    use base64ct::{Base64UrlUnpadded, Encoding};
    use secrecy::SecretString;

    fn test_state() -> AuthState {
        let config = AuthConfig::new(
            SecretString::from("0123456789abcdef0123456789abcdef".to_string()),
            "https://fundika.dev".to_string(),
        );
        AuthState::new(config)
    }

    #[test]
    fn token_round_trip() {
        let state = test_state();
        let id = Uuid::new_v4();

        let token = issue_token(&state, id, PrincipalType::Fundi).unwrap();
        let claims = decode_token(&state, &token, PrincipalType::Fundi).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.ptype, PrincipalType::Fundi);
        assert_eq!(
            claims.exp - claims.iat,
            state.config().token_ttl_seconds()
        );
    }

    #[test]
    fn cross_type_token_rejected() {
        let state = test_state();
        let token = issue_token(&state, Uuid::new_v4(), PrincipalType::Fundi).unwrap();

        let err = decode_token(&state, &token, PrincipalType::Admin).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn expired_token_rejected() {
        let state = test_state();
        let now = unix_now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            ptype: PrincipalType::Client,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token =
            jsonwebtoken::encode(&Header::default(), &claims, state.encoding_key()).unwrap();

        let err = decode_token(&state, &token, PrincipalType::Client).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[test]
    fn garbage_token_rejected() {
        let state = test_state();
        let err = decode_token(&state, "not-a-token", PrincipalType::Admin).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn token_signed_with_other_key_rejected() {
        let state = test_state();
        let other = AuthState::new(AuthConfig::new(
            SecretString::from("ffffffffffffffffffffffffffffffff".to_string()),
            "https://fundika.dev".to_string(),
        ));

        let token = issue_token(&other, Uuid::new_v4(), PrincipalType::Admin).unwrap();
        let err = decode_token(&state, &token, PrincipalType::Admin).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn tampered_payload_rejected() {
        let state = test_state();
        let token = issue_token(&state, Uuid::new_v4(), PrincipalType::Fundi).unwrap();

        // Rewrite the ptype claim while keeping the original signature.
        let parts: Vec<&str> = token.split('.').collect();
        let payload = Base64UrlUnpadded::decode_vec(parts[1]).unwrap();
        let mut claims: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        claims["ptype"] = serde_json::Value::String("admin".to_string());
        let forged_payload = Base64UrlUnpadded::encode_string(claims.to_string().as_bytes());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        let err = decode_token(&state, &forged, PrincipalType::Admin).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
