//! Auth state and configuration.

use jsonwebtoken::{DecodingKey, EncodingKey};
use secrecy::{ExposeSecret, SecretString};

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 8 * 60 * 60;

pub struct AuthConfig {
    token_secret: SecretString,
    token_ttl_seconds: i64,
    frontend_base_url: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(token_secret: SecretString, frontend_base_url: String) -> Self {
        Self {
            token_secret,
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            frontend_base_url,
        }
    }

    #[must_use]
    pub fn with_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    pub(crate) fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    pub(super) fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_seconds
    }
}

pub struct AuthState {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthState {
    /// Builds the signing keys once so request handlers never touch the
    /// raw secret.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        let secret = config.token_secret.expose_secret().as_bytes();
        let encoding_key = EncodingKey::from_secret(secret);
        let decoding_key = DecodingKey::from_secret(secret);
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub(super) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(super) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthConfig, AuthState};
    use secrecy::SecretString;

    fn test_secret() -> SecretString {
        SecretString::from("0123456789abcdef0123456789abcdef".to_string())
    }

    #[test]
    fn auth_config_defaults_and_overrides() {
        let config = AuthConfig::new(test_secret(), "https://fundika.dev".to_string());

        assert_eq!(config.frontend_base_url(), "https://fundika.dev");
        assert_eq!(config.token_ttl_seconds(), super::DEFAULT_TOKEN_TTL_SECONDS);

        let config = config.with_token_ttl_seconds(3600);
        assert_eq!(config.token_ttl_seconds(), 3600);
    }

    #[test]
    fn auth_state_exposes_config() {
        let config =
            AuthConfig::new(test_secret(), "https://fundika.dev".to_string()).with_token_ttl_seconds(60);
        let state = AuthState::new(config);
        assert_eq!(state.config().token_ttl_seconds(), 60);
        assert_eq!(state.config().frontend_base_url(), "https://fundika.dev");
    }
}
