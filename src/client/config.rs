//! Per-principal-type session configuration.

/// Mirrors the server's default token validity window.
const DEFAULT_TOKEN_TTL_SECONDS: i64 = 8 * 60 * 60;

/// Names the slots and endpoints one principal type's session lives in: the
/// cookie slot for the token, the record key for the cached profile, and the
/// paths that serve login, logout, and session refresh.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    cookie_name: String,
    profile_key: String,
    profile_field: String,
    login_path: String,
    logout_path: String,
    session_path: String,
    token_ttl_seconds: i64,
}

impl SessionConfig {
    #[must_use]
    pub fn admin() -> Self {
        Self {
            cookie_name: "fundika_admin_token".to_string(),
            profile_key: "fundika_admin_profile".to_string(),
            profile_field: "admin".to_string(),
            login_path: "/admin/login".to_string(),
            logout_path: "/v1/admin/logout".to_string(),
            session_path: "/v1/admin/session".to_string(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn fundi() -> Self {
        Self {
            cookie_name: "fundika_fundi_token".to_string(),
            profile_key: "fundika_fundi_profile".to_string(),
            profile_field: "fundi".to_string(),
            login_path: "/fundi/login".to_string(),
            logout_path: "/v1/fundi/logout".to_string(),
            session_path: "/v1/fundi/session".to_string(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn client() -> Self {
        Self {
            cookie_name: "fundika_client_token".to_string(),
            profile_key: "fundika_client_profile".to_string(),
            profile_field: "client".to_string(),
            login_path: "/client/login".to_string(),
            logout_path: "/v1/client/logout".to_string(),
            session_path: "/v1/client/session".to_string(),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    /// Override the cookie lifetime; keep it equal to the server's token TTL.
    #[must_use]
    pub fn with_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    #[must_use]
    pub fn profile_key(&self) -> &str {
        &self.profile_key
    }

    /// Key under which the session response nests the profile.
    #[must_use]
    pub fn profile_field(&self) -> &str {
        &self.profile_field
    }

    /// Login surface to redirect to after logout.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    #[must_use]
    pub fn logout_path(&self) -> &str {
        &self.logout_path
    }

    #[must_use]
    pub fn session_path(&self) -> &str {
        &self.session_path
    }

    #[must_use]
    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_types_use_disjoint_slots() {
        let configs = [
            SessionConfig::admin(),
            SessionConfig::fundi(),
            SessionConfig::client(),
        ];

        for (i, a) in configs.iter().enumerate() {
            for b in configs.iter().skip(i + 1) {
                assert_ne!(a.cookie_name(), b.cookie_name());
                assert_ne!(a.profile_key(), b.profile_key());
                assert_ne!(a.login_path(), b.login_path());
            }
        }
    }

    #[test]
    fn ttl_override() {
        let config = SessionConfig::fundi().with_token_ttl_seconds(60);
        assert_eq!(config.token_ttl_seconds(), 60);
        assert_eq!(SessionConfig::fundi().token_ttl_seconds(), 8 * 60 * 60);
    }
}
