//! Session persistence and propagation for a single principal type.
//!
//! The token lives in a secure cookie slot and travels with requests; the
//! profile snapshot lives in a separate record and is display data only.
//! Nothing here verifies tokens. Authorization always happens server-side
//! against the freshly loaded principal.

use anyhow::{Result, anyhow};
use serde_json::Value;
use tracing::warn;

use super::api::ApiClient;
use super::config::SessionConfig;
use super::storage::CredentialStorage;

pub struct SessionStore<S> {
    config: SessionConfig,
    storage: S,
}

impl<S: CredentialStorage> SessionStore<S> {
    pub fn new(config: SessionConfig, storage: S) -> Self {
        Self { config, storage }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Store a freshly issued token and its profile snapshot. The cookie
    /// lifetime equals the token's validity window, so the slot and the
    /// token expire together.
    pub fn set_auth(&self, token: &str, profile: &Value) {
        let attributes = format!(
            "Path=/; SameSite=Strict; Max-Age={}; Secure",
            self.config.token_ttl_seconds()
        );
        self.storage
            .set_cookie(self.config.cookie_name(), token, &attributes);
        self.storage
            .set_item(self.config.profile_key(), &profile.to_string());
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.cookie(self.config.cookie_name())
    }

    /// Cached profile snapshot; `None` when absent or unreadable.
    #[must_use]
    pub fn user_data(&self) -> Option<Value> {
        let raw = self.storage.item(self.config.profile_key())?;
        serde_json::from_str(&raw).ok()
    }

    /// Merge the top-level keys of `partial` into the cached snapshot
    /// without touching the token. Used after profile edit flows.
    pub fn save_user_data(&self, partial: &Value) {
        let merged = match (self.user_data(), partial.as_object()) {
            (Some(Value::Object(mut current)), Some(partial_map)) => {
                for (key, value) in partial_map {
                    current.insert(key.clone(), value.clone());
                }
                Value::Object(current)
            }
            _ => partial.clone(),
        };
        self.storage
            .set_item(self.config.profile_key(), &merged.to_string());
    }

    /// Remove both slots. Safe to call when nothing is stored.
    pub fn clear_auth(&self) {
        self.storage.remove_cookie(self.config.cookie_name());
        self.storage.remove_item(self.config.profile_key());
    }

    /// A token is present. Whether it still verifies is the server's call.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Notify the server, then clear local state. Clearing never depends on
    /// the network call succeeding; the returned path is the login surface
    /// to redirect to.
    pub async fn logout(&self, api: &ApiClient) -> &str {
        if let Some(token) = self.token() {
            if let Err(err) = api.post_empty(self.config.logout_path(), &token).await {
                warn!("Failed to notify server of logout: {err}");
            }
        }

        self.clear_auth();
        self.config.login_path()
    }

    /// Replace the cached snapshot from the session endpoint, the
    /// authoritative source after profile edits elsewhere.
    ///
    /// # Errors
    /// Returns an error when no token is stored, the request fails, or the
    /// response carries no profile.
    pub async fn refresh_profile(&self, api: &ApiClient) -> Result<Value> {
        let Some(token) = self.token() else {
            return Err(anyhow!("no session token stored"));
        };

        let session = api.fetch_json(self.config.session_path(), &token).await?;
        let profile = session
            .get(self.config.profile_field())
            .cloned()
            .ok_or_else(|| anyhow!("session response carries no profile"))?;

        self.save_user_data(&profile);
        Ok(profile)
    }
}
