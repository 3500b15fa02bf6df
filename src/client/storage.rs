//! Storage backends for client-side session state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Slots a session store writes to. A browser shell maps these onto
/// `document.cookie` and local storage; the in-memory implementation backs
/// tests and embedded use.
pub trait CredentialStorage: Send + Sync {
    /// Write a cookie value together with its attribute string.
    fn set_cookie(&self, name: &str, value: &str, attributes: &str);
    fn cookie(&self, name: &str) -> Option<String>;
    fn remove_cookie(&self, name: &str);
    /// Write a key-value record.
    fn set_item(&self, key: &str, value: &str);
    fn item(&self, key: &str) -> Option<String>;
    fn remove_item(&self, key: &str);
}

/// In-memory backend. Cookie attributes are recorded alongside values so
/// tests can assert the flags a browser would receive.
#[derive(Default)]
pub struct InMemoryStorage {
    cookies: Mutex<HashMap<String, (String, String)>>,
    records: Mutex<HashMap<String, String>>,
}

impl InMemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute string recorded with a cookie.
    #[must_use]
    pub fn cookie_attributes(&self, name: &str) -> Option<String> {
        lock(&self.cookies)
            .get(name)
            .map(|(_, attributes)| attributes.clone())
    }
}

// Poisoning only records that another thread panicked; the map stays usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CredentialStorage for InMemoryStorage {
    fn set_cookie(&self, name: &str, value: &str, attributes: &str) {
        lock(&self.cookies).insert(
            name.to_string(),
            (value.to_string(), attributes.to_string()),
        );
    }

    fn cookie(&self, name: &str) -> Option<String> {
        lock(&self.cookies).get(name).map(|(value, _)| value.clone())
    }

    fn remove_cookie(&self, name: &str) {
        lock(&self.cookies).remove(name);
    }

    fn set_item(&self, key: &str, value: &str) {
        lock(&self.records).insert(key.to_string(), value.to_string());
    }

    fn item(&self, key: &str) -> Option<String> {
        lock(&self.records).get(key).cloned()
    }

    fn remove_item(&self, key: &str) {
        lock(&self.records).remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_round_trip() {
        let storage = InMemoryStorage::new();
        storage.set_cookie("token", "abc", "Path=/; Secure");

        assert_eq!(storage.cookie("token").as_deref(), Some("abc"));
        assert_eq!(
            storage.cookie_attributes("token").as_deref(),
            Some("Path=/; Secure")
        );

        storage.remove_cookie("token");
        assert_eq!(storage.cookie("token"), None);
    }

    #[test]
    fn record_round_trip() {
        let storage = InMemoryStorage::new();
        storage.set_item("profile", r#"{"id":1}"#);

        assert_eq!(storage.item("profile").as_deref(), Some(r#"{"id":1}"#));

        storage.remove_item("profile");
        assert_eq!(storage.item("profile"), None);
    }

    #[test]
    fn removing_missing_entries_is_a_noop() {
        let storage = InMemoryStorage::new();
        storage.remove_cookie("never-set");
        storage.remove_item("never-set");
        assert_eq!(storage.cookie("never-set"), None);
    }
}
