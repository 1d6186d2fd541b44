//! # UI Preferences
//!
//! Independent scalar keys stored beside the document: active tab, the
//! privacy-mode flag, the authenticated flag and the theme. Each key is
//! its own JSON value in the backend; an absent or unreadable value falls
//! back to its default, matching the storage hook the dashboard grew up
//! with.

use tracing::debug;

use crate::auth;
use crate::error::StoreResult;
use crate::storage::SharedStorage;

const TAB_KEY: &str = "tillbook.tab";
const PRIVATE_KEY: &str = "tillbook.private";
const AUTH_KEY: &str = "tillbook.auth";
const THEME_KEY: &str = "tillbook.theme";

const DEFAULT_TAB: &str = "Dashboard";
const DEFAULT_THEME: &str = "dark";

/// Typed accessors over the preference keys.
#[derive(Clone)]
pub struct Preferences {
    storage: SharedStorage,
}

impl Preferences {
    /// Creates the accessor over a shared backend.
    pub(crate) fn new(storage: SharedStorage) -> Self {
        Preferences { storage }
    }

    fn read_bool(&self, key: &str) -> StoreResult<bool> {
        let stored = self.storage.lock().expect("storage mutex poisoned").get(key)?;
        Ok(stored
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or(false))
    }

    fn read_string(&self, key: &str, default: &str) -> StoreResult<String> {
        let stored = self.storage.lock().expect("storage mutex poisoned").get(key)?;
        Ok(stored
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_else(|| default.to_string()))
    }

    fn write_bool(&self, key: &str, value: bool) -> StoreResult<()> {
        self.storage
            .lock()
            .expect("storage mutex poisoned")
            .set(key, if value { "true" } else { "false" })
    }

    fn write_string(&self, key: &str, value: &str) -> StoreResult<()> {
        let json = serde_json::to_string(value).map_err(crate::error::StoreError::Encode)?;
        self.storage
            .lock()
            .expect("storage mutex poisoned")
            .set(key, &json)
    }

    /// The active navigation tab. Default: `"Dashboard"`.
    pub fn active_tab(&self) -> StoreResult<String> {
        self.read_string(TAB_KEY, DEFAULT_TAB)
    }

    /// Persists the active navigation tab.
    pub fn set_active_tab(&self, tab: &str) -> StoreResult<()> {
        self.write_string(TAB_KEY, tab)
    }

    /// Privacy mode: render `#<code>` labels instead of names. Default off.
    pub fn private_mode(&self) -> StoreResult<bool> {
        self.read_bool(PRIVATE_KEY)
    }

    /// Persists the privacy-mode flag.
    pub fn set_private_mode(&self, on: bool) -> StoreResult<()> {
        self.write_bool(PRIVATE_KEY, on)
    }

    /// Whether the login gate has been passed. Default off.
    pub fn authenticated(&self) -> StoreResult<bool> {
        self.read_bool(AUTH_KEY)
    }

    /// The UI theme. Default: `"dark"`.
    pub fn theme(&self) -> StoreResult<String> {
        self.read_string(THEME_KEY, DEFAULT_THEME)
    }

    /// Persists the UI theme.
    pub fn set_theme(&self, theme: &str) -> StoreResult<()> {
        self.write_string(THEME_KEY, theme)
    }

    /// Runs the login gate and stores the outcome, including a failed
    /// attempt, which clears any earlier authentication.
    pub fn login(&self, username: &str, password: &str) -> StoreResult<bool> {
        let ok = auth::verify_credentials(username, password);
        debug!(ok, "Login attempt");
        self.write_bool(AUTH_KEY, ok)?;
        Ok(ok)
    }

    /// Clears the authenticated flag.
    pub fn logout(&self) -> StoreResult<()> {
        self.write_bool(AUTH_KEY, false)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{shared, MemoryStorage};

    fn prefs() -> Preferences {
        Preferences::new(shared(MemoryStorage::new()))
    }

    #[test]
    fn test_defaults() {
        let prefs = prefs();
        assert_eq!(prefs.active_tab().unwrap(), "Dashboard");
        assert!(!prefs.private_mode().unwrap());
        assert!(!prefs.authenticated().unwrap());
        assert_eq!(prefs.theme().unwrap(), "dark");
    }

    #[test]
    fn test_round_trips() {
        let prefs = prefs();

        prefs.set_active_tab("Reports").unwrap();
        assert_eq!(prefs.active_tab().unwrap(), "Reports");

        prefs.set_private_mode(true).unwrap();
        assert!(prefs.private_mode().unwrap());

        prefs.set_theme("light").unwrap();
        assert_eq!(prefs.theme().unwrap(), "light");
    }

    #[test]
    fn test_login_stores_both_outcomes() {
        let prefs = prefs();

        assert!(prefs.login("Admin", "Admin000").unwrap());
        assert!(prefs.authenticated().unwrap());

        // A failed attempt overwrites the earlier success
        assert!(!prefs.login("Admin", "nope").unwrap());
        assert!(!prefs.authenticated().unwrap());

        assert!(prefs.login("Admin", "Admin000").unwrap());
        prefs.logout().unwrap();
        assert!(!prefs.authenticated().unwrap());
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let storage = shared(MemoryStorage::new());
        storage.lock().unwrap().set(PRIVATE_KEY, "not json").unwrap();

        let prefs = Preferences::new(storage);
        assert!(!prefs.private_mode().unwrap());
    }
}
