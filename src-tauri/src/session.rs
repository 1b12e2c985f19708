//! Admin session persistence using the OS credential store.
//!
//! On Windows this uses DPAPI (via the `keyring` crate), on macOS Keychain,
//! and on Linux the Secret Service API. The session is a handful of keyed
//! strings; authorization requires the logged-in flag, a positive user id,
//! and the exact `ADMIN` level to all hold at once.

use keyring::Entry;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};

use crate::models::User;

const SERVICE_NAME: &str = "amigo-cake-admin";

// Session keys
const KEY_IS_LOGGED_IN: &str = "is_logged_in";
const KEY_USER_ID: &str = "user_id";
const KEY_USER_NAME: &str = "user_name";
const KEY_USERNAME: &str = "username";
const KEY_USER_LEVEL: &str = "user_level";
const KEY_LOGIN_TIME: &str = "login_time";

/// All session keys managed by this module.
const ALL_KEYS: &[&str] = &[
    KEY_IS_LOGGED_IN,
    KEY_USER_ID,
    KEY_USER_NAME,
    KEY_USERNAME,
    KEY_USER_LEVEL,
    KEY_LOGIN_TIME,
];

/// The only account level allowed past the entry guard.
pub const ADMIN_LEVEL: &str = "ADMIN";

/// Key-value backend for session fields. The production app stores them in
/// the OS keyring; tests use the in-memory variant.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn delete(&self, key: &str) -> Result<(), String>;
}

pub struct KeyringStore;

impl SessionStore for KeyringStore {
    fn get(&self, key: &str) -> Option<String> {
        let entry = match Entry::new(SERVICE_NAME, key) {
            Ok(e) => e,
            Err(e) => {
                warn!(key, error = %e, "keyring: failed to create entry");
                return None;
            }
        };
        match entry.get_password() {
            Ok(pw) => Some(pw),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(key, error = %e, "keyring: failed to read session field");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let entry = Entry::new(SERVICE_NAME, key).map_err(|e| e.to_string())?;
        entry.set_password(value).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        let entry = Entry::new(SERVICE_NAME, key).map_err(|e| e.to_string())?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut values = self.values.lock().map_err(|e| e.to_string())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        let mut values = self.values.lock().map_err(|e| e.to_string())?;
        values.remove(key);
        Ok(())
    }
}

/// The logged-in user as exposed to the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: i64,
    pub name: String,
    pub username: String,
    pub level: String,
    pub login_time: i64,
}

pub struct SessionState {
    store: Box<dyn SessionStore>,
}

impl SessionState {
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Persists a successful login. The caller has already verified the
    /// account level; this just records the fields. Level casing varies
    /// across backend rows, so it is stored normalized to keep the
    /// exact-match authorization check honest.
    pub fn save_login(&self, user: &User) -> Result<(), String> {
        self.store.set(KEY_IS_LOGGED_IN, "true")?;
        self.store.set(KEY_USER_ID, &user.id.to_string())?;
        self.store.set(KEY_USER_NAME, &user.name)?;
        self.store.set(KEY_USERNAME, &user.username)?;
        self.store.set(KEY_USER_LEVEL, &user.level.to_uppercase())?;
        self.store
            .set(KEY_LOGIN_TIME, &chrono::Utc::now().timestamp_millis().to_string())?;
        info!(user_id = user.id, username = %user.username, "session saved");
        Ok(())
    }

    /// A session is authorized only when the flag is set, the stored user id
    /// is positive, and the level is exactly `ADMIN`.
    pub fn is_authorized(&self) -> bool {
        let logged_in = self
            .store
            .get(KEY_IS_LOGGED_IN)
            .map(|v| v == "true")
            .unwrap_or(false);
        let user_id = self
            .store
            .get(KEY_USER_ID)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0);
        let level = self.store.get(KEY_USER_LEVEL).unwrap_or_default();
        logged_in && user_id > 0 && level == ADMIN_LEVEL
    }

    /// Entry guard: a session that claims to be logged in but fails the full
    /// authorization check is stale or tampered with and gets cleared.
    pub fn check_entry(&self) -> bool {
        if self.is_authorized() {
            return true;
        }
        let flagged = self
            .store
            .get(KEY_IS_LOGGED_IN)
            .map(|v| v == "true")
            .unwrap_or(false);
        if flagged {
            warn!("half-valid session found at entry, clearing it");
            if let Err(e) = self.clear() {
                warn!(error = %e, "failed to clear stale session");
            }
        }
        false
    }

    /// Returns the current session when authorized, with display fallbacks
    /// for fields an older install may not have written.
    pub fn current(&self) -> Option<Session> {
        if !self.is_authorized() {
            return None;
        }
        let user_id = self
            .store
            .get(KEY_USER_ID)
            .and_then(|v| v.parse::<i64>().ok())?;
        Some(Session {
            user_id,
            name: self
                .store
                .get(KEY_USER_NAME)
                .unwrap_or_else(|| "Admin".to_string()),
            username: self
                .store
                .get(KEY_USERNAME)
                .unwrap_or_else(|| "admin".to_string()),
            level: self
                .store
                .get(KEY_USER_LEVEL)
                .unwrap_or_else(|| ADMIN_LEVEL.to_string()),
            login_time: self
                .store
                .get(KEY_LOGIN_TIME)
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0),
        })
    }

    /// Deletes every session field (logout).
    pub fn clear(&self) -> Result<(), String> {
        for key in ALL_KEYS {
            self.store.delete(key)?;
        }
        info!("session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_user() -> User {
        User {
            id: 42,
            name: "Dewi".into(),
            username: "dewi".into(),
            level: "ADMIN".into(),
        }
    }

    fn state() -> SessionState {
        SessionState::new(Box::new(MemoryStore::default()))
    }

    #[test]
    fn authorization_needs_all_three_conditions() {
        // (flag, user_id, level) with exactly one full-pass combination.
        let cases = [
            (false, "0", "USER", false),
            (false, "0", "ADMIN", false),
            (false, "42", "USER", false),
            (false, "42", "ADMIN", false),
            (true, "0", "USER", false),
            (true, "0", "ADMIN", false),
            (true, "42", "USER", false),
            (true, "42", "ADMIN", true),
        ];
        for (flag, id, level, expected) in cases {
            let s = state();
            s.store
                .set(KEY_IS_LOGGED_IN, if flag { "true" } else { "false" })
                .unwrap();
            s.store.set(KEY_USER_ID, id).unwrap();
            s.store.set(KEY_USER_LEVEL, level).unwrap();
            assert_eq!(
                s.is_authorized(),
                expected,
                "flag={flag} id={id} level={level}"
            );
        }
    }

    #[test]
    fn level_check_is_case_sensitive() {
        let s = state();
        s.store.set(KEY_IS_LOGGED_IN, "true").unwrap();
        s.store.set(KEY_USER_ID, "7").unwrap();
        s.store.set(KEY_USER_LEVEL, "admin").unwrap();
        assert!(!s.is_authorized());
    }

    #[test]
    fn entry_guard_clears_half_valid_session() {
        let s = state();
        s.store.set(KEY_IS_LOGGED_IN, "true").unwrap();
        s.store.set(KEY_USER_ID, "0").unwrap();
        s.store.set(KEY_USER_LEVEL, "ADMIN").unwrap();

        assert!(!s.check_entry());
        assert_eq!(s.store.get(KEY_IS_LOGGED_IN), None);
        assert_eq!(s.store.get(KEY_USER_LEVEL), None);
    }

    #[test]
    fn entry_guard_leaves_clean_logout_alone() {
        let s = state();
        assert!(!s.check_entry());
        assert!(s.current().is_none());
    }

    #[test]
    fn save_then_read_round_trips_the_user() {
        let s = state();
        s.save_login(&admin_user()).unwrap();

        assert!(s.is_authorized());
        let session = s.current().unwrap();
        assert_eq!(session.user_id, 42);
        assert_eq!(session.name, "Dewi");
        assert_eq!(session.username, "dewi");
        assert_eq!(session.level, "ADMIN");
        assert!(session.login_time > 0);
    }

    #[test]
    fn mixed_case_admin_level_survives_the_save_read_cycle() {
        let s = state();
        let mut user = admin_user();
        user.level = "Admin".into();
        s.save_login(&user).unwrap();

        assert!(s.is_authorized());
        let session = s.current().unwrap();
        assert_eq!(session.level, "ADMIN");
        assert_eq!(s.store.get(KEY_USER_LEVEL).as_deref(), Some("ADMIN"));
    }

    #[test]
    fn clear_removes_every_field() {
        let s = state();
        s.save_login(&admin_user()).unwrap();
        s.clear().unwrap();

        assert!(!s.is_authorized());
        for key in ALL_KEYS {
            assert_eq!(s.store.get(key), None, "key {key} should be gone");
        }
    }
}
