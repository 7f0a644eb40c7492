//! Session context
//!
//! Token, user and preferences live behind a [`SessionStore`] that the caller
//! passes in, so screens never reach for global browser storage directly.
//! The browser build backs it with `localStorage`; tests and native callers
//! use [`MemoryStore`].

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{AuthToken, Preferences, UserProfile};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const PREFERENCES_KEY: &str = "preferences";

/// Session persistence failures
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("not signed in")]
    NotSignedIn,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key-value persistence
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Signed-in state and preferences over a store
pub struct Session<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Persist the token and user returned by sign-in or sign-up
    pub fn sign_in(&mut self, token: &AuthToken) -> Result<(), SessionError> {
        self.store.set(TOKEN_KEY, &token.access_token)?;
        self.store.set(USER_KEY, &serde_json::to_string(&token.user)?)?;
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>, SessionError> {
        self.store.get(TOKEN_KEY)
    }

    /// Stored user, `None` when absent or unreadable
    pub fn current_user(&self) -> Result<Option<UserProfile>, SessionError> {
        Ok(self
            .store
            .get(USER_KEY)?
            .and_then(|raw| serde_json::from_str(&raw).ok()))
    }

    pub fn is_signed_in(&self) -> Result<bool, SessionError> {
        Ok(self.token()?.is_some() && self.current_user()?.is_some())
    }

    /// Forget the token and user; preferences stay
    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }

    /// Stored preferences, defaults when absent or unreadable
    pub fn preferences(&self) -> Result<Preferences, SessionError> {
        Ok(self
            .store
            .get(PREFERENCES_KEY)?
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default())
    }

    pub fn save_preferences(&mut self, preferences: &Preferences) -> Result<(), SessionError> {
        self.store
            .set(PREFERENCES_KEY, &serde_json::to_string(preferences)?)
    }

    /// Change the stored user's name and email
    pub fn update_profile(&mut self, name: &str, email: &str) -> Result<UserProfile, SessionError> {
        self.modify_user(|user| {
            user.name = Some(name.to_string());
            user.email = email.to_string();
        })
    }

    /// Flag the stored user as a verified researcher
    pub fn mark_researcher(&mut self, institution: &str) -> Result<UserProfile, SessionError> {
        self.modify_user(|user| {
            user.is_researcher = true;
            user.institution = Some(institution.to_string());
        })
    }

    fn modify_user(
        &mut self,
        change: impl FnOnce(&mut UserProfile),
    ) -> Result<UserProfile, SessionError> {
        let mut user = self.current_user()?.ok_or(SessionError::NotSignedIn)?;
        change(&mut user);
        self.store.set(USER_KEY, &serde_json::to_string(&user)?)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;
    use chrono::{TimeZone, Utc};

    fn token() -> AuthToken {
        AuthToken {
            access_token: "abc.def.ghi".to_string(),
            token_type: "bearer".to_string(),
            user: UserProfile {
                id: "user_1".to_string(),
                email: "demo@veridian.com".to_string(),
                name: Some("Demo User".to_string()),
                role: "USER".to_string(),
                is_researcher: false,
                created_at: Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap(),
                institution: None,
            },
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let mut session = Session::new(MemoryStore::new());
        assert!(!session.is_signed_in().unwrap());

        session.sign_in(&token()).unwrap();
        assert!(session.is_signed_in().unwrap());
        assert_eq!(session.token().unwrap().as_deref(), Some("abc.def.ghi"));
        assert_eq!(session.current_user().unwrap().unwrap().id, "user_1");

        session.sign_out().unwrap();
        assert!(!session.is_signed_in().unwrap());
        assert!(session.current_user().unwrap().is_none());
    }

    #[test]
    fn test_preferences_survive_sign_out() {
        let mut session = Session::new(MemoryStore::new());
        session.sign_in(&token()).unwrap();

        let prefs = Preferences {
            theme: Theme::Dark,
            default_location: "Mumbai".to_string(),
            ..Preferences::default()
        };
        session.save_preferences(&prefs).unwrap();
        session.sign_out().unwrap();

        assert_eq!(session.preferences().unwrap(), prefs);
    }

    #[test]
    fn test_corrupt_entries_fall_back() {
        let mut store = MemoryStore::new();
        store.set(PREFERENCES_KEY, "{not json").unwrap();
        store.set(USER_KEY, "[]").unwrap();
        let session = Session::new(store);

        assert_eq!(session.preferences().unwrap(), Preferences::default());
        assert!(session.current_user().unwrap().is_none());
    }

    #[test]
    fn test_profile_updates_require_user() {
        let mut session = Session::new(MemoryStore::new());
        assert!(matches!(
            session.update_profile("A", "a@b.c"),
            Err(SessionError::NotSignedIn)
        ));

        session.sign_in(&token()).unwrap();
        let user = session.update_profile("Asha", "asha@example.com").unwrap();
        assert_eq!(user.name.as_deref(), Some("Asha"));

        let user = session.mark_researcher("IIT Delhi").unwrap();
        assert!(user.is_researcher);
        assert_eq!(user.email, "asha@example.com");
        assert_eq!(
            session.current_user().unwrap().unwrap().institution.as_deref(),
            Some("IIT Delhi")
        );
    }
}
