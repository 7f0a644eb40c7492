//! `localStorage` backing for the session context

use shared::session::{SessionError, SessionStore};
use web_sys::Storage;

/// Browser `localStorage` as a [`SessionStore`]
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Open the window's `localStorage`
    pub fn open() -> Result<Self, SessionError> {
        let window =
            web_sys::window().ok_or_else(|| SessionError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| SessionError::Unavailable("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.storage
            .get_item(key)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        // Quota errors surface here
        self.storage
            .set_item(key, value)
            .map_err(|e| SessionError::Write(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.storage
            .remove_item(key)
            .map_err(|e| SessionError::Write(format!("{:?}", e)))
    }
}
