use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::SessionCookie;

/// Session cookie shared by all clones of a client.
#[derive(Debug, Clone, Default)]
pub(crate) struct SessionStore {
    cookie: Arc<Mutex<Option<SessionCookie>>>,
}

impl SessionStore {
    fn lock(&self) -> MutexGuard<'_, Option<SessionCookie>> {
        // A poisoned lock still holds a valid Option.
        self.cookie.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn get(&self) -> Option<SessionCookie> {
        self.lock().clone()
    }

    /// Store `cookie`, returning the one it replaced.
    pub(crate) fn set(&self, cookie: SessionCookie) -> Option<SessionCookie> {
        self.lock().replace(cookie)
    }

    pub(crate) fn clear(&self) -> Option<SessionCookie> {
        self.lock().take()
    }
}

/// Clears the session when dropped.
pub(crate) struct SessionScope<'a> {
    store: &'a SessionStore,
}

impl<'a> SessionScope<'a> {
    pub(crate) fn new(store: &'a SessionStore) -> Self {
        Self { store }
    }
}

impl Drop for SessionScope<'_> {
    fn drop(&mut self) {
        if self.store.clear().is_some() {
            tracing::debug!("sms24x7 session cleared at scope exit");
        }
    }
}
