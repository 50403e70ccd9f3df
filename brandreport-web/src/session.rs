//! Client session state and its cookie persistence.
//!
//! A single [`SessionManager`] is created in `main` and handed to the root
//! component. Components that need the session receive a [`SessionHandle`]
//! prop; nothing reads the session from ambient context.

use crate::cookies::{CookieError, CookieStore};
use shared::models::UserProfile;
use std::{cell::RefCell, fmt, rc::Rc, time::Duration};
use thiserror::Error;
use yew::Callback;

pub const USER_COOKIE: &str = "user";
pub const TOKEN_COOKIE: &str = "auth_token";

/// Lifetime of both session cookies.
pub const SESSION_COOKIE_MAX_AGE: time::Duration = time::Duration::days(7);

/// Minimum time the startup loading screen stays up.
pub const LOADING_FLOOR: Duration = Duration::from_millis(3000);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to serialize user profile: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Cookie(#[from] CookieError),
}

/// Snapshot of the session as rendered by the UI.
///
/// Authentication is derived from `user`, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<UserProfile>,
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Time left before the loading floor is satisfied, if any.
pub fn remaining_floor(elapsed: Duration) -> Option<Duration> {
    LOADING_FLOOR
        .checked_sub(elapsed)
        .filter(|remaining| !remaining.is_zero())
}

/// Owns the session state and keeps it in step with the cookie store.
pub struct SessionManager {
    store: Rc<dyn CookieStore>,
    state: RefCell<Session>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("store", &self.store)
            .field("state", &self.state.borrow())
            .finish()
    }
}

impl SessionManager {
    pub fn new(store: Rc<dyn CookieStore>) -> Self {
        Self {
            store,
            state: RefCell::new(Session::default()),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Token to present as a bearer credential.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_COOKIE)
    }

    /// Restore the user from cookies.
    ///
    /// Leaves `loading` untouched; call [`finish_loading`](Self::finish_loading)
    /// once the loading floor has elapsed.
    pub fn bootstrap(&self) {
        let user = match (self.store.get(USER_COOKIE), self.store.get(TOKEN_COOKIE)) {
            (Some(raw_user), Some(_token)) => match serde_json::from_str::<UserProfile>(&raw_user)
            {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(error = %err, "discarding unreadable session cookie");
                    None
                }
            },
            _ => None,
        };

        if user.is_none() {
            self.clear_cookies();
        } else {
            tracing::info!("restored session from cookies");
        }
        self.state.borrow_mut().user = user;
    }

    /// The single `loading` → resolved transition. Later calls do nothing.
    pub fn finish_loading(&self) -> Session {
        let mut state = self.state.borrow_mut();
        state.loading = false;
        state.clone()
    }

    /// Mark the session authenticated and persist it.
    ///
    /// # Errors
    /// Propagates profile serialization and cookie write failures. Memory
    /// state is updated before persistence is attempted.
    pub fn login(&self, user: UserProfile, token: &str) -> Result<Session, SessionError> {
        {
            let mut state = self.state.borrow_mut();
            state.user = Some(user.clone());
        }
        let encoded = serde_json::to_string(&user)?;
        self.store
            .set(USER_COOKIE, &encoded, SESSION_COOKIE_MAX_AGE)?;
        self.store.set(TOKEN_COOKIE, token, SESSION_COOKIE_MAX_AGE)?;
        tracing::info!(email = %user.email, "signed in");
        Ok(self.snapshot())
    }

    /// Forget the user and delete both cookies.
    pub fn logout(&self) -> Session {
        self.state.borrow_mut().user = None;
        self.clear_cookies();
        tracing::info!("signed out");
        self.snapshot()
    }

    /// Replace the profile and re-persist it.
    ///
    /// The in-memory profile is kept even when persistence fails.
    ///
    /// # Errors
    /// Returns the persistence failure after logging it.
    pub fn update_user(&self, user: UserProfile) -> Result<Session, SessionError> {
        self.state.borrow_mut().user = Some(user.clone());
        let persisted = serde_json::to_string(&user)
            .map_err(SessionError::from)
            .and_then(|encoded| {
                self.store
                    .set(USER_COOKIE, &encoded, SESSION_COOKIE_MAX_AGE)
                    .map_err(SessionError::from)
            });
        if let Err(err) = persisted {
            tracing::error!(error = %err, "failed to persist updated profile");
            return Err(err);
        }
        Ok(self.snapshot())
    }

    fn clear_cookies(&self) {
        self.store.remove(USER_COOKIE);
        self.store.remove(TOKEN_COOKIE);
    }
}

/// Session access handed to components as a prop.
///
/// Equality compares the snapshot, so a state change re-renders every
/// component holding a handle.
#[derive(Clone)]
pub struct SessionHandle {
    manager: Rc<SessionManager>,
    snapshot: Session,
    on_change: Callback<Session>,
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.manager, &other.manager) && self.snapshot == other.snapshot
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

impl SessionHandle {
    pub fn new(manager: Rc<SessionManager>, snapshot: Session, on_change: Callback<Session>) -> Self {
        Self {
            manager,
            snapshot,
            on_change,
        }
    }

    pub fn session(&self) -> &Session {
        &self.snapshot
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.snapshot.user.as_ref()
    }

    /// # Errors
    /// See [`SessionManager::login`]. Observers are notified either way, since
    /// memory state changes before persistence.
    pub fn login(&self, user: UserProfile, token: &str) -> Result<(), SessionError> {
        let result = self.manager.login(user, token);
        self.on_change.emit(self.manager.snapshot());
        result.map(|_| ())
    }

    pub fn logout(&self) {
        self.on_change.emit(self.manager.logout());
    }

    /// # Errors
    /// See [`SessionManager::update_user`].
    pub fn update_user(&self, user: UserProfile) -> Result<(), SessionError> {
        let result = self.manager.update_user(user);
        self.on_change.emit(self.manager.snapshot());
        result.map(|_| ())
    }
}
