//! Mock authentication with persistence and change notification.
//!
//! There is no real backend yet: login resolves any non-empty credentials
//! to a canned demo account and signup mints a fresh one. Everything
//! around the canned data behaves like production code: state changes are
//! written through a [`SessionStore`] and fanned out to subscribers, and
//! a saved session is rehydrated on startup.

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::storage::SessionStore;
use crate::user::{demo_user, fresh_user, MeditationStats, User};

/// The observable authentication state: who is signed in, if anyone.
/// This is also exactly what gets persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

/// Why a login or signup was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Email or password missing.
    InvalidCredentials,
    /// Signup needs a display name.
    NameRequired,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "invalid email or password"),
            AuthError::NameRequired => write!(f, "a display name is required"),
        }
    }
}

impl std::error::Error for AuthError {}

type Listener = Box<dyn FnMut(&AuthState)>;

/// Holds the session, persists every change, and notifies subscribers.
///
/// The backing [`SessionStore`] is injected, so the same store logic runs
/// against a file on desktop and an in-memory map in tests. Persistence
/// failures are logged and swallowed; losing the saved session must not
/// take the live one down with it.
pub struct AuthStore<S: SessionStore> {
    state: AuthState,
    storage: S,
    listeners: Vec<(u64, Listener)>,
    next_listener: u64,
}

impl<S: SessionStore> AuthStore<S> {
    /// Create the store, rehydrating any session the storage still holds.
    /// An unreadable record is logged and discarded; the app starts
    /// signed out rather than refusing to start.
    pub fn new(storage: S) -> Self {
        let state = match storage.load() {
            Ok(Some(state)) => state,
            Ok(None) => AuthState::default(),
            Err(err) => {
                warn!("discarding unreadable session record: {}", err);
                AuthState::default()
            }
        };
        Self {
            state,
            storage,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Sign in. Any non-empty credentials resolve to the demo account for
    /// that email. Logging in over an existing session replaces it; there
    /// is only ever one signed-in record.
    pub fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        self.state.user = Some(demo_user(email));
        self.state.is_authenticated = true;
        self.commit();
        Ok(())
    }

    /// Create a fresh zero-history account and sign it in.
    pub fn signup(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
        rng: &mut impl Rng,
    ) -> Result<(), AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        if name.trim().is_empty() {
            return Err(AuthError::NameRequired);
        }
        self.state.user = Some(fresh_user(email, name, rng));
        self.state.is_authenticated = true;
        self.commit();
        Ok(())
    }

    /// Sign out and persist the signed-out state.
    pub fn logout(&mut self) {
        self.state = AuthState::default();
        self.commit();
    }

    /// Apply an edit to the signed-in user. No-op when signed out.
    pub fn update_user(&mut self, apply: impl FnOnce(&mut User)) {
        if let Some(user) = self.state.user.as_mut() {
            apply(user);
            self.commit();
        }
    }

    /// Apply an edit to the signed-in user's meditation stats.
    pub fn update_stats(&mut self, apply: impl FnOnce(&mut MeditationStats)) {
        self.update_user(|user| apply(&mut user.meditation_stats));
    }

    /// Fold a completed session of `minutes` into the lifetime stats.
    pub fn record_completed_session(&mut self, minutes: u32) {
        self.update_stats(|stats| stats.record_session(minutes));
    }

    /// Register for state-change notifications. Returns an id to pass to
    /// [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&mut self, listener: impl FnMut(&AuthState) + 'static) -> u64 {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: u64) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn commit(&mut self) {
        if let Err(err) = self.storage.save(&self.state) {
            warn!("failed to persist session: {}", err);
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemorySessionStore, StorageError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn store() -> AuthStore<MemorySessionStore> {
        AuthStore::new(MemorySessionStore::new())
    }

    #[test]
    fn test_login_resolves_to_demo_account_and_persists() {
        let mut auth = store();
        auth.login("maya@example.com", "secret").unwrap();

        assert!(auth.is_authenticated());
        let user = auth.user().unwrap();
        assert_eq!(user.name, "maya");
        assert_eq!(user.meditation_stats.total_sessions, 23);

        let persisted = auth.storage().record().unwrap();
        assert!(persisted.is_authenticated);
        assert_eq!(persisted.user.as_ref().unwrap().email, "maya@example.com");
    }

    #[test]
    fn test_empty_credentials_are_rejected() {
        let mut auth = store();
        assert_eq!(auth.login("", "secret"), Err(AuthError::InvalidCredentials));
        assert_eq!(
            auth.login("maya@example.com", ""),
            Err(AuthError::InvalidCredentials)
        );
        assert!(!auth.is_authenticated());
        assert!(auth.storage().record().is_none(), "rejected login must not persist");
    }

    #[test]
    fn test_double_login_replaces_the_session() {
        let mut auth = store();
        auth.login("alice@example.com", "pw").unwrap();
        auth.login("bob@example.com", "pw").unwrap();

        assert_eq!(auth.user().unwrap().email, "bob@example.com");
        let persisted = auth.storage().record().unwrap();
        assert_eq!(persisted.user.as_ref().unwrap().email, "bob@example.com");
    }

    #[test]
    fn test_signup_creates_a_fresh_account() {
        let mut auth = store();
        let mut rng = StdRng::seed_from_u64(21);
        auth.signup("new@example.com", "pw", "River", &mut rng).unwrap();

        let user = auth.user().unwrap();
        assert_eq!(user.name, "River");
        assert_eq!(user.meditation_stats.total_sessions, 0);
        assert_eq!(user.meditation_stats.current_level, 1);
        assert_eq!(user.id.len(), 9);
        assert_ne!(user.id, "1");
    }

    #[test]
    fn test_signup_requires_a_name() {
        let mut auth = store();
        let mut rng = StdRng::seed_from_u64(22);
        assert_eq!(
            auth.signup("new@example.com", "pw", "  ", &mut rng),
            Err(AuthError::NameRequired)
        );
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_logout_clears_and_persists_signed_out_state() {
        let mut auth = store();
        auth.login("maya@example.com", "pw").unwrap();
        auth.logout();

        assert!(!auth.is_authenticated());
        assert!(auth.user().is_none());
        let persisted = auth.storage().record().unwrap();
        assert!(!persisted.is_authenticated);
        assert!(persisted.user.is_none());
    }

    #[test]
    fn test_rehydrates_saved_session() {
        let saved = AuthState {
            user: Some(demo_user("maya@example.com")),
            is_authenticated: true,
        };
        let auth = AuthStore::new(MemorySessionStore::seeded(saved));
        assert!(auth.is_authenticated());
        assert_eq!(auth.user().unwrap().email, "maya@example.com");
    }

    #[test]
    fn test_subscribers_observe_changes_until_unsubscribed() {
        let seen: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut auth = store();
        let id = auth.subscribe(move |state| sink.borrow_mut().push(state.is_authenticated));

        auth.login("maya@example.com", "pw").unwrap();
        auth.logout();
        assert_eq!(*seen.borrow(), vec![true, false]);

        auth.unsubscribe(id);
        auth.login("maya@example.com", "pw").unwrap();
        assert_eq!(*seen.borrow(), vec![true, false], "unsubscribed listener must stay quiet");
    }

    #[test]
    fn test_record_completed_session_updates_persisted_stats() {
        let mut auth = store();
        auth.login("maya@example.com", "pw").unwrap();
        auth.record_completed_session(15);

        let stats = &auth.user().unwrap().meditation_stats;
        assert_eq!(stats.total_sessions, 24);
        assert_eq!(stats.total_minutes, 502);
        assert_eq!(stats.streak_days, 8);

        let persisted = auth.storage().record().unwrap();
        let persisted_stats = &persisted.user.as_ref().unwrap().meditation_stats;
        assert_eq!(persisted_stats.total_minutes, 502);
    }

    /// Store whose reads and writes always fail.
    struct BrokenStore;

    fn json_error() -> StorageError {
        match serde_json::from_str::<AuthState>("{") {
            Err(e) => StorageError::Json(e),
            Ok(_) => unreachable!(),
        }
    }

    impl SessionStore for BrokenStore {
        fn load(&self) -> Result<Option<AuthState>, StorageError> {
            Err(json_error())
        }
        fn save(&mut self, _state: &AuthState) -> Result<(), StorageError> {
            Err(json_error())
        }
        fn clear(&mut self) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_broken_storage_never_blocks_the_live_session() {
        // Unreadable record: start signed out instead of crashing.
        let mut auth = AuthStore::new(BrokenStore);
        assert!(!auth.is_authenticated());

        // Unwritable store: the in-memory session still works.
        auth.login("maya@example.com", "pw").unwrap();
        assert!(auth.is_authenticated());
    }
}
