//! Session context
//!
//! A `Session` is opened once per request over an injected store. Opening it
//! reads the store exactly once and resolves the `AuthState`; handlers and the
//! guard work from that resolved state instead of reading storage themselves.

use tracing::{debug, info, warn};

use crate::auth::{AuthAction, AuthEvent, AuthState, GuardDecision, Navigation, guard, handle_event};
use crate::credential::Credential;
use crate::error::Result;
use crate::route::Route;
use crate::store::CredentialStore;

#[derive(Debug)]
pub struct Session<S> {
    store: S,
    state: AuthState,
}

impl<S: CredentialStore> Session<S> {
    /// Read the store and resolve the authentication state.
    pub fn open(store: S) -> Result<Self> {
        let stored = store.read()?;
        let (state, _) = handle_event(AuthState::Unknown, AuthEvent::StoreRead(stored));
        Ok(Self { store, state })
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn credential(&self) -> Option<&Credential> {
        match &self.state {
            AuthState::Authenticated(credential) => Some(credential),
            _ => None,
        }
    }

    pub fn guard(&self) -> GuardDecision {
        guard(&self.state)
    }

    /// Bootstrap the session from the identity provider's `token` parameter.
    ///
    /// A non-empty token is written to the store before the navigation is
    /// returned. Storage failures propagate and no navigation happens.
    pub fn handle_callback(&mut self, token: Option<&str>) -> Result<Navigation> {
        let event = AuthEvent::CallbackReceived {
            token: token.map(str::to_owned),
        };
        let navigation = self.apply(event)?.unwrap_or(Navigation::push(Route::Login));
        match navigation.to {
            Route::Dashboard => info!(to = navigation.to.path(), "session credential stored"),
            _ => warn!(to = navigation.to.path(), "callback without token"),
        }
        Ok(navigation)
    }

    /// Forget the stored credential.
    pub fn sign_out(&mut self) -> Result<Navigation> {
        let navigation = self
            .apply(AuthEvent::SignedOut)?
            .unwrap_or(Navigation::replace(Route::Login));
        info!("session credential cleared");
        Ok(navigation)
    }

    /// Give the store back, e.g. to flush pending writes into a response.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Run one transition and execute its action against the store.
    ///
    /// On a failed write the state drops back to `Unknown`: the store may or
    /// may not hold the old value, so nothing is assumed.
    fn apply(&mut self, event: AuthEvent) -> Result<Option<Navigation>> {
        let state = std::mem::replace(&mut self.state, AuthState::Unknown);
        let (next, action) = handle_event(state, event);

        let navigation = match action {
            AuthAction::Persist { credential, then } => {
                if let Err(e) = self.store.write(&credential) {
                    self.state = AuthState::Unknown;
                    return Err(e);
                }
                then
            }
            AuthAction::Clear { then } => {
                if let Err(e) = self.store.clear() {
                    self.state = AuthState::Unknown;
                    return Err(e);
                }
                then
            }
            AuthAction::Navigate(then) => then,
            AuthAction::None => {
                debug!(?next, "transition without navigation");
                self.state = next;
                return Ok(None);
            }
        };

        self.state = next;
        Ok(Some(navigation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::MemoryStore;

    /// Store whose writes always fail, as with a full or disabled storage area.
    struct FullStore;

    impl CredentialStore for FullStore {
        fn read(&self) -> Result<Option<Credential>> {
            Ok(None)
        }

        fn write(&mut self, credential: &Credential) -> Result<()> {
            Err(Error::QuotaExceeded {
                size: credential.token().len(),
                limit: 0,
            })
        }

        fn clear(&mut self) -> Result<()> {
            Err(Error::Unavailable("storage disabled".into()))
        }
    }

    #[test]
    fn open_resolves_state_from_store() {
        let session = Session::open(MemoryStore::new()).unwrap();
        assert_eq!(session.state(), &AuthState::Unauthenticated);
        assert_eq!(session.guard(), GuardDecision::Redirect(Route::Login));

        let stored = MemoryStore::with_credential(Credential::new("abc").unwrap());
        let session = Session::open(stored).unwrap();
        assert_eq!(session.credential().unwrap().token(), "abc");
        assert_eq!(session.guard(), GuardDecision::Allow);
    }

    #[test]
    fn callback_stores_token_and_navigates_to_dashboard() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        let navigation = session.handle_callback(Some("abc123")).unwrap();

        assert_eq!(navigation, Navigation::replace(Route::Dashboard));
        assert_eq!(session.guard(), GuardDecision::Allow);
        let store = session.into_store();
        assert_eq!(store.read().unwrap().unwrap().token(), "abc123");
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn callback_without_token_leaves_store_untouched() {
        for token in [None, Some("")] {
            let mut session = Session::open(MemoryStore::new()).unwrap();
            let navigation = session.handle_callback(token).unwrap();

            assert_eq!(navigation.to, Route::Login);
            let store = session.into_store();
            assert!(store.read().unwrap().is_none());
            assert_eq!(store.writes(), 0);
        }
    }

    #[test]
    fn callback_twice_is_idempotent() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        let first = session.handle_callback(Some("same")).unwrap();
        let second = session.handle_callback(Some("same")).unwrap();

        assert_eq!(first, second);
        let store = session.into_store();
        assert_eq!(store.read().unwrap().unwrap().token(), "same");
    }

    #[test]
    fn fresh_session_over_written_store_is_authenticated() {
        let mut session = Session::open(MemoryStore::new()).unwrap();
        session.handle_callback(Some("abc123")).unwrap();

        let reopened = Session::open(session.into_store()).unwrap();
        assert_eq!(reopened.guard(), GuardDecision::Allow);
    }

    #[test]
    fn storage_failure_propagates_without_navigation() {
        let mut session = Session::open(FullStore).unwrap();
        let result = session.handle_callback(Some("abc123"));

        assert!(matches!(result, Err(Error::QuotaExceeded { .. })));
        assert_eq!(session.guard(), GuardDecision::Pending);
    }

    #[test]
    fn sign_out_clears_store() {
        let stored = MemoryStore::with_credential(Credential::new("abc").unwrap());
        let mut session = Session::open(stored).unwrap();

        let navigation = session.sign_out().unwrap();
        assert_eq!(navigation, Navigation::replace(Route::Login));
        assert_eq!(session.state(), &AuthState::Unauthenticated);
        assert!(session.into_store().read().unwrap().is_none());
    }
}
