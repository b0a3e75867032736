//! Authentication state machine
//!
//! Pure state machine: receives events, returns (new_state, action).
//! The caller (`Session`) executes the storage I/O implied by each action.

use crate::credential::Credential;
use crate::route::Route;

/// What the portal knows about the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Store not read yet
    Unknown,
    /// A credential is present in the store
    Authenticated(Credential),
    /// The store holds no credential
    Unauthenticated,
}

/// Events that drive state transitions.
#[derive(Debug)]
pub enum AuthEvent {
    /// The credential store was read (startup or storage change)
    StoreRead(Option<Credential>),
    /// The identity provider redirected back with the raw `token` parameter
    CallbackReceived { token: Option<String> },
    /// The visitor asked to sign out
    SignedOut,
}

/// Where the browser goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub to: Route,
    /// Replace the current history entry instead of pushing a new one
    pub replace: bool,
}

impl Navigation {
    pub const fn push(to: Route) -> Self {
        Self { to, replace: false }
    }

    pub const fn replace(to: Route) -> Self {
        Self { to, replace: true }
    }
}

/// Actions the caller should execute after a state transition
#[derive(Debug, PartialEq, Eq)]
pub enum AuthAction {
    /// Write the credential, then navigate. The write must land first.
    Persist {
        credential: Credential,
        then: Navigation,
    },
    /// Remove the credential, then navigate
    Clear { then: Navigation },
    /// Navigate without touching storage
    Navigate(Navigation),
    /// No-op
    None,
}

/// Outcome of the access guard for a protected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected view
    Allow,
    /// Render nothing, go here instead
    Redirect(Route),
    /// State not resolved yet
    Pending,
}

/// Handle a state transition. Pure function: no I/O.
pub fn handle_event(state: AuthState, event: AuthEvent) -> (AuthState, AuthAction) {
    match (state, event) {
        // --- Store resolution ---
        (_, AuthEvent::StoreRead(Some(credential))) => {
            (AuthState::Authenticated(credential), AuthAction::None)
        }
        (_, AuthEvent::StoreRead(None)) => (AuthState::Unauthenticated, AuthAction::None),

        // --- Callback ---
        (state, AuthEvent::CallbackReceived { token }) => {
            match token.and_then(Credential::new) {
                Some(credential) => (
                    AuthState::Authenticated(credential.clone()),
                    AuthAction::Persist {
                        credential,
                        then: Navigation::replace(Route::Dashboard),
                    },
                ),
                // Storage untouched, so the state it reflects is unchanged too
                None => (state, AuthAction::Navigate(Navigation::push(Route::Login))),
            }
        }

        // --- Sign out ---
        (_, AuthEvent::SignedOut) => (
            AuthState::Unauthenticated,
            AuthAction::Clear {
                then: Navigation::replace(Route::Login),
            },
        ),
    }
}

/// Access decision for a protected route.
pub fn guard(state: &AuthState) -> GuardDecision {
    match state {
        AuthState::Authenticated(_) => GuardDecision::Allow,
        AuthState::Unauthenticated => GuardDecision::Redirect(Route::Login),
        AuthState::Unknown => GuardDecision::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(token: &str) -> Credential {
        Credential::new(token).unwrap()
    }

    #[test]
    fn store_read_resolves_unknown() {
        let (state, action) = handle_event(
            AuthState::Unknown,
            AuthEvent::StoreRead(Some(credential("abc"))),
        );
        assert_eq!(state, AuthState::Authenticated(credential("abc")));
        assert_eq!(action, AuthAction::None);

        let (state, action) = handle_event(AuthState::Unknown, AuthEvent::StoreRead(None));
        assert_eq!(state, AuthState::Unauthenticated);
        assert_eq!(action, AuthAction::None);
    }

    #[test]
    fn store_change_re_resolves_a_known_state() {
        let (state, _) = handle_event(
            AuthState::Authenticated(credential("old")),
            AuthEvent::StoreRead(None),
        );
        assert_eq!(state, AuthState::Unauthenticated);
    }

    #[test]
    fn callback_with_token_persists_then_replaces_with_dashboard() {
        let (state, action) = handle_event(
            AuthState::Unauthenticated,
            AuthEvent::CallbackReceived {
                token: Some("abc123".into()),
            },
        );
        assert_eq!(state, AuthState::Authenticated(credential("abc123")));
        assert_eq!(
            action,
            AuthAction::Persist {
                credential: credential("abc123"),
                then: Navigation::replace(Route::Dashboard),
            }
        );
    }

    #[test]
    fn callback_without_token_goes_to_login_and_keeps_state() {
        for token in [None, Some(String::new())] {
            let (state, action) = handle_event(
                AuthState::Unauthenticated,
                AuthEvent::CallbackReceived { token },
            );
            assert_eq!(state, AuthState::Unauthenticated);
            assert_eq!(action, AuthAction::Navigate(Navigation::push(Route::Login)));
        }

        // A visitor who already holds a credential keeps it
        let (state, action) = handle_event(
            AuthState::Authenticated(credential("kept")),
            AuthEvent::CallbackReceived { token: None },
        );
        assert_eq!(state, AuthState::Authenticated(credential("kept")));
        assert_eq!(action, AuthAction::Navigate(Navigation::push(Route::Login)));
    }

    #[test]
    fn callback_accepts_any_non_empty_token() {
        for token in ["x", "not-a-jwt", "   ", "%%%", "ü"] {
            let (state, _) = handle_event(
                AuthState::Unknown,
                AuthEvent::CallbackReceived {
                    token: Some(token.into()),
                },
            );
            assert_eq!(state, AuthState::Authenticated(credential(token)));
        }
    }

    #[test]
    fn sign_out_clears_from_any_state() {
        for start in [
            AuthState::Unknown,
            AuthState::Unauthenticated,
            AuthState::Authenticated(credential("abc")),
        ] {
            let (state, action) = handle_event(start, AuthEvent::SignedOut);
            assert_eq!(state, AuthState::Unauthenticated);
            assert_eq!(
                action,
                AuthAction::Clear {
                    then: Navigation::replace(Route::Login)
                }
            );
        }
    }

    #[test]
    fn guard_distinguishes_all_three_states() {
        assert_eq!(
            guard(&AuthState::Authenticated(credential("abc"))),
            GuardDecision::Allow
        );
        assert_eq!(
            guard(&AuthState::Unauthenticated),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(guard(&AuthState::Unknown), GuardDecision::Pending);
    }
}
