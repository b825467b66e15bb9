//! Session state machine.
//!
//! All transitions are pure: [`reduce`] consumes the previous state and an
//! event and returns the next state, which makes the whole lifecycle
//! unit-testable without a network. IO lives in [`crate::SessionManager`].
//!
//! # Invariants
//! - `is_authenticated == true` ⇒ `user` and `token` are present and `role`
//!   equals `user.role`.
//! - A rejected or logged-out settlement leaves `user`, `token`, and `role`
//!   all absent. (A freshly bootstrapped state may carry a stored token as an
//!   unverified claim before the first verify settles.)
//! - `loading` is true exactly while a session operation is in flight.

use serde::{Deserialize, Serialize};

use talentdesk_core::{Role, UserIdentity};

/// The current authenticated identity, role, and credential held by the client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub user: Option<UserIdentity>,
    pub token: Option<String>,
    pub role: Option<Role>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    /// Seed the session from whatever token the durable store held at
    /// startup. The token is an unverified claim until verify settles.
    pub fn bootstrap(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    fn anonymous_with_error(message: String) -> Self {
        Self {
            error: Some(message),
            ..Self::default()
        }
    }
}

/// Session transitions. Login and registration share settlement semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Login/register dispatched: in flight, previous error cleared.
    AuthPending,
    /// Login/register fulfilled with a verified identity and a fresh token.
    AuthFulfilled { user: UserIdentity, token: String },
    /// Login/register rejected: fully anonymous plus the failure message.
    AuthRejected { message: String },
    /// Verify dispatched. Unlike `AuthPending` this leaves any previous
    /// error visible while the check runs.
    VerifyPending,
    /// Verify fulfilled: the stored token's claim is promoted to a session.
    /// The token itself is already in state and is not re-persisted.
    VerifyFulfilled { user: UserIdentity },
    /// Verify rejected: forced reset, token gone.
    VerifyRejected { message: String },
    /// Logout settled (server success or swallowed failure): unconditional reset.
    LoggedOut,
    ErrorCleared,
    /// Explicit local reset without a server round-trip.
    Cleared,
}

/// Pure transition function for the session slice.
pub fn reduce(state: SessionState, event: SessionEvent) -> SessionState {
    match event {
        SessionEvent::AuthPending => SessionState {
            loading: true,
            error: None,
            ..state
        },
        SessionEvent::AuthFulfilled { user, token } => SessionState {
            role: Some(user.role),
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            loading: false,
            error: None,
        },
        SessionEvent::AuthRejected { message } | SessionEvent::VerifyRejected { message } => {
            SessionState::anonymous_with_error(message)
        }
        SessionEvent::VerifyPending => SessionState {
            loading: true,
            ..state
        },
        SessionEvent::VerifyFulfilled { user } => SessionState {
            role: Some(user.role),
            user: Some(user),
            token: state.token,
            is_authenticated: true,
            loading: false,
            error: None,
        },
        SessionEvent::LoggedOut | SessionEvent::Cleared => SessionState::default(),
        SessionEvent::ErrorCleared => SessionState {
            error: None,
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserIdentity {
        UserIdentity {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Manager,
        }
    }

    fn assert_invariants(state: &SessionState) {
        if state.is_authenticated {
            let user = state.user.as_ref().expect("authenticated without user");
            assert!(state.token.is_some(), "authenticated without token");
            assert_eq!(state.role, Some(user.role));
        } else {
            assert!(state.user.is_none());
            assert!(state.role.is_none());
        }
    }

    #[test]
    fn auth_fulfilled_promotes_the_session() {
        let state = reduce(SessionState::default(), SessionEvent::AuthPending);
        assert!(state.loading);

        let state = reduce(
            state,
            SessionEvent::AuthFulfilled {
                user: alice(),
                token: "tok-1".to_string(),
            },
        );
        assert!(state.is_authenticated);
        assert!(!state.loading);
        assert_eq!(state.token.as_deref(), Some("tok-1"));
        assert_eq!(state.role, Some(Role::Manager));
        assert_invariants(&state);
    }

    #[test]
    fn auth_rejected_leaves_a_fully_anonymous_state() {
        let state = reduce(SessionState::default(), SessionEvent::AuthPending);
        let state = reduce(
            state,
            SessionEvent::AuthRejected {
                message: "Invalid credentials".to_string(),
            },
        );
        assert!(!state.is_authenticated);
        assert!(state.token.is_none());
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert_invariants(&state);
    }

    #[test]
    fn verify_fulfilled_keeps_the_bootstrapped_token() {
        let state = SessionState::bootstrap(Some("stored-tok".to_string()));
        let state = reduce(state, SessionEvent::VerifyPending);
        let state = reduce(state, SessionEvent::VerifyFulfilled { user: alice() });

        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("stored-tok"));
        assert_invariants(&state);
    }

    #[test]
    fn verify_rejected_drops_the_token_claim() {
        let state = SessionState::bootstrap(Some("stale-tok".to_string()));
        let state = reduce(state, SessionEvent::VerifyPending);
        let state = reduce(
            state,
            SessionEvent::VerifyRejected {
                message: "Token verification failed".to_string(),
            },
        );
        assert!(!state.is_authenticated);
        assert!(state.token.is_none());
        assert!(!state.loading);
        assert_invariants(&state);
    }

    #[test]
    fn verify_pending_does_not_clear_a_previous_error() {
        let state = SessionState {
            error: Some("Login failed".to_string()),
            ..SessionState::default()
        };
        let state = reduce(state, SessionEvent::VerifyPending);
        assert_eq!(state.error.as_deref(), Some("Login failed"));

        // Login pending does clear it.
        let state = reduce(state, SessionEvent::AuthPending);
        assert!(state.error.is_none());
    }

    #[test]
    fn logged_out_resets_everything() {
        let state = reduce(
            SessionState::default(),
            SessionEvent::AuthFulfilled {
                user: alice(),
                token: "tok".to_string(),
            },
        );
        let state = reduce(state, SessionEvent::LoggedOut);
        assert_eq!(state, SessionState::default());
        assert_invariants(&state);
    }

    #[test]
    fn error_cleared_touches_only_the_error() {
        let state = SessionState {
            error: Some("oops".to_string()),
            token: Some("tok".to_string()),
            ..SessionState::default()
        };
        let state = reduce(state, SessionEvent::ErrorCleared);
        assert!(state.error.is_none());
        assert_eq!(state.token.as_deref(), Some("tok"));
    }
}
