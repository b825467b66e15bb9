//! Role-gated access decisions for protected destinations.
//!
//! Pure policy check in the same spirit as the session reducer:
//! - No IO
//! - No panics
//! - No business logic beyond the gate itself

use talentdesk_core::RoleSet;

use crate::session::SessionState;

/// Outcome of evaluating a protected destination against the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// A session operation is in flight; render a loading state, do not redirect.
    ShowLoading,
    /// Not authenticated; redirect to the login entry point carrying the
    /// requested destination so it can be restored after login.
    RedirectToLogin { from: String },
    /// Authenticated, but the role is not in the destination's allowed set.
    RedirectToUnauthorized,
    /// Render the protected content.
    Allow,
}

/// Decide access to `destination` for the current session.
///
/// The rendering layer pairs this with [`needs_verification`] on mount to
/// kick off a single `verify_existing_session` when a stored token might
/// still be valid.
pub fn evaluate(session: &SessionState, allowed: &RoleSet, destination: &str) -> GuardDecision {
    if session.loading {
        return GuardDecision::ShowLoading;
    }

    if !session.is_authenticated {
        return GuardDecision::RedirectToLogin {
            from: destination.to_string(),
        };
    }

    // An authenticated session without a role would break the session
    // invariant; treat it as unauthorized rather than letting it through.
    let Some(role) = session.role else {
        return GuardDecision::RedirectToUnauthorized;
    };

    if allowed.allows(role) {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToUnauthorized
    }
}

/// True when a mount should dispatch `verify_existing_session`: exactly the
/// "unauthenticated and not already loading" window, so at most one
/// verification is triggered per mount.
pub fn needs_verification(session: &SessionState) -> bool {
    !session.is_authenticated && !session.loading
}

#[cfg(test)]
mod tests {
    use talentdesk_core::{Role, UserIdentity};

    use super::*;

    fn authenticated(role: Role) -> SessionState {
        SessionState {
            user: Some(UserIdentity {
                id: 1,
                name: "Test".to_string(),
                email: "test@example.com".to_string(),
                role,
            }),
            token: Some("tok".to_string()),
            role: Some(role),
            is_authenticated: true,
            loading: false,
            error: None,
        }
    }

    #[test]
    fn loading_session_shows_loading_without_redirecting() {
        let session = SessionState {
            loading: true,
            ..SessionState::default()
        };
        assert_eq!(
            evaluate(&session, &RoleSet::admin(), "/admin"),
            GuardDecision::ShowLoading
        );
        assert!(!needs_verification(&session));
    }

    #[test]
    fn unauthenticated_session_redirects_to_login_with_origin() {
        let session = SessionState::default();
        assert_eq!(
            evaluate(&session, &RoleSet::any(), "/dashboard"),
            GuardDecision::RedirectToLogin {
                from: "/dashboard".to_string()
            }
        );
        assert!(needs_verification(&session));
    }

    #[test]
    fn user_role_is_turned_away_from_admin_destinations() {
        let session = authenticated(Role::User);
        assert_eq!(
            evaluate(&session, &RoleSet::admin(), "/admin"),
            GuardDecision::RedirectToUnauthorized
        );
    }

    #[test]
    fn admin_may_enter_managerial_destinations() {
        let session = authenticated(Role::Admin);
        assert_eq!(
            evaluate(&session, &RoleSet::managerial(), "/manager/groups"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn empty_role_set_admits_any_authenticated_role() {
        let session = authenticated(Role::User);
        assert_eq!(
            evaluate(&session, &RoleSet::any(), "/profile"),
            GuardDecision::Allow
        );
    }
}
