//! Session operations against the network and token store.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};

use talentdesk_client::{ApiRequest, CredentialCell, TokenStore, Transport};
use talentdesk_core::{Notifier, RoleSet, Slice, UserIdentity};

use crate::guard::{self, GuardDecision};
use crate::session::{SessionEvent, SessionState, reduce};

const LOGIN_FALLBACK: &str = "Login failed";
const REGISTER_FALLBACK: &str = "Registration failed";
const VERIFY_FALLBACK: &str = "Token verification failed";

/// Login credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration profile. The server creates the identity, then the contract
/// is identical to login.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationProfile {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Drives the session lifecycle.
///
/// Owns no state beyond its slice handle and the shared [`CredentialCell`]
/// the transport reads. Cheap to clone; clones share the same session.
///
/// Operations never return errors: every outcome settles into the slice, and
/// concurrent settlements apply last-write-wins (an older completion can
/// overwrite a newer one; callers needing strict ordering must serialize).
#[derive(Clone)]
pub struct SessionManager {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
    credentials: Arc<CredentialCell>,
    slice: Slice<SessionState>,
}

impl SessionManager {
    /// Build the manager, seeding the session from the token store.
    pub fn new(
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
        credentials: Arc<CredentialCell>,
        notifier: &Arc<Notifier>,
    ) -> Self {
        let slice = Slice::new(
            SessionState::bootstrap(tokens.load()),
            Arc::clone(notifier),
        );
        Self {
            transport,
            tokens,
            credentials,
            slice,
        }
    }

    pub fn state(&self) -> SessionState {
        self.slice.snapshot()
    }

    pub fn slice(&self) -> &Slice<SessionState> {
        &self.slice
    }

    /// Decide access to `destination` against the current session, without
    /// cloning the state out.
    pub fn evaluate_access(&self, allowed: &RoleSet, destination: &str) -> GuardDecision {
        self.slice
            .read(|state| guard::evaluate(state, allowed, destination))
    }

    /// True when a mount should dispatch [`Self::verify_existing_session`].
    pub fn needs_verification(&self) -> bool {
        self.slice.read(guard::needs_verification)
    }

    fn dispatch(&self, event: SessionEvent) {
        self.slice.transition(|state| reduce(state, event));
    }

    fn reset_credentials(&self) {
        self.tokens.clear();
        self.credentials.clear();
    }

    /// POST `/auth/login`. On success the token is persisted and becomes the
    /// transport credential; on failure the session stays fully anonymous.
    pub async fn login(&self, credentials: Credentials) {
        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        self.authenticate("/auth/login", body, LOGIN_FALLBACK).await;
    }

    /// POST `/auth/register`. Identical contract to [`Self::login`].
    pub async fn register(&self, profile: RegistrationProfile) {
        let body = json!({
            "name": profile.name,
            "email": profile.email,
            "password": profile.password,
        });
        self.authenticate("/auth/register", body, REGISTER_FALLBACK)
            .await;
    }

    async fn authenticate(&self, path: &str, body: Value, fallback: &str) {
        self.dispatch(SessionEvent::AuthPending);

        match self.transport.send(ApiRequest::post(path).with_body(body)).await {
            Ok(response) => match parse_auth_payload(&response) {
                Some((user, token)) => {
                    self.tokens.save(&token);
                    self.credentials.set(token.clone());
                    self.dispatch(SessionEvent::AuthFulfilled { user, token });
                }
                None => {
                    tracing::error!(path, "auth response missing user or token");
                    self.dispatch(SessionEvent::AuthRejected {
                        message: fallback.to_string(),
                    });
                }
            },
            Err(err) => {
                tracing::warn!(path, "auth request failed: {err}");
                self.dispatch(SessionEvent::AuthRejected {
                    message: err.surface_message(fallback),
                });
            }
        }
    }

    /// GET `/auth/verify` with the stored token.
    ///
    /// Without a stored token this fails immediately, no network call. Any
    /// failure clears the stored token and the transport credential; success
    /// promotes the claim but does not re-persist the token.
    pub async fn verify_existing_session(&self) {
        self.dispatch(SessionEvent::VerifyPending);

        let Some(token) = self.tokens.load() else {
            self.reset_credentials();
            self.dispatch(SessionEvent::VerifyRejected {
                message: VERIFY_FALLBACK.to_string(),
            });
            return;
        };

        self.credentials.set(token);
        match self.transport.send(ApiRequest::get("/auth/verify")).await {
            Ok(response) => match parse_user(&response) {
                Some(user) => self.dispatch(SessionEvent::VerifyFulfilled { user }),
                None => {
                    tracing::error!("verify response missing user");
                    self.reset_credentials();
                    self.dispatch(SessionEvent::VerifyRejected {
                        message: VERIFY_FALLBACK.to_string(),
                    });
                }
            },
            Err(err) => {
                if err.is_unauthorized() {
                    tracing::info!("stored session token rejected by server");
                } else {
                    tracing::warn!("session verification failed: {err}");
                }
                self.reset_credentials();
                self.dispatch(SessionEvent::VerifyRejected {
                    message: err.surface_message(VERIFY_FALLBACK),
                });
            }
        }
    }

    /// POST `/auth/logout`, best effort.
    ///
    /// A server failure is logged and swallowed; the local session always
    /// resets and the stored token is always cleared.
    pub async fn logout(&self) {
        if let Err(err) = self.transport.send(ApiRequest::post("/auth/logout")).await {
            tracing::warn!("logout notification failed: {err}");
        }
        self.reset_credentials();
        self.dispatch(SessionEvent::LoggedOut);
    }

    pub fn clear_error(&self) {
        self.dispatch(SessionEvent::ErrorCleared);
    }

    /// Local reset without touching the token store or the server.
    pub fn clear(&self) {
        self.dispatch(SessionEvent::Cleared);
    }
}

fn parse_auth_payload(body: &Value) -> Option<(UserIdentity, String)> {
    let user = serde_json::from_value(body.get("user")?.clone()).ok()?;
    let token = body.get("token")?.as_str()?.to_string();
    Some((user, token))
}

fn parse_user(body: &Value) -> Option<UserIdentity> {
    serde_json::from_value(body.get("user")?.clone()).ok()
}
