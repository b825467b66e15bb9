//! `talentdesk-auth` — session lifecycle and role-gated access control.
//!
//! The session is a small state machine: all transitions are pure functions
//! in [`session`], IO lives in [`SessionManager`], and [`guard`] decides
//! access to protected destinations without performing any IO at all.

pub mod guard;
pub mod manager;
pub mod session;

pub use guard::{GuardDecision, evaluate, needs_verification};
pub use manager::{Credentials, RegistrationProfile, SessionManager};
pub use session::{SessionEvent, SessionState, reduce};
