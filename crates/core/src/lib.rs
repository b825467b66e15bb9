//! `talentdesk-core` — client-domain foundation building blocks.
//!
//! This crate contains the pieces every other member depends on and nothing
//! else: the error taxonomy, the closed role model, wire-level identity
//! records, and the observable state cell. No IO happens here.

pub mod error;
pub mod identity;
pub mod role;
pub mod slice;

pub use error::{ApiError, ApiResult};
pub use identity::{Pagination, UserIdentity};
pub use role::{InvalidRole, Role, RoleSet};
pub use slice::{Notifier, Slice, Subscription};
