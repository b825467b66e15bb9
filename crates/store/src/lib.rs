//! `talentdesk-store` — server-backed collections and the central state tree.
//!
//! Every collection follows the same three-phase pattern: an operation marks
//! its slice pending, calls the transport, and settles the slice fulfilled or
//! rejected. [`AppStore`] aggregates the session and every store instance
//! behind one subscriber registry.

pub mod app;
pub mod document;
pub mod profile;
pub mod records;
pub mod resource;

pub use app::AppStore;
pub use document::{DocumentState, DocumentStore};
pub use profile::{ProfileState, ProfileStore};
pub use records::{
    GroupRecord, InterviewRecord, ManagerRecord, ReportRecord, ScheduleRecord, UserRecord,
};
pub use resource::{CollectionEvent, CollectionState, Placement, Record, ResourceRoutes, ResourceStore};
