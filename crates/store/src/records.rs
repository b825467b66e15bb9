//! Typed records for each server-backed domain.
//!
//! Fields beyond the identity are lenient (`serde(default)`) because the
//! server trims its envelopes per endpoint; only `id` is load-bearing for
//! the store semantics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use talentdesk_core::Role;

use crate::resource::Record;

/// Account record managed by admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for UserRecord {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Manager account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for ManagerRecord {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Candidate group owned by a manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
}

impl Record for GroupRecord {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Interview schedule entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub group_id: Option<u64>,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

impl Record for ScheduleRecord {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Generated report summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl Record for ReportRecord {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Interview booked for the signed-in candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub id: u64,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Record for InterviewRecord {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}
