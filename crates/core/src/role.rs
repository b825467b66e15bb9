//! Closed role model.
//!
//! Roles are a closed capability tier, not free-form strings: an invalid or
//! misspelled role cannot exist past deserialization.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability tier gating protected destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse failure for a role string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct InvalidRole(pub String);

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(InvalidRole(other.to_string())),
        }
    }
}

/// The set of roles allowed into one protected destination.
///
/// An empty set means "any authenticated role".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    /// Any authenticated role is acceptable.
    pub fn any() -> Self {
        Self(Vec::new())
    }

    pub fn of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self(roles.into_iter().collect())
    }

    /// Admin-only destinations.
    pub fn admin() -> Self {
        Self::of([Role::Admin])
    }

    /// Manager destinations, which admins may also enter.
    pub fn managerial() -> Self {
        Self::of([Role::Manager, Role::Admin])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `role` may enter a destination gated by this set.
    pub fn allows(&self, role: Role) -> bool {
        self.0.is_empty() || self.0.contains(&role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_and_display_round_trip() {
        for role in [Role::User, Role::Manager, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let parsed: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(parsed, Role::Manager);
    }

    #[test]
    fn empty_set_allows_any_role() {
        let any = RoleSet::any();
        assert!(any.allows(Role::User));
        assert!(any.allows(Role::Admin));
    }

    #[test]
    fn managerial_set_admits_admin_but_not_user() {
        let set = RoleSet::managerial();
        assert!(set.allows(Role::Manager));
        assert!(set.allows(Role::Admin));
        assert!(!set.allows(Role::User));
    }
}
