//! Access control
//!
//! A small capability model gating which operations a caller may run.
//! Credentials come from an injected [`AccessProvider`]; the store
//! itself never depends on any of this. The bundled [`StaticAccess`]
//! implementation is backed by the config's user table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a caller is allowed to do
///
/// Levels are ordered: `ReadOnly < Operate < Full`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    /// View, search, and report only
    ReadOnly,
    /// ReadOnly plus stock adjustment
    Operate,
    /// Everything, including add/update/delete and config changes
    Full,
}

/// Role assigned to a user in the config's user table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Viewer,
}

impl Role {
    /// Capability level this role grants
    pub fn capability(self) -> Capability {
        match self {
            Role::Admin => Capability::Full,
            Role::Staff => Capability::Operate,
            Role::Viewer => Capability::ReadOnly,
        }
    }
}

/// One entry in the static user table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    pub password: String,
    pub role: Role,
}

/// Source of capability decisions
pub trait AccessProvider {
    /// Check credentials, returning the capability they grant
    fn authenticate(&self, username: &str, password: &str) -> Option<Capability>;

    /// Capability granted without credentials
    fn anonymous(&self) -> Option<Capability>;
}

/// Provider backed by a static username -> password/role table
///
/// An empty table means an open store: anonymous callers get `Full`.
/// With any users configured, anonymous access is denied.
#[derive(Debug, Clone, Default)]
pub struct StaticAccess {
    users: BTreeMap<String, UserEntry>,
}

impl StaticAccess {
    pub fn new(users: BTreeMap<String, UserEntry>) -> Self {
        Self { users }
    }

    /// True if no users are configured
    pub fn is_open(&self) -> bool {
        self.users.is_empty()
    }
}

impl AccessProvider for StaticAccess {
    fn authenticate(&self, username: &str, password: &str) -> Option<Capability> {
        let entry = self.users.get(username)?;
        if entry.password == password {
            Some(entry.role.capability())
        } else {
            None
        }
    }

    fn anonymous(&self) -> Option<Capability> {
        if self.is_open() {
            Some(Capability::Full)
        } else {
            None
        }
    }
}
