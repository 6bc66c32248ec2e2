//! Roles, capabilities, and the session-scoped authorizer.
//!
//! Roles are stored as text in the `users` table and resolved to a typed
//! [`Role`] once per session. Authorization decisions go through
//! [`Authorizer`] -- an explicit value passed to access checks -- rather
//! than string comparison scattered through handlers.

use serde::{Deserialize, Serialize};

/// Well-known role names as stored in the database.
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PRODUCER: &str = "producer";
pub const ROLE_VIEWER: &str = "viewer";

/// A user's role within their company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full control of the company, including user management.
    Admin,
    /// Manages shows, scenes, and scheduling.
    Producer,
    /// Read-only access to schedules and reports.
    Viewer,
}

/// A single permission tag. Resolved from the role once per session; no
/// string-keyed permission lists at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ManageUsers,
    ManageShows,
    ManageScenes,
    ViewSchedule,
}

/// Capability sets per role, resolved via static tables.
const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ManageUsers,
    Capability::ManageShows,
    Capability::ManageScenes,
    Capability::ViewSchedule,
];

const PRODUCER_CAPABILITIES: &[Capability] = &[
    Capability::ManageShows,
    Capability::ManageScenes,
    Capability::ViewSchedule,
];

const VIEWER_CAPABILITIES: &[Capability] = &[Capability::ViewSchedule];

impl Role {
    /// Parse a stored role name. Unknown names are rejected rather than
    /// silently downgraded.
    pub fn parse(name: &str) -> Result<Self, String> {
        match name {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_PRODUCER => Ok(Self::Producer),
            ROLE_VIEWER => Ok(Self::Viewer),
            other => Err(format!("Unknown role: {other}")),
        }
    }

    /// The database/text representation of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Producer => ROLE_PRODUCER,
            Self::Viewer => ROLE_VIEWER,
        }
    }

    /// Capabilities granted to this role.
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Admin => ADMIN_CAPABILITIES,
            Self::Producer => PRODUCER_CAPABILITIES,
            Self::Viewer => VIEWER_CAPABILITIES,
        }
    }

    /// Badge colour for UI display, keyed by the enum instead of repeated
    /// role-name switches in the view layer.
    pub fn badge_color(self) -> &'static str {
        match self {
            Self::Admin => "red",
            Self::Producer => "blue",
            Self::Viewer => "gray",
        }
    }
}

/// Session-scoped authorization context.
///
/// Built once from the authenticated user's role and passed explicitly to
/// every access check -- no ambient global permission state.
#[derive(Debug, Clone, Copy)]
pub struct Authorizer {
    role: Role,
}

impl Authorizer {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn role(self) -> Role {
        self.role
    }

    pub fn allows(self, capability: Capability) -> bool {
        self.role.capabilities().contains(&capability)
    }

    pub fn can_manage_users(self) -> bool {
        self.allows(Capability::ManageUsers)
    }

    pub fn can_manage_shows(self) -> bool {
        self.allows(Capability::ManageShows)
    }

    pub fn can_manage_scenes(self) -> bool {
        self.allows(Capability::ManageScenes)
    }

    pub fn can_view_schedule(self) -> bool {
        self.allows(Capability::ViewSchedule)
    }
}
