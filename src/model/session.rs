//! Who is signed in and what they may do.
//!
//! The capability flags are supplied by whoever resolved the session. Nothing in
//! the catalog derives them from the role label on its own.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        };
        f.write_str(label)
    }
}

/// Explicit session value handed to the view-model and the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user: Option<User>,
    role: Option<Role>,
    can_edit: bool,
    is_admin: bool,
}

impl SessionContext {
    pub fn new(user: Option<User>, role: Option<Role>, can_edit: bool, is_admin: bool) -> Self {
        Self {
            user,
            role,
            can_edit,
            is_admin,
        }
    }

    /// Flags for the well-known roles: admins may do everything, editors may edit.
    pub fn for_role(user: User, role: Role) -> Self {
        let (can_edit, is_admin) = match role {
            Role::Admin => (true, true),
            Role::Editor => (true, false),
            Role::Viewer => (false, false),
        };
        Self::new(Some(user), Some(role), can_edit, is_admin)
    }

    pub fn signed_out() -> Self {
        Self::new(None, None, false, false)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
