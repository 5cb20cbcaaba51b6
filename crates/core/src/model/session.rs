use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("an authenticated session requires a user name")]
    EmptyUserName,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {raw}")]
pub struct RoleParseError {
    pub raw: String,
}

//
// ─── ROLE ──────────────────────────────────────────────────────────────────────
//

/// Access role stored on each user record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Teacher: full menu, may create lesson plans.
    Docente,
    /// Reviewer: reduced menu without plan creation.
    Verificador,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Docente => "docente",
            Role::Verificador => "verificador",
        }
    }

    #[must_use]
    pub fn can_create_plans(self) -> bool {
        matches!(self, Role::Docente)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "docente" => Ok(Role::Docente),
            "verificador" => Ok(Role::Verificador),
            _ => Err(RoleParseError { raw: s.to_string() }),
        }
    }
}

//
// ─── USER RECORD ───────────────────────────────────────────────────────────────
//

/// A row of the `users` collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub pin: u32,
    pub role: Role,
}

impl UserRecord {
    /// Case-insensitive name match plus exact numeric PIN match.
    #[must_use]
    pub fn matches(&self, username: &str, pin: u32) -> bool {
        self.pin == pin && self.name.to_lowercase() == username.to_lowercase()
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// An authenticated session.
///
/// Only authenticated sessions are represented; "logged out" is the absence of
/// a `Session`, so a session always carries a non-empty user name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    user_name: String,
    role: Role,
}

impl Session {
    /// # Errors
    ///
    /// Returns `SessionError::EmptyUserName` if `user_name` is blank.
    pub fn authenticated(user_name: impl Into<String>, role: Role) -> Result<Self, SessionError> {
        let user_name = user_name.into();
        if user_name.trim().is_empty() {
            return Err(SessionError::EmptyUserName);
        }
        Ok(Self { user_name, role })
    }

    /// Session for a matched user record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyUserName` if the record has a blank name.
    pub fn for_user(user: &UserRecord) -> Result<Self, SessionError> {
        Self::authenticated(user.name.clone(), user.role)
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}
