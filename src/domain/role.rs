// Role and session user domain models
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of staff roles. Serialised as the backend's role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Administrator,
    Doctor,
    Secretary,
    Finance,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Administrator,
        Role::Doctor,
        Role::Secretary,
        Role::Finance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "admin",
            Role::Doctor => "medico",
            Role::Secretary => "secretaria",
            Role::Finance => "finanzas",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" | "administrador" => Ok(Role::Administrator),
            "medico" | "médico" => Ok(Role::Doctor),
            "secretaria" => Ok(Role::Secretary),
            "finanzas" => Ok(Role::Finance),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Authenticated user as seen by this service. Both fields may be missing when
/// the gateway did not supply them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: Option<i64>,
    pub role: Option<Role>,
}

impl User {
    pub fn new(id: i64, role: Role) -> Self {
        Self {
            id: Some(id),
            role: Some(role),
        }
    }
}
