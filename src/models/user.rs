use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

/// A user entry as stored in `users.json`, keyed by username.
///
/// Passwords are plaintext; the file is local and operator-managed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub name: String,
}

pub type Users = BTreeMap<String, UserRecord>;

/// A resolved identity: the stored record plus the username it is keyed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub username: String,
    pub name: String,
    pub role: Role,
}

impl AuthenticatedUser {
    #[must_use]
    pub fn from_record(username: &str, record: &UserRecord) -> Self {
        let name = if record.name.is_empty() {
            username.to_string()
        } else {
            record.name.clone()
        };

        Self {
            username: username.to_string(),
            name,
            role: record.role,
        }
    }
}
