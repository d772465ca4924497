use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Administrator role.
///
/// Closed set; the string form (`ADMIN` / `EDITOR`) is what travels in
/// JSON bodies, JWT claims and the `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Admin,
    Editor,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Editor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Editor => "EDITOR",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Editor
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            // "ADM" is the spelling older deployments stored
            "ADMIN" | "ADM" => Ok(Role::Admin),
            "EDITOR" => Ok(Role::Editor),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

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

/// Administrator model
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Administrator {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively_and_accepts_legacy_spelling() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("ADM".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Editor ".parse::<Role>().unwrap(), Role::Editor);
        assert!("viewer".parse::<Role>().is_err());
    }

    #[test]
    fn role_string_mapping_is_lossless() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn role_serializes_as_uppercase_string() {
        assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), "\"EDITOR\"");
        let parsed: Role = serde_json::from_str("\"ADM\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn default_role_is_not_privileged() {
        assert_eq!(Role::default(), Role::Editor);
    }
}
