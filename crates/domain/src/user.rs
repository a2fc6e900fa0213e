//! User records as exposed by the user directory.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Creates a user identifier from the directory's numeric key.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric key.
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Where a user account was provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserOrigin {
    /// Imported from the LDAP directory on first login.
    Directory,
    /// Created locally by an administrator.
    Local,
}

impl UserOrigin {
    /// Returns a stable storage value for this origin.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::Local => "local",
        }
    }
}

/// User record with its single current role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// Stable user identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Name of the role the user currently holds.
    pub role: String,
    /// Owning department.
    #[serde(default)]
    pub department: String,
    /// Whether the account can sign in.
    pub is_active: bool,
    /// Whether the account was provisioned from LDAP.
    pub is_ldap_user: bool,
    /// Last successful login, if any.
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl DirectoryUser {
    /// Returns where the account was provisioned.
    #[must_use]
    pub fn origin(&self) -> UserOrigin {
        if self.is_ldap_user {
            UserOrigin::Directory
        } else {
            UserOrigin::Local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_payload_is_decoded() {
        let payload = serde_json::json!({
            "id": 7,
            "username": "rsitumorang",
            "email": "r.situmorang@example.co.id",
            "full_name": "Rina Situmorang",
            "role": "Corp FA",
            "department": "Finance",
            "is_active": true,
            "is_ldap_user": true,
            "last_login_at": null,
            "created_at": "2025-01-02T03:04:05Z",
            "updated_at": "2025-01-02T03:04:05Z"
        });

        let user: DirectoryUser =
            serde_json::from_value(payload)
                .unwrap_or_else(|error| panic!("failed to decode payload: {error}"));
        assert_eq!(user.id, UserId::new(7));
        assert_eq!(user.role, "Corp FA");
        assert_eq!(user.origin(), UserOrigin::Directory);
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn local_accounts_report_local_origin() {
        let payload = serde_json::json!({
            "id": 1,
            "username": "admin",
            "full_name": "Administrator",
            "role": "admin",
            "is_active": true,
            "is_ldap_user": false,
            "last_login_at": "2025-03-01T08:00:00Z"
        });

        let user: DirectoryUser =
            serde_json::from_value(payload)
                .unwrap_or_else(|error| panic!("failed to decode payload: {error}"));
        assert_eq!(user.origin(), UserOrigin::Local);
        assert!(user.email.is_empty());
        assert!(user.last_login_at.is_some());
    }
}
