use async_trait::async_trait;
use ipa_core::AppResult;
use ipa_domain::{DirectoryUser, UserId};
use serde::{Deserialize, Serialize};

/// Full user record sent when changing a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserInput {
    /// Contact email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// New role name.
    pub role: String,
    /// Owning department.
    pub department: String,
    /// Whether the account can sign in.
    pub is_active: bool,
}

impl UpdateUserInput {
    /// Copies a user record, replacing only its role.
    #[must_use]
    pub fn with_role(user: &DirectoryUser, role: impl Into<String>) -> Self {
        Self {
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: role.into(),
            department: user.department.clone(),
            is_active: user.is_active,
        }
    }
}

/// Port for the service owning user records and their roles.
///
/// Implementations report collaborator failures as `AppError::Remote`.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Lists all users with their current role.
    async fn list_users(&self) -> AppResult<Vec<DirectoryUser>>;

    /// Replaces a user's editable fields and returns the stored record.
    async fn update_user(&self, user_id: UserId, input: UpdateUserInput)
    -> AppResult<DirectoryUser>;
}
