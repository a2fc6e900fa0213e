use std::collections::BTreeMap;

use async_trait::async_trait;
use ipa_application::{UpdateUserInput, UserDirectory};
use ipa_core::{AppError, AppResult, NonEmptyString};
use ipa_domain::{DirectoryUser, UserId};
use tokio::sync::RwLock;

/// In-memory user directory implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<BTreeMap<UserId, DirectoryUser>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the given users.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = DirectoryUser>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|user| (user.id, user)).collect()),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list_users(&self) -> AppResult<Vec<DirectoryUser>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn update_user(
        &self,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> AppResult<DirectoryUser> {
        let role = NonEmptyString::for_field("role", input.role)
            .map_err(|error| AppError::Remote(error.to_string()))?;

        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::Remote("user not found".to_owned()))?;

        user.email = input.email;
        user.full_name = input.full_name;
        user.role = role.into();
        user.department = input.department;
        user.is_active = input.is_active;

        Ok(user.clone())
    }
}
