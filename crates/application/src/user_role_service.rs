use std::sync::Arc;

use ipa_core::{AppError, AppResult};
use ipa_domain::{RoleDefinition, RoleId, UserId};
use tracing::{info, warn};

use crate::{UpdateUserInput, UserDirectory, UserRoleBoard, standard_role_groups};

/// Result of a reassignment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReassignOutcome {
    /// The user already held the target role; nothing was sent.
    Unchanged,
    /// The directory accepted the change and the board was updated.
    Reassigned {
        /// Moved user.
        user_id: UserId,
        /// Role the user left.
        from: RoleId,
        /// Role the user joined.
        to: RoleId,
    },
}

/// Application service driving the user/role screen against the user directory.
#[derive(Clone)]
pub struct UserRoleService {
    directory: Arc<dyn UserDirectory>,
    role_groups: Vec<RoleDefinition>,
}

impl UserRoleService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(directory: Arc<dyn UserDirectory>, role_groups: Vec<RoleDefinition>) -> Self {
        Self {
            directory,
            role_groups,
        }
    }

    /// Creates a service showing the standard role groups.
    pub fn with_standard_groups(directory: Arc<dyn UserDirectory>) -> AppResult<Self> {
        Ok(Self::new(directory, standard_role_groups()?))
    }

    /// Fetches all users and groups them by role.
    pub async fn load_board(&self) -> AppResult<UserRoleBoard> {
        let users = self.directory.list_users().await?;
        let board = UserRoleBoard::from_users(self.role_groups.clone(), users)?;

        info!(
            users = board.user_count(),
            groups = board.groups().len(),
            "user role board loaded"
        );

        Ok(board)
    }

    /// Persists a user's new role, then applies the stored record to `board`.
    ///
    /// Local checks run before the directory is called. When the directory
    /// fails, `board` is left exactly as it was.
    pub async fn reassign(
        &self,
        board: &mut UserRoleBoard,
        user_id: UserId,
        to: &RoleId,
    ) -> AppResult<ReassignOutcome> {
        let user = board
            .user(user_id)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' is not on the board")))?;
        let from = board
            .group_of(user_id)
            .map(|role| role.id().clone())
            .ok_or_else(|| AppError::Internal(format!("user '{user_id}' has no role group")))?;

        if &from == to {
            return Ok(ReassignOutcome::Unchanged);
        }

        let target = board
            .group(to)
            .ok_or_else(|| AppError::NotFound(format!("role '{to}' does not exist")))?
            .role()
            .clone();

        let input = UpdateUserInput::with_role(user, target.name());
        let stored = match self.directory.update_user(user_id, input).await {
            Ok(stored) => stored,
            Err(error) => {
                warn!(
                    user_id = %user_id,
                    from = %from,
                    to = %to,
                    error = %error,
                    "user role update rejected"
                );
                return Err(error);
            }
        };

        if stored.id != user_id {
            return Err(AppError::Remote(format!(
                "directory returned user '{}' for update of '{user_id}'",
                stored.id
            )));
        }

        if let Err(error) = board.replace_user(stored) {
            warn!(
                user_id = %user_id,
                to = %to,
                error = %error,
                "directory stored a user record that cannot be grouped"
            );
            return Err(AppError::Remote(format!(
                "directory returned an unusable record for user '{user_id}': {error}"
            )));
        }
        let to = board
            .group_of(user_id)
            .map(|role| role.id().clone())
            .unwrap_or_else(|| to.clone());
        info!(user_id = %user_id, from = %from, to = %to, "user role changed");

        Ok(ReassignOutcome::Reassigned { user_id, from, to })
    }
}

#[cfg(test)]
mod tests;
