use ipa_core::{AppError, AppResult};
use ipa_domain::{ColorTag, DirectoryUser, RoleDefinition, RoleId, UserId};
use tracing::warn;

use crate::{AssignmentBoard, RoleGroup};

/// Role groups shown on the user/role screen, keyed by the directory role names.
pub fn standard_role_groups() -> AppResult<Vec<RoleDefinition>> {
    [
        ("admin", "Administrator", ColorTag::Red),
        ("Corp FA", "Corp FA", ColorTag::Blue),
        ("Direktur", "Direktur", ColorTag::Purple),
        ("CEO", "Chief Executive Officer", ColorTag::Green),
        ("CFO", "Chief Financial Officer", ColorTag::Yellow),
        (
            "Sourcing dan Procurement",
            "Sourcing & Procurement",
            ColorTag::Indigo,
        ),
    ]
    .into_iter()
    .map(|(name, display_name, color)| RoleDefinition::new(name, display_name, color))
    .collect()
}

/// In-memory model behind the user/role screen: every user sits in exactly one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRoleBoard {
    board: AssignmentBoard<DirectoryUser>,
}

impl UserRoleBoard {
    /// Groups users under the given roles by their current role name.
    ///
    /// Users whose role matches none of `roles` get a group of their own at
    /// the end of the board. Users without a usable role are left off the
    /// board.
    pub fn from_users(roles: Vec<RoleDefinition>, users: Vec<DirectoryUser>) -> AppResult<Self> {
        let mut board: AssignmentBoard<DirectoryUser> = AssignmentBoard::default();
        for role in roles {
            if board.groups().iter().any(|group| {
                group.role().id() == role.id() || group.role().name_collides_with(role.name())
            }) {
                return Err(AppError::Duplicate(format!(
                    "role group '{}' is listed more than once",
                    role.name()
                )));
            }
            board.push_group(role);
        }

        let mut this = Self { board };
        for user in users {
            if this.board.find_member(&user.id).is_some() {
                return Err(AppError::Duplicate(format!(
                    "user '{}' is listed more than once",
                    user.id
                )));
            }
            let user_id = user.id;
            let username = user.username.clone();
            if let Err(error) = this.insert(user) {
                warn!(
                    user_id = %user_id,
                    username = %username,
                    error = %error,
                    "skipping user that cannot be grouped"
                );
            }
        }

        Ok(this)
    }

    /// Returns groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[RoleGroup<DirectoryUser>] {
        self.board.groups()
    }

    /// Returns the group of a role.
    #[must_use]
    pub fn group(&self, role_id: &RoleId) -> Option<&RoleGroup<DirectoryUser>> {
        self.board.group(role_id)
    }

    /// Returns the role currently holding a user.
    #[must_use]
    pub fn group_of(&self, user_id: UserId) -> Option<&RoleDefinition> {
        self.board.holder_of(&user_id)
    }

    /// Finds a user on the board.
    #[must_use]
    pub fn user(&self, user_id: UserId) -> Option<&DirectoryUser> {
        self.board.find_member(&user_id)
    }

    /// Returns the number of users on the board.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.board.members().count()
    }

    /// Moves a user from `from` into `to`, rewriting the user's role.
    ///
    /// Moving within the same group is a no-op.
    pub fn move_user(&mut self, user_id: UserId, from: &RoleId, to: &RoleId) -> AppResult<()> {
        if from == to {
            return Ok(());
        }

        let target = self
            .board
            .group(to)
            .ok_or_else(|| AppError::NotFound(format!("role '{to}' does not exist")))?
            .role()
            .clone();

        let source = self
            .board
            .group(from)
            .ok_or_else(|| AppError::NotFound(format!("role '{from}' does not exist")))?;

        let mut user = source
            .members()
            .iter()
            .find(|member| member.id == user_id)
            .cloned()
            .ok_or_else(|| {
                AppError::Validation(format!("user '{user_id}' is not assigned to role '{from}'"))
            })?;

        user.role = target.name().to_owned();
        self.board.place(user, target.id());

        Ok(())
    }

    /// Replaces a user's record, regrouping it under the role the record names.
    pub fn replace_user(&mut self, user: DirectoryUser) -> AppResult<()> {
        if self.board.find_member(&user.id).is_none() {
            return Err(AppError::NotFound(format!(
                "user '{}' is not on the board",
                user.id
            )));
        }

        self.insert(user)
    }

    fn insert(&mut self, user: DirectoryUser) -> AppResult<()> {
        let derived_id = RoleId::from_name(user.role.as_str())
            .map_err(|_| AppError::Validation(format!("user '{}' has no role", user.username)))?;

        let role_id = match self.board.groups().iter().find(|group| {
            group.role().id() == &derived_id
                || group.role().name_collides_with(user.role.as_str())
        }) {
            Some(group) => group.role().id().clone(),
            None => {
                let role =
                    RoleDefinition::new(user.role.as_str(), user.role.as_str(), ColorTag::Gray)?;
                warn!(
                    user_id = %user.id,
                    role_name = %role.name(),
                    "user holds a role without a group, adding one"
                );
                let role_id = role.id().clone();
                self.board.push_group(role);
                role_id
            }
        };

        self.board.place(user, &role_id);

        Ok(())
    }
}
