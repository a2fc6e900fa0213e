use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use ipa_core::{AppError, AppResult};
use ipa_domain::{DirectoryUser, RoleId, UserId};
use tokio::sync::Mutex;

use crate::{UpdateUserInput, UserDirectory};

use super::{ReassignOutcome, UserRoleService};

#[derive(Default)]
struct FakeUserDirectory {
    users: Mutex<BTreeMap<UserId, DirectoryUser>>,
    updates: Mutex<Vec<(UserId, UpdateUserInput)>>,
    reject_updates_with: Option<String>,
    stored_role: Option<String>,
}

impl FakeUserDirectory {
    fn with_users(users: Vec<DirectoryUser>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().map(|user| (user.id, user)).collect()),
            ..Self::default()
        }
    }

    fn rejecting(users: Vec<DirectoryUser>, message: &str) -> Self {
        Self {
            reject_updates_with: Some(message.to_owned()),
            ..Self::with_users(users)
        }
    }

    fn storing_role(users: Vec<DirectoryUser>, role: &str) -> Self {
        Self {
            stored_role: Some(role.to_owned()),
            ..Self::with_users(users)
        }
    }
}

#[async_trait]
impl UserDirectory for FakeUserDirectory {
    async fn list_users(&self) -> AppResult<Vec<DirectoryUser>> {
        Ok(self.users.lock().await.values().cloned().collect())
    }

    async fn update_user(
        &self,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> AppResult<DirectoryUser> {
        self.updates.lock().await.push((user_id, input.clone()));

        if let Some(message) = &self.reject_updates_with {
            return Err(AppError::Remote(message.clone()));
        }

        let mut users = self.users.lock().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::Remote("user not found".to_owned()))?;
        user.email = input.email;
        user.full_name = input.full_name;
        user.role = self.stored_role.clone().unwrap_or(input.role);
        user.department = input.department;
        user.is_active = input.is_active;

        Ok(user.clone())
    }
}

struct FailingUserDirectory;

#[async_trait]
impl UserDirectory for FailingUserDirectory {
    async fn list_users(&self) -> AppResult<Vec<DirectoryUser>> {
        Err(AppError::Remote("failed to fetch users".to_owned()))
    }

    async fn update_user(
        &self,
        _user_id: UserId,
        _input: UpdateUserInput,
    ) -> AppResult<DirectoryUser> {
        Err(AppError::Remote("failed to update user".to_owned()))
    }
}

fn user(id: u64, role: &str) -> DirectoryUser {
    DirectoryUser {
        id: UserId::new(id),
        username: format!("user{id}"),
        email: format!("user{id}@example.co.id"),
        full_name: format!("User {id}"),
        role: role.to_owned(),
        department: "Treasury".to_owned(),
        is_active: id % 2 == 1,
        is_ldap_user: true,
        last_login_at: None,
    }
}

fn role_id(value: &str) -> RoleId {
    RoleId::new(value).unwrap_or_else(|error| panic!("invalid role id: {error}"))
}

fn service(directory: Arc<dyn UserDirectory>) -> UserRoleService {
    UserRoleService::with_standard_groups(directory)
        .unwrap_or_else(|error| panic!("invalid test fixture: {error}"))
}

#[tokio::test]
async fn load_board_groups_directory_users() {
    let directory = Arc::new(FakeUserDirectory::with_users(vec![
        user(1, "admin"),
        user(2, "CFO"),
        user(3, "CFO"),
    ]));
    let service = service(directory);

    let board = service.load_board().await
        .unwrap_or_else(|error| panic!("failed to load board: {error}"));

    assert_eq!(board.user_count(), 3);
    assert_eq!(board.group(&role_id("cfo")).map(|group| group.len()), Some(2));
}

#[tokio::test]
async fn load_board_surfaces_remote_error() {
    let service = service(Arc::new(FailingUserDirectory));

    let result = service.load_board().await;

    assert_eq!(
        result.err(),
        Some(AppError::Remote("failed to fetch users".to_owned()))
    );
}

#[tokio::test]
async fn reassign_sends_full_record_and_moves_user() {
    let directory = Arc::new(FakeUserDirectory::with_users(vec![user(2, "CFO")]));
    let service = service(directory.clone());
    let mut board = service.load_board().await
        .unwrap_or_else(|error| panic!("failed to load board: {error}"));

    let outcome = service
        .reassign(&mut board, UserId::new(2), &role_id("direktur"))
        .await;

    assert_eq!(
        outcome,
        Ok(ReassignOutcome::Reassigned {
            user_id: UserId::new(2),
            from: role_id("cfo"),
            to: role_id("direktur"),
        })
    );
    assert_eq!(
        board.group_of(UserId::new(2)).map(|role| role.id().clone()),
        Some(role_id("direktur"))
    );

    let updates = directory.updates.lock().await;
    assert_eq!(updates.len(), 1);
    assert_eq!(
        updates[0].1,
        UpdateUserInput {
            email: "user2@example.co.id".to_owned(),
            full_name: "User 2".to_owned(),
            role: "Direktur".to_owned(),
            department: "Treasury".to_owned(),
            is_active: false,
        }
    );
}

#[tokio::test]
async fn reassign_to_current_group_skips_directory() {
    let directory = Arc::new(FakeUserDirectory::with_users(vec![user(1, "CEO")]));
    let service = service(directory.clone());
    let mut board = service.load_board().await
        .unwrap_or_else(|error| panic!("failed to load board: {error}"));
    let before = board.clone();

    let outcome = service
        .reassign(&mut board, UserId::new(1), &role_id("ceo"))
        .await;

    assert_eq!(outcome, Ok(ReassignOutcome::Unchanged));
    assert_eq!(board, before);
    assert!(directory.updates.lock().await.is_empty());
}

#[tokio::test]
async fn remote_failure_leaves_board_unchanged() {
    let directory = Arc::new(FakeUserDirectory::rejecting(
        vec![user(1, "CEO")],
        "cannot change role of the last administrator",
    ));
    let service = service(directory.clone());
    let mut board = service.load_board().await
        .unwrap_or_else(|error| panic!("failed to load board: {error}"));
    let before = board.clone();

    let outcome = service
        .reassign(&mut board, UserId::new(1), &role_id("admin"))
        .await;

    assert_eq!(
        outcome,
        Err(AppError::Remote(
            "cannot change role of the last administrator".to_owned()
        ))
    );
    assert_eq!(board, before);
    assert_eq!(directory.updates.lock().await.len(), 1);
}

#[tokio::test]
async fn local_errors_are_reported_before_remote_call() {
    let directory = Arc::new(FakeUserDirectory::with_users(vec![user(1, "CEO")]));
    let service = service(directory.clone());
    let mut board = service.load_board().await
        .unwrap_or_else(|error| panic!("failed to load board: {error}"));

    let unknown_user = service
        .reassign(&mut board, UserId::new(42), &role_id("cfo"))
        .await;
    let unknown_role = service
        .reassign(&mut board, UserId::new(1), &role_id("intern"))
        .await;

    assert!(matches!(unknown_user, Err(AppError::NotFound(_))));
    assert!(matches!(unknown_role, Err(AppError::NotFound(_))));
    assert!(directory.updates.lock().await.is_empty());
}

#[tokio::test]
async fn unusable_stored_record_is_reported_as_remote_error() {
    let directory = Arc::new(FakeUserDirectory::storing_role(
        vec![user(1, "CEO"), user(2, "CFO")],
        "",
    ));
    let service = service(directory.clone());
    let mut board = service
        .load_board()
        .await
        .unwrap_or_else(|error| panic!("failed to load board: {error}"));
    let before = board.clone();

    let outcome = service
        .reassign(&mut board, UserId::new(1), &role_id("cfo"))
        .await;

    assert!(matches!(outcome, Err(AppError::Remote(_))));
    assert_eq!(board, before);

    let reloaded = service.load_board().await;
    assert!(reloaded.is_ok());
    let reloaded = reloaded.unwrap_or_else(|error| panic!("failed to load board: {error}"));
    assert_eq!(reloaded.user_count(), 1);
    assert!(reloaded.user(UserId::new(1)).is_none());
    assert_eq!(
        reloaded.group_of(UserId::new(2)).map(|role| role.id().clone()),
        Some(role_id("cfo"))
    );
}
