//! IPA access administration console.

#![forbid(unsafe_code)]

mod console_config;
mod demo_seed;

use std::env;
use std::sync::Arc;

use ipa_application::{
    FeatureAssignmentStore, ReassignOutcome, UserDirectory, UserRoleBoard, UserRoleService,
    group_by_category,
};
use ipa_core::{AppError, AppResult};
use ipa_domain::{ColorTag, FeatureCatalog, RoleId, UserId};
use ipa_infrastructure::HttpUserDirectory;
use tracing::info;

use crate::console_config::{ConsoleCommand, ConsoleConfig, DirectoryKind, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = ConsoleCommand::parse(&args)?;
    let config = ConsoleConfig::load()?;

    match command {
        ConsoleCommand::Features => show_features(),
        ConsoleCommand::Users => {
            let service = build_user_role_service(&config)?;
            let board = service.load_board().await?;
            show_users(&board);
            Ok(())
        }
        ConsoleCommand::MoveUser { user_id, role } => {
            let service = build_user_role_service(&config)?;
            move_user(&service, UserId::new(user_id), role.as_str()).await
        }
    }
}

fn build_user_role_service(config: &ConsoleConfig) -> AppResult<UserRoleService> {
    let directory: Arc<dyn UserDirectory> = match config.directory {
        DirectoryKind::Http => Arc::new(HttpUserDirectory::new(
            config.api_base_url.clone(),
            config.api_token.clone(),
            config.http_timeout,
        )?),
        DirectoryKind::Memory => Arc::new(demo_seed::demo_directory()),
    };

    info!(
        directory = ?config.directory,
        api_base_url = %config.api_base_url,
        "user directory configured"
    );

    UserRoleService::with_standard_groups(directory)
}

fn show_features() -> AppResult<()> {
    let store = FeatureAssignmentStore::with_default_roles(FeatureCatalog::standard()?)?;

    for group in store.roles() {
        info!(
            role_id = %group.role().id(),
            display_name = group.role().display_name(),
            color = group.role().color().as_str(),
            features = group.len(),
            "role"
        );
        for (category, features) in group_by_category(group.members()) {
            let ids: Vec<&str> = features.iter().map(|feature| feature.id().as_str()).collect();
            info!(role_id = %group.role().id(), category = %category, features = ?ids, "granted");
        }
    }

    let unassigned = store.unassigned_pool();
    for (category, features) in group_by_category(&unassigned) {
        let ids: Vec<&str> = features.iter().map(|feature| feature.id().as_str()).collect();
        info!(category = %category, features = ?ids, "unassigned");
    }

    let colors: Vec<&str> = ColorTag::palette().iter().map(|color| color.as_str()).collect();
    info!(colors = ?colors, "colours available for new roles");

    let snapshot = serde_json::to_string(&store.snapshot()).map_err(|error| {
        AppError::Internal(format!("failed to serialize role configuration: {error}"))
    })?;
    info!(configuration = %snapshot, "role configuration saved");

    Ok(())
}

fn show_users(board: &UserRoleBoard) {
    for group in board.groups() {
        info!(
            role_id = %group.role().id(),
            display_name = group.role().display_name(),
            users = group.len(),
            "role"
        );
        for user in group.members() {
            info!(
                role_id = %group.role().id(),
                user_id = %user.id,
                username = %user.username,
                full_name = %user.full_name,
                department = %user.department,
                active = user.is_active,
                origin = user.origin().as_str(),
                "member"
            );
        }
    }
}

async fn move_user(service: &UserRoleService, user_id: UserId, role: &str) -> AppResult<()> {
    let to = RoleId::from_name(role)?;
    let mut board = service.load_board().await?;

    match service.reassign(&mut board, user_id, &to).await? {
        ReassignOutcome::Unchanged => {
            info!(user_id = %user_id, role_id = %to, "user already holds this role");
        }
        ReassignOutcome::Reassigned { user_id, from, to } => {
            info!(user_id = %user_id, from = %from, to = %to, "role changed");
        }
    }

    show_users(&board);

    Ok(())
}
