use ipa_core::{AppError, AppResult};
use ipa_domain::{
    CATEGORY_ADMIN, CATEGORY_GENERAL, CATEGORY_PROPOSALS, CATEGORY_REPORTS, ColorTag, Feature,
    FeatureCatalog, FeatureId, RoleDefinition, RoleId,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AssignmentBoard, RoleGroup};

/// Role entry of a saved role/feature configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFeatureEntry {
    /// Stable role identifier.
    pub id: RoleId,
    /// Unique role name.
    pub name: String,
    /// Role display name.
    pub display_name: String,
    /// Presentation colour.
    pub color: ColorTag,
    /// Granted features in assignment order.
    pub features: Vec<FeatureId>,
}

/// Serializable projection of the whole role/feature configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFeatureSnapshot {
    /// Roles in display order.
    pub roles: Vec<RoleFeatureEntry>,
    /// Catalog features not granted to any role.
    pub unassigned: Vec<FeatureId>,
}

/// In-memory model behind the role/feature administration screen.
///
/// A feature is granted to at most one role and the reserved `admin` role
/// always exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureAssignmentStore {
    catalog: FeatureCatalog,
    board: AssignmentBoard<Feature>,
}

impl FeatureAssignmentStore {
    /// Creates a store holding only the reserved administrator role.
    pub fn new(catalog: FeatureCatalog) -> AppResult<Self> {
        let admin = RoleDefinition::new(RoleId::admin().as_str(), "Administrator", ColorTag::Red)?;

        Ok(Self {
            catalog,
            board: AssignmentBoard::with_roles([admin]),
        })
    }

    /// Creates a store seeded with the default roles of the approval system.
    ///
    /// Categories are granted to the first seeded role that asks for them.
    pub fn with_default_roles(catalog: FeatureCatalog) -> AppResult<Self> {
        let mut store = Self::new(catalog)?;
        store.grant_unassigned_categories(&RoleId::admin(), &[CATEGORY_ADMIN, CATEGORY_GENERAL])?;

        let corp_fa = store.create_role("Corp FA", "Corp FA", ColorTag::Blue)?;
        store.grant_unassigned_categories(corp_fa.id(), &[CATEGORY_PROPOSALS, CATEGORY_GENERAL])?;

        let direktur = store.create_role("Direktur", "Direktur", ColorTag::Purple)?;
        store.grant_unassigned_categories(
            direktur.id(),
            &[CATEGORY_PROPOSALS, CATEGORY_GENERAL, CATEGORY_REPORTS],
        )?;

        Ok(store)
    }

    /// Returns the feature catalog.
    #[must_use]
    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    /// Returns role groups in display order.
    #[must_use]
    pub fn roles(&self) -> &[RoleGroup<Feature>] {
        self.board.groups()
    }

    /// Returns the group of a role.
    #[must_use]
    pub fn role(&self, role_id: &RoleId) -> Option<&RoleGroup<Feature>> {
        self.board.group(role_id)
    }

    /// Returns the role currently granting a feature.
    #[must_use]
    pub fn role_of(&self, feature_id: &FeatureId) -> Option<&RoleDefinition> {
        self.board.holder_of(feature_id)
    }

    /// Creates an empty role appended after the existing ones.
    pub fn create_role(
        &mut self,
        name: &str,
        display_name: &str,
        color: ColorTag,
    ) -> AppResult<RoleDefinition> {
        let role = RoleDefinition::new(name, display_name, color)?;

        if self.board.groups().iter().any(|group| {
            group.role().name_collides_with(role.name()) || group.role().id() == role.id()
        }) {
            return Err(AppError::Duplicate(format!(
                "role '{}' already exists",
                role.name()
            )));
        }

        self.board.push_group(role.clone());
        info!(role_id = %role.id(), role_name = %role.name(), "role created");

        Ok(role)
    }

    /// Changes the display name and colour of a role.
    pub fn update_role(
        &mut self,
        role_id: &RoleId,
        display_name: &str,
        color: ColorTag,
    ) -> AppResult<RoleDefinition> {
        let updated = self
            .board
            .group(role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))?
            .role()
            .with_presentation(display_name, color)?;

        self.board.replace_role(updated.clone());
        info!(role_id = %role_id, "role updated");

        Ok(updated)
    }

    /// Deletes a role; its features return to the unassigned pool.
    pub fn delete_role(&mut self, role_id: &RoleId) -> AppResult<()> {
        if role_id.is_reserved() {
            return Err(AppError::Protected(format!(
                "role '{role_id}' cannot be deleted"
            )));
        }

        let removed = self
            .board
            .remove_group(role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))?;

        info!(
            role_id = %role_id,
            released_features = removed.len(),
            "role deleted"
        );

        Ok(())
    }

    /// Moves a feature from `from` (or the unassigned pool) into `to`.
    ///
    /// Moving within the same role is a no-op. The feature leaves every other
    /// role, so a stale `from` can never leave it granted twice.
    pub fn move_feature(
        &mut self,
        feature_id: &FeatureId,
        from: Option<&RoleId>,
        to: &RoleId,
    ) -> AppResult<()> {
        if from == Some(to) {
            return Ok(());
        }

        let feature = self
            .catalog
            .get(feature_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("feature '{feature_id}' does not exist")))?;

        if let Some(from) = from
            && self.board.group(from).is_none()
        {
            return Err(AppError::NotFound(format!("role '{from}' does not exist")));
        }

        if self.board.group(to).is_none() {
            return Err(AppError::NotFound(format!("role '{to}' does not exist")));
        }

        self.board.place(feature, to);

        Ok(())
    }

    /// Returns catalog features granted to no role, in catalog order.
    #[must_use]
    pub fn unassigned_pool(&self) -> Vec<Feature> {
        self.catalog
            .features()
            .iter()
            .filter(|feature| self.board.holder_of(feature.id()).is_none())
            .cloned()
            .collect()
    }

    /// Captures the current configuration for saving or logging.
    #[must_use]
    pub fn snapshot(&self) -> RoleFeatureSnapshot {
        RoleFeatureSnapshot {
            roles: self
                .board
                .groups()
                .iter()
                .map(|group| RoleFeatureEntry {
                    id: group.role().id().clone(),
                    name: group.role().name().to_owned(),
                    display_name: group.role().display_name().to_owned(),
                    color: group.role().color(),
                    features: group
                        .members()
                        .iter()
                        .map(|feature| feature.id().clone())
                        .collect(),
                })
                .collect(),
            unassigned: self
                .unassigned_pool()
                .iter()
                .map(|feature| feature.id().clone())
                .collect(),
        }
    }

    fn grant_unassigned_categories(
        &mut self,
        role_id: &RoleId,
        categories: &[&str],
    ) -> AppResult<()> {
        let pending: Vec<FeatureId> = self
            .catalog
            .in_categories(categories)
            .into_iter()
            .filter(|feature| self.board.holder_of(feature.id()).is_none())
            .map(|feature| feature.id().clone())
            .collect();

        for feature_id in pending {
            self.move_feature(&feature_id, None, role_id)?;
        }

        Ok(())
    }
}
