use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use ipa_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Stable identifier of a grantable feature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(NonEmptyString);

impl FeatureId {
    /// Creates a validated feature identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::for_field("feature id", value)?))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for FeatureId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Capability that can be granted to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    id: FeatureId,
    name: NonEmptyString,
    description: String,
    category: NonEmptyString,
}

impl Feature {
    /// Creates a validated feature.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: FeatureId::new(id)?,
            name: NonEmptyString::for_field("feature name", name)?,
            description: description.into().trim().to_owned(),
            category: NonEmptyString::for_field("feature category", category)?,
        })
    }

    /// Returns the stable feature identifier.
    #[must_use]
    pub fn id(&self) -> &FeatureId {
        &self.id
    }

    /// Returns the feature display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the feature description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the display grouping label.
    #[must_use]
    pub fn category(&self) -> &str {
        self.category.as_str()
    }
}

/// Immutable, ordered catalog of features known to the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCatalog {
    features: Vec<Feature>,
}

impl FeatureCatalog {
    /// Creates a catalog, rejecting duplicate feature identifiers.
    pub fn new(features: Vec<Feature>) -> AppResult<Self> {
        let mut seen = HashSet::with_capacity(features.len());
        for feature in &features {
            if !seen.insert(feature.id().clone()) {
                return Err(AppError::Duplicate(format!(
                    "feature '{}' is listed more than once",
                    feature.id()
                )));
            }
        }

        Ok(Self { features })
    }

    /// Returns the compiled-in catalog of the proposal approval system.
    pub fn standard() -> AppResult<Self> {
        let features = STANDARD_FEATURES
            .iter()
            .map(|(id, name, description, category)| {
                Feature::new(*id, *name, *description, *category)
            })
            .collect::<AppResult<Vec<_>>>()?;

        Self::new(features)
    }

    /// Returns all features in catalog order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        self.features.as_slice()
    }

    /// Finds a feature by identifier.
    #[must_use]
    pub fn get(&self, feature_id: &FeatureId) -> Option<&Feature> {
        self.features
            .iter()
            .find(|feature| feature.id() == feature_id)
    }

    /// Returns features belonging to any of the given categories, in catalog order.
    #[must_use]
    pub fn in_categories(&self, categories: &[&str]) -> Vec<Feature> {
        self.features
            .iter()
            .filter(|feature| categories.contains(&feature.category()))
            .cloned()
            .collect()
    }

    /// Returns the number of features in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Feature category granting the landing dashboard.
pub const CATEGORY_GENERAL: &str = "General";
/// Feature category for proposal lifecycle actions.
pub const CATEGORY_PROPOSALS: &str = "Proposals";
/// Feature category for proposal discussion.
pub const CATEGORY_COMMENTS: &str = "Comments";
/// Feature category for proposal file handling.
pub const CATEGORY_ATTACHMENTS: &str = "Attachments";
/// Feature category for administration screens.
pub const CATEGORY_ADMIN: &str = "Admin";
/// Feature category for reporting.
pub const CATEGORY_REPORTS: &str = "Reports";

static STANDARD_FEATURES: &[(&str, &str, &str, &str)] = &[
    (
        "dashboard",
        "Dashboard",
        "Access the main dashboard",
        CATEGORY_GENERAL,
    ),
    (
        "proposals_view",
        "View Proposals",
        "List investment proposals",
        CATEGORY_PROPOSALS,
    ),
    (
        "proposals_create",
        "Create Proposal",
        "Submit a new investment proposal",
        CATEGORY_PROPOSALS,
    ),
    (
        "proposals_edit",
        "Edit Proposal",
        "Edit an investment proposal",
        CATEGORY_PROPOSALS,
    ),
    (
        "proposals_delete",
        "Delete Proposal",
        "Delete an investment proposal",
        CATEGORY_PROPOSALS,
    ),
    (
        "proposals_approve",
        "Approve Proposal",
        "Approve an investment proposal",
        CATEGORY_PROPOSALS,
    ),
    (
        "proposals_reject",
        "Reject Proposal",
        "Reject an investment proposal",
        CATEGORY_PROPOSALS,
    ),
    (
        "comments_add",
        "Add Comment",
        "Comment on a proposal",
        CATEGORY_COMMENTS,
    ),
    (
        "comments_view",
        "View Comments",
        "Read comments on a proposal",
        CATEGORY_COMMENTS,
    ),
    (
        "attachments_upload",
        "Upload File",
        "Upload an attachment",
        CATEGORY_ATTACHMENTS,
    ),
    (
        "attachments_download",
        "Download File",
        "Download an attachment",
        CATEGORY_ATTACHMENTS,
    ),
    ("users_view", "View Users", "List users", CATEGORY_ADMIN),
    ("users_create", "Create User", "Add a new user", CATEGORY_ADMIN),
    ("users_edit", "Edit User", "Edit user details", CATEGORY_ADMIN),
    ("users_delete", "Delete User", "Remove a user", CATEGORY_ADMIN),
    (
        "roles_manage",
        "Manage Roles",
        "Manage roles and permissions",
        CATEGORY_ADMIN,
    ),
    (
        "config_ldap",
        "LDAP Configuration",
        "Configure the LDAP directory connection",
        CATEGORY_ADMIN,
    ),
    (
        "reports_view",
        "View Reports",
        "View reports and statistics",
        CATEGORY_REPORTS,
    ),
    (
        "reports_export",
        "Export Reports",
        "Export reports to a file",
        CATEGORY_REPORTS,
    ),
];
