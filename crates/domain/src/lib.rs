//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod feature;
mod role;
mod user;

pub use feature::{
    CATEGORY_ADMIN, CATEGORY_ATTACHMENTS, CATEGORY_COMMENTS, CATEGORY_GENERAL, CATEGORY_PROPOSALS,
    CATEGORY_REPORTS, Feature, FeatureCatalog, FeatureId,
};
pub use role::{ColorTag, RESERVED_ADMIN_ROLE_ID, RoleDefinition, RoleId};
pub use user::{DirectoryUser, UserId, UserOrigin};
