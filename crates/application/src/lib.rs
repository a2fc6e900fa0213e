//! Application services and ports.

#![forbid(unsafe_code)]

mod assignment_board;
mod category_grouping;
mod feature_assignment_store;
mod user_directory_ports;
mod user_role_board;
mod user_role_service;

pub use assignment_board::{Assignable, AssignmentBoard, RoleGroup};
pub use category_grouping::group_by_category;
pub use feature_assignment_store::{FeatureAssignmentStore, RoleFeatureEntry, RoleFeatureSnapshot};
pub use user_directory_ports::{UpdateUserInput, UserDirectory};
pub use user_role_board::{UserRoleBoard, standard_role_groups};
pub use user_role_service::{ReassignOutcome, UserRoleService};
