use std::fmt::{Debug, Display};

use ipa_domain::{DirectoryUser, Feature, FeatureId, RoleDefinition, RoleId, UserId};
use serde::Serialize;

/// Item that can be dragged between role groups.
pub trait Assignable: Clone {
    /// Identifier used to detect membership.
    type Id: Clone + Eq + Debug + Display;

    /// Returns the identifier of this item.
    fn assignable_id(&self) -> &Self::Id;
}

impl Assignable for Feature {
    type Id = FeatureId;

    fn assignable_id(&self) -> &Self::Id {
        self.id()
    }
}

impl Assignable for DirectoryUser {
    type Id = UserId;

    fn assignable_id(&self) -> &Self::Id {
        &self.id
    }
}

/// One role card together with the items currently grouped under it.
///
/// Members keep display order, but two groups are equal when they hold the
/// same role and the same set of members.
#[derive(Debug, Clone, Serialize)]
pub struct RoleGroup<T> {
    role: RoleDefinition,
    members: Vec<T>,
}

impl<T: PartialEq> PartialEq for RoleGroup<T> {
    fn eq(&self, other: &Self) -> bool {
        self.role == other.role
            && self.members.len() == other.members.len()
            && self
                .members
                .iter()
                .all(|member| other.members.contains(member))
    }
}

impl<T: Eq> Eq for RoleGroup<T> {}

impl<T: Assignable> RoleGroup<T> {
    /// Creates an empty group for a role.
    #[must_use]
    pub fn new(role: RoleDefinition) -> Self {
        Self {
            role,
            members: Vec::new(),
        }
    }

    /// Returns the role of this group.
    #[must_use]
    pub fn role(&self) -> &RoleDefinition {
        &self.role
    }

    /// Returns members in insertion order.
    #[must_use]
    pub fn members(&self) -> &[T] {
        self.members.as_slice()
    }

    /// Returns whether the group holds the given item.
    #[must_use]
    pub fn contains(&self, item_id: &T::Id) -> bool {
        self.members
            .iter()
            .any(|member| member.assignable_id() == item_id)
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Ordered collection of role groups with single-membership moves.
///
/// Every mutation computes the complete next collection and swaps it in, so
/// an item is never observed in zero or two groups halfway through a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentBoard<T> {
    groups: Vec<RoleGroup<T>>,
}

impl<T: Assignable> Default for AssignmentBoard<T> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<T: Assignable> AssignmentBoard<T> {
    /// Creates a board with one empty group per role, in the given order.
    #[must_use]
    pub fn with_roles(roles: impl IntoIterator<Item = RoleDefinition>) -> Self {
        Self {
            groups: roles.into_iter().map(RoleGroup::new).collect(),
        }
    }

    /// Returns all groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[RoleGroup<T>] {
        self.groups.as_slice()
    }

    /// Finds the group of a role.
    #[must_use]
    pub fn group(&self, role_id: &RoleId) -> Option<&RoleGroup<T>> {
        self.groups.iter().find(|group| group.role.id() == role_id)
    }

    /// Returns the role currently holding an item.
    #[must_use]
    pub fn holder_of(&self, item_id: &T::Id) -> Option<&RoleDefinition> {
        self.groups
            .iter()
            .find(|group| group.contains(item_id))
            .map(RoleGroup::role)
    }

    /// Finds an item in any group.
    #[must_use]
    pub fn find_member(&self, item_id: &T::Id) -> Option<&T> {
        self.groups
            .iter()
            .flat_map(|group| group.members.iter())
            .find(|member| member.assignable_id() == item_id)
    }

    /// Returns every grouped item, group by group.
    pub fn members(&self) -> impl Iterator<Item = &T> {
        self.groups.iter().flat_map(|group| group.members.iter())
    }

    pub(crate) fn push_group(&mut self, role: RoleDefinition) {
        self.groups.push(RoleGroup::new(role));
    }

    pub(crate) fn remove_group(&mut self, role_id: &RoleId) -> Option<RoleGroup<T>> {
        let position = self
            .groups
            .iter()
            .position(|group| group.role.id() == role_id)?;
        Some(self.groups.remove(position))
    }

    pub(crate) fn replace_role(&mut self, role: RoleDefinition) {
        if let Some(group) = self
            .groups
            .iter_mut()
            .find(|group| group.role.id() == role.id())
        {
            group.role = role;
        }
    }

    /// Places `item` into the `to` group and drops it from every other group.
    ///
    /// Adding is idempotent: an item already in `to` keeps its position and
    /// its stored value is refreshed. Callers validate that `to` exists.
    pub(crate) fn place(&mut self, item: T, to: &RoleId) {
        let item_id = item.assignable_id().clone();
        let next = self
            .groups
            .iter()
            .map(|group| {
                let mut members: Vec<T> = group
                    .members
                    .iter()
                    .filter(|member| {
                        group.role.id() == to || member.assignable_id() != &item_id
                    })
                    .cloned()
                    .collect();

                if group.role.id() == to {
                    match members
                        .iter_mut()
                        .find(|member| member.assignable_id() == &item_id)
                    {
                        Some(existing) => *existing = item.clone(),
                        None => members.push(item.clone()),
                    }
                }

                RoleGroup {
                    role: group.role.clone(),
                    members,
                }
            })
            .collect();

        self.groups = next;
    }
}
