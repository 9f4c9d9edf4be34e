//! Permission and role predicates
//!
//! Everything here is a pure function of one [`GrantSet`]: no I/O, no
//! mutation, and unknown identifiers simply evaluate to `false`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::catalog::RoleId;
use crate::requirement::AccessRequirement;
use crate::store::GrantSet;

/// Role equivalences applied when a role is *requested*.
///
/// An entry `requested -> {holders}` means a principal holding any of
/// `holders` also satisfies a request for `requested`. The relation is
/// one-directional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAliases {
    aliases: BTreeMap<String, BTreeSet<String>>,
}

impl RoleAliases {
    /// The single built-in alias: requesting `admin` is satisfied by `super_admin`
    pub fn builtin() -> Self {
        Self::none().with_alias(RoleId::Admin, RoleId::SuperAdmin)
    }

    /// No aliasing at all
    pub fn none() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Let holders of `satisfied_by` pass a request for `requested`
    pub fn with_alias(
        mut self,
        requested: impl Into<String>,
        satisfied_by: impl Into<String>,
    ) -> Self {
        self.aliases
            .entry(requested.into())
            .or_default()
            .insert(satisfied_by.into());
        self
    }

    /// Roles other than `requested` itself that satisfy a request for it
    pub fn satisfiers(&self, requested: &str) -> impl Iterator<Item = &str> {
        self.aliases
            .get(requested)
            .into_iter()
            .flat_map(|holders| holders.iter().map(String::as_str))
    }
}

impl Default for RoleAliases {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Predicates over one grant snapshot
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    grants: &'a GrantSet,
    aliases: &'a RoleAliases,
}

impl<'a> Evaluator<'a> {
    pub fn new(grants: &'a GrantSet, aliases: &'a RoleAliases) -> Self {
        Self { grants, aliases }
    }

    pub fn has_permission(&self, id: &str) -> bool {
        self.grants.contains_permission(id)
    }

    /// Membership, plus the alias table for the requested role
    pub fn has_role(&self, id: &str) -> bool {
        self.grants.contains_role(id)
            || self
                .aliases
                .satisfiers(id)
                .any(|holder| self.grants.contains_role(holder))
    }

    /// At least one of `ids` is granted. An empty list is `false`.
    pub fn has_any_permission<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        ids.iter().any(|id| self.has_permission(id.as_ref()))
    }

    /// Every one of `ids` is granted (vacuously true for an empty list)
    pub fn has_all_permissions<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        ids.iter().all(|id| self.has_permission(id.as_ref()))
    }

    /// At least one of `ids` is held. An empty list is `false`.
    pub fn has_any_role<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        ids.iter().any(|id| self.has_role(id.as_ref()))
    }

    /// Every one of `ids` is held (vacuously true for an empty list)
    pub fn has_all_roles<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        ids.iter().all(|id| self.has_role(id.as_ref()))
    }

    /// ANY-of on each clause; an empty clause does not constrain.
    pub fn can_access<P: AsRef<str>, R: AsRef<str>>(
        &self,
        required_permissions: &[P],
        required_roles: &[R],
    ) -> bool {
        let permission_clause =
            required_permissions.is_empty() || self.has_any_permission(required_permissions);
        let role_clause = required_roles.is_empty() || self.has_any_role(required_roles);
        permission_clause && role_clause
    }

    /// Evaluate a full requirement, honouring `require_all`
    pub fn satisfies(&self, requirement: &AccessRequirement) -> bool {
        self.permissions_satisfied(requirement) && self.roles_satisfied(requirement)
    }

    /// The permission clause of `requirement` alone
    pub fn permissions_satisfied(&self, requirement: &AccessRequirement) -> bool {
        let permissions = requirement.permissions.as_slice();
        if permissions.is_empty() {
            true
        } else if requirement.require_all {
            self.has_all_permissions(permissions)
        } else {
            self.has_any_permission(permissions)
        }
    }

    /// The role clause of `requirement` alone
    pub fn roles_satisfied(&self, requirement: &AccessRequirement) -> bool {
        let roles = requirement.roles.as_slice();
        if roles.is_empty() {
            true
        } else if requirement.require_all {
            self.has_all_roles(roles)
        } else {
            self.has_any_role(roles)
        }
    }
}
