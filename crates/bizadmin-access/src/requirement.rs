//! What a protected region needs

use serde::{Deserialize, Serialize};

/// Required permissions and roles for a protected region.
///
/// The two clauses are evaluated independently and AND-ed; an empty clause
/// does not constrain. `require_all` switches both clauses from ANY-of to
/// ALL-of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement {
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub require_all: bool,
}

impl AccessRequirement {
    /// An unconstrained requirement
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permission(mut self, id: impl Into<String>) -> Self {
        self.permissions.push(id.into());
        self
    }

    pub fn permissions<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.permissions.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn role(mut self, id: impl Into<String>) -> Self {
        self.roles.push(id.into());
        self
    }

    pub fn roles<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.roles.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    /// True when neither clause constrains anything
    pub fn is_unconstrained(&self) -> bool {
        self.permissions.is_empty() && self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RoleId, UserPermission};

    #[test]
    fn test_builder_accumulates() {
        let req = AccessRequirement::new()
            .permission(UserPermission::Read)
            .permissions([UserPermission::Update, UserPermission::Delete])
            .role(RoleId::Hr)
            .require_all(true);

        assert_eq!(req.permissions, vec!["users.read", "users.update", "users.delete"]);
        assert_eq!(req.roles, vec!["hr"]);
        assert!(req.require_all);
        assert!(!req.is_unconstrained());
    }

    #[test]
    fn test_default_is_unconstrained_any() {
        let req = AccessRequirement::default();
        assert!(req.is_unconstrained());
        assert!(!req.require_all);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let req: AccessRequirement = serde_json::from_str(r#"{"roles": ["admin"]}"#).unwrap();
        assert!(req.permissions.is_empty());
        assert_eq!(req.roles, vec!["admin"]);
        assert!(!req.require_all);
    }
}
