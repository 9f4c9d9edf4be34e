//! Grant data: what the principal holds and how it arrives

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The principal's granted permissions and roles.
///
/// Both sets are always present; an empty set means "no grants".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSet {
    permissions: BTreeSet<String>,
    roles: BTreeSet<String>,
}

impl GrantSet {
    /// Build a grant set, collapsing duplicates
    pub fn new<P, R>(permissions: P, roles: R) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// No grants at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn permissions(&self) -> &BTreeSet<String> {
        &self.permissions
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn contains_permission(&self, id: &str) -> bool {
        self.permissions.contains(id)
    }

    pub fn contains_role(&self, id: &str) -> bool {
        self.roles.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty() && self.roles.is_empty()
    }
}

/// Session payload handed over by the auth collaborator.
///
/// Lists are already flattened server-side. Missing lists deserialize as
/// `None` and are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl SessionPayload {
    /// Create a payload for a known user
    pub fn new<P, R>(user_id: impl Into<String>, permissions: P, roles: R) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            user_id: Some(user_id.into()),
            permissions: Some(permissions.into_iter().map(Into::into).collect()),
            roles: Some(roles.into_iter().map(Into::into).collect()),
        }
    }

    /// Parse the JSON body the auth backend returns
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Grants carried by this payload
    pub fn grants(&self) -> GrantSet {
        GrantSet::new(
            self.permissions.iter().flatten().cloned(),
            self.roles.iter().flatten().cloned(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_set_collapses_duplicates() {
        let grants = GrantSet::new(["users.read", "users.read"], ["hr"]);
        assert_eq!(grants.permissions().len(), 1);
        assert!(grants.contains_permission("users.read"));
        assert!(grants.contains_role("hr"));
    }

    #[test]
    fn test_empty_grant_set() {
        let grants = GrantSet::empty();
        assert!(grants.is_empty());
        assert!(!grants.contains_permission("users.read"));
    }

    #[test]
    fn test_payload_with_missing_lists_yields_empty_grants() {
        let payload = SessionPayload::from_json(r#"{"user_id": "u-1"}"#).unwrap();
        assert_eq!(payload.user_id.as_deref(), Some("u-1"));
        assert!(payload.grants().is_empty());
    }

    #[test]
    fn test_payload_grants() {
        let payload = SessionPayload::from_json(
            r#"{"user_id": "u-2", "permissions": ["sales.read"], "roles": ["sales", "sales"]}"#,
        )
        .unwrap();
        let grants = payload.grants();
        assert!(grants.contains_permission("sales.read"));
        assert_eq!(grants.roles().len(), 1);
    }

    #[test]
    fn test_payload_rejects_malformed_json() {
        assert!(SessionPayload::from_json(r#"{"permissions": "users.read"}"#).is_err());
    }
}
