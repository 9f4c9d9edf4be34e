//! Provider and render scope
//!
//! The application root builds one [`AccessProvider`] and places it in the
//! [`RenderScope`] handed down the tree. Gates and hooks read through
//! [`use_permissions`], which fails with [`AccessError::ProviderMissing`] when
//! no provider is in scope.

use std::sync::Arc;

use bizadmin_common::{di, ServiceEntry};

use crate::config::AccessConfig;
use crate::error::{AccessError, Result};
use crate::evaluator::{Evaluator, RoleAliases};
use crate::features::FeatureFlagMap;
use crate::store::{GrantSet, PermissionStore, StoreSnapshot};

/// Everything the access layer shares with the render tree
#[derive(Debug, Clone)]
pub struct AccessProvider {
    store: Arc<PermissionStore>,
    features: Arc<FeatureFlagMap>,
    aliases: Arc<RoleAliases>,
    config: Arc<AccessConfig>,
}

impl AccessProvider {
    /// Provider over `store` with the built-in flag map, aliases and config
    pub fn new(store: Arc<PermissionStore>) -> Self {
        Self {
            store,
            features: Arc::new(FeatureFlagMap::builtin()),
            aliases: Arc::new(RoleAliases::builtin()),
            config: Arc::new(AccessConfig::default()),
        }
    }

    /// Provider wired from discovered services
    pub fn from_services(store: Arc<PermissionStore>, services: &[ServiceEntry]) -> Result<Self> {
        Ok(Self {
            store,
            features: di::resolve::<FeatureFlagMap>(services)?,
            aliases: di::resolve::<RoleAliases>(services)?,
            config: di::resolve::<AccessConfig>(services)?,
        })
    }

    pub fn with_features(mut self, features: FeatureFlagMap) -> Self {
        self.features = Arc::new(features);
        self
    }

    pub fn with_aliases(mut self, aliases: RoleAliases) -> Self {
        self.aliases = Arc::new(aliases);
        self
    }

    pub fn with_config(mut self, config: AccessConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn store(&self) -> &Arc<PermissionStore> {
        &self.store
    }

    pub fn features(&self) -> &FeatureFlagMap {
        &self.features
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Read-only view over the store's current snapshot
    pub fn view(&self) -> PermissionView {
        PermissionView {
            snapshot: self.store.snapshot(),
            aliases: Arc::clone(&self.aliases),
        }
    }
}

/// Read-only permission state for one render pass.
///
/// Captures a single snapshot, so every predicate answered through it agrees
/// with every other.
#[derive(Debug, Clone)]
pub struct PermissionView {
    snapshot: StoreSnapshot,
    aliases: Arc<RoleAliases>,
}

impl PermissionView {
    pub fn is_loading(&self) -> bool {
        self.snapshot.is_loading()
    }

    pub fn snapshot(&self) -> &StoreSnapshot {
        &self.snapshot
    }

    pub fn grants(&self) -> &GrantSet {
        self.snapshot.grants()
    }

    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(self.snapshot.grants(), &self.aliases)
    }

    pub fn has_permission(&self, id: &str) -> bool {
        self.evaluator().has_permission(id)
    }

    pub fn has_role(&self, id: &str) -> bool {
        self.evaluator().has_role(id)
    }

    pub fn has_any_permission<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        self.evaluator().has_any_permission(ids)
    }

    pub fn has_any_role<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        self.evaluator().has_any_role(ids)
    }

    pub fn can_access<P: AsRef<str>, R: AsRef<str>>(&self, permissions: &[P], roles: &[R]) -> bool {
        self.evaluator().can_access(permissions, roles)
    }
}

/// Context handed to gates and hooks during rendering
#[derive(Debug, Clone, Default)]
pub struct RenderScope {
    provider: Option<AccessProvider>,
    location: Option<String>,
}

impl RenderScope {
    /// A scope with no provider; accessors fail in it
    pub fn root() -> Self {
        Self::default()
    }

    /// Scope that carries `provider` to every descendant
    pub fn with_provider(provider: AccessProvider) -> Self {
        Self {
            provider: Some(provider),
            location: None,
        }
    }

    /// Same scope, rendered at `location`
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Provider in scope, or an error naming the caller
    pub fn provider(&self, accessor: &'static str) -> Result<&AccessProvider> {
        self.provider
            .as_ref()
            .ok_or(AccessError::ProviderMissing { accessor })
    }
}

/// Current permission state; fails outside a provider scope
pub fn use_permissions(scope: &RenderScope) -> Result<PermissionView> {
    Ok(scope.provider("use_permissions")?.view())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{use_feature, FeatureOptions};

    fn provider_with(permissions: &[&str], roles: &[&str]) -> AccessProvider {
        let store = Arc::new(PermissionStore::new());
        store.ingest(permissions.iter().copied(), roles.iter().copied());
        AccessProvider::new(store)
    }

    #[test]
    fn test_use_permissions_outside_provider_fails() {
        let err = use_permissions(&RenderScope::root()).unwrap_err();
        assert!(matches!(
            err,
            AccessError::ProviderMissing {
                accessor: "use_permissions"
            }
        ));
    }

    #[test]
    fn test_use_permissions_reads_store() {
        let scope = RenderScope::with_provider(provider_with(&["users.read"], &["super_admin"]));
        let view = use_permissions(&scope).unwrap();
        assert!(!view.is_loading());
        assert!(view.has_permission("users.read"));
        assert!(view.has_role("admin"));
    }

    #[test]
    fn test_view_is_a_stable_snapshot() {
        let provider = provider_with(&["a"], &[]);
        let view = provider.view();
        provider.store().clear();

        assert!(view.has_permission("a"));
        assert!(!provider.view().has_permission("a"));
    }

    #[test]
    fn test_independent_providers_do_not_share_state() {
        let first = provider_with(&["a"], &[]);
        let second = provider_with(&["b"], &[]);
        assert!(first.view().has_permission("a"));
        assert!(!second.view().has_permission("a"));
    }

    #[test]
    fn test_scope_location() {
        let scope = RenderScope::root().at("/hr/payroll");
        assert_eq!(scope.location(), Some("/hr/payroll"));
    }

    #[test]
    fn test_injected_features_and_aliases_replace_builtins() {
        let features = FeatureFlagMap::from_entries([("timesheets", ["timesheets.approve"])]);
        let aliases = RoleAliases::none().with_alias("manager", "hr");
        let provider = provider_with(&["timesheets.approve"], &["hr"])
            .with_features(features)
            .with_aliases(aliases);
        let scope = RenderScope::with_provider(provider);
        let options = FeatureOptions::default();

        assert!(use_feature(&scope, "timesheets", options).unwrap());
        assert!(!use_feature(&scope, "users.management", options).unwrap());

        let view = use_permissions(&scope).unwrap();
        assert!(view.has_role("manager"));
        assert!(!view.has_any_role(&["admin"]));
    }

    #[test]
    fn test_from_services_resolves_access_factory() {
        let services = bizadmin_common::collect_all_services();
        let provider =
            AccessProvider::from_services(Arc::new(PermissionStore::new()), &services).unwrap();
        assert!(provider.features().contains("users.management"));
        assert_eq!(provider.config().unauthorized_path, "/unauthorized");
    }
}
