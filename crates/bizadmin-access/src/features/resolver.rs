//! Feature enablement queries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::flags::FeatureFlagMap;
use crate::error::Result;
use crate::provider::{PermissionView, RenderScope};

/// How a feature's permission list is combined, and what unknown names yield
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureOptions {
    /// ALL-of instead of ANY-of
    #[serde(default)]
    pub require_all: bool,
    /// Returned verbatim for names missing from the map
    #[serde(default)]
    pub fallback_value: bool,
}

impl FeatureOptions {
    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    pub fn fallback(mut self, fallback_value: bool) -> Self {
        self.fallback_value = fallback_value;
        self
    }
}

/// Batch result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureStatus {
    pub flags: BTreeMap<String, bool>,
    /// The store had not settled when the flags were computed
    pub is_loading: bool,
}

impl FeatureStatus {
    /// Whether `name` resolved to enabled (unlisted names are disabled)
    pub fn enabled(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }
}

fn resolve(
    map: &FeatureFlagMap,
    name: &str,
    options: FeatureOptions,
    has_permission: impl Fn(&str) -> bool,
) -> bool {
    match map.requirements(name) {
        Some(required) if !required.is_empty() => {
            if options.require_all {
                required.iter().all(|p| has_permission(p.as_str()))
            } else {
                required.iter().any(|p| has_permission(p.as_str()))
            }
        }
        _ => {
            debug!(feature = name, fallback = options.fallback_value, "Unknown feature");
            options.fallback_value
        }
    }
}

/// Resolve a feature against an explicit permission list, with no store.
pub fn is_feature_enabled<S: AsRef<str>>(
    map: &FeatureFlagMap,
    name: &str,
    user_permissions: &[S],
    options: FeatureOptions,
) -> bool {
    resolve(map, name, options, |perm| {
        user_permissions.iter().any(|held| held.as_ref() == perm)
    })
}

/// Feature queries bound to one permission view
#[derive(Debug, Clone, Copy)]
pub struct FeatureResolver<'a> {
    map: &'a FeatureFlagMap,
    view: &'a PermissionView,
}

impl<'a> FeatureResolver<'a> {
    pub fn new(map: &'a FeatureFlagMap, view: &'a PermissionView) -> Self {
        Self { map, view }
    }

    pub fn is_enabled(&self, name: &str, options: FeatureOptions) -> bool {
        let evaluator = self.view.evaluator();
        resolve(self.map, name, options, |perm| evaluator.has_permission(perm))
    }

    pub fn batch<I, S>(&self, names: I, options: FeatureOptions) -> FeatureStatus
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FeatureStatus {
            flags: names
                .into_iter()
                .map(|name| {
                    let name = name.as_ref();
                    (name.to_string(), self.is_enabled(name, options))
                })
                .collect(),
            is_loading: self.view.is_loading(),
        }
    }

    /// Every feature in the map
    pub fn all(&self, options: FeatureOptions) -> FeatureStatus {
        self.batch(self.map.names(), options)
    }
}

/// Whether one feature is enabled for the principal in scope
pub fn use_feature(scope: &RenderScope, name: &str, options: FeatureOptions) -> Result<bool> {
    let provider = scope.provider("use_feature")?;
    let view = provider.view();
    Ok(FeatureResolver::new(provider.features(), &view).is_enabled(name, options))
}

/// Enablement for each of `names`, plus the store's loading flag
pub fn use_features<I, S>(
    scope: &RenderScope,
    names: I,
    options: FeatureOptions,
) -> Result<FeatureStatus>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let provider = scope.provider("use_features")?;
    let view = provider.view();
    Ok(FeatureResolver::new(provider.features(), &view).batch(names, options))
}

/// Enablement of every known feature, for feature-discovery screens
pub fn use_all_features(scope: &RenderScope, options: FeatureOptions) -> Result<FeatureStatus> {
    let provider = scope.provider("use_all_features")?;
    let view = provider.view();
    Ok(FeatureResolver::new(provider.features(), &view).all(options))
}
