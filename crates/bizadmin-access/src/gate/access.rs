//! Conditional-rendering gate

use std::collections::BTreeMap;

use tracing::debug;

use super::AccessCheck;
use crate::error::Result;
use crate::provider::{PermissionView, RenderScope};
use crate::requirement::AccessRequirement;
use crate::view::{loading_placeholder, View, WrapperKind};

/// Outcome of evaluating a gate against one permission view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Store still loading and the gate asked to show it
    Loading,
    Granted,
    Denied,
}

/// Renders children, fallback or a loading placeholder depending on the
/// principal's grants.
///
/// ```rust,ignore
/// let toolbar = AccessGate::new()
///     .permissions([UserPermission::Read, UserPermission::Delete])
///     .fallback(View::text("locked"))
///     .render(&scope, View::text("Delete user"))?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    check: AccessCheck,
    fallback: View,
    show_loading: bool,
    loading_component: Option<View>,
    wrapper: WrapperKind,
    attrs: BTreeMap<String, String>,
}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate on an existing check
    pub fn for_check(check: AccessCheck) -> Self {
        Self {
            check,
            ..Self::default()
        }
    }

    /// Single-permission shorthand; overrides any permission list
    pub fn permission(mut self, id: impl Into<String>) -> Self {
        self.check.permission = Some(id.into());
        self
    }

    pub fn permissions<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.check.requirement = std::mem::take(&mut self.check.requirement).permissions(ids);
        self
    }

    pub fn roles<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.check.requirement = std::mem::take(&mut self.check.requirement).roles(ids);
        self
    }

    pub fn require_all(mut self, require_all: bool) -> Self {
        self.check.requirement.require_all = require_all;
        self
    }

    /// Rendered when access is denied (default: nothing)
    pub fn fallback(mut self, fallback: impl Into<View>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Render a placeholder while the store is loading
    pub fn show_loading(mut self, show_loading: bool) -> Self {
        self.show_loading = show_loading;
        self
    }

    /// Replace the default loading placeholder
    pub fn loading_component(mut self, loading: impl Into<View>) -> Self {
        self.loading_component = Some(loading.into());
        self
    }

    /// Wrap granted children in an element of this kind
    pub fn wrap_as(mut self, wrapper: WrapperKind) -> Self {
        self.wrapper = wrapper;
        self
    }

    /// Forward an attribute to the wrapper element
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub(crate) fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Decide without rendering
    pub fn decide(&self, view: &PermissionView) -> GateDecision {
        if view.is_loading() && self.show_loading {
            return GateDecision::Loading;
        }
        if self.check.evaluate(&view.evaluator()) {
            GateDecision::Granted
        } else {
            GateDecision::Denied
        }
    }

    /// Render with eagerly built children
    pub fn render(&self, scope: &RenderScope, children: View) -> Result<View> {
        self.render_with(scope, || children)
    }

    /// Render, building children only when access is granted
    pub fn render_with(
        &self,
        scope: &RenderScope,
        children: impl FnOnce() -> View,
    ) -> Result<View> {
        let provider = scope.provider("AccessGate")?;
        let view = provider.view();

        Ok(match self.decide(&view) {
            GateDecision::Loading => self
                .loading_component
                .clone()
                .unwrap_or_else(|| loading_placeholder(&provider.config().loading_label)),
            GateDecision::Granted => self.wrapper.wrap(children(), &self.attrs),
            GateDecision::Denied => {
                debug!(
                    permission = ?self.check.permission,
                    permissions = ?self.check.requirement.permissions,
                    roles = ?self.check.requirement.roles,
                    require_all = self.check.requirement.require_all,
                    "Access gate denied"
                );
                self.fallback.clone()
            }
        })
    }
}

impl From<AccessRequirement> for AccessGate {
    fn from(requirement: AccessRequirement) -> Self {
        Self::for_check(requirement.into())
    }
}
