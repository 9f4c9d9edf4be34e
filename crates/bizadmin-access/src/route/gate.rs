//! Page-level gate

use std::sync::Arc;

use tracing::info;

use super::navigator::{Navigation, Navigator};
use crate::error::Result;
use crate::provider::RenderScope;
use crate::view::{loading_placeholder, View};

/// What a route gate did with its page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Store still loading; a placeholder was rendered
    Loading(View),
    Granted(View),
    /// Denied, and a fallback was supplied
    Fallback(View),
    /// Denied; navigation was issued and nothing is rendered
    Redirected(Navigation),
}

impl RouteOutcome {
    pub fn into_view(self) -> View {
        match self {
            RouteOutcome::Loading(view)
            | RouteOutcome::Granted(view)
            | RouteOutcome::Fallback(view) => view,
            RouteOutcome::Redirected(_) => View::Empty,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, RouteOutcome::Granted(_))
    }
}

/// Guards a page behind ANY-of permission and role lists.
///
/// Unlike [`AccessGate`](crate::gate::AccessGate) there is no `require_all`
/// mode: a route gate passes when it holds any listed permission and any
/// listed role, with an empty list leaving that clause unconstrained.
#[derive(Debug, Clone, Default)]
pub struct RouteGate {
    permissions: Vec<String>,
    roles: Vec<String>,
    redirect_to: Option<String>,
    fallback: Option<View>,
    loading_component: Option<View>,
}

impl RouteGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn permissions<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.permissions.extend(ids.into_iter().map(Into::into));
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

    /// Where denied visitors are sent (default: the configured unauthorized path)
    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = Some(path.into());
        self
    }

    /// Render this instead of redirecting
    pub fn fallback(mut self, fallback: impl Into<View>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    pub fn loading_component(mut self, loading: impl Into<View>) -> Self {
        self.loading_component = Some(loading.into());
        self
    }

    /// Resolve the gate, building the page only when access is granted
    pub fn resolve(
        &self,
        scope: &RenderScope,
        navigator: &dyn Navigator,
        page: impl FnOnce() -> View,
    ) -> Result<RouteOutcome> {
        let provider = scope.provider("RouteGate")?;
        let config = provider.config();
        let view = provider.view();

        if view.is_loading() {
            return Ok(RouteOutcome::Loading(
                self.loading_component
                    .clone()
                    .unwrap_or_else(|| loading_placeholder(&config.loading_label)),
            ));
        }

        if view.can_access(self.permissions.as_slice(), self.roles.as_slice()) {
            return Ok(RouteOutcome::Granted(page()));
        }

        if let Some(fallback) = &self.fallback {
            return Ok(RouteOutcome::Fallback(fallback.clone()));
        }

        let target = self
            .redirect_to
            .as_deref()
            .unwrap_or(&config.unauthorized_path);
        let origin = scope.location().filter(|_| config.carry_origin);
        let navigation = Navigation::replace(target).from_location(origin);

        info!(
            to = %navigation.to,
            from = ?navigation.from,
            permissions = ?self.permissions,
            roles = ?self.roles,
            "Route access denied, redirecting"
        );
        navigator.navigate(navigation.clone());
        Ok(RouteOutcome::Redirected(navigation))
    }
}

/// Wrap a page component behind `gate`, forwarding its props unchanged
pub fn protect_route<P, F>(
    gate: RouteGate,
    navigator: Arc<dyn Navigator>,
    page: F,
) -> impl Fn(&RenderScope, P) -> Result<RouteOutcome>
where
    F: Fn(&RenderScope, P) -> View,
{
    move |scope: &RenderScope, props: P| {
        gate.resolve(scope, navigator.as_ref(), || page(scope, props))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessConfig;
    use crate::error::AccessError;
    use crate::provider::AccessProvider;
    use crate::route::MemoryHistory;
    use crate::store::PermissionStore;

    fn provider_with(permissions: &[&str], roles: &[&str]) -> AccessProvider {
        let store = Arc::new(PermissionStore::new());
        store.ingest(permissions.iter().copied(), roles.iter().copied());
        AccessProvider::new(store)
    }

    fn page() -> View {
        View::text("payroll")
    }

    #[test]
    fn test_granted_renders_page() {
        let scope = RenderScope::with_provider(provider_with(&["payroll.read"], &["hr"]));
        let history = MemoryHistory::new("/hr/payroll");
        let outcome = RouteGate::new()
            .permissions(["payroll.read", "payroll.process"])
            .roles(["hr", "admin"])
            .resolve(&scope, &history, page)
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Granted(page()));
        assert!(history.navigations().is_empty());
    }

    #[test]
    fn test_denied_redirects_to_default_with_origin() {
        let scope = RenderScope::with_provider(provider_with(&[], &["cashier"])).at("/hr/payroll");
        let history = MemoryHistory::new("/hr/payroll");
        let outcome = RouteGate::new()
            .roles(["hr"])
            .resolve(&scope, &history, page)
            .unwrap();

        let expected = Navigation::replace("/unauthorized").from_location(Some("/hr/payroll"));
        assert_eq!(outcome, RouteOutcome::Redirected(expected.clone()));
        assert_eq!(history.navigations(), vec![expected]);
        assert_eq!(history.current(), "/unauthorized");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_custom_redirect_target() {
        let scope = RenderScope::with_provider(provider_with(&[], &[]));
        let history = MemoryHistory::default();
        let outcome = RouteGate::new()
            .permissions(["reports.view"])
            .redirect_to("/login")
            .resolve(&scope, &history, page)
            .unwrap();

        match outcome {
            RouteOutcome::Redirected(nav) => {
                assert_eq!(nav.to, "/login");
                assert!(nav.replace);
            }
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn test_configured_unauthorized_path_without_origin() {
        let config = AccessConfig {
            unauthorized_path: "/forbidden".to_string(),
            carry_origin: false,
            ..AccessConfig::default()
        };
        let provider = provider_with(&[], &[]).with_config(config);
        let scope = RenderScope::with_provider(provider).at("/pos");
        let history = MemoryHistory::default();
        let outcome = RouteGate::new()
            .permissions(["pos.access"])
            .resolve(&scope, &history, page)
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Redirected(Navigation::replace("/forbidden")));
    }

    #[test]
    fn test_fallback_suppresses_redirect() {
        let scope = RenderScope::with_provider(provider_with(&[], &[]));
        let history = MemoryHistory::default();
        let outcome = RouteGate::new()
            .permissions(["pos.access"])
            .fallback("register closed")
            .resolve(&scope, &history, page)
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Fallback(View::text("register closed")));
        assert!(history.navigations().is_empty());
    }

    #[test]
    fn test_loading_renders_placeholder_and_does_not_navigate() {
        let store = Arc::new(PermissionStore::new());
        let scope = RenderScope::with_provider(AccessProvider::new(store));
        let history = MemoryHistory::default();
        let outcome = RouteGate::new()
            .permissions(["pos.access"])
            .resolve(&scope, &history, || panic!("page built while loading"))
            .unwrap();

        assert!(matches!(
            &outcome,
            RouteOutcome::Loading(view) if view.contains_text("Loading...")
        ));
        assert!(history.navigations().is_empty());
    }

    #[test]
    fn test_empty_lists_are_unconstrained() {
        let scope = RenderScope::with_provider(provider_with(&[], &[]));
        let outcome = RouteGate::new()
            .resolve(&scope, &MemoryHistory::default(), page)
            .unwrap();
        assert!(outcome.is_granted());
    }

    #[test]
    fn test_outside_provider() {
        let err = RouteGate::new()
            .resolve(&RenderScope::root(), &MemoryHistory::default(), page)
            .unwrap_err();
        assert!(matches!(err, AccessError::ProviderMissing { accessor: "RouteGate" }));
    }

    #[test]
    fn test_protect_route_forwards_props() {
        let scope = RenderScope::with_provider(provider_with(&["employees.read"], &[]));
        let history: Arc<dyn Navigator> = Arc::new(MemoryHistory::default());
        let employee_page = protect_route(
            RouteGate::new().permissions(["employees.read"]),
            history,
            |_scope: &RenderScope, id: u32| View::text(format!("employee {id}")),
        );

        let outcome = employee_page(&scope, 12).unwrap();
        assert_eq!(outcome.into_view(), View::text("employee 12"));
    }
}
