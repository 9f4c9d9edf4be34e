//! Component wrapper form of [`AccessGate`]

use super::{AccessCheck, AccessGate};
use crate::error::Result;
use crate::provider::RenderScope;
use crate::view::View;

/// Wrap a component so it renders only for principals passing `check`.
///
/// The returned component forwards its props to `component` unchanged and
/// renders `fallback` when denied. The wrapped component is not invoked on
/// denial.
pub fn with_permission<P, F>(
    check: impl Into<AccessCheck>,
    fallback: impl Into<View>,
    component: F,
) -> impl Fn(&RenderScope, P) -> Result<View>
where
    F: Fn(&RenderScope, P) -> View,
{
    let gate = AccessGate::for_check(check.into()).fallback(fallback);
    move |scope: &RenderScope, props: P| gate.render_with(scope, || component(scope, props))
}
