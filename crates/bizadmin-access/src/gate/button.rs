//! Buttons that hide or disable themselves for principals lacking access

use super::{AccessCheck, AccessGate, GateDecision};
use crate::error::Result;
use crate::provider::RenderScope;
use crate::view::{Element, View, WrapperKind};

/// What a denied button turns into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeniedButton {
    /// Render the fallback instead of the button
    #[default]
    Hide,
    /// Render the button with `disabled="true"`
    Disable,
}

/// A button that is shown only to principals passing its check
#[derive(Debug, Clone, Default)]
pub struct GatedButton {
    gate: AccessGate,
    when_denied: DeniedButton,
}

impl GatedButton {
    pub fn new(check: AccessCheck) -> Self {
        Self {
            gate: AccessGate::for_check(check),
            ..Self::default()
        }
    }

    /// Button guarded by a single permission
    pub fn permission(id: impl Into<String>) -> Self {
        Self::new(AccessCheck::permission(id))
    }

    /// Rendered instead of the button when hidden
    pub fn fallback(mut self, fallback: impl Into<View>) -> Self {
        self.gate = self.gate.fallback(fallback);
        self
    }

    pub fn show_loading(mut self, show_loading: bool) -> Self {
        self.gate = self.gate.show_loading(show_loading);
        self
    }

    /// Keep the button visible but disabled when denied
    pub fn disable_when_denied(mut self) -> Self {
        self.when_denied = DeniedButton::Disable;
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.gate = self.gate.attr(key, value);
        self
    }

    pub fn render(&self, scope: &RenderScope, label: impl Into<View>) -> Result<View> {
        let label = label.into();
        let view = scope.provider("GatedButton")?.view();

        if self.when_denied == DeniedButton::Disable
            && self.gate.decide(&view) == GateDecision::Denied
        {
            return Ok(Element::new("button")
                .attrs(self.gate.attrs().clone())
                .attr("disabled", "true")
                .attr("aria-disabled", "true")
                .child(label)
                .into());
        }

        self.gate
            .clone()
            .wrap_as(WrapperKind::Button)
            .render(scope, label)
    }
}
