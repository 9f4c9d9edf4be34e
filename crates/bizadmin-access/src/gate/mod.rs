//! Render-level access gates
//!
//! [`AccessGate`] decides between children, fallback and a loading
//! placeholder. [`GatedButton`] and [`with_permission`] are built on it, and
//! [`use_can`] exposes the same decision as a plain boolean.

pub mod access;
pub mod button;
pub mod decorator;

pub use access::{AccessGate, GateDecision};
pub use button::{DeniedButton, GatedButton};
pub use decorator::with_permission;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::provider::RenderScope;
use crate::requirement::AccessRequirement;

/// What a gate checks: an optional single-permission shorthand layered over
/// a full requirement.
///
/// When `permission` is set it decides the permission clause on its own and
/// `requirement.permissions` is ignored. The role clause always comes from
/// the requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCheck {
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(flatten)]
    pub requirement: AccessRequirement,
}

impl AccessCheck {
    /// Check a single permission
    pub fn permission(id: impl Into<String>) -> Self {
        Self {
            permission: Some(id.into()),
            requirement: AccessRequirement::default(),
        }
    }

    pub fn evaluate(&self, evaluator: &Evaluator<'_>) -> bool {
        match &self.permission {
            Some(id) => {
                evaluator.has_permission(id) && evaluator.roles_satisfied(&self.requirement)
            }
            None => evaluator.satisfies(&self.requirement),
        }
    }
}

impl From<AccessRequirement> for AccessCheck {
    fn from(requirement: AccessRequirement) -> Self {
        Self {
            permission: None,
            requirement,
        }
    }
}

/// The gate's decision as a boolean, for imperative use (e.g. disabling a
/// control instead of hiding it). Evaluated against the current snapshot,
/// loading or not.
pub fn use_can(scope: &RenderScope, check: &AccessCheck) -> Result<bool> {
    let view = scope.provider("use_can")?.view();
    Ok(check.evaluate(&view.evaluator()))
}
