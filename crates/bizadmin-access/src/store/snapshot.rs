//! Immutable snapshots published by the permission store

use std::sync::Arc;

use super::grants::GrantSet;

/// Where the store is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing has happened yet
    Uninitialized,
    /// The principal is being resolved
    Loading,
    /// Grants are authoritative (possibly empty)
    Ready,
}

impl std::fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadPhase::Uninitialized => write!(f, "uninitialized"),
            LoadPhase::Loading => write!(f, "loading"),
            LoadPhase::Ready => write!(f, "ready"),
        }
    }
}

/// One consistent view of the store.
///
/// Cloning is cheap; the grant set is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    phase: LoadPhase,
    grants: Arc<GrantSet>,
    version: u64,
}

impl StoreSnapshot {
    pub(crate) fn initial() -> Self {
        Self {
            phase: LoadPhase::Uninitialized,
            grants: Arc::new(GrantSet::empty()),
            version: 0,
        }
    }

    pub(crate) fn next(&self, phase: LoadPhase, grants: Arc<GrantSet>) -> Self {
        Self {
            phase,
            grants,
            version: self.version + 1,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// True until the principal has been resolved at least once, and again
    /// while a refresh is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Uninitialized | LoadPhase::Loading)
    }

    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    pub fn grants(&self) -> &GrantSet {
        &self.grants
    }

    pub(crate) fn shared_grants(&self) -> Arc<GrantSet> {
        Arc::clone(&self.grants)
    }

    /// Increases by one on every published transition
    pub fn version(&self) -> u64 {
        self.version
    }
}
