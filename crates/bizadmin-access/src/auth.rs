//! Boundary with the external auth provider
//!
//! Token issuance and session checks live outside this crate. The store only
//! needs two things from the provider: a way to resolve the session once at
//! start-up, and the principal it already has cached.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{AccessError, Result};
use crate::store::SessionPayload;

/// Supplies the authenticated principal's flattened grants
#[async_trait]
pub trait AuthCollaborator: Send + Sync {
    /// Resolve the current session; `Ok(None)` means "not authenticated"
    async fn resolve_session(&self) -> Result<Option<SessionPayload>>;

    /// Principal already held in memory, without any I/O
    fn cached_principal(&self) -> Option<SessionPayload>;
}

/// Auth collaborator backed by an in-memory session (for tests and demos)
#[derive(Debug, Default)]
pub struct InMemoryAuthCollaborator {
    session: RwLock<Option<SessionPayload>>,
    failure: Option<String>,
}

impl InMemoryAuthCollaborator {
    /// No one signed in
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a signed-in principal
    pub fn with_session(payload: SessionPayload) -> Self {
        Self {
            session: RwLock::new(Some(payload)),
            failure: None,
        }
    }

    /// Every `resolve_session` call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            session: RwLock::new(None),
            failure: Some(message.into()),
        }
    }

    pub fn sign_in(&self, payload: SessionPayload) {
        *self.session.write() = Some(payload);
    }

    pub fn sign_out(&self) {
        *self.session.write() = None;
    }
}

#[async_trait]
impl AuthCollaborator for InMemoryAuthCollaborator {
    async fn resolve_session(&self) -> Result<Option<SessionPayload>> {
        if let Some(message) = &self.failure {
            return Err(AccessError::Auth(message.clone()));
        }
        Ok(self.session.read().clone())
    }

    fn cached_principal(&self) -> Option<SessionPayload> {
        self.session.read().clone()
    }
}
