//! Permission store
//!
//! Single source of truth for the current principal's grants. Every mutation
//! publishes a whole new [`StoreSnapshot`], so readers never see a partially
//! applied update.

pub mod grants;
pub mod snapshot;

pub use grants::{GrantSet, SessionPayload};
pub use snapshot::{LoadPhase, StoreSnapshot};

use std::sync::Arc;

use bizadmin_common::format_error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::auth::AuthCollaborator;

/// Process-wide holder of the principal's grants.
///
/// Only [`ingest`](Self::ingest), [`clear`](Self::clear),
/// [`refresh`](Self::refresh) and [`initialize`](Self::initialize) mutate it.
#[derive(Debug)]
pub struct PermissionStore {
    tx: watch::Sender<StoreSnapshot>,
}

impl PermissionStore {
    /// Create an empty, uninitialized store
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StoreSnapshot::initial());
        Self { tx }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> StoreSnapshot {
        self.tx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().is_loading()
    }

    /// Observe every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.tx.subscribe()
    }

    /// Enter the loading phase, keeping the current grants visible
    pub fn begin_loading(&self) {
        self.tx.send_modify(|current| {
            let grants = current.shared_grants();
            *current = current.next(LoadPhase::Loading, grants);
        });
        debug!("Permission store loading");
    }

    /// Replace both sets wholesale and become ready
    pub fn ingest<P, R>(&self, permissions: P, roles: R)
    where
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        self.publish_ready(GrantSet::new(permissions, roles));
    }

    /// Ingest a session payload; absent lists count as empty
    pub fn ingest_payload(&self, payload: &SessionPayload) {
        self.publish_ready(payload.grants());
    }

    /// Drop all grants and become ready
    pub fn clear(&self) {
        self.publish_ready(GrantSet::empty());
    }

    /// Clear on sign-out
    pub fn logout(&self) {
        self.clear();
        info!("Permission store cleared on logout");
    }

    /// Re-ingest the collaborator's cached principal without a network round
    /// trip. Does nothing when no principal is cached.
    pub fn refresh(&self, auth: &dyn AuthCollaborator) {
        match auth.cached_principal() {
            Some(payload) => {
                self.begin_loading();
                self.ingest_payload(&payload);
                info!(user_id = ?payload.user_id, "Permission store refreshed");
            }
            None => debug!("Refresh skipped: no cached principal"),
        }
    }

    /// Resolve the principal through the collaborator and settle the store.
    ///
    /// A resolution failure is logged and treated as "no principal".
    pub async fn initialize(&self, auth: &dyn AuthCollaborator) {
        self.begin_loading();
        match auth.resolve_session().await {
            Ok(Some(payload)) => {
                self.ingest_payload(&payload);
                info!(user_id = ?payload.user_id, "Principal resolved");
            }
            Ok(None) => {
                self.clear();
                info!("No authenticated principal");
            }
            Err(err) => {
                warn!(
                    error = %format_error(&err),
                    "Session resolution failed, continuing without grants"
                );
                self.clear();
            }
        }
    }

    fn publish_ready(&self, grants: GrantSet) {
        let grants = Arc::new(grants);
        let (permissions, roles) = (grants.permissions().len(), grants.roles().len());
        self.tx.send_modify(|current| {
            *current = current.next(LoadPhase::Ready, grants);
        });
        debug!(permissions, roles, "Permission store ready");
    }
}

impl Default for PermissionStore {
    fn default() -> Self {
        Self::new()
    }
}
