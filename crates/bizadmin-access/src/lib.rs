//! Client-side access control for the bizadmin front end
//!
//! Holds the signed-in principal's permissions and roles, answers
//! authorization questions against them, and decides what the render tree
//! shows: gated fragments, gated pages and permission-backed feature flags.
//!
//! ```rust,ignore
//! let store = Arc::new(PermissionStore::new());
//! store.initialize(&auth).await;
//!
//! let scope = RenderScope::with_provider(AccessProvider::new(store));
//! let toolbar = AccessGate::new()
//!     .permission(UserPermission::Create)
//!     .render(&scope, View::text("New user"))?;
//! ```
//!
//! Denials are plain `false` decisions. The only error in the render path is
//! [`AccessError::ProviderMissing`], raised when a gate or hook runs without
//! an [`AccessProvider`] in scope.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod di;
pub mod error;
pub mod evaluator;
pub mod features;
pub mod gate;
pub mod provider;
pub mod requirement;
pub mod route;
pub mod store;
pub mod view;

pub use auth::{AuthCollaborator, InMemoryAuthCollaborator};
pub use catalog::{
    all_permissions, is_known_permission, EmployeePermission, MarketingPermission, PosPermission,
    ReportPermission, RoleId, RolePermission, SalesPermission, UserPermission,
};
pub use config::AccessConfig;
pub use error::{AccessError, Result};
pub use evaluator::{Evaluator, RoleAliases};
pub use features::{
    is_feature_enabled, use_all_features, use_feature, use_features, FeatureFlagMap,
    FeatureOptions, FeatureResolver, FeatureStatus,
};
pub use gate::{
    use_can, with_permission, AccessCheck, AccessGate, DeniedButton, GateDecision, GatedButton,
};
pub use provider::{use_permissions, AccessProvider, PermissionView, RenderScope};
pub use requirement::AccessRequirement;
pub use route::{protect_route, MemoryHistory, Navigation, Navigator, RouteGate, RouteOutcome};
pub use store::{GrantSet, LoadPhase, PermissionStore, SessionPayload, StoreSnapshot};
pub use view::{Element, View, WrapperKind};
