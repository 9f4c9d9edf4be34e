//! Integration tests for the store lifecycle driving gates, routes and features

use std::sync::Arc;

use bizadmin_access::{
    protect_route, use_can, use_feature, use_features, AccessCheck, AccessConfig, AccessGate,
    AccessProvider, AccessRequirement, FeatureOptions, GatedButton, InMemoryAuthCollaborator,
    LoadPhase, MemoryHistory, Navigator, PermissionStore, PosPermission, RenderScope, RoleId,
    RouteGate, RouteOutcome, SessionPayload, UserPermission, View,
};

fn cashier_session() -> SessionPayload {
    SessionPayload::new(
        "u-17",
        [PosPermission::Access.as_str(), PosPermission::Discount.as_str()],
        [RoleId::Cashier.as_str()],
    )
}

#[test]
fn test_initialize_drives_gates_from_loading_to_ready() {
    let store = Arc::new(PermissionStore::new());
    let auth = InMemoryAuthCollaborator::with_session(cashier_session());
    let scope = RenderScope::with_provider(AccessProvider::new(Arc::clone(&store)));

    let gate = AccessGate::new()
        .permission(PosPermission::Access)
        .show_loading(true)
        .loading_component("spinner");

    assert_eq!(
        gate.render(&scope, View::text("register")).unwrap(),
        View::text("spinner")
    );

    tokio_test::block_on(store.initialize(&auth));

    assert_eq!(store.snapshot().phase(), LoadPhase::Ready);
    assert_eq!(
        gate.render(&scope, View::text("register")).unwrap(),
        View::text("register")
    );
}

#[test]
fn test_failed_session_resolves_to_no_principal() {
    let store = Arc::new(PermissionStore::new());
    let auth = InMemoryAuthCollaborator::failing("session endpoint unreachable");
    tokio_test::block_on(store.initialize(&auth));

    let scope = RenderScope::with_provider(AccessProvider::new(Arc::clone(&store)));
    assert!(!store.is_loading());
    assert!(!use_can(&scope, &AccessCheck::permission("pos.access")).unwrap());
    assert!(use_can(&scope, &AccessCheck::default()).unwrap());
}

#[test]
fn test_subscribers_see_logout() {
    let store = Arc::new(PermissionStore::new());
    let auth = InMemoryAuthCollaborator::with_session(cashier_session());
    tokio_test::block_on(store.initialize(&auth));

    let mut rx = store.subscribe();
    let before = rx.borrow_and_update().version();
    store.logout();

    assert!(rx.has_changed().unwrap());
    let snapshot = rx.borrow_and_update().clone();
    assert!(snapshot.version() > before);
    assert!(snapshot.grants().is_empty());
    assert!(snapshot.is_ready());
}

#[test]
fn test_refresh_replaces_grants_wholesale() {
    let store = Arc::new(PermissionStore::new());
    let auth = InMemoryAuthCollaborator::with_session(cashier_session());
    tokio_test::block_on(store.initialize(&auth));

    auth.sign_in(SessionPayload::new(
        "u-17",
        [UserPermission::Read.as_str()],
        [RoleId::Manager.as_str()],
    ));
    store.refresh(&auth);

    let grants = store.snapshot().grants().clone();
    assert!(grants.contains_permission("users.read"));
    assert!(!grants.contains_permission("pos.access"));
    assert!(grants.contains_role("manager"));
    assert!(!grants.contains_role("cashier"));
}

#[test]
fn test_route_and_feature_agree_after_sign_in() {
    let store = Arc::new(PermissionStore::new());
    let auth = InMemoryAuthCollaborator::with_session(cashier_session());
    tokio_test::block_on(store.initialize(&auth));

    let scope = RenderScope::with_provider(AccessProvider::new(store)).at("/pos/refunds");
    let history = Arc::new(MemoryHistory::new("/pos/refunds"));

    let refunds_enabled = use_feature(&scope, "pos.refunds", FeatureOptions::default()).unwrap();
    let outcome = RouteGate::new()
        .permissions([PosPermission::Refund, PosPermission::Discount])
        .resolve(&scope, history.as_ref(), || View::text("refunds"))
        .unwrap();

    assert!(refunds_enabled);
    assert!(outcome.is_granted());

    let strict = use_feature(
        &scope,
        "pos.refunds",
        FeatureOptions::default().require_all(true),
    )
    .unwrap();
    assert!(!strict);
}

#[test]
fn test_protected_page_redirects_cashier_from_payroll() {
    let store = Arc::new(PermissionStore::new());
    store.ingest_payload(&cashier_session());
    let scope = RenderScope::with_provider(AccessProvider::new(store)).at("/hr/payroll");

    let history = Arc::new(MemoryHistory::new("/hr/payroll"));
    let navigator: Arc<dyn Navigator> = history.clone();
    let payroll = protect_route(
        RouteGate::new().roles([RoleId::Hr, RoleId::Admin]),
        navigator,
        |_scope: &RenderScope, month: String| View::text(format!("payroll for {month}")),
    );

    let outcome = payroll(&scope, "2026-09".to_string()).unwrap();
    assert!(matches!(outcome, RouteOutcome::Redirected(_)));
    assert_eq!(history.current(), "/unauthorized");
    assert_eq!(history.navigations()[0].from.as_deref(), Some("/hr/payroll"));
}

#[test]
fn test_config_flows_into_gates() {
    let config = AccessConfig {
        unauthorized_path: "/no-access".to_string(),
        loading_label: "Checking access".to_string(),
        ..AccessConfig::default()
    };
    let store = Arc::new(PermissionStore::new());
    let provider = AccessProvider::new(Arc::clone(&store)).with_config(config);
    let scope = RenderScope::with_provider(provider);

    let placeholder = GatedButton::permission("pos.refund")
        .show_loading(true)
        .render(&scope, "Refund")
        .unwrap();
    assert!(placeholder.contains_text("Checking access"));

    store.clear();
    let history = MemoryHistory::default();
    let outcome = RouteGate::new()
        .permissions(["pos.refund"])
        .resolve(&scope, &history, || View::Empty)
        .unwrap();
    assert_eq!(history.current(), "/no-access");
    assert!(outcome.into_view().is_empty());
}

#[test]
fn test_batch_features_follow_requirement_builder() {
    let store = Arc::new(PermissionStore::new());
    store.ingest(
        [UserPermission::Read, UserPermission::Create, UserPermission::Update],
        [RoleId::Admin],
    );
    let scope = RenderScope::with_provider(AccessProvider::new(store));

    let status = use_features(
        &scope,
        ["users.management", "users.bulk_delete"],
        FeatureOptions::default().require_all(true),
    )
    .unwrap();
    assert!(status.enabled("users.management"));
    assert!(!status.enabled("users.bulk_delete"));

    let check: AccessCheck = AccessRequirement::new()
        .permissions([UserPermission::Read, UserPermission::Delete])
        .roles([RoleId::Admin])
        .require_all(true)
        .into();
    assert!(!use_can(&scope, &check).unwrap());
}
