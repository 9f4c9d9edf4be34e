//! Service discovery across crates
//!
//! Each crate submits a [`ServiceFactory`] through `inventory::submit!`. The
//! application root calls [`collect_all_services`] once and hands the
//! resulting entries to whatever owns its long-lived state.
//!
//! ```rust,ignore
//! use bizadmin_common::di::{ServiceEntry, ServiceFactory};
//! use std::sync::Arc;
//!
//! inventory::submit! {
//!     ServiceFactory::new("access", create_access_services)
//! }
//!
//! fn create_access_services() -> Vec<ServiceEntry> {
//!     vec![ServiceEntry::new::<FeatureFlagMap>(Arc::new(FeatureFlagMap::builtin()))]
//! }
//! ```

use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::{debug, info};

/// Errors raised while resolving discovered services
#[derive(Debug, thiserror::Error)]
pub enum DiError {
    #[error("Service not registered: {type_name}")]
    NotRegistered { type_name: &'static str },

    #[error("Service registered more than once: {type_name}")]
    Duplicate { type_name: &'static str },
}

/// A type-erased service instance produced by a factory.
pub struct ServiceEntry {
    /// Registration key
    pub type_id: TypeId,

    /// Human-readable type name for diagnostics
    pub type_name: &'static str,

    pub instance: Arc<dyn Any + Send + Sync>,
}

impl ServiceEntry {
    /// Wrap a concrete service
    pub fn new<T: Send + Sync + 'static>(instance: Arc<T>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            instance: instance as Arc<dyn Any + Send + Sync>,
        }
    }

    /// Downcast back to the concrete service type
    pub fn downcast<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.instance).downcast::<T>().ok()
    }
}

impl std::fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceEntry")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// A named group of services contributed by one crate.
pub struct ServiceFactory {
    /// Group name, e.g. "access"
    pub name: &'static str,

    pub factory_fn: fn() -> Vec<ServiceEntry>,

    /// Lower runs earlier
    pub priority: u32,
}

impl ServiceFactory {
    /// Factory with the default priority (100)
    pub const fn new(name: &'static str, factory_fn: fn() -> Vec<ServiceEntry>) -> Self {
        Self {
            name,
            factory_fn,
            priority: 100,
        }
    }

    /// Factory with an explicit priority
    pub const fn with_priority(
        name: &'static str,
        factory_fn: fn() -> Vec<ServiceEntry>,
        priority: u32,
    ) -> Self {
        Self {
            name,
            factory_fn,
            priority,
        }
    }
}

inventory::collect!(ServiceFactory);

/// Run every discovered factory in priority order and gather their services.
pub fn collect_all_services() -> Vec<ServiceEntry> {
    let mut factories: Vec<&ServiceFactory> = inventory::iter::<ServiceFactory>().collect();
    factories.sort_by_key(|f| f.priority);

    info!(count = factories.len(), "Discovered service factories");

    let mut services = Vec::new();
    for factory in factories {
        let created = (factory.factory_fn)();
        debug!(
            factory = factory.name,
            priority = factory.priority,
            created = created.len(),
            "Created services"
        );
        services.extend(created);
    }
    services
}

/// Names of every discovered factory
pub fn list_discovered_factories() -> Vec<&'static str> {
    inventory::iter::<ServiceFactory>().map(|f| f.name).collect()
}

/// Find exactly one service of type `T` among collected entries.
pub fn resolve<T: Send + Sync + 'static>(entries: &[ServiceEntry]) -> Result<Arc<T>, DiError> {
    let type_name = std::any::type_name::<T>();
    let mut matches = entries.iter().filter(|e| e.type_id == TypeId::of::<T>());

    let first = matches.next().ok_or(DiError::NotRegistered { type_name })?;
    if matches.next().is_some() {
        return Err(DiError::Duplicate { type_name });
    }
    first.downcast::<T>().ok_or(DiError::NotRegistered { type_name })
}
