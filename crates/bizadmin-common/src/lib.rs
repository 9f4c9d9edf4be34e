//! Shared plumbing for the bizadmin workspace
//!
//! Kept free of dependencies on other bizadmin crates so every crate can
//! depend on it.

pub mod di;
pub mod logging;

pub use di::{
    collect_all_services, list_discovered_factories, resolve, DiError, ServiceEntry, ServiceFactory,
};
pub use logging::{format_error, init_logging, LogLevel, LogOptions};
