//! Route-level protection
//!
//! A [`RouteGate`] guards a whole page. Denied visitors are shown a fallback
//! or sent elsewhere through a [`Navigator`] with a replace-navigation, so the
//! guarded page never lands in their history.

pub mod gate;
pub mod navigator;

pub use gate::{protect_route, RouteGate, RouteOutcome};
pub use navigator::{MemoryHistory, Navigation, Navigator};
