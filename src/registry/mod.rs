//! # Registry Module
//!
//! Builds the route table from a set of controllers.
//!
//! Every [`HandlerDef`](crate::controller::HandlerDef) of every controller in
//! a [`ControllerSet`](crate::controller::ControllerSet) becomes one
//! [`Route`](crate::mapping::Route) keyed by its path. The table is built once
//! at startup and shared read-only afterwards.
//!
//! ## Validation
//!
//! [`ControllerRegistry::build`] rejects, with
//! [`MvcError::Configuration`](crate::error::MvcError::Configuration):
//!
//! - an absent controller set
//! - a handler declared without a path
//! - a handler whose return type is neither text nor a
//!   [`ModelView`](crate::view::ModelView)
//! - two handlers sharing a path (the message names both)
//!
//! [`ControllerRegistry::register_into`] adds one controller to an existing
//! table and replaces clashing paths instead of failing.

mod core;
#[cfg(test)]
mod tests;

pub use core::{ControllerRegistry, RouteTable};
