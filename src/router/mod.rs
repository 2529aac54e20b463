//! # Router Module
//!
//! Resolves a request path to the [`Route`](crate::mapping::Route) registered
//! for it.
//!
//! ## Overview
//!
//! Lookup is an exact string comparison against the route table built by
//! the [`registry`](crate::registry): no path templates, no wildcards, no
//! method matching. The path handed to [`Router::resolve`] is already
//! relative to the application's context path (see
//! [`relative_path`](crate::server::relative_path)).
//!
//! ## Example
//!
//! ```rust
//! use brrtmvc::controller::{Controller, ControllerSet, HandlerDef};
//! use brrtmvc::registry::ControllerRegistry;
//! use brrtmvc::router::Router;
//! use brrtmvc::session::Session;
//!
//! struct Ping;
//!
//! impl Controller for Ping {
//!     fn create(_session: Session) -> anyhow::Result<Self> {
//!         Ok(Ping)
//!     }
//!
//!     fn handlers() -> Vec<HandlerDef<Self>> {
//!         vec![HandlerDef::get("/ping", "ping", |_: &mut Self, _| Ok("pong"))]
//!     }
//! }
//!
//! # fn main() -> Result<(), brrtmvc::MvcError> {
//! let set = ControllerSet::new().with::<Ping>();
//! let router = Router::new(ControllerRegistry::build(Some(&set))?);
//!
//! assert_eq!(router.resolve("/ping")?.mapping().method(), "ping");
//! assert!(router.resolve("/ping/").is_err());
//! # Ok(())
//! # }
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use core::Router;
