//! # Dispatcher Module
//!
//! Runs one request through the dispatch pipeline.
//!
//! ## Request Flow
//!
//! 1. [`Router`](crate::router::Router) resolves the relative path to a route
//! 2. [`ParameterBinder`](crate::binding::ParameterBinder) binds every
//!    declared parameter from the request
//! 3. [`Invoker`] constructs the controller with a fresh session and calls
//!    the handler
//! 4. [`ResultResolver`](crate::view::ResultResolver) writes text or
//!    forwards to a view
//!
//! A request whose path is unknown stops at step 1; no controller is
//! constructed for it.
//!
//! ## Error Handling
//!
//! [`Dispatcher::dispatch`] returns the [`MvcError`](crate::error::MvcError)
//! of the failing step. [`Dispatcher::handle`] turns it into a plain-text
//! response with the error's status (404, 400 or 500). Server-side failures
//! are logged at `error` level and never swallowed.
//!
//! Handler panics are caught by the [`Invoker`] and reported like any other
//! invocation failure.

mod core;
mod invoker;

pub use core::Dispatcher;
pub use invoker::Invoker;
