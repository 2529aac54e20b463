use super::invoker::Invoker;
use crate::binding::ParameterBinder;
use crate::error::{MvcError, Result};
use crate::router::Router;
use crate::server::{MvcRequest, MvcResponse};
use crate::session::Session;
use crate::view::{Forwarder, ResultResolver};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Router → binder → invoker → resolver, once per request.
///
/// Holds only shared, immutable state and can be used from any number of
/// worker threads at once.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: Router,
    binder: ParameterBinder,
    invoker: Invoker,
    resolver: ResultResolver,
}

impl Dispatcher {
    #[must_use]
    pub fn new(router: Router, forwarder: Arc<dyn Forwarder>) -> Self {
        Self {
            router,
            binder: ParameterBinder::new(),
            invoker: Invoker::new(),
            resolver: ResultResolver::new(forwarder),
        }
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Dispatch `request` and return the response or the failing step's error.
    ///
    /// # Errors
    ///
    /// - [`MvcError::RouteNotFound`] for an unmapped path
    /// - [`MvcError::ParameterBinding`] for an uncoercible parameter
    /// - [`MvcError::Invocation`] when the controller or handler fails
    /// - [`MvcError::UnsupportedResultType`] or [`MvcError::Forward`] from
    ///   result resolution
    pub fn dispatch(&self, request: &mut MvcRequest) -> Result<MvcResponse> {
        let route = self.router.resolve(request.path())?;
        let mut args = self.binder.bind(route.params(), request)?;
        let session = Session::new(request.session_store());
        let value = self.invoker.invoke(route, session, &mut args)?;
        self.resolver.resolve(value, request)
    }

    /// Dispatch `request`, mapping any error to a plain-text response.
    pub fn handle(&self, request: &mut MvcRequest) -> MvcResponse {
        let start = Instant::now();
        let response = match self.dispatch(request) {
            Ok(response) => response,
            Err(err) => error_response(request, &err),
        };

        info!(
            request_id = %request.request_id(),
            method = %request.method,
            path = %request.path(),
            status = response.status,
            forwarded_to = ?response.forwarded_to,
            latency_us = start.elapsed().as_micros(),
            "Request dispatched"
        );
        response
    }
}

fn error_response(request: &MvcRequest, err: &MvcError) -> MvcResponse {
    let status = err.status();
    if status >= 500 {
        error!(
            request_id = %request.request_id(),
            path = %request.path(),
            status = status,
            error = %err,
            "Request failed"
        );
    } else {
        warn!(
            request_id = %request.request_id(),
            path = %request.path(),
            status = status,
            error = %err,
            "Request rejected"
        );
    }
    MvcResponse::text(status, err.to_string())
}
