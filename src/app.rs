//! Application bootstrap: config → controllers → route table → dispatcher.

use crate::config::AppConfig;
use crate::controller::ControllerSet;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::registry::ControllerRegistry;
use crate::router::Router;
use crate::server::{HttpServer, MvcService, ServerHandle};
use crate::view::{Forwarder, TemplateForwarder};
use std::io;
use std::sync::Arc;
use tracing::info;

/// A fully wired dispatch core plus the config it was built from.
#[derive(Debug, Clone)]
pub struct Application {
    config: AppConfig,
    dispatcher: Arc<Dispatcher>,
}

impl Application {
    /// Scan the configured base package and build the dispatcher, forwarding
    /// views to templates under `views.dir`.
    ///
    /// # Errors
    ///
    /// [`MvcError::Configuration`](crate::error::MvcError::Configuration) when
    /// no base package is configured or the route table is invalid.
    pub fn bootstrap(config: AppConfig) -> Result<Self> {
        let base_package = config.base_package()?;
        let controllers = ControllerSet::scan(base_package);
        info!(
            base_package = %base_package,
            controllers_count = controllers.len(),
            "Controller package scanned"
        );
        Self::from_controllers(config, &controllers)
    }

    /// Build from an explicit controller set with the template forwarder.
    ///
    /// # Errors
    ///
    /// See [`ControllerRegistry::build`].
    pub fn from_controllers(config: AppConfig, controllers: &ControllerSet) -> Result<Self> {
        let forwarder = Arc::new(TemplateForwarder::new(config.views.dir.clone()));
        Self::with_forwarder(config, controllers, forwarder)
    }

    /// Build from an explicit controller set and forwarder.
    ///
    /// # Errors
    ///
    /// See [`ControllerRegistry::build`].
    pub fn with_forwarder(
        config: AppConfig,
        controllers: &ControllerSet,
        forwarder: Arc<dyn Forwarder>,
    ) -> Result<Self> {
        let table = ControllerRegistry::build(Some(controllers))?;
        let dispatcher = Dispatcher::new(Router::new(table), forwarder);
        Ok(Self {
            config,
            dispatcher: Arc::new(dispatcher),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        self.dispatcher.router()
    }

    /// HTTP adapter over the dispatcher with the configured context path and
    /// session capacity
    #[must_use]
    pub fn service(&self) -> MvcService {
        MvcService::new(Arc::clone(&self.dispatcher), &self.config.context_path)
            .with_session_capacity(self.config.sessions.capacity)
    }

    /// Start the HTTP host on `http.addr` with `http.workers` threads.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub fn serve(&self) -> io::Result<ServerHandle> {
        HttpServer::new(self.service(), self.config.http.workers).start(self.config.http.addr.as_str())
    }
}
