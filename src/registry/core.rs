use crate::controller::{ControllerEntry, ControllerSet, RouteDef};
use crate::error::{MvcError, Result};
use crate::mapping::{Mapping, Route};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Path → route. Keys are relative paths, compared exactly.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    routes: HashMap<String, Arc<Route>>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Arc<Route>> {
        self.routes.get(path)
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Mappings sorted by path
    #[must_use]
    pub fn mappings(&self) -> Vec<&Mapping> {
        let mut mappings: Vec<&Mapping> = self.routes.values().map(|r| r.mapping()).collect();
        mappings.sort_by(|a, b| a.path().cmp(b.path()));
        mappings
    }

    fn insert(&mut self, route: Route) -> Option<Arc<Route>> {
        self.routes
            .insert(route.mapping().path().to_owned(), Arc::new(route))
    }
}

/// Builds [`RouteTable`]s from controller declarations.
pub struct ControllerRegistry;

impl ControllerRegistry {
    /// Build a validated route table from every controller of `controllers`.
    ///
    /// # Errors
    ///
    /// [`MvcError::Configuration`] when the set is absent, a handler has no
    /// path or an unsupported return type, or two handlers share a path.
    pub fn build(controllers: Option<&ControllerSet>) -> Result<RouteTable> {
        let Some(controllers) = controllers else {
            return Err(MvcError::Configuration(
                "no controller set supplied to the registry".to_owned(),
            ));
        };

        let mut table = RouteTable::new();
        for entry in controllers.entries() {
            for def in entry.route_defs() {
                let route = validated_route(def)?;
                if let Some(existing) = table.get(route.mapping().path()) {
                    return Err(MvcError::Configuration(format!(
                        "duplicate mapping for path '{}': {} and {}",
                        route.mapping().path(),
                        existing.mapping().handler_id(),
                        route.mapping().handler_id()
                    )));
                }
                debug!(mapping = %route.mapping(), "Handler registered");
                table.insert(route);
            }
        }

        info!(
            controllers_count = controllers.len(),
            routes_count = table.len(),
            "Route table built"
        );
        Ok(table)
    }

    /// Add the handlers of one controller to `table`.
    ///
    /// No uniqueness check: a path already present is replaced and the
    /// replacement is logged.
    ///
    /// # Errors
    ///
    /// [`MvcError::Configuration`] for a handler without path or with an
    /// unsupported return type. Handlers before the failing one stay registered.
    pub fn register_into(table: &mut RouteTable, controller: &ControllerEntry) -> Result<()> {
        for def in controller.route_defs() {
            let route = validated_route(def)?;
            let new_id = route.mapping().handler_id();
            if let Some(replaced) = table.insert(route) {
                warn!(
                    path = %replaced.mapping().path(),
                    replaced = %replaced.mapping().handler_id(),
                    replacement = %new_id,
                    "Existing mapping overwritten"
                );
            }
        }
        Ok(())
    }
}

fn validated_route(def: RouteDef) -> Result<Route> {
    let Some(path) = def.path.clone() else {
        return Err(MvcError::Configuration(format!(
            "handler {} is declared without a path",
            def.identifier()
        )));
    };
    if !def.return_supported {
        return Err(MvcError::Configuration(format!(
            "handler {} returns unsupported type {}",
            def.identifier(),
            def.return_type
        )));
    }
    let mapping = Mapping::new(path, def.controller, def.method);
    Ok(Route::new(mapping, def.params, def.call))
}
