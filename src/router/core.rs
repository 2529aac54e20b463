use crate::error::{MvcError, Result};
use crate::mapping::Route;
use crate::registry::RouteTable;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Exact-path router over a shared, immutable [`RouteTable`].
#[derive(Debug, Clone)]
pub struct Router {
    table: Arc<RouteTable>,
}

impl Router {
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self::from_shared(Arc::new(table))
    }

    /// Router over a table already shared elsewhere
    #[must_use]
    pub fn from_shared(table: Arc<RouteTable>) -> Self {
        let routes_summary: Vec<String> = table
            .mappings()
            .iter()
            .take(10)
            .map(|m| m.to_string())
            .collect();

        info!(
            routes_count = table.len(),
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        Self { table }
    }

    /// Route registered for `path`.
    ///
    /// # Errors
    ///
    /// [`MvcError::RouteNotFound`] when no handler is mapped to the path.
    pub fn resolve(&self, path: &str) -> Result<&Route> {
        match self.table.get(path) {
            Some(route) => {
                debug!(
                    path = %path,
                    handler = %route.mapping().handler_id(),
                    "Route matched"
                );
                Ok(route)
            }
            None => {
                warn!(path = %path, "No route matched");
                Err(MvcError::RouteNotFound {
                    path: path.to_owned(),
                })
            }
        }
    }

    /// Print all registered routes to stdout
    pub fn dump_routes(&self) {
        print!("{}", self.route_listing());
    }

    /// The listing printed by [`Router::dump_routes`]
    #[must_use]
    pub fn route_listing(&self) -> String {
        let mut out = format!("[routes] count={}\n", self.table.len());
        for mapping in self.table.mappings() {
            out.push_str(&format!("[route] {mapping}\n"));
        }
        out
    }

    #[must_use]
    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
