use crate::binding::ParamSpec;
use crate::controller::ErasedHandler;
use std::fmt;
use std::sync::Arc;

/// Identity of one handler: the path it answers and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mapping {
    path: String,
    controller: String,
    method: String,
}

impl Mapping {
    #[must_use]
    pub fn new(path: impl Into<String>, controller: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            controller: controller.into(),
            method: method.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fully qualified controller type name
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// `controller.method`, used in logs and error messages
    #[must_use]
    pub fn handler_id(&self) -> String {
        format!("{}.{}", self.controller, self.method)
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}.{}", self.path, self.controller, self.method)
    }
}

/// An entry of the route table: mapping, parameter descriptors, callable.
pub struct Route {
    mapping: Mapping,
    params: Arc<[ParamSpec]>,
    call: ErasedHandler,
}

impl Route {
    pub(crate) fn new(mapping: Mapping, params: Vec<ParamSpec>, call: ErasedHandler) -> Self {
        Self {
            mapping,
            params: params.into(),
            call,
        }
    }

    #[must_use]
    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub(crate) fn handler(&self) -> &ErasedHandler {
        &self.call
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("mapping", &self.mapping)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_display() {
        let m = Mapping::new("/emp", "app::Emp", "list");
        assert_eq!(m.to_string(), "/emp -> app::Emp.list");
        assert_eq!(m.handler_id(), "app::Emp.list");
    }
}
