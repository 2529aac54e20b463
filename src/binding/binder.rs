use super::arguments::{Arguments, BoundValue};
use super::params::{BindingKind, ParamSpec};
use super::scalar::coerce;
use crate::error::MvcError;
use crate::server::MvcRequest;
use crate::session::Session;
use tracing::{debug, warn};

/// Resolves every parameter of a handler from the current request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterBinder;

impl ParameterBinder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Bind `params` in declaration order.
    ///
    /// Stops at the first scalar or structured parameter that fails to bind.
    /// Session parameters always receive a fresh wrapper; unmatched
    /// parameters are left unresolved.
    pub fn bind(&self, params: &[ParamSpec], request: &MvcRequest) -> Result<Arguments, MvcError> {
        let mut args = Arguments::new();

        for param in params {
            let value = match param.kind() {
                BindingKind::Scalar { ty, .. } => {
                    let name = param.external_name().unwrap_or(param.declared_name());
                    let raw = request.parameter(name);
                    BoundValue::Scalar(coerce(name, raw, *ty).inspect_err(|e| {
                        warn!(parameter = %name, error = %e, "Scalar binding failed");
                    })?)
                }
                BindingKind::Structured { model, .. } => {
                    let attribute = param.external_name().unwrap_or(param.declared_name());
                    BoundValue::Model(model.bind(request, attribute).inspect_err(|e| {
                        warn!(
                            attribute = %attribute,
                            model = model.type_name(),
                            error = %e,
                            "Model binding failed"
                        );
                    })?)
                }
                BindingKind::Session => {
                    BoundValue::Session(Session::new(request.session_store()))
                }
                BindingKind::Unmatched { type_name } => {
                    debug!(
                        parameter = %param.declared_name(),
                        type_name = %type_name,
                        "Parameter has no binding source; left unresolved"
                    );
                    BoundValue::Unresolved
                }
            };
            args.push(param.declared_name_arc(), value);
        }

        Ok(args)
    }
}
