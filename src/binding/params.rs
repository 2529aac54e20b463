use super::model::{bind_model_erased, Model};
use super::scalar::{ScalarParam, ScalarType};
use super::ParameterSource;
use crate::error::MvcError;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased constructor for a structured parameter.
#[derive(Clone, Copy)]
pub struct ModelBinder {
    type_name: &'static str,
    bind: fn(&dyn ParameterSource, &str) -> Result<Box<dyn Any + Send>, MvcError>,
}

impl ModelBinder {
    fn of<M: Model>() -> Self {
        Self {
            type_name: std::any::type_name::<M>(),
            bind: bind_model_erased::<M>,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn bind(
        &self,
        source: &dyn ParameterSource,
        attribute: &str,
    ) -> Result<Box<dyn Any + Send>, MvcError> {
        (self.bind)(source, attribute)
    }
}

impl fmt::Debug for ModelBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBinder")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// How a handler parameter gets its value.
#[derive(Debug, Clone)]
pub enum BindingKind {
    /// One request value, coerced to `ty`
    Scalar {
        external_name: Option<String>,
        ty: ScalarType,
    },
    /// A [`Model`] built from `attribute.field` request values
    Structured {
        external_name: Option<String>,
        model: ModelBinder,
    },
    /// A fresh [`crate::session::Session`] over the request's session store
    Session,
    /// No binding source; the slot is left unresolved
    Unmatched { type_name: &'static str },
}

/// Descriptor of one handler parameter.
///
/// ```rust
/// use brrtmvc::binding::ParamSpec;
///
/// let id = ParamSpec::scalar::<i64>("id");
/// let name = ParamSpec::scalar::<String>("name").named("emp_name");
/// assert_eq!(id.external_name(), Some("id"));
/// assert_eq!(name.external_name(), Some("emp_name"));
/// ```
#[derive(Debug, Clone)]
pub struct ParamSpec {
    declared_name: Arc<str>,
    kind: BindingKind,
}

impl ParamSpec {
    /// Scalar parameter read from the request value named `name`
    #[must_use]
    pub fn scalar<T: ScalarParam>(name: &str) -> Self {
        Self {
            declared_name: Arc::from(name),
            kind: BindingKind::Scalar {
                external_name: None,
                ty: T::SCALAR_TYPE,
            },
        }
    }

    /// Structured parameter built from `name.<field>` request values
    #[must_use]
    pub fn model<M: Model>(name: &str) -> Self {
        Self {
            declared_name: Arc::from(name),
            kind: BindingKind::Structured {
                external_name: None,
                model: ModelBinder::of::<M>(),
            },
        }
    }

    /// Session capability for the current request
    #[must_use]
    pub fn session(name: &str) -> Self {
        Self {
            declared_name: Arc::from(name),
            kind: BindingKind::Session,
        }
    }

    /// Parameter with no binding source
    #[must_use]
    pub fn unmatched<T: ?Sized + 'static>(name: &str) -> Self {
        Self {
            declared_name: Arc::from(name),
            kind: BindingKind::Unmatched {
                type_name: std::any::type_name::<T>(),
            },
        }
    }

    /// Override the external request name of a scalar or structured parameter.
    ///
    /// Has no effect on session and unmatched parameters. An empty name
    /// falls back to the declared name.
    #[must_use]
    pub fn named(mut self, external: &str) -> Self {
        let external = (!external.is_empty()).then(|| external.to_owned());
        match &mut self.kind {
            BindingKind::Scalar { external_name, .. }
            | BindingKind::Structured { external_name, .. } => *external_name = external,
            BindingKind::Session | BindingKind::Unmatched { .. } => {}
        }
        self
    }

    #[must_use]
    pub fn declared_name(&self) -> &str {
        &self.declared_name
    }

    pub(crate) fn declared_name_arc(&self) -> Arc<str> {
        Arc::clone(&self.declared_name)
    }

    #[must_use]
    pub fn kind(&self) -> &BindingKind {
        &self.kind
    }

    /// Name looked up in the request: the override if any, else the declared name.
    ///
    /// `None` for parameters that are not read from request values.
    #[must_use]
    pub fn external_name(&self) -> Option<&str> {
        match &self.kind {
            BindingKind::Scalar { external_name, .. }
            | BindingKind::Structured { external_name, .. } => {
                Some(external_name.as_deref().unwrap_or(&self.declared_name))
            }
            BindingKind::Session | BindingKind::Unmatched { .. } => None,
        }
    }
}
