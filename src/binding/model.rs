use super::scalar::{coerce, ScalarType, ScalarValue};
use super::ParameterSource;
use crate::error::MvcError;
use std::any::Any;
use tracing::debug;

/// One bindable field of a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelField {
    /// Rust identifier of the field, passed back to [`Model::assign`]
    pub ident: &'static str,
    /// Name used in request keys (`attribute.name`)
    pub name: &'static str,
    /// Coercion target for the request value
    pub ty: ScalarType,
}

impl ModelField {
    #[must_use]
    pub const fn new(ident: &'static str, name: &'static str, ty: ScalarType) -> Self {
        Self { ident, name, ty }
    }
}

/// A compound handler parameter populated from `attribute.field` request keys.
///
/// Usually derived:
///
/// ```rust
/// use brrtmvc::Model;
///
/// #[derive(Debug, Default, Model)]
/// struct Employee {
///     name: String,
///     #[field(name = "years")]
///     age: i32,
/// }
/// ```
///
/// Fields are written through [`Model::assign`], so hand-written
/// implementations keep full control over their invariants.
pub trait Model: Sized + Send + 'static {
    /// Construct the empty instance that binding starts from
    fn instantiate() -> anyhow::Result<Self>;

    /// Fields that take part in binding
    fn fields() -> Vec<ModelField>;

    /// Store a coerced value into the field named by `ident`
    fn assign(&mut self, ident: &str, value: ScalarValue) -> anyhow::Result<()>;
}

/// Build a model of type `M` from the request values prefixed with `attribute.`.
///
/// Fields without a request value keep the value set by [`Model::instantiate`].
pub fn bind_model<M: Model>(source: &dyn ParameterSource, attribute: &str) -> Result<M, MvcError> {
    let mut instance = M::instantiate().map_err(|e| {
        MvcError::binding(
            attribute,
            format!(
                "unable to instantiate parameter {}: {e}",
                std::any::type_name::<M>()
            ),
        )
    })?;

    for field in M::fields() {
        let key = format!("{attribute}.{}", field.name);
        let Some(raw) = source.parameter(&key) else {
            continue;
        };
        let value = coerce(&key, Some(raw), field.ty)?;
        instance
            .assign(field.ident, value)
            .map_err(|e| MvcError::binding(&key, format!("unable to set field value: {e}")))?;
    }

    debug!(
        attribute = %attribute,
        model = std::any::type_name::<M>(),
        "Model parameter bound"
    );

    Ok(instance)
}

pub(crate) fn bind_model_erased<M: Model>(
    source: &dyn ParameterSource,
    attribute: &str,
) -> Result<Box<dyn Any + Send>, MvcError> {
    bind_model::<M>(source, attribute).map(|m| Box::new(m) as Box<dyn Any + Send>)
}
