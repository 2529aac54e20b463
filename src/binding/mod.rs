//! # Binding Module
//!
//! Turns request values into handler arguments.
//!
//! Every handler declares its parameters as a list of [`ParamSpec`]s. At
//! dispatch time the [`ParameterBinder`] walks that list and produces one
//! [`BoundValue`] per parameter:
//!
//! | Kind | Source | Failure |
//! |------|--------|---------|
//! | scalar | request value `name` | malformed or absent numeric/bool → `ParameterBinding` |
//! | structured | request values `name.<field>` | instantiation or field coercion → `ParameterBinding` |
//! | session | the request's session store | never |
//! | unmatched | nothing | never; slot left unresolved |
//!
//! Scalar coercion supports `String`, `i32`, `i64`, `f64` and `bool`
//! (see [`coerce`]). Structured parameters implement [`Model`], usually
//! through `#[derive(Model)]`.

mod arguments;
mod binder;
mod model;
mod params;
mod scalar;

pub use arguments::{Arguments, BoundValue, MAX_INLINE_ARGS};
pub use binder::ParameterBinder;
pub use model::{bind_model, Model, ModelField};
pub use params::{BindingKind, ModelBinder, ParamSpec};
pub use scalar::{coerce, ScalarParam, ScalarType, ScalarValue};

use std::collections::HashMap;

/// Single-valued request parameter store.
pub trait ParameterSource {
    /// Value for the exact key, if present
    fn parameter(&self, key: &str) -> Option<&str>;
}

impl ParameterSource for HashMap<String, String> {
    fn parameter(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}
