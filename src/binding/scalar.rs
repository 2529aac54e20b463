use crate::error::MvcError;
use std::fmt;

/// Declared type of a scalar handler parameter or model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Text, passed through untouched; tolerates an absent value
    String,
    /// 32-bit signed integer, base-10
    Int,
    /// 64-bit signed integer, base-10
    Long,
    /// 64-bit float
    Double,
    /// `true` / `false`
    Bool,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::String => "string",
            ScalarType::Int => "int",
            ScalarType::Long => "long",
            ScalarType::Double => "double",
            ScalarType::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// A request value after coercion to its declared [`ScalarType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Text(Option<String>),
    Int(i32),
    Long(i64),
    Double(f64),
    Bool(bool),
}

impl ScalarValue {
    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ScalarValue::Text(_) => ScalarType::String,
            ScalarValue::Int(_) => ScalarType::Int,
            ScalarValue::Long(_) => ScalarType::Long,
            ScalarValue::Double(_) => ScalarType::Double,
            ScalarValue::Bool(_) => ScalarType::Bool,
        }
    }
}

/// Coerce the raw request value for `parameter` into `ty`.
///
/// Only `String` accepts an absent value. Numeric and boolean types reject
/// both absent and malformed text with [`MvcError::ParameterBinding`].
pub fn coerce(parameter: &str, raw: Option<&str>, ty: ScalarType) -> Result<ScalarValue, MvcError> {
    if ty == ScalarType::String {
        return Ok(ScalarValue::Text(raw.map(str::to_owned)));
    }

    let Some(text) = raw else {
        return Err(MvcError::binding(
            parameter,
            format!("no value supplied for {ty} parameter"),
        ));
    };

    match ty {
        ScalarType::Int => text
            .parse::<i32>()
            .map(ScalarValue::Int)
            .map_err(|_| invalid(parameter, text, ty)),
        ScalarType::Long => text
            .parse::<i64>()
            .map(ScalarValue::Long)
            .map_err(|_| invalid(parameter, text, ty)),
        ScalarType::Double => text
            .parse::<f64>()
            .map(ScalarValue::Double)
            .map_err(|_| invalid(parameter, text, ty)),
        ScalarType::Bool => parse_bool(text)
            .map(ScalarValue::Bool)
            .ok_or_else(|| invalid(parameter, text, ty)),
        ScalarType::String => Ok(ScalarValue::Text(Some(text.to_owned()))),
    }
}

fn invalid(parameter: &str, text: &str, ty: ScalarType) -> MvcError {
    MvcError::binding(parameter, format!("'{text}' is not a valid {ty}"))
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Rust types that can be bound from a single request value.
///
/// Implemented for `String`, `Option<String>`, `i32`, `i64`, `f64` and `bool`.
/// Model field types must implement this trait for `#[derive(Model)]`.
///
/// An absent string value reads as `""` through `String` and as `None`
/// through `Option<String>`.
pub trait ScalarParam: Sized + Send + 'static {
    /// Coercion target used when reading the request value
    const SCALAR_TYPE: ScalarType;

    /// Extract `Self` from a coerced value; `None` on a type mismatch
    fn from_scalar(value: ScalarValue) -> Option<Self>;
}

impl ScalarParam for String {
    const SCALAR_TYPE: ScalarType = ScalarType::String;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Text(text) => Some(text.unwrap_or_default()),
            _ => None,
        }
    }
}

impl ScalarParam for Option<String> {
    const SCALAR_TYPE: ScalarType = ScalarType::String;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl ScalarParam for i32 {
    const SCALAR_TYPE: ScalarType = ScalarType::Int;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl ScalarParam for i64 {
    const SCALAR_TYPE: ScalarType = ScalarType::Long;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Long(v) => Some(v),
            _ => None,
        }
    }
}

impl ScalarParam for f64 {
    const SCALAR_TYPE: ScalarType = ScalarType::Double;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Double(v) => Some(v),
            _ => None,
        }
    }
}

impl ScalarParam for bool {
    const SCALAR_TYPE: ScalarType = ScalarType::Bool;

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}
