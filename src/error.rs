use std::fmt;

/// Errors raised while building the route table or dispatching a request.
///
/// `Configuration` is fatal at startup. The remaining variants are produced
/// per request and are mapped to HTTP statuses by [`MvcError::status`].
#[derive(Debug)]
pub enum MvcError {
    /// Invalid bootstrap state: missing base package, absent controller set,
    /// absent or duplicate route path, unsupported handler return type.
    Configuration(String),
    /// No handler is mapped to the requested path
    RouteNotFound {
        /// Relative path that was looked up
        path: String,
    },
    /// A request value could not be bound to a handler parameter
    ParameterBinding {
        /// Declared name of the parameter (or `attribute.field` for model fields)
        parameter: String,
        /// Human readable reason
        message: String,
    },
    /// Controller construction or handler execution failed
    Invocation {
        /// Handler identifier (`controller.method`)
        handler: String,
        /// Underlying failure
        source: anyhow::Error,
    },
    /// The handler returned something other than text or a [`crate::view::ModelView`]
    UnsupportedResultType {
        /// Concrete Rust type name of the returned value
        type_name: &'static str,
    },
    /// The forwarder could not render the destination view
    Forward {
        /// Forward destination
        url: String,
        /// Human readable reason
        message: String,
    },
}

impl MvcError {
    pub(crate) fn binding(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        MvcError::ParameterBinding {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// HTTP status the host should answer with when this error escapes dispatch.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            MvcError::RouteNotFound { .. } => 404,
            MvcError::ParameterBinding { .. } => 400,
            MvcError::Configuration(_)
            | MvcError::Invocation { .. }
            | MvcError::UnsupportedResultType { .. }
            | MvcError::Forward { .. } => 500,
        }
    }
}

impl fmt::Display for MvcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MvcError::Configuration(message) => write!(f, "configuration error: {message}"),
            MvcError::RouteNotFound { path } => {
                write!(f, "No associated method found for URL: {path}")
            }
            MvcError::ParameterBinding { parameter, message } => {
                write!(f, "cannot bind parameter '{parameter}': {message}")
            }
            MvcError::Invocation { handler, source } => {
                write!(f, "invocation of {handler} failed: {source:#}")
            }
            MvcError::UnsupportedResultType { type_name } => {
                write!(f, "Unsupported return type: {type_name}")
            }
            MvcError::Forward { url, message } => {
                write!(f, "forward to '{url}' failed: {message}")
            }
        }
    }
}

impl std::error::Error for MvcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MvcError::Invocation { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

/// Convenience alias used across the crate
pub type Result<T, E = MvcError> = std::result::Result<T, E>;
