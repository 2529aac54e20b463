use crate::binding::ParameterSource;
use crate::ids::RequestId;
use crate::session::{MemorySessionStore, SessionStore};
use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Request state seen by the dispatch core.
///
/// Carries the relative path, the single-valued parameter store, the
/// request attribute scope filled from view data, and the session store
/// the host selected for this client.
pub struct MvcRequest {
    /// HTTP method (informational; routing is by path only)
    pub method: Method,
    request_id: RequestId,
    path: String,
    parameters: HashMap<String, String>,
    attributes: HashMap<String, Value>,
    session: Arc<dyn SessionStore>,
}

impl MvcRequest {
    /// Request for `path` with an empty parameter store and a private session.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            request_id: RequestId::new(),
            path: path.into(),
            parameters: HashMap::new(),
            attributes: HashMap::new(),
            session: Arc::new(MemorySessionStore::new()),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Merge `params`; keys already present keep their first value.
    #[must_use]
    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        for (k, v) in params {
            self.parameters.entry(k).or_insert(v);
        }
        self
    }

    #[must_use]
    pub fn with_session(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session = store;
        self
    }

    /// Path relative to the application context, without the query string
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Single request value for `key`
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    /// Shared handle to this request's session store
    #[must_use]
    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.session)
    }
}

impl ParameterSource for MvcRequest {
    fn parameter(&self, key: &str) -> Option<&str> {
        MvcRequest::parameter(self, key)
    }
}

impl fmt::Debug for MvcRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MvcRequest")
            .field("method", &self.method)
            .field("request_id", &self.request_id)
            .field("path", &self.path)
            .field("parameters", &self.parameters)
            .field("attributes", &self.attributes)
            .field("session", &self.session.id())
            .finish()
    }
}

/// Strip the application context prefix and the query string from a request URI.
///
/// Returns `None` when `uri` does not live under `context_path`.
///
/// ```rust
/// use brrtmvc::server::relative_path;
///
/// assert_eq!(relative_path("/app", "/app/emp/list?x=1"), Some("/emp/list"));
/// assert_eq!(relative_path("", "/emp/list"), Some("/emp/list"));
/// assert_eq!(relative_path("/app", "/other"), None);
/// ```
#[must_use]
pub fn relative_path<'a>(context_path: &str, uri: &'a str) -> Option<&'a str> {
    let path = uri.split('?').next().unwrap_or(uri);
    let context = context_path.trim_end_matches('/');
    let rest = path.strip_prefix(context)?;
    if rest.is_empty() {
        return Some("/");
    }
    // "/application" must not match context "/app"
    rest.starts_with('/').then_some(rest)
}

/// Parse the query string of `uri` into a single-valued map.
///
/// The first occurrence of a repeated key wins.
#[must_use]
pub fn parse_query_params(uri: &str) -> HashMap<String, String> {
    match uri.split_once('?') {
        Some((_, query)) => parse_form_params(query.as_bytes()),
        None => HashMap::new(),
    }
}

/// Parse an `application/x-www-form-urlencoded` body into a single-valued map.
///
/// The first occurrence of a repeated key wins.
#[must_use]
pub fn parse_form_params(body: &[u8]) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (k, v) in url::form_urlencoded::parse(body) {
        params.entry(k.into_owned()).or_insert_with(|| v.into_owned());
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_variants() {
        assert_eq!(relative_path("/app/", "/app/emp"), Some("/emp"));
        assert_eq!(relative_path("/app", "/app"), Some("/"));
        assert_eq!(relative_path("/app", "/application/emp"), None);
        assert_eq!(relative_path("", "/?a=b"), Some("/"));
    }

    #[test]
    fn test_query_first_value_wins() {
        let params = parse_query_params("/emp?id=1&id=2&name=J%C3%BCrgen+K");
        assert_eq!(params.get("id").map(String::as_str), Some("1"));
        assert_eq!(params.get("name").map(String::as_str), Some("Jürgen K"));
    }

    #[test]
    fn test_form_params_dotted_keys() {
        let params = parse_form_params(b"emp.name=Ann&emp.age=30");
        assert_eq!(params.get("emp.age").map(String::as_str), Some("30"));
    }

    #[test]
    fn test_with_params_keeps_existing() {
        let mut extra = HashMap::new();
        extra.insert("id".to_string(), "9".to_string());
        let req = MvcRequest::new("/x").with_param("id", "1").with_params(extra);
        assert_eq!(req.parameter("id"), Some("1"));
    }
}
