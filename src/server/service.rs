use super::request::{parse_form_params, parse_query_params, relative_path, MvcRequest};
use super::response::MvcResponse;
use crate::dispatcher::Dispatcher;
use crate::error::MvcError;
use crate::ids::RequestId;
use crate::session::{SessionManager, SessionStore};
use http::header::{HeaderValue, CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{Request, Response, StatusCode};
use std::sync::Arc;
use tracing::debug;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "BRRTMVCSESSIONID";

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Adapts `http` requests to the [`Dispatcher`].
///
/// Strips the context path, fills the parameter store from the query string
/// and an urlencoded body, and attaches the session named by the
/// `BRRTMVCSESSIONID` cookie (creating one when needed).
#[derive(Debug, Clone)]
pub struct MvcService {
    dispatcher: Arc<Dispatcher>,
    sessions: Arc<SessionManager>,
    context_path: String,
}

impl MvcService {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>, context_path: &str) -> Self {
        Self {
            dispatcher,
            sessions: Arc::new(SessionManager::new()),
            context_path: context_path.trim_end_matches('/').to_owned(),
        }
    }

    /// Keep at most `capacity` live sessions
    #[must_use]
    pub fn with_session_capacity(mut self, capacity: usize) -> Self {
        self.sessions = Arc::new(SessionManager::with_capacity(capacity));
        self
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    pub fn call(&self, req: Request<String>) -> Response<String> {
        let request_id = RequestId::from_header_or_new(
            req.headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
        );
        let uri = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.uri().path().to_owned(), |pq| pq.as_str().to_owned());

        let Some(path) = relative_path(&self.context_path, &uri) else {
            debug!(request_id = %request_id, uri = %uri, "Request outside context path");
            let err = MvcError::RouteNotFound { path: uri.clone() };
            return into_http(MvcResponse::text(err.status(), err.to_string()), request_id, None);
        };

        let mut params = parse_query_params(&uri);
        if is_form(&req) {
            for (k, v) in parse_form_params(req.body().as_bytes()) {
                params.entry(k).or_insert(v);
            }
        }

        let (store, created) = self.sessions.get_or_create(session_cookie(&req).as_deref());
        let new_cookie = created.then(|| self.session_cookie_value(&store.id()));

        let mut request = MvcRequest::new(path)
            .with_method(req.method().clone())
            .with_request_id(request_id)
            .with_params(params)
            .with_session(store);

        let response = self.dispatcher.handle(&mut request);
        into_http(response, request_id, new_cookie)
    }

    fn session_cookie_value(&self, id: &str) -> String {
        let path = if self.context_path.is_empty() {
            "/"
        } else {
            &self.context_path
        };
        format!("{SESSION_COOKIE}={id}; Path={path}; HttpOnly")
    }
}

fn is_form(req: &Request<String>) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

/// Value of the session cookie, if the request carries one
fn session_cookie(req: &Request<String>) -> Option<String> {
    req.headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_owned())
}

fn into_http(response: MvcResponse, request_id: RequestId, cookie: Option<String>) -> Response<String> {
    let MvcResponse {
        status,
        content_type,
        body,
        ..
    } = response;

    let mut res = Response::new(body);
    *res.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let headers = res.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&content_type) {
        headers.insert(CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        headers.insert(REQUEST_ID_HEADER, value);
    }
    if let Some(value) = cookie.and_then(|c| HeaderValue::from_str(&c).ok()) {
        headers.insert(SET_COOKIE, value);
    }
    res
}
