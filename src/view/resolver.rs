use super::forward::Forwarder;
use super::model_view::ModelView;
use crate::error::MvcError;
use crate::server::{MvcRequest, MvcResponse};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Notice appended to every plain-text handler result.
pub const SUCCESS_NOTICE: &str = "Method executed successfully.";

/// Body of the 404 answered for a view without destination.
pub const VIEW_NOT_FOUND: &str = "The requested view could not be found";

/// A handler's return value with its concrete type erased.
pub struct ReturnValue {
    type_name: &'static str,
    value: Box<dyn Any + Send>,
}

impl ReturnValue {
    #[must_use]
    pub fn new<R: Any + Send>(value: R) -> Self {
        Self {
            type_name: std::any::type_name::<R>(),
            value: Box::new(value),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReturnValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Whether handlers may return `R`: text (`String`, `&'static str`) or [`ModelView`].
#[must_use]
pub fn is_supported_result<R: Any>() -> bool {
    let id = TypeId::of::<R>();
    id == TypeId::of::<String>() || id == TypeId::of::<&'static str>() || id == TypeId::of::<ModelView>()
}

/// Turns handler return values into responses.
#[derive(Clone)]
pub struct ResultResolver {
    forwarder: Arc<dyn Forwarder>,
}

impl ResultResolver {
    #[must_use]
    pub fn new(forwarder: Arc<dyn Forwarder>) -> Self {
        Self { forwarder }
    }

    /// Text is written verbatim followed by [`SUCCESS_NOTICE`]. A [`ModelView`]
    /// without url answers 404; otherwise its data is copied into the request
    /// attributes and the request is forwarded.
    pub fn resolve(&self, result: ReturnValue, request: &mut MvcRequest) -> Result<MvcResponse, MvcError> {
        let ReturnValue { type_name, value } = result;

        let value = match value.downcast::<String>() {
            Ok(text) => return Ok(text_response(&text)),
            Err(value) => value,
        };
        let value = match value.downcast::<&'static str>() {
            Ok(text) => return Ok(text_response(&text)),
            Err(value) => value,
        };
        match value.downcast::<ModelView>() {
            Ok(view) => self.forward(*view, request),
            Err(_) => {
                warn!(type_name = %type_name, "Handler returned an unsupported type");
                Err(MvcError::UnsupportedResultType { type_name })
            }
        }
    }

    fn forward(&self, view: ModelView, request: &mut MvcRequest) -> Result<MvcResponse, MvcError> {
        let (url, data) = view.into_parts();
        let Some(url) = url else {
            debug!(path = %request.path(), "View without destination");
            return Ok(MvcResponse::text(404, VIEW_NOT_FOUND));
        };

        let published = data.len();
        for (key, value) in data {
            request.set_attribute(key, value);
        }

        let mut response = MvcResponse::default();
        self.forwarder.forward(&url, request, &mut response)?;
        debug!(url = %url, attributes = published, "Request forwarded");
        Ok(response)
    }
}

impl fmt::Debug for ResultResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultResolver").finish_non_exhaustive()
    }
}

fn text_response(text: &str) -> MvcResponse {
    MvcResponse::text(200, format!("{text}\n{SUCCESS_NOTICE}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RecordingForwarder;
    use serde_json::json;

    fn resolver() -> (Arc<RecordingForwarder>, ResultResolver) {
        let forwarder = Arc::new(RecordingForwarder::new());
        let resolver = ResultResolver::new(Arc::clone(&forwarder) as Arc<dyn Forwarder>);
        (forwarder, resolver)
    }

    #[test]
    fn test_text_is_written_verbatim() {
        let (_, resolver) = resolver();
        let mut req = MvcRequest::new("/hello");
        let res = resolver
            .resolve(ReturnValue::new("<b>hi</b>".to_string()), &mut req)
            .unwrap();
        assert_eq!(res.status, 200);
        assert_eq!(res.content_type, "text/plain; charset=utf-8");
        assert_eq!(res.body, format!("<b>hi</b>\n{SUCCESS_NOTICE}"));
    }

    #[test]
    fn test_static_str_is_text() {
        let (_, resolver) = resolver();
        let mut req = MvcRequest::new("/hello");
        let res = resolver.resolve(ReturnValue::new("ok"), &mut req).unwrap();
        assert!(res.body.starts_with("ok\n"));
    }

    #[test]
    fn test_view_without_url_is_not_found() {
        let (forwarder, resolver) = resolver();
        let mut req = MvcRequest::new("/v");
        let view = ModelView::without_url().with("k", json!(1));
        let res = resolver.resolve(ReturnValue::new(view), &mut req).unwrap();
        assert_eq!(res.status, 404);
        assert_eq!(res.body, VIEW_NOT_FOUND);
        assert!(forwarder.records().is_empty());
        assert!(req.attribute("k").is_none());
    }

    #[test]
    fn test_view_publishes_before_forward() {
        let (forwarder, resolver) = resolver();
        let mut req = MvcRequest::new("/v");
        let view = ModelView::new("/emp.html")
            .with("name", json!("Ann"))
            .with("age", json!(30));
        let res = resolver.resolve(ReturnValue::new(view), &mut req).unwrap();

        assert_eq!(res.forwarded_to.as_deref(), Some("/emp.html"));
        let records = forwarder.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attributes.get("name"), Some(&json!("Ann")));
        assert_eq!(records[0].attributes.get("age"), Some(&json!(30)));
        assert_eq!(req.attribute("age"), Some(&json!(30)));
    }

    #[test]
    fn test_other_types_are_rejected() {
        let (_, resolver) = resolver();
        let mut req = MvcRequest::new("/n");
        let err = resolver.resolve(ReturnValue::new(7_i32), &mut req).unwrap_err();
        match err {
            MvcError::UnsupportedResultType { type_name } => assert_eq!(type_name, "i32"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_supported_result_types() {
        assert!(is_supported_result::<String>());
        assert!(is_supported_result::<&'static str>());
        assert!(is_supported_result::<ModelView>());
        assert!(!is_supported_result::<u64>());
    }
}
