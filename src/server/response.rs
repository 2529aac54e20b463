/// Response produced by the dispatch core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MvcResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
    /// Destination of the server-side forward that produced `body`, if any
    pub forwarded_to: Option<String>,
}

impl MvcResponse {
    #[must_use]
    pub fn new(status: u16, content_type: &str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: content_type.to_owned(),
            body: body.into(),
            forwarded_to: None,
        }
    }

    #[must_use]
    pub fn html(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, "text/html; charset=utf-8", body)
    }

    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, "text/plain; charset=utf-8", body)
    }

    #[must_use]
    pub fn is_forward(&self) -> bool {
        self.forwarded_to.is_some()
    }
}

impl Default for MvcResponse {
    fn default() -> Self {
        Self::html(200, String::new())
    }
}

pub(crate) fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}
