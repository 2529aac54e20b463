use serde::Serialize;
use serde_json::{Map, Value};

/// Forward instruction returned by a handler.
///
/// `data` entries are published as request attributes before forwarding to
/// `url`. A view without a url answers with 404.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelView {
    url: Option<String>,
    data: Map<String, Value>,
}

impl ModelView {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            data: Map::new(),
        }
    }

    /// View with no destination
    #[must_use]
    pub fn without_url() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Add an attribute, serializing `value`.
    pub fn add_object<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> anyhow::Result<()> {
        self.data.insert(key.to_owned(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Builder form of [`ModelView::add_object`] for values already in JSON form.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_owned(), value.into());
        self
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Map<String, Value>) {
        (self.url, self.data)
    }
}
