use crate::error::MvcError;
use crate::server::{MvcRequest, MvcResponse};
use minijinja::Environment;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Server-side forward performed by the host.
///
/// Called after the view data has been published into the request's
/// attribute scope. Implementations fill `response` with whatever the
/// destination renders.
pub trait Forwarder: Send + Sync {
    fn forward(&self, url: &str, request: &MvcRequest, response: &mut MvcResponse) -> Result<(), MvcError>;
}

/// Renders a view file from a directory as a minijinja template whose
/// context is the request's attribute scope.
///
/// Templates named `*.html`, `*.htm` or `*.xml` are auto-escaped.
/// Undefined attributes render as empty.
#[derive(Debug, Clone)]
pub struct TemplateForwarder {
    root: PathBuf,
}

impl TemplateForwarder {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let relative = Path::new(url.trim_start_matches('/'));
        // only plain segments; no "..", no absolute components
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl Forwarder for TemplateForwarder {
    fn forward(&self, url: &str, request: &MvcRequest, response: &mut MvcResponse) -> Result<(), MvcError> {
        let path = self.resolve(url).ok_or_else(|| MvcError::Forward {
            url: url.to_owned(),
            message: "destination escapes the views directory".to_owned(),
        })?;

        let source = std::fs::read_to_string(&path).map_err(|e| {
            warn!(url = %url, path = %path.display(), error = %e, "View not readable");
            MvcError::Forward {
                url: url.to_owned(),
                message: e.to_string(),
            }
        })?;

        let body = render_template(url, &source, request.attributes()).map_err(|e| {
            warn!(url = %url, error = %e, "View rendering failed");
            MvcError::Forward {
                url: url.to_owned(),
                message: e.to_string(),
            }
        })?;

        response.status = 200;
        response.content_type = "text/html; charset=utf-8".to_owned();
        response.body = body;
        response.forwarded_to = Some(url.to_owned());

        debug!(url = %url, path = %path.display(), "Forward rendered");
        Ok(())
    }
}

// The template is registered under its url so the extension drives auto-escaping.
fn render_template(
    url: &str,
    source: &str,
    attributes: &HashMap<String, Value>,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(url, source)?;
    env.get_template(url)?.render(attributes)
}

/// One forward observed by a [`RecordingForwarder`].
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardRecord {
    pub url: String,
    /// Request attributes at the moment of the forward
    pub attributes: HashMap<String, Value>,
}

/// Forwarder that records every call instead of rendering.
///
/// Useful for hosts that render elsewhere and for tests.
#[derive(Debug, Default)]
pub struct RecordingForwarder {
    records: Mutex<Vec<ForwardRecord>>,
}

impl RecordingForwarder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> Vec<ForwardRecord> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Forwarder for RecordingForwarder {
    fn forward(&self, url: &str, request: &MvcRequest, response: &mut MvcResponse) -> Result<(), MvcError> {
        let record = ForwardRecord {
            url: url.to_owned(),
            attributes: request.attributes().clone(),
        };
        self.records
            .lock()
            .map_err(|_| MvcError::Forward {
                url: url.to_owned(),
                message: "forward log poisoned".to_owned(),
            })?
            .push(record);
        response.status = 200;
        response.forwarded_to = Some(url.to_owned());
        Ok(())
    }
}
