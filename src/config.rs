//! # Configuration Module
//!
//! Bootstrap configuration, loaded from a YAML file and overridable from the
//! environment.
//!
//! ```yaml
//! base_package: demo_app::controllers
//! context_path: /app
//! http:
//!   addr: 0.0.0.0:8080
//!   workers: 4
//! views:
//!   dir: ./views
//! sessions:
//!   capacity: 10000
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `BRRTMVC_BASE_PACKAGE` | `base_package` |
//! | `BRRTMVC_CONTEXT_PATH` | `context_path` |
//! | `BRRTMVC_ADDR` | `http.addr` |
//! | `BRRTMVC_WORKERS` | `http.workers` |
//! | `BRRTMVC_VIEWS_DIR` | `views.dir` |
//! | `BRRTMVC_SESSION_CAPACITY` | `sessions.capacity` |

use crate::error::MvcError;
use crate::session::DEFAULT_SESSION_CAPACITY;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by the CLI
pub const DEFAULT_CONFIG_PATH: &str = "config/app.yaml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// Package whose controllers are scanned; required for scanning
    #[serde(default)]
    pub base_package: Option<String>,

    /// Prefix stripped from every request URI
    #[serde(default)]
    pub context_path: String,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub views: ViewsConfig,

    #[serde(default)]
    pub sessions: SessionsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            workers: default_workers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewsConfig {
    #[serde(default = "default_views_dir")]
    pub dir: PathBuf,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            dir: default_views_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionsConfig {
    /// Live sessions kept before the least recently used is evicted
    #[serde(default = "default_session_capacity")]
    pub capacity: usize,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            capacity: default_session_capacity(),
        }
    }
}

fn default_session_capacity() -> usize {
    DEFAULT_SESSION_CAPACITY
}

fn default_addr() -> String {
    "127.0.0.1:8080".to_owned()
}

fn default_workers() -> usize {
    4
}

fn default_views_dir() -> PathBuf {
    PathBuf::from("views")
}

impl AppConfig {
    /// Parse a YAML document.
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse application config")
    }

    /// Read and parse `path`.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read application config: {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load `path` when it exists (defaults otherwise), then apply the
    /// process environment.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.normalize();
        Ok(config)
    }

    /// Apply `BRRTMVC_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("BRRTMVC_BASE_PACKAGE") {
            self.base_package = Some(base);
        }
        if let Some(context_path) = lookup("BRRTMVC_CONTEXT_PATH") {
            self.context_path = context_path;
        }
        if let Some(addr) = lookup("BRRTMVC_ADDR") {
            self.http.addr = addr;
        }
        if let Some(workers) = lookup("BRRTMVC_WORKERS") {
            self.http.workers = workers
                .trim()
                .parse()
                .with_context(|| format!("BRRTMVC_WORKERS is not a number: {workers}"))?;
        }
        if let Some(dir) = lookup("BRRTMVC_VIEWS_DIR") {
            self.views.dir = PathBuf::from(dir);
        }
        if let Some(capacity) = lookup("BRRTMVC_SESSION_CAPACITY") {
            self.sessions.capacity = capacity
                .trim()
                .parse()
                .with_context(|| format!("BRRTMVC_SESSION_CAPACITY is not a number: {capacity}"))?;
        }
        Ok(())
    }

    /// Trim the context path to `""` or `/segment` form and keep at least one
    /// worker and one session slot.
    pub fn normalize(&mut self) {
        let trimmed = self.context_path.trim().trim_end_matches('/');
        self.context_path = if trimmed.is_empty() {
            String::new()
        } else if trimmed.starts_with('/') {
            trimmed.to_owned()
        } else {
            format!("/{trimmed}")
        };
        self.http.workers = self.http.workers.max(1);
        self.sessions.capacity = self.sessions.capacity.max(1);
    }

    /// The configured base package.
    ///
    /// # Errors
    ///
    /// [`MvcError::Configuration`] when no base package is set.
    pub fn base_package(&self) -> Result<&str, MvcError> {
        match self.base_package.as_deref().map(str::trim) {
            Some(base) if !base.is_empty() => Ok(base),
            _ => Err(MvcError::Configuration(
                "base_package is not configured (set it in the config file or BRRTMVC_BASE_PACKAGE)"
                    .to_owned(),
            )),
        }
    }
}
