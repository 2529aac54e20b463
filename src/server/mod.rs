//! # Server Module
//!
//! Request plumbing around the dispatch core.
//!
//! - [`MvcRequest`] / [`MvcResponse`]: what the dispatcher consumes and produces
//! - [`MvcService`]: `http::Request<String>` in, `http::Response<String>` out;
//!   strips the context path, parses parameters, tracks sessions
//! - [`HttpServer`]: a `tiny_http` listener with a fixed worker pool
//!
//! ```rust,no_run
//! use brrtmvc::server::{HttpServer, MvcService};
//! # fn run(dispatcher: std::sync::Arc<brrtmvc::dispatcher::Dispatcher>) -> std::io::Result<()> {
//! let service = MvcService::new(dispatcher, "/app");
//! let handle = HttpServer::new(service, 4).start("127.0.0.1:8080")?;
//! handle.wait_ready()?;
//! handle.join().ok();
//! # Ok(())
//! # }
//! ```

mod http_server;
mod request;
mod response;
mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_form_params, parse_query_params, relative_path, MvcRequest};
pub use response::MvcResponse;
pub(crate) use response::status_reason;
pub use service::{MvcService, REQUEST_ID_HEADER, SESSION_COOKIE};
